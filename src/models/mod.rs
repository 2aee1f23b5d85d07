//! Data models shared by handlers and services.

/// Activation request, route groups and response bodies
pub mod action;
