//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives the shared application state
//! 2. Runs the requested activation pattern (or reports status)
//! 3. Returns HTTP response (JSON, status code)

/// Lock / unlock / engine endpoints
pub mod actions;
/// Service health endpoint
pub mod health;
