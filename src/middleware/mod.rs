//! HTTP middleware components.
//!
//! The control routes are guarded in a fixed order:
//! 1. Authentication (401 on failure)
//! 2. Rate limiting per route group (429 on failure)
//!
//! Both short-circuit before the handler, so rejected requests never reach the pin.

/// Basic authentication guard
pub mod auth;
/// Route-group rate-limit guard
pub mod rate_limit;
