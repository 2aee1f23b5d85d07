//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers:
//! pin actuation, activation patterns, rate limiting and credential checks.

pub mod actuator;
pub mod authenticator;
pub mod rate_limiter;
pub mod sequencer;
