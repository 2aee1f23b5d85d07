//! Process-wide state shared with every handler.
//!
//! Built once at startup and handed to the router; handlers and guards
//! receive it through axum's `State` extractor instead of globals.

use crate::services::{
    authenticator::Authenticator, rate_limiter::RateLimiter, sequencer::Sequencer,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub rate_limiter: Arc<RateLimiter>,
    pub sequencer: Sequencer,
    /// BCM number of the controlled pin, reported by /health
    pub gpio_pin: u8,
}

impl AppState {
    pub fn new(
        authenticator: Authenticator,
        rate_limiter: RateLimiter,
        sequencer: Sequencer,
        gpio_pin: u8,
    ) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            rate_limiter: Arc::new(rate_limiter),
            sequencer,
            gpio_pin,
        }
    }
}
