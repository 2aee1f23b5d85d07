//! Health check endpoint for service monitoring.

use crate::state::AppState;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response.
///
/// Returns service status and whether the GPIO driver could be opened.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" when activations cannot succeed
    pub status: String,

    /// "ready" or "unavailable"
    pub pin: String,

    /// BCM number of the controlled pin
    pub gpio_pin: u8,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// Public (no authentication) so a server that failed to open the GPIO
/// driver can still be diagnosed.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "pin": "ready",
///   "gpio_pin": 23,
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let available = state.sequencer.actuator().is_available();

    Json(HealthResponse {
        status: if available { "healthy" } else { "degraded" }.to_string(),
        pin: if available { "ready" } else { "unavailable" }.to_string(),
        gpio_pin: state.gpio_pin,
        timestamp: Utc::now(),
    })
}
