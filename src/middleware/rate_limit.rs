//! Per-route-group rate-limit guard.
//!
//! Attached to each control route after authentication, so only
//! authenticated requests are counted.

use crate::{
    error::AppError, models::action::RouteGroup, services::rate_limiter::Admission,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// State for one route's guard: the shared limiter plus the group it counts against.
#[derive(Clone)]
pub struct RateLimitGuard {
    pub state: AppState,
    pub group: RouteGroup,
}

impl RateLimitGuard {
    pub fn new(state: AppState, group: RouteGroup) -> Self {
        Self { state, group }
    }
}

/// Reject with HTTP 429 when the route group's window is exhausted.
pub async fn enforce_rate_limit(
    State(guard): State<RateLimitGuard>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match guard.state.rate_limiter.admit(guard.group, Instant::now()) {
        Admission::Allowed => Ok(next.run(request).await),
        Admission::Rejected { retry_after } => {
            tracing::warn!(group = %guard.group, "Rate limit exceeded");
            Err(AppError::RateLimited { retry_after })
        }
    }
}
