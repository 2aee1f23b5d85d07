//! HTTP router construction.
//!
//! Every control route is wrapped in the same ordered guard chain:
//! authentication, then the rate limit of the route's group, then the handler.

use crate::{
    handlers,
    middleware::{
        auth::require_basic_auth,
        rate_limit::{RateLimitGuard, enforce_rate_limit},
    },
    models::action::Action,
    state::AppState,
};
use axum::{
    Router, middleware as axum_middleware,
    routing::{MethodRouter, get, post},
};
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// # Routes
///
/// - `GET /health` - public
/// - `POST /lock`, `POST /unlock` - auth, `doors` rate limit
/// - `POST /engine` - auth, `engine` rate limit
pub fn build_router(state: AppState) -> Router {
    let control_routes = Router::new()
        .route(
            "/lock",
            rate_limited(post(handlers::actions::lock), &state, Action::Lock),
        )
        .route(
            "/unlock",
            rate_limited(post(handlers::actions::unlock), &state, Action::Unlock),
        )
        .route(
            "/engine",
            rate_limited(post(handlers::actions::engine), &state, Action::Engine),
        )
        // Outermost layer on these routes, so it runs before the rate limit
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(control_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Count `route` against the rate-limit group of `action`.
fn rate_limited(
    route: MethodRouter<AppState>,
    state: &AppState,
    action: Action,
) -> MethodRouter<AppState> {
    route.route_layer(axum_middleware::from_fn_with_state(
        RateLimitGuard::new(state.clone(), action.route_group()),
        enforce_rate_limit,
    ))
}
