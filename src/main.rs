//! Remote Start Server - Main Application Entry Point
//!
//! A small authenticated REST API that pulses a single GPIO output line to
//! lock, unlock or start a vehicle. Each endpoint triggers a fixed pulse
//! pattern on the line.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Hardware**: Raspberry Pi GPIO via rppal, serialized behind a mutex
//! - **Authentication**: HTTP Basic, constant-time comparison
//! - **Rate Limiting**: fixed windows per route group
//! - **Format**: JSON responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Open the GPIO pin (failure is logged, the server keeps running degraded)
//! 3. Build HTTP router with routes and guards
//! 4. Serve until Ctrl-C / SIGTERM, then release the pin

mod config;
mod error;
mod gpio;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;

use crate::models::action::RouteGroup;
use crate::services::{
    actuator::PinActuator, authenticator::Authenticator, rate_limiter::RateLimiter,
    sequencer::Sequencer,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first: LOG_LEVEL decides the default filter
    let config = config::Config::from_env()?;

    // Initialize logging with tracing subscriber. RUST_LOG takes precedence over LOG_LEVEL
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .init();
    tracing::info!(?config, "Configuration loaded");

    // Open the output pin. Not fatal: the HTTP surface stays up for diagnostics
    let actuator = match gpio::open_driver(config.gpio_pin) {
        Ok(driver) => {
            tracing::info!("GPIO pin {} configured as output", config.gpio_pin);
            PinActuator::new(Box::new(driver))
        }
        Err(e) => {
            tracing::error!(
                "Error opening GPIO pin {}: {}. This is probably because you need superuser privileges.",
                config.gpio_pin,
                e
            );
            PinActuator::unavailable()
        }
    };
    let actuator = Arc::new(actuator);

    let rate_limiter = RateLimiter::default();
    for group in [RouteGroup::Doors, RouteGroup::Engine] {
        let policy = rate_limiter.policy(group);
        tracing::info!(%group, limit = policy.limit, window = ?policy.window, "Rate limit policy");
    }

    let state = state::AppState::new(
        Authenticator::new(&config.api_username, &config.api_password),
        rate_limiter,
        Sequencer::new(Arc::clone(&actuator)),
        config.gpio_pin,
    );
    let app = routes::build_router(state);

    // Bind to network address and start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Leave the line LOW whether serving ended cleanly or not
    actuator.release();

    served?;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
