//! Activation HTTP handlers.
//!
//! This module implements the control endpoints:
//! - POST /lock - one short pulse
//! - POST /unlock - two short pulses
//! - POST /engine - one long pulse
//!
//! Authentication and rate limiting have already run when these are called.

use crate::{
    error::AppError,
    models::action::{Action, ActionResponse},
    state::AppState,
};
use axum::{Json, extract::State};

/// Lock the vehicle.
///
/// # Endpoint
///
/// `POST /lock`
///
/// # Response
///
/// - **Success (200 OK)**: `{"status": "Lock activated!"}`
/// - **Error (401)**: Invalid credentials
/// - **Error (429)**: Rate limit exceeded (shared with /unlock)
/// - **Error (500)**: GPIO activation error
pub async fn lock(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    run_action(&state, Action::Lock).await
}

/// Unlock the vehicle.
///
/// `POST /unlock`, responds `{"status": "Unlock activated!"}`.
pub async fn unlock(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    run_action(&state, Action::Unlock).await
}

/// Start the engine.
///
/// `POST /engine`, responds `{"status": "Engine activated!"}` once the 5 second
/// pulse has finished.
pub async fn engine(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    run_action(&state, Action::Engine).await
}

/// Run the pattern on the blocking pool and wait for it to finish.
///
/// The response is only sent after the line is LOW again. If the client
/// disconnects, the blocking task still runs to completion.
async fn run_action(state: &AppState, action: Action) -> Result<Json<ActionResponse>, AppError> {
    tracing::info!("{} activation requested", action);

    let sequencer = state.sequencer.clone();
    tokio::task::spawn_blocking(move || sequencer.run(action)).await??;

    tracing::info!("{} activation complete", action);
    Ok(Json(action.into()))
}
