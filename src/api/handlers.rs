//! HTTP endpoint handlers
//!
//! Commands that do not apply to the current phase are ignored by the timer
//! and answered with the unchanged state.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{info, warn};

use crate::{
    error::TimerError,
    state::{validate_interval_seconds, AppState},
};
use super::responses::{ApiResponse, HealthResponse, IntervalRequest, StatusResponse};

type ApiError = (StatusCode, Json<ApiResponse>);

/// Handle POST /start - Start the focus timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.start();
    info!("Start endpoint called - timer is {:?}", timer.phase);
    Json(ApiResponse::from_timer(timer.elapsed_text.clone(), timer))
}

/// Handle POST /pause - Pause the running timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.pause();
    info!("Pause endpoint called - timer is {:?}", timer.phase);
    Json(ApiResponse::from_timer(timer.elapsed_text.clone(), timer))
}

/// Handle POST /resume - Resume the paused timer
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.resume();
    info!("Resume endpoint called - timer is {:?}", timer.phase);
    Json(ApiResponse::from_timer(timer.elapsed_text.clone(), timer))
}

/// Handle POST /stop - Stop and reset the timer
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.stop();
    info!("Stop endpoint called - timer is {:?}", timer.phase);
    Json(ApiResponse::from_timer(timer.elapsed_text.clone(), timer))
}

/// Handle PUT /interval - Change the reminder interval while idle
pub async fn interval_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntervalRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let interval = match validate_interval_seconds(i128::from(request.seconds)) {
        Ok(interval) => interval,
        Err(e) => {
            warn!("Rejecting interval: {}", e);
            return Err(reject(&state, StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
        }
    };

    match state.set_interval(interval) {
        Ok(timer) => {
            info!("Interval endpoint called - interval set to {}s", interval.as_secs());
            Ok(Json(ApiResponse::from_timer(
                format!("Reminder interval set to {} seconds", interval.as_secs()),
                timer,
            )))
        }
        Err(e @ TimerError::Active) => Err(reject(&state, StatusCode::CONFLICT, e.to_string())),
        Err(e @ TimerError::InvalidInterval) => {
            Err(reject(&state, StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
    }
}

fn reject(state: &AppState, status: StatusCode, message: String) -> ApiError {
    let timer = state.publish_snapshot();
    (status, Json(ApiResponse::error(message, timer)))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.publish_snapshot(),
        custom_sound_path: state.get_preferences().custom_sound_path,
        last_notification_error: state.get_last_notification_error(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
