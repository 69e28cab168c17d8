//! Health Check Endpoints
//!
//! - /health - combined status including database connectivity
//! - /health/live - liveness probe

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Health service state
#[derive(Clone)]
pub struct HealthState {
    /// Database for connectivity check; None skips the check
    pub db: Option<mongodb::Database>,
    pub version: Option<String>,
}

/// Combined health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
pub async fn get_health(State(state): State<HealthState>) -> Response {
    let status = match &state.db {
        Some(db) => match db.run_command(mongodb::bson::doc! { "ping": 1 }).await {
            Ok(_) => HealthStatus::Up,
            Err(_) => HealthStatus::Down,
        },
        None => HealthStatus::Up,
    };

    let status_code = if status == HealthStatus::Down {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version: state.version.clone(),
        }),
    )
        .into_response()
}

/// Liveness probe
///
/// Always 200 while the process is responding.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn get_liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Up,
        version: None,
    })
}

/// Create the health router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(get_health))
        .route("/live", get(get_liveness))
        .with_state(state)
}
