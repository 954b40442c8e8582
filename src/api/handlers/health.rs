//! Liveness and database probe.

use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthChecks, HealthResponse, Probe, ProbeStatus};
use crate::state::AppState;

/// `GET /health`
///
/// Answers 200 with `"status": "healthy"` when a one-row link read succeeds
/// within the request deadline, 503 with `"degraded"` otherwise.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse::from_checks(HealthChecks {
        database: probe_database(&state).await,
    });

    let code = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}

async fn probe_database(state: &AppState) -> Probe {
    let started = Instant::now();
    let result = state.link_service.fetch(Some(1)).await;
    let latency_ms = started.elapsed().as_millis();

    match result {
        Ok(_) => Probe {
            status: ProbeStatus::Ok,
            latency_ms,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health probe failed");
            Probe {
                status: ProbeStatus::Error,
                latency_ms,
                error: Some(e.to_string()),
            }
        }
    }
}
