use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use pitchcraft_agent::DialogueEngine;
use pitchcraft_core::domain::conversation::Message;
use pitchcraft_core::domain::customer::CustomerProfile;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    engine: Arc<DialogueEngine>,
    catalog_source: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(engine: Arc<DialogueEngine>, catalog_source: String) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { engine, catalog_source })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state);
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "pitchcraft-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

/// Runs one sample reply through the engine so template or catalog faults surface here.
fn catalog_check(state: &HealthState) -> HealthCheck {
    let sample = [Message::user("health check")];
    let profile = CustomerProfile::new("Health", "health@localhost", Vec::new());

    match state.engine.reply(&sample, &profile) {
        Ok(_) => HealthCheck {
            status: "ready",
            detail: format!(
                "{} products from {} render replies",
                state.engine.catalog().len(),
                state.catalog_source
            ),
        },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("sample reply failed: {error}") }
        }
    }
}
