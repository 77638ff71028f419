use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub app: &'static str,
    pub search_backend: String,
    pub summarizer: &'static str,
    pub database: &'static str,
}

pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Dossier profile enrichment API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let engine = state.engine().await;

    let database = match state.storage.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "unavailable"
        }
    };

    Json(StatusResponse {
        app: "running",
        search_backend: engine.search_provider().to_string(),
        summarizer: if engine.has_summarizer() {
            "configured"
        } else {
            "not configured"
        },
        database,
    })
}
