use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use dossier_core::{summarize::OpenAiSummarizer, EngineConfig};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_config))
        .route("/summarizer", post(configure_summarizer))
}

#[derive(Debug, Deserialize)]
pub struct SummarizerKeyRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigUpdateResponse {
    pub status: &'static str,
    pub message: String,
}

impl ConfigUpdateResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

async fn get_config(State(state): State<AppState>) -> Json<EngineConfig> {
    Json(state.engine_config().await.redacted())
}

/// Accepts a summarizer key only after the provider confirms it.
async fn configure_summarizer(
    State(state): State<AppState>,
    Json(req): Json<SummarizerKeyRequest>,
) -> Result<Json<ConfigUpdateResponse>, (StatusCode, String)> {
    let api_key = req.api_key.trim();
    if api_key.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "API key is required".to_string()));
    }

    let update = state.begin_update().await;
    let candidate = update.current().await.with_summarizer_key(api_key);

    let summarizer = match OpenAiSummarizer::from_config(&candidate.summarizer) {
        Ok(s) => s,
        Err(e) => {
            return Ok(Json(ConfigUpdateResponse::error(format!(
                "Failed to configure summarizer: {e}"
            ))));
        }
    };

    if let Err(e) = summarizer.verify().await {
        tracing::warn!(error = %e, "Summarizer key rejected");
        return Ok(Json(ConfigUpdateResponse::error(format!(
            "Failed to configure summarizer: {e}"
        ))));
    }

    update
        .apply(candidate)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(ConfigUpdateResponse::success(
        "Summarizer configured successfully",
    )))
}
