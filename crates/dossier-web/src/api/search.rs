use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use dossier_core::{render, Profile, SearchHit};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/web", post(search_web))
        .route("/person", post(search_person))
        .route("/person/report", post(person_report))
}

#[derive(Debug, Deserialize)]
pub struct WebSearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct PersonSearchRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct WebSearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

fn required(value: &str, what: &str) -> Result<String, (StatusCode, String)> {
    let value = value.trim();
    if value.is_empty() {
        return Err((StatusCode::BAD_REQUEST, format!("{what} is required")));
    }
    Ok(value.to_string())
}

async fn search_web(
    State(state): State<AppState>,
    Json(req): Json<WebSearchRequest>,
) -> Result<Json<WebSearchResponse>, (StatusCode, String)> {
    let query = required(&req.query, "Search query")?;

    let results = state.engine().await.web_search(&query).await;

    if let Err(e) = state.storage.record_web_search(&query, &results).await {
        tracing::warn!(error = %e, "Failed to record web search");
    }

    Ok(Json(WebSearchResponse { query, results }))
}

async fn search_person(
    State(state): State<AppState>,
    Json(req): Json<PersonSearchRequest>,
) -> Result<Json<Profile>, (StatusCode, String)> {
    let name = required(&req.name, "Name")?;
    Ok(Json(state.engine().await.build_profile(&name).await))
}

async fn person_report(
    State(state): State<AppState>,
    Json(req): Json<PersonSearchRequest>,
) -> Result<String, (StatusCode, String)> {
    let name = required(&req.name, "Name")?;
    let profile = state.engine().await.build_profile(&name).await;
    Ok(render::text_report(&profile))
}
