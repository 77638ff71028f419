mod config;
mod history;
mod search;
mod status;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(status::banner))
        .route("/status", get(status::status))
        .nest("/config", config::router())
        .nest("/history", history::router())
        .nest("/search", search::router())
}
