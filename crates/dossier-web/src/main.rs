mod api;
mod config;
mod state;

use std::net::SocketAddr;

use axum::Router;
use dossier_core::EngineConfig;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dossier_web=debug,dossier_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = ServerConfig::from_env();
    let engine_config = EngineConfig::from_env()?;

    tracing::info!(
        backend = engine_config.search.backend.as_str(),
        summarizer = engine_config.summarizer.is_configured(),
        db = %server.db_path.display(),
        "Loaded configuration"
    );

    let state = AppState::new(&server, engine_config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    tracing::info!("Starting dossier on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
