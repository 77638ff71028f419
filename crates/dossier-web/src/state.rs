use std::sync::Arc;

use dossier_core::{EngineConfig, ProfileEngine, Storage};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::config::ServerConfig;

/// The engine together with the configuration it was built from.
struct Active {
    config: EngineConfig,
    engine: Arc<ProfileEngine>,
}

/// Application state shared across all requests
///
/// The engine is rebuilt, never mutated, when its configuration changes.
/// Requests already holding the previous engine finish against it.
#[derive(Clone)]
pub struct AppState {
    active: Arc<RwLock<Active>>,
    updates: Arc<Mutex<()>>,
    pub storage: Arc<Storage>,
}

/// Exclusive right to reconfigure the engine, held from reading the current
/// configuration until the replacement is applied.
pub struct ConfigUpdate<'a> {
    state: &'a AppState,
    _guard: MutexGuard<'a, ()>,
}

impl ConfigUpdate<'_> {
    pub async fn current(&self) -> EngineConfig {
        self.state.engine_config().await
    }

    /// Builds an engine for `config` and swaps it in with its configuration.
    pub async fn apply(self, config: EngineConfig) -> dossier_core::Result<()> {
        let engine = ProfileEngine::from_config(&config)?.with_history(self.state.storage.clone());

        *self.state.active.write().await = Active {
            config,
            engine: Arc::new(engine),
        };

        tracing::info!("Engine reconfigured");
        Ok(())
    }
}

impl AppState {
    pub async fn new(server: &ServerConfig, engine_config: EngineConfig) -> anyhow::Result<Self> {
        if let Some(parent) = server.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let storage = Arc::new(Storage::open(&server.db_path.to_string_lossy()).await?);
        let engine = ProfileEngine::from_config(&engine_config)?.with_history(storage.clone());

        Ok(Self::with_parts(engine, engine_config, storage))
    }

    pub fn with_parts(engine: ProfileEngine, engine_config: EngineConfig, storage: Arc<Storage>) -> Self {
        Self {
            active: Arc::new(RwLock::new(Active {
                config: engine_config,
                engine: Arc::new(engine),
            })),
            updates: Arc::new(Mutex::new(())),
            storage,
        }
    }

    /// Engine serving new requests.
    pub async fn engine(&self) -> Arc<ProfileEngine> {
        self.active.read().await.engine.clone()
    }

    pub async fn engine_config(&self) -> EngineConfig {
        self.active.read().await.config.clone()
    }

    /// Waits for any other reconfiguration to finish.
    pub async fn begin_update(&self) -> ConfigUpdate<'_> {
        ConfigUpdate {
            state: self,
            _guard: self.updates.lock().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn state() -> AppState {
        let storage = Arc::new(Storage::open_memory().await.unwrap());
        let config = EngineConfig::default();
        let engine = ProfileEngine::from_config(&config).unwrap();
        AppState::with_parts(engine, config, storage)
    }

    #[tokio::test]
    async fn test_apply_swaps_engine_and_config_together() {
        let state = state().await;

        let update = state.begin_update().await;
        let next = update.current().await.with_summarizer_key("sk-test-key-0001");
        update.apply(next).await.unwrap();

        assert!(state.engine().await.has_summarizer());
        assert_eq!(
            state.engine_config().await.summarizer.api_key.as_deref(),
            Some("sk-test-key-0001")
        );
    }

    #[tokio::test]
    async fn test_updates_are_serialized() {
        let state = state().await;

        let first = state.begin_update().await;
        let blocked = tokio::time::timeout(Duration::from_millis(50), state.begin_update()).await;
        assert!(blocked.is_err());

        drop(first);
        let second = tokio::time::timeout(Duration::from_millis(50), state.begin_update()).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_failed_apply_keeps_previous_pair() {
        let state = state().await;

        let update = state.begin_update().await;
        let broken = update
            .current()
            .await
            .with_backend(dossier_core::SearchBackend::Serper);
        assert!(update.apply(broken).await.is_err());

        assert_eq!(state.engine().await.search_provider(), "duckduckgo");
        assert_eq!(
            state.engine_config().await.search.backend,
            dossier_core::SearchBackend::DuckDuckGo
        );
    }
}
