use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 8001;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// SQLite file backing the search history
    pub db_path: PathBuf,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            db_path: lookup("DOSSIER_DB")
                .filter(|v| !v.trim().is_empty())
                .map_or(defaults.db_path, PathBuf::from),
            port: lookup("DOSSIER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("dossier.db"),
        |dir| dir.join("dossier").join("dossier.db"),
    )
}
