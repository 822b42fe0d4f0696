use std::path::PathBuf;
use std::sync::Arc;

use sn_core::{Error, Result, StateStore};
use tracing::info;

pub mod backends;

pub use backends::*;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `json` or `memory`
    pub backend: String,
    /// Directory the JSON backend resolves keys against
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "json".to_string(),
            root: PathBuf::from("."),
        }
    }
}

pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn StateStore>> {
    let store: Arc<dyn StateStore> = match config.backend.as_str() {
        "json" => Arc::new(JsonFileStore::new(config.root.clone())),
        "memory" => Arc::new(InMemoryStore::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown storage backend: {} (expected json or memory)",
                other
            )))
        }
    };
    info!("💾 Using {} storage", config.backend);
    Ok(store)
}
