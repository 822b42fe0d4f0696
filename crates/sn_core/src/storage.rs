use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Well-known keys of the persisted pipeline state.
pub mod keys {
    pub const NEWS: &str = "docs/news.json";
    pub const SEEN: &str = "data/seen_articles.json";
    pub const ADVISORIES: &str = "docs/security_recommendations.json";
    pub const FEED: &str = "docs/recommendations_feed.json";
}

#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the value stored under `key`, or `None` if nothing was saved yet
    async fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    async fn save(&self, key: &str, value: &Value) -> Result<()>;
}

pub async fn load_state<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Result<Option<T>> {
    match store.load(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn save_state<T: Serialize + Sync>(store: &dyn StateStore, key: &str, state: &T) -> Result<()> {
    let value = serde_json::to_value(state)?;
    store.save(key, &value).await
}
