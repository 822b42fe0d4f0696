use async_trait::async_trait;
use serde_json::Value;
use sn_core::{Result, StateStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keeps every value in process memory. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &Value) -> Result<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store() {
        let store = InMemoryStore::new();
        assert!(store.load("docs/news.json").await.unwrap().is_none());

        store.save("docs/news.json", &json!({"items": []})).await.unwrap();
        store.save("docs/news.json", &json!({"items": [1]})).await.unwrap();
        assert_eq!(store.load("docs/news.json").await.unwrap(), Some(json!({"items": [1]})));
    }
}
