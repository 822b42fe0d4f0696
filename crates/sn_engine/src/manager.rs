use std::sync::Arc;

use chrono::{DateTime, Utc};
use sn_core::{keys, load_state, save_state, AdvisoryHistory, NewsDocument, Result, SeenSet, StateStore};
use tracing::info;

use crate::history::{merge_articles, HISTORY_LIMIT};

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub history_limit: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self { history_limit: HISTORY_LIMIT }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryReport {
    pub added: usize,
    pub total: usize,
}

/// Loads news, seen ids and history from the store, merges, and writes the
/// results back.
pub struct AdvisoryManager {
    store: Arc<dyn StateStore>,
    config: AdvisorConfig,
}

impl AdvisoryManager {
    pub fn new(store: Arc<dyn StateStore>, config: AdvisorConfig) -> Self {
        Self { store, config }
    }

    pub async fn process(&self, now: DateTime<Utc>) -> Result<AdvisoryReport> {
        let news: NewsDocument = load_state(self.store.as_ref(), keys::NEWS).await?.unwrap_or_default();
        if news.items.is_empty() {
            info!("📭 No news found, nothing to do");
            return Ok(AdvisoryReport::default());
        }

        let mut seen: SeenSet = load_state(self.store.as_ref(), keys::SEEN).await?.unwrap_or_default();
        let mut history: AdvisoryHistory = load_state(self.store.as_ref(), keys::ADVISORIES).await?.unwrap_or_default();

        let added = merge_articles(&news.items, &mut seen, &mut history, self.config.history_limit);
        if added == 0 {
            info!("⏭️ No new articles to process");
            return Ok(AdvisoryReport { added, total: history.items.len() });
        }

        history.last_updated = now.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        save_state(self.store.as_ref(), keys::ADVISORIES, &history).await?;
        save_state(self.store.as_ref(), keys::SEEN, &seen).await?;
        info!("✨ Updated {} with {} items", keys::ADVISORIES, added);

        Ok(AdvisoryReport { added, total: history.items.len() })
    }
}
