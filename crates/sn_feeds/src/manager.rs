use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sn_core::{keys, load_state, save_state, NewsDocument, Result, StateStore};

use crate::feeds::{FeedSource, FeedSpec, RssFeed};
use crate::ingest::entry_to_article;
use crate::logging::Logger;

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Articles kept in the news document
    pub max_items: usize,
    /// Entries taken from the top of each feed per run
    pub entries_per_feed: usize,
    pub summary_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_items: 50,
            entries_per_feed: 10,
            summary_limit: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub added: usize,
    pub total: usize,
    pub failed_sources: Vec<String>,
}

type BoxedFeed = Box<dyn FeedSource>;

/// Pulls every configured feed into the bounded, newest-first news document.
pub struct FeedManager {
    store: Arc<dyn StateStore>,
    feeds: Vec<BoxedFeed>,
    config: FeedConfig,
}

impl FeedManager {
    pub fn new(store: Arc<dyn StateStore>, config: FeedConfig) -> Self {
        Self {
            store,
            feeds: Vec::new(),
            config,
        }
    }

    pub fn with_specs(store: Arc<dyn StateStore>, config: FeedConfig, specs: Vec<FeedSpec>) -> Result<Self> {
        let mut manager = Self::new(store, config);
        for spec in specs {
            manager.add_feed(Box::new(RssFeed::new(spec)?));
        }
        Ok(manager)
    }

    pub fn add_feed(&mut self, feed: BoxedFeed) {
        self.feeds.push(feed);
    }

    /// Fetch all feeds one after another. A feed that fails is logged and
    /// skipped; the news document is saved with whatever was collected.
    pub async fn update(&self, now: DateTime<Utc>) -> Result<IngestReport> {
        let mut news: NewsDocument = load_state(self.store.as_ref(), keys::NEWS).await?.unwrap_or_default();
        let mut known: HashSet<String> = news.items.iter().map(|a| a.id.clone()).collect();
        let today = now.date_naive();
        let mut report = IngestReport::default();

        for feed in &self.feeds {
            let logger = Logger::new().with_prefix(format!("[{}]", feed.source()));
            logger.info(&format!("🦗 Fetching {}", feed.url()));

            let entries = match feed.fetch_entries().await {
                Ok(entries) => entries,
                Err(e) => {
                    logger.error(&format!("❌ Error fetching feed: {}", e));
                    report.failed_sources.push(feed.source().to_string());
                    continue;
                }
            };

            for entry in entries.iter().take(self.config.entries_per_feed) {
                if entry.title.is_empty() || entry.link.is_empty() {
                    logger.warn("⚠️ Skipping entry without title or link");
                    continue;
                }

                let article = entry_to_article(entry, feed.source(), today, self.config.summary_limit);
                if !known.insert(article.id.clone()) {
                    logger.debug(&format!("⏭️ {}", article.title));
                    continue;
                }

                logger.info(&format!("🆕 Added: {}", article.title.chars().take(60).collect::<String>()));
                news.items.insert(0, article);
                report.added += 1;
            }
        }

        news.items.truncate(self.config.max_items);
        news.last_updated = today.format("%Y-%m-%d").to_string();
        save_state(self.store.as_ref(), keys::NEWS, &news).await?;

        report.total = news.items.len();
        tracing::info!("✨ Updated news: {} new items, {} total", report.added, report.total);
        Ok(report)
    }
}
