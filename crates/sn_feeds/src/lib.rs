pub mod feeds;
pub mod ingest;
pub mod logging;
pub mod manager;

pub use feeds::{default_feeds, FeedEntry, FeedSource, FeedSpec};
pub use ingest::{article_id, entry_to_article};
pub use manager::{FeedConfig, FeedManager, IngestReport};
