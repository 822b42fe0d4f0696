use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sn_core::{Error, Result};
use std::fmt;
use std::str::FromStr;
use url::Url;

pub mod rss;

pub use rss::{parse_feed, RssFeed};

/// One raw item as it appears in a feed, before it becomes an `Article`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    /// Publication date exactly as written in the feed
    pub published: String,
}

impl FeedEntry {
    /// Parses `published` as RFC 2822 (RSS) or RFC 3339 (Atom).
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.published.trim();
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name of the publication
    fn source(&self) -> &str;

    /// Where the feed is fetched from
    fn url(&self) -> &str;

    /// Fetch and parse the current feed entries, newest first as published
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>>;
}

/// A configured feed: `SOURCE=URL` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSpec {
    pub source: String,
    pub url: String,
}

impl FeedSpec {
    pub fn new(source: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for FeedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.source, self.url)
    }
}

impl FromStr for FeedSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (source, url) = s
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("Invalid feed {:?}. Expected: SOURCE=URL", s)))?;
        let source = source.trim();
        if source.is_empty() {
            return Err(Error::Config(format!("Feed {:?} has an empty source name", s)));
        }
        let url = Url::parse(url.trim()).map_err(|e| Error::Config(format!("Invalid feed URL {:?}: {}", url, e)))?;
        Ok(Self::new(source, url.as_str()))
    }
}

pub fn default_feeds() -> Vec<FeedSpec> {
    vec![
        FeedSpec::new("The Hacker News", "https://feeds.feedburner.com/TheHackersNews"),
        FeedSpec::new("BleepingComputer", "https://www.bleepingcomputer.com/feed/"),
        FeedSpec::new("Dark Reading", "https://www.darkreading.com/rss.xml"),
    ]
}
