use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use sn_core::{Advisory, AdvisoryHistory, FeedItem, PublicFeed, Severity};

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Items below this severity are dropped.
    pub severity_threshold: Severity,
    pub recency_window_days: i64,
    pub max_recommendations: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            severity_threshold: Severity::Medium,
            recency_window_days: 3,
            max_recommendations: 2,
        }
    }
}

fn parse_item_date(date: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn project(advisory: &Advisory, config: &ExportConfig) -> FeedItem {
    FeedItem {
        id: advisory.id.clone(),
        date: advisory.date.clone(),
        title: advisory.title.clone(),
        url: advisory.url.clone(),
        source: advisory.source.clone(),
        severity: advisory.severity,
        tags: advisory.tags.clone(),
        tech: advisory.tech.clone(),
        top_recommendations: advisory
            .recommendations
            .iter()
            .take(config.max_recommendations)
            .cloned()
            .collect(),
    }
}

/// `now - days`, or `NaiveDateTime::MIN` when the window reaches past the
/// representable range (nothing is then too old).
fn recency_cutoff(now: DateTime<Utc>, days: i64) -> NaiveDateTime {
    TimeDelta::try_days(days)
        .and_then(|window| now.naive_utc().checked_sub_signed(window))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Project the history into the public feed: recent items at or above the
/// severity threshold, with a capped number of recommendations each.
///
/// A date that cannot be parsed counts as exactly the cutoff, so the item is
/// kept.
pub fn export_feed(history: &AdvisoryHistory, config: &ExportConfig, now: DateTime<Utc>) -> PublicFeed {
    let cutoff = recency_cutoff(now, config.recency_window_days);

    let items = history
        .items
        .iter()
        .filter(|advisory| advisory.severity >= config.severity_threshold)
        .filter(|advisory| parse_item_date(&advisory.date).unwrap_or(cutoff) >= cutoff)
        .map(|advisory| project(advisory, config))
        .collect();

    PublicFeed {
        generated_at: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        items,
    }
}
