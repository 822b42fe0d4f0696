use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use sn_core::Article;
use sn_engine::classify::{classifier_text, classify_security};

use crate::feeds::FeedEntry;

const ID_LENGTH: usize = 12;

/// Stable id of a story: the first 12 hex digits of SHA-256(title + url).
pub fn article_id(title: &str, url: &str) -> String {
    let digest = Sha256::digest(format!("{}{}", title, url).as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(ID_LENGTH);
    hex
}

/// Cut `summary` to at most `limit` characters, marking the cut with `...`.
pub fn truncate_summary(summary: &str, limit: usize) -> String {
    if summary.chars().count() <= limit {
        return summary.to_string();
    }
    let mut truncated: String = summary.chars().take(limit.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

pub fn entry_to_article(entry: &FeedEntry, source: &str, today: NaiveDate, summary_limit: usize) -> Article {
    let date = entry
        .published_at()
        .map(|dt| dt.date_naive())
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string();

    let summary = truncate_summary(&entry.summary, summary_limit);
    let tags = classify_security(&classifier_text(&entry.title, &summary));

    Article {
        id: article_id(&entry.title, &entry.link),
        date,
        title: entry.title.clone(),
        summary: if summary.is_empty() { entry.title.clone() } else { summary },
        url: entry.link.clone(),
        source: source.to_string(),
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sn_core::SecurityTag;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_article_id_is_stable() {
        let id = article_id("Title", "https://news.example/a");
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, article_id("Title", "https://news.example/a"));
        assert_ne!(id, article_id("Title", "https://news.example/b"));
    }

    #[test]
    fn test_truncate_summary() {
        assert_eq!(truncate_summary("short", 200), "short");

        let long = "é".repeat(250);
        let cut = truncate_summary(&long, 200);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.ends_with("..."));

        let exact = "x".repeat(200);
        assert_eq!(truncate_summary(&exact, 200), exact);
    }

    #[test]
    fn test_entry_to_article() {
        let entry = FeedEntry {
            title: "Steam phishing wave".to_string(),
            link: "https://news.example/steam".to_string(),
            summary: String::new(),
            published: "Tue, 05 Mar 2024 14:30:00 +0000".to_string(),
        };
        let article = entry_to_article(&entry, "Example", today(), 200);

        assert_eq!(article.id, article_id("Steam phishing wave", "https://news.example/steam"));
        assert_eq!(article.date, "2024-03-05");
        assert_eq!(article.summary, "Steam phishing wave");
        assert_eq!(article.source, "Example");
        assert_eq!(
            article.tags.iter().copied().collect::<Vec<_>>(),
            vec![SecurityTag::Phishing, SecurityTag::Steam]
        );
    }

    #[test]
    fn test_missing_date_uses_today() {
        let entry = FeedEntry {
            title: "Weekly roundup".to_string(),
            link: "https://news.example/roundup".to_string(),
            summary: "Things happened".to_string(),
            published: String::new(),
        };
        let article = entry_to_article(&entry, "Example", today(), 200);
        assert_eq!(article.date, "2024-03-09");
        assert_eq!(article.summary, "Things happened");
        assert_eq!(article.tags.iter().copied().collect::<Vec<_>>(), vec![SecurityTag::Cybersecurity]);
    }
}
