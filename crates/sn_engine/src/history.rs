use sn_core::{AdvisoryHistory, Article, SeenSet};
use tracing::{debug, info};

use crate::advisory::build_advisory;

/// Maximum number of advisories kept in the history.
pub const HISTORY_LIMIT: usize = 200;

/// Build advisories for every unseen article, in feed order.
///
/// Each new advisory is prepended to `history` (bounded by `limit`) and its
/// id is added to `seen` right away, so a repeated id later in the same batch
/// is skipped too. Returns the number of advisories added.
pub fn merge_articles<'a, I>(articles: I, seen: &mut SeenSet, history: &mut AdvisoryHistory, limit: usize) -> usize
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut added = 0;
    for article in articles {
        if seen.contains(&article.id) {
            debug!("⏭️ Already processed: {}", article.id);
            continue;
        }

        history.prepend(build_advisory(article), limit);
        seen.insert(article.id.clone());
        added += 1;
        info!("🆕 Added recommendations for: {}", truncate_title(&article.title, 80));
    }
    added
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    title.chars().take(max_chars).collect()
}
