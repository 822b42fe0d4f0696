use std::collections::BTreeSet;

/// One classification rule: the tag is emitted when any keyword occurs as a
/// substring of the (already lower-cased) text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub tag: T,
    pub keywords: &'static [&'static str],
}

impl<T: Copy> KeywordRule<T> {
    pub const fn new(tag: T, keywords: &'static [&'static str]) -> Self {
        Self { tag, keywords }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Evaluate every rule independently and collect the matching tags. An empty
/// result is replaced by `{fallback}`, so the returned set is never empty.
pub fn apply_keyword_rules<T: Copy + Ord>(rules: &[KeywordRule<T>], text: &str, fallback: T) -> BTreeSet<T> {
    let mut tags: BTreeSet<T> = rules
        .iter()
        .filter(|rule| rule.matches(text))
        .map(|rule| rule.tag)
        .collect();

    if tags.is_empty() {
        tags.insert(fallback);
    }
    tags
}
