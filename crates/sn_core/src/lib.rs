pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use storage::{keys, load_state, save_state, StateStore};
pub use types::{
    Advisory, AdvisoryHistory, Article, FeedItem, NewsDocument, PublicFeed, ScriptLanguage,
    ScriptSnippet, SecurityTag, SecurityTags, SeenSet, Severity, TechTag, TechTags,
};
