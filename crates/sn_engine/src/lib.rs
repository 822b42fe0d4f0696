//! Keyword-driven classification of security news and generation of
//! remediation advice and diagnostic scripts.
//!
//! Everything outside [`manager`] is pure: no I/O and no hidden state.

pub mod advisory;
pub mod classify;
pub mod export;
pub mod history;
pub mod manager;
pub mod recommend;
pub mod rules;
pub mod scripts;
pub mod severity;

pub use advisory::build_advisory;
pub use classify::{classifier_text, classify_security, classify_tech};
pub use export::{export_feed, ExportConfig};
pub use history::{merge_articles, HISTORY_LIMIT};
pub use manager::{AdvisorConfig, AdvisoryManager, AdvisoryReport};
pub use recommend::recommend;
pub use scripts::generate_scripts;
pub use severity::derive_severity;
