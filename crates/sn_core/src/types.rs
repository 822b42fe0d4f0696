use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Security-category label. Variants are declared in rule order, so a
/// `BTreeSet` of tags iterates in the order the classifier emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SecurityTag {
    Phishing,
    Malware,
    Ransomware,
    Vulnerability,
    #[serde(rename = "Data breach")]
    DataBreach,
    Steam,
    Gaming,
    Cheats,
    #[serde(rename = "Account takeover")]
    AccountTakeover,
    Cybersecurity,
}

impl SecurityTag {
    pub fn label(&self) -> &'static str {
        match self {
            SecurityTag::Phishing => "Phishing",
            SecurityTag::Malware => "Malware",
            SecurityTag::Ransomware => "Ransomware",
            SecurityTag::Vulnerability => "Vulnerability",
            SecurityTag::DataBreach => "Data breach",
            SecurityTag::Steam => "Steam",
            SecurityTag::Gaming => "Gaming",
            SecurityTag::Cheats => "Cheats",
            SecurityTag::AccountTakeover => "Account takeover",
            SecurityTag::Cybersecurity => "Cybersecurity",
        }
    }
}

impl fmt::Display for SecurityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Technology-stack label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TechTag {
    Windows,
    Linux,
    WebServer,
    VMware,
    Cloud,
    M365,
    Generic,
}

impl TechTag {
    pub fn label(&self) -> &'static str {
        match self {
            TechTag::Windows => "Windows",
            TechTag::Linux => "Linux",
            TechTag::WebServer => "WebServer",
            TechTag::VMware => "VMware",
            TechTag::Cloud => "Cloud",
            TechTag::M365 => "M365",
            TechTag::Generic => "Generic",
        }
    }
}

impl fmt::Display for TechTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type SecurityTags = BTreeSet<SecurityTag>;
pub type TechTags = BTreeSet<TechTag>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(label)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("Invalid severity: {}", other)),
        }
    }
}

/// A news item as stored in the news document.
///
/// Only `id`, `date` and `title` are required; the remaining fields default
/// to empty strings when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: SecurityTags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    Bash,
    PowerShell,
}

impl fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptLanguage::Bash => f.write_str("bash"),
            ScriptLanguage::PowerShell => f.write_str("powershell"),
        }
    }
}

/// A diagnostic script meant for manual review by an operator. Nothing in
/// this workspace executes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSnippet {
    pub name: String,
    pub language: ScriptLanguage,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub id: String,
    pub date: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub summary: String,
    pub tags: SecurityTags,
    pub tech: TechTags,
    #[serde(default)]
    pub severity: Severity,
    pub recommendations: Vec<String>,
    pub scripts: Vec<ScriptSnippet>,
}

/// Ids of every article already turned into an advisory. Serialized as a
/// sorted array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet(BTreeSet<String>);

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDocument {
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub items: Vec<Article>,
}

/// Newest-first advisory history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryHistory {
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub items: Vec<Advisory>,
}

impl AdvisoryHistory {
    /// Puts `advisory` at the front and drops the oldest entries beyond `limit`.
    pub fn prepend(&mut self, advisory: Advisory, limit: usize) {
        self.items.insert(0, advisory);
        self.items.truncate(limit);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub date: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub severity: Severity,
    pub tags: SecurityTags,
    pub tech: TechTags,
    pub top_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFeed {
    pub generated_at: String,
    pub items: Vec<FeedItem>,
}
