use sn_core::{SecurityTag, SecurityTags};

/// A block of sentences appended when any of `triggers` is present.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRule {
    pub triggers: &'static [SecurityTag],
    pub sentences: &'static [&'static str],
}

impl RecommendationRule {
    pub fn applies_to(&self, tags: &SecurityTags) -> bool {
        self.triggers.iter().any(|tag| tags.contains(tag))
    }
}

pub const FALLBACK_RECOMMENDATION: &str =
    "Assess the relevance of this story to your environment and map the described techniques to your technology stack.";

pub const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        triggers: &[SecurityTag::Ransomware],
        sentences: &[
            "Validate the integrity and recoverability of recent backups for all critical systems.",
            "Review exposed RDP/VPN entry points and restrict access using MFA and network segmentation.",
            "Ensure EDR/XDR coverage and logging are enabled on all high-value assets.",
        ],
    },
    RecommendationRule {
        triggers: &[SecurityTag::Malware],
        sentences: &[
            "Run an out-of-band malware scan on servers and endpoints, focusing on recent changes.",
            "Collect suspicious binaries from Temp/AppData and submit them to a sandbox or reverse engineering pipeline.",
        ],
    },
    RecommendationRule {
        triggers: &[SecurityTag::Vulnerability],
        sentences: &[
            "Map affected product versions from the article to the software actually deployed in your environment.",
            "If no vendor patch is available, implement temporary mitigations such as WAF rules, strict access control, and additional segmentation.",
        ],
    },
    RecommendationRule {
        triggers: &[SecurityTag::DataBreach],
        sentences: &[
            "Verify whether the impacted service, vendor, or product is used inside your organization.",
            "Assess the need to rotate passwords, keys, and tokens associated with the affected service.",
        ],
    },
    RecommendationRule {
        triggers: &[SecurityTag::Phishing, SecurityTag::AccountTakeover],
        sentences: &[
            "Run targeted awareness for users most likely to be impacted by the described phishing templates.",
            "Review MFA policies and disable legacy authentication protocols (POP/IMAP/SMTP basic auth, other non\u{2011}MFA flows).",
        ],
    },
];

/// Concatenate the sentence blocks of every matching rule, in table order.
/// Overlapping rules are not deduplicated.
pub fn recommend(tags: &SecurityTags) -> Vec<String> {
    let mut recommendations: Vec<String> = RECOMMENDATION_RULES
        .iter()
        .filter(|rule| rule.applies_to(tags))
        .flat_map(|rule| rule.sentences.iter().map(|s| s.to_string()))
        .collect();

    if recommendations.is_empty() {
        recommendations.push(FALLBACK_RECOMMENDATION.to_string());
    }
    recommendations
}
