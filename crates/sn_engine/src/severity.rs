use sn_core::{SecurityTag, SecurityTags, Severity};

fn tag_severity(tag: SecurityTag) -> Severity {
    match tag {
        SecurityTag::Ransomware => Severity::Critical,
        SecurityTag::Malware | SecurityTag::Vulnerability | SecurityTag::DataBreach => Severity::High,
        SecurityTag::Phishing | SecurityTag::AccountTakeover => Severity::Medium,
        SecurityTag::Steam | SecurityTag::Gaming | SecurityTag::Cheats | SecurityTag::Cybersecurity => Severity::Low,
    }
}

/// The highest severity implied by any tag in the set.
pub fn derive_severity(tags: &SecurityTags) -> Severity {
    tags.iter().copied().map(tag_severity).max().unwrap_or_default()
}
