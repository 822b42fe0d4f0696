use sn_core::{SecurityTag, SecurityTags, TechTag, TechTags};

use crate::rules::{apply_keyword_rules, KeywordRule};

pub const SECURITY_RULES: &[KeywordRule<SecurityTag>] = &[
    KeywordRule::new(SecurityTag::Phishing, &["phishing", "scam"]),
    KeywordRule::new(SecurityTag::Malware, &["malware", "trojan", "rat", "infostealer"]),
    KeywordRule::new(SecurityTag::Ransomware, &["ransomware", "extortion"]),
    KeywordRule::new(SecurityTag::Vulnerability, &["vulnerability", "cve", "exploit"]),
    KeywordRule::new(SecurityTag::DataBreach, &["breach", "leak", "hack"]),
    KeywordRule::new(SecurityTag::Steam, &["steam", "valve"]),
    KeywordRule::new(SecurityTag::Gaming, &["gaming", "gamer", "game"]),
    KeywordRule::new(SecurityTag::Cheats, &["cheat", "aimbot", "wallhack"]),
    KeywordRule::new(SecurityTag::AccountTakeover, &["account", "credential"]),
];

pub const TECH_RULES: &[KeywordRule<TechTag>] = &[
    KeywordRule::new(TechTag::Windows, &["windows", "microsoft", "win32", "ntlm"]),
    KeywordRule::new(TechTag::Linux, &["linux", "ubuntu", "debian", "centos", "red hat", "rhel"]),
    KeywordRule::new(TechTag::WebServer, &["nginx", "apache", "iis", "httpd"]),
    KeywordRule::new(TechTag::VMware, &["vmware", "esxi", "vcenter", "vsphere"]),
    KeywordRule::new(TechTag::Cloud, &["aws", "s3", "bucket", "azure", "gcp", "cloud"]),
    KeywordRule::new(TechTag::M365, &["office 365", "m365", "exchange online"]),
];

/// Lower-cased `title + " " + summary`, the input both classifiers expect.
pub fn classifier_text(title: &str, summary: &str) -> String {
    format!("{} {}", title, summary).to_lowercase()
}

/// Security-category tags for `text`; `{Cybersecurity}` when nothing matches.
pub fn classify_security(text: &str) -> SecurityTags {
    apply_keyword_rules(SECURITY_RULES, text, SecurityTag::Cybersecurity)
}

/// Technology-stack tags for `text`; `{Generic}` when nothing matches.
pub fn classify_tech(text: &str) -> TechTags {
    apply_keyword_rules(TECH_RULES, text, TechTag::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security(title: &str, summary: &str) -> Vec<SecurityTag> {
        classify_security(&classifier_text(title, summary)).into_iter().collect()
    }

    fn tech(title: &str, summary: &str) -> Vec<TechTag> {
        classify_tech(&classifier_text(title, summary)).into_iter().collect()
    }

    #[test]
    fn test_ransomware_keywords() {
        for keyword in ["ransomware", "extortion", "EXTORTION"] {
            assert!(security(&format!("Gang turns to {}", keyword), "").contains(&SecurityTag::Ransomware));
        }
    }

    #[test]
    fn test_fallback_tags() {
        assert_eq!(security("Generic update notice", ""), vec![SecurityTag::Cybersecurity]);
        assert_eq!(tech("Generic update notice", ""), vec![TechTag::Generic]);
    }

    #[test]
    fn test_substring_not_word_boundary() {
        assert_eq!(security("Retailer hacked", ""), vec![SecurityTag::DataBreach]);
        // "operator" contains "rat"
        assert_eq!(security("Operator notes", ""), vec![SecurityTag::Malware]);
    }

    #[test]
    fn test_multiple_tags_in_declaration_order() {
        let tags = security("Steam account phishing scam", "gamers lose credentials");
        assert_eq!(
            tags,
            vec![
                SecurityTag::Phishing,
                SecurityTag::Steam,
                SecurityTag::Gaming,
                SecurityTag::AccountTakeover,
            ]
        );
    }

    #[test]
    fn test_tech_tags() {
        assert_eq!(tech("New Ransomware Targets ESXi via SSH", "attackers exploit VMware ESXi"), vec![TechTag::VMware]);
        assert_eq!(
            tech("Microsoft patches IIS", "Exchange Online and Azure tenants affected"),
            vec![TechTag::Windows, TechTag::WebServer, TechTag::Cloud, TechTag::M365]
        );
        assert_eq!(tech("Red Hat kernel update", ""), vec![TechTag::Linux]);
    }

    #[test]
    fn test_classifiers_are_independent() {
        let base = "ransomware exploit";
        let with_tech = "ransomware exploit on windows nginx vmware";
        assert_eq!(classify_security(base), classify_security(with_tech));

        let tech_only = "windows nginx";
        let with_security = "windows nginx phishing malware";
        assert_eq!(classify_tech(tech_only), classify_tech(with_security));
    }
}
