use sn_core::{Article, SecurityTag, SecurityTags, TechTag};
use sn_engine::classify::{classifier_text, classify_security};
use sn_engine::recommend::FALLBACK_RECOMMENDATION;
use sn_engine::scripts::FALLBACK_SCRIPT;
use sn_engine::build_advisory;

fn esxi_article() -> Article {
    Article {
        id: "a1".to_string(),
        date: "2024-06-01".to_string(),
        title: "New Ransomware Targets ESXi via SSH".to_string(),
        summary: "attackers exploit VMware ESXi".to_string(),
        url: "http://x".to_string(),
        source: "Test".to_string(),
        tags: [SecurityTag::Ransomware].into_iter().collect(),
    }
}

#[test]
fn test_esxi_ransomware_advisory() {
    let advisory = build_advisory(&esxi_article());

    assert!(advisory.tags.contains(&SecurityTag::Ransomware));
    assert_eq!(advisory.tech.iter().copied().collect::<Vec<_>>(), vec![TechTag::VMware]);
    assert!(advisory.recommendations[0].starts_with("Validate the integrity and recoverability of recent backups"));

    let names: Vec<&str> = advisory.scripts.iter().map(|s| s.name.as_str()).collect();
    let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
    let windows = position("PowerShell: hunt for suspicious processes and autoruns");
    let linux = position("Linux: hunt for suspicious processes and SUID binaries");
    let esxi = position("ESXi / Linux: review SSH authentication attempts");
    assert!(windows < linux && linux < esxi);
}

#[test]
fn test_unmatched_article_gets_fallbacks() {
    let article = Article {
        id: "g1".to_string(),
        date: "2024-06-01".to_string(),
        title: "Generic update notice".to_string(),
        summary: String::new(),
        url: String::new(),
        source: String::new(),
        tags: SecurityTags::new(),
    };
    let advisory = build_advisory(&article);

    assert_eq!(advisory.tags.iter().copied().collect::<Vec<_>>(), vec![SecurityTag::Cybersecurity]);
    assert_eq!(advisory.tech.iter().copied().collect::<Vec<_>>(), vec![TechTag::Generic]);
    assert_eq!(advisory.recommendations, vec![FALLBACK_RECOMMENDATION.to_string()]);
    assert_eq!(advisory.scripts.len(), 1);
    assert_eq!(advisory.scripts[0].name, FALLBACK_SCRIPT.name);
}

#[test]
fn test_builder_is_deterministic() {
    let article = esxi_article();
    let first = serde_json::to_string(&build_advisory(&article)).unwrap();
    let second = serde_json::to_string(&build_advisory(&article)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_ransomware_keyword_is_detected() {
    for keyword in ["ransomware", "extortion"] {
        for text in [keyword.to_string(), format!("prefix{}suffix", keyword), format!("A {} story", keyword.to_uppercase())] {
            let tags = classify_security(&classifier_text(&text, ""));
            assert!(tags.contains(&SecurityTag::Ransomware), "{}", text);
        }
    }
}
