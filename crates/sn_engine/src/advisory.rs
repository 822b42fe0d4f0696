use sn_core::{Advisory, Article};

use crate::classify::{classifier_text, classify_security, classify_tech};
use crate::recommend::recommend;
use crate::scripts::generate_scripts;
use crate::severity::derive_severity;

/// Turn one article into its advisory. Pure: the same article always yields
/// the same advisory.
pub fn build_advisory(article: &Article) -> Advisory {
    let text = classifier_text(&article.title, &article.summary);
    let tags = classify_security(&text);
    let tech = classify_tech(&text);

    let recommendations = recommend(&tags);
    let scripts = generate_scripts(article, &tags, &tech);
    let severity = derive_severity(&tags);

    Advisory {
        id: article.id.clone(),
        date: article.date.clone(),
        title: article.title.clone(),
        url: article.url.clone(),
        source: article.source.clone(),
        summary: article.summary.clone(),
        tags,
        tech,
        severity,
        recommendations,
        scripts,
    }
}
