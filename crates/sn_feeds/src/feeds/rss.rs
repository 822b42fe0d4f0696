use async_trait::async_trait;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use sn_core::{Error, Result};
use std::time::Duration;

use super::{FeedEntry, FeedSource, FeedSpec};

const USER_AGENT: &str = concat!("sn/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An RSS 2.0 or Atom feed fetched over HTTP.
pub struct RssFeed {
    spec: FeedSpec,
    client: reqwest::Client,
}

impl RssFeed {
    pub fn new(spec: FeedSpec) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { spec, client })
    }
}

#[async_trait]
impl FeedSource for RssFeed {
    fn source(&self) -> &str {
        &self.spec.source
    }

    fn url(&self) -> &str {
        &self.spec.url
    }

    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>> {
        let body = self
            .client
            .get(&self.spec.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_feed(&body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Summary,
    Published,
    Updated,
}

impl Field {
    fn from_tag(local_name: &[u8]) -> Option<Self> {
        match local_name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" | b"summary" | b"content" | b"encoded" => Some(Field::Summary),
            b"pubDate" | b"published" | b"date" => Some(Field::Published),
            b"updated" => Some(Field::Updated),
            _ => None,
        }
    }
}

/// Accumulates the text of one `<item>`/`<entry>`. The first element that
/// fills a field wins, so `description` beats a later `content:encoded`.
/// Atom `updated` is only used when the entry has no publication date.
#[derive(Default)]
struct EntryBuilder {
    entry: FeedEntry,
    updated: String,
    filled: Vec<Field>,
    current: Option<Field>,
}

impl EntryBuilder {
    fn open(&mut self, field: Option<Field>) {
        self.current = field.filter(|f| !self.filled.contains(f));
    }

    fn close(&mut self) {
        if let Some(field) = self.current.take() {
            if !self.slot(field).is_empty() {
                self.filled.push(field);
            }
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.entry.title,
            Field::Link => &mut self.entry.link,
            Field::Summary => &mut self.entry.summary,
            Field::Published => &mut self.entry.published,
            Field::Updated => &mut self.updated,
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(field) = self.current {
            self.slot(field).push_str(text);
        }
    }

    /// Atom links carry the URL in `href`.
    fn link_href(&mut self, element: &BytesStart<'_>) -> Result<()> {
        if self.filled.contains(&Field::Link) {
            return Ok(());
        }
        let href = element
            .try_get_attribute("href")
            .map_err(|e| Error::Feed(format!("Invalid link attribute: {}", e)))?;
        if let Some(href) = href {
            let value = href
                .unescape_value_with(resolve_entity)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&href.value).into_owned());
            if !value.is_empty() {
                self.entry.link = value;
                self.filled.push(Field::Link);
            }
        }
        Ok(())
    }

    fn finish(self) -> FeedEntry {
        let FeedEntry { title, link, summary, published } = self.entry;
        let published = match published.trim() {
            "" => self.updated.trim(),
            date => date,
        };
        FeedEntry {
            title: title.trim().to_string(),
            link: link.trim().to_string(),
            summary: summary.trim().to_string(),
            published: published.to_string(),
        }
    }
}

/// XML entities plus the HTML ones (`&rsquo;`, `&nbsp;`) feeds commonly leak
/// into titles.
fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
}

fn is_entry(local_name: &[u8]) -> bool {
    matches!(local_name, b"item" | b"entry")
}

/// Extract the entries of an RSS 2.0 or Atom document, in document order.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut builder: Option<EntryBuilder> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if is_entry(name.as_ref()) {
                    builder = Some(EntryBuilder::default());
                } else if let Some(b) = builder.as_mut() {
                    if name.as_ref() == b"link" {
                        b.link_href(&e)?;
                    }
                    b.open(Field::from_tag(name.as_ref()));
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(b) = builder.as_mut() {
                    if e.local_name().as_ref() == b"link" {
                        b.link_href(&e)?;
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(b) = builder.as_mut() {
                    // An unknown entity only costs this text node its decoding.
                    let text = t
                        .unescape_with(resolve_entity)
                        .map(|text| text.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                    b.push_text(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(b) = builder.as_mut() {
                    b.push_text(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) => {
                if is_entry(e.local_name().as_ref()) {
                    if let Some(b) = builder.take() {
                        entries.push(b.finish());
                    }
                } else if let Some(b) = builder.as_mut() {
                    b.close();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Feed(format!(
                    "Invalid feed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Example Security News</title>
    <link>https://news.example/</link>
    <item>
      <title>Ransomware gang hits &amp; leaks data</title>
      <link>https://news.example/ransomware</link>
      <description><![CDATA[<p>Attackers exploited a VPN flaw.</p>]]></description>
      <content:encoded><![CDATA[<p>Full article body</p>]]></content:encoded>
      <pubDate>Tue, 05 Mar 2024 14:30:00 +0000</pubDate>
    </item>
    <item>
      <title>Patch Tuesday</title>
      <link>https://news.example/patch</link>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <link href="https://atom.example/"/>
  <entry>
    <title type="html">Phishing kit targets Office 365</title>
    <link rel="alternate" href="https://atom.example/phish"/>
    <link rel="related" href="https://atom.example/other"/>
    <summary>Credential theft at scale</summary>
    <published>2024-03-05T23:30:00-05:00</published>
    <updated>2024-03-07T10:00:00Z</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let entries = parse_feed(RSS).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.title, "Ransomware gang hits & leaks data");
        assert_eq!(first.link, "https://news.example/ransomware");
        assert_eq!(first.summary, "<p>Attackers exploited a VPN flaw.</p>");
        assert_eq!(first.published, "Tue, 05 Mar 2024 14:30:00 +0000");

        let second = &entries[1];
        assert_eq!(second.title, "Patch Tuesday");
        assert!(second.summary.is_empty());
        assert!(second.published_at().is_none());
    }

    #[test]
    fn test_parse_atom() {
        let entries = parse_feed(ATOM).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.title, "Phishing kit targets Office 365");
        assert_eq!(entry.link, "https://atom.example/phish");
        assert_eq!(entry.summary, "Credential theft at scale");
        assert_eq!(entry.published, "2024-03-05T23:30:00-05:00");
    }

    #[test]
    fn test_html_entities_do_not_break_the_feed() {
        let rss = r#"<rss version="2.0"><channel>
  <item>
    <title>Don&rsquo;t click&nbsp;this</title>
    <link>https://news.example/a?x=1&amp;y=2</link>
    <description>Caf&eacute; &#8217;wifi&#8217; &bogus; risk</description>
  </item>
  <item>
    <title>Ok</title>
    <link>https://news.example/ok</link>
  </item>
</channel></rss>"#;
        let entries = parse_feed(rss).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Don\u{2019}t click\u{a0}this");
        assert_eq!(entries[0].link, "https://news.example/a?x=1&y=2");
        assert!(entries[0].summary.contains("&bogus;"));
        assert_eq!(entries[1].title, "Ok");
    }

    #[test]
    fn test_atom_href_with_html_entity() {
        let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry>
  <title>Story</title>
  <link href="https://atom.example/caf&eacute;"/>
</entry></feed>"#;
        let entries = parse_feed(atom).unwrap();
        assert_eq!(entries[0].link, "https://atom.example/caf\u{e9}");
    }

    #[test]
    fn test_published_wins_over_earlier_updated() {
        let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Both dates</title>
    <link href="https://atom.example/both"/>
    <updated>2024-03-07T10:00:00Z</updated>
    <published>2024-03-05T08:00:00Z</published>
  </entry>
  <entry>
    <title>Only updated</title>
    <link href="https://atom.example/updated"/>
    <updated>2024-03-07T10:00:00Z</updated>
  </entry>
</feed>"#;
        let entries = parse_feed(atom).unwrap();
        assert_eq!(entries[0].published, "2024-03-05T08:00:00Z");
        assert_eq!(entries[1].published, "2024-03-07T10:00:00Z");
    }

    #[test]
    fn test_malformed_feed() {
        assert!(parse_feed("<rss><channel><item><title>x</wrong></item>").is_err());
    }

    #[test]
    fn test_document_without_entries() {
        assert!(parse_feed("<html><body>Not a feed</body></html>").unwrap().is_empty());
    }
}
