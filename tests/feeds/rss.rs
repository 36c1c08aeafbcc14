//! RSS 2.0 documents

use chrono::{TimeZone, Utc};
use syndfeed_rs::{Dialect, Enclosure, Person, parse, parse_str};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
     xmlns:dc="http://purl.org/dc/elements/1.1/"
     xmlns:content="http://purl.org/rss/1.0/modules/content/"
     xmlns:sy="http://purl.org/rss/1.0/modules/syndication/"
     xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>Sample Feed</title>
    <link>https://example.com/</link>
    <atom:link href="https://example.com/feed.xml" rel="self" type="application/rss+xml" />
    <description>Sample &amp; friends</description>
    <language>en-us</language>
    <sy:updatePeriod>hourly</sy:updatePeriod>
    <sy:updateBase>2000-01-01T12:00+00:00</sy:updateBase>
    <item>
      <title>First post</title>
      <link>https://example.com/first</link>
      <dc:creator><![CDATA[Andy Yang]]></dc:creator>
      <pubDate>Sun, 06 Sep 2009 16:20:00 +0000</pubDate>
      <guid isPermaLink="false">first</guid>
      <description><![CDATA[<p>Summary</p>]]></description>
      <content:encoded><![CDATA[<p>Full body</p>]]></content:encoded>
      <enclosure url="https://example.com/ep1.mp3" length="1024" type="audio/mpeg" />
    </item>
    <item>
      <title>Second post</title>
      <pubDate>not-a-date</pubDate>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_rss_channel() {
    let feed = parse_str(SAMPLE).unwrap();

    assert_eq!(feed.dialect(), Dialect::Rss);
    assert_eq!(feed.version.as_deref(), Some("2.0"));
    assert_eq!(feed.title.as_deref(), Some("Sample Feed"));
    assert_eq!(feed.description.as_deref(), Some("Sample & friends"));
    assert_eq!(feed.link.as_deref(), Some("https://example.com/"));
    assert_eq!(feed.feed_link.as_deref(), Some("https://example.com/feed.xml"));
    assert_eq!(feed.language.as_deref(), Some("en-us"));
    assert_eq!(
        feed.updated,
        Some(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap())
    );
    assert_eq!(feed.items.len(), 2);
}

#[test]
fn test_rss_namespaces_recorded() {
    let feed = parse_str(SAMPLE).unwrap();
    assert_eq!(feed.namespaces.len(), 4);
    assert_eq!(
        feed.namespace_uri("content"),
        Some("http://purl.org/rss/1.0/modules/content/")
    );
}

#[test]
fn test_rss_dc_creator_becomes_author() {
    let feed = parse_str(SAMPLE).unwrap();
    assert_eq!(feed.items[0].authors, vec![Person::named("Andy Yang")]);
}

#[test]
fn test_rss_item_fields() {
    let feed = parse_str(SAMPLE).unwrap();
    let item = &feed.items[0];

    assert_eq!(item.title.as_deref(), Some("First post"));
    assert_eq!(item.link.as_deref(), Some("https://example.com/first"));
    assert_eq!(item.guid.as_deref(), Some("first"));
    assert_eq!(item.description.as_deref(), Some("<p>Summary</p>"));
    assert_eq!(item.content.as_deref(), Some("<p>Full body</p>"));
    assert_eq!(
        item.enclosures,
        vec![Enclosure {
            url: Some("https://example.com/ep1.mp3".to_string()),
            length: Some("1024".to_string()),
            mime_type: Some("audio/mpeg".to_string()),
        }]
    );
}

#[test]
fn test_rss_pub_date_rfc1123z() {
    let feed = parse_str(SAMPLE).unwrap();
    assert_eq!(
        feed.items[0].published,
        Some(Utc.with_ymd_and_hms(2009, 9, 6, 16, 20, 0).unwrap())
    );
}

#[test]
fn test_rss_unparsable_pub_date_left_unset() {
    let feed = parse_str(SAMPLE).unwrap();
    assert_eq!(feed.items[1].title.as_deref(), Some("Second post"));
    assert_eq!(feed.items[1].published, None);
}

#[test]
fn test_rss_unmapped_module_elements_captured() {
    let feed = parse_str(SAMPLE).unwrap();
    let names: Vec<_> = feed.extensions.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["updatePeriod"]);
    assert_eq!(feed.extensions[0].prefix.as_deref(), Some("sy"));
    assert_eq!(feed.extensions[0].value, "hourly");
}

#[test]
fn test_rss_parse_is_idempotent() {
    let first = parse(SAMPLE.as_bytes()).unwrap();
    let second = parse(SAMPLE.as_bytes()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rss_https_dublin_core_namespace() {
    let xml = r#"<rss version="2.0" xmlns:dc="https://purl.org/dc/elements/1.1/">
  <channel><item><dc:creator>Jane</dc:creator></item></channel>
</rss>"#;
    let feed = parse_str(xml).unwrap();
    assert_eq!(feed.items[0].authors, vec![Person::named("Jane")]);
}

#[test]
fn test_rss_large_document_beyond_sniff_limit() {
    let mut xml = String::from(r#"<rss version="2.0"><channel><title>Big</title>"#);
    for i in 0..500 {
        xml.push_str(&format!("<item><title>Item {i}</title></item>"));
    }
    xml.push_str("</channel></rss>");

    let feed = parse_str(&xml).unwrap();
    assert_eq!(feed.items.len(), 500);
    assert_eq!(feed.items[499].title.as_deref(), Some("Item 499"));
}

#[test]
fn test_rss_minimal_document() {
    let feed = parse_str("<rss/>").unwrap();
    assert_eq!(feed.dialect(), Dialect::Rss);
    assert!(feed.title.is_none());
    assert!(feed.items.is_empty());
}

#[test]
fn test_rss_default_namespace_keeps_core_vocabulary() {
    let xml = r#"<rss version="2.0" xmlns="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>T</title>
    <item><title>Entry</title><creator>Nobody</creator></item>
  </channel>
</rss>"#;
    let feed = parse_str(xml).unwrap();
    assert_eq!(feed.title.as_deref(), Some("T"));
    assert!(feed.authors.is_empty());
    assert!(feed.extensions.is_empty());
    assert_eq!(feed.items[0].title.as_deref(), Some("Entry"));
    assert!(feed.items[0].authors.is_empty());
}

#[test]
fn test_rss_prefix_declared_on_item() {
    let xml = r#"<rss version="2.0">
  <channel>
    <title>T</title>
    <item xmlns:dc="http://purl.org/dc/elements/1.1/">
      <dc:creator>Local</dc:creator>
    </item>
  </channel>
</rss>"#;
    let feed = parse_str(xml).unwrap();
    assert!(feed.namespaces.is_empty());
    assert_eq!(feed.items[0].authors, vec![Person::named("Local")]);
}
