//! Atom 1.0 documents

use chrono::{TimeZone, Utc};
use syndfeed_rs::{Dialect, Person, parse_str};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en">
  <title type="text">dive into mark</title>
  <subtitle type="html">A &lt;em&gt;lot&lt;/em&gt; of effort went into making this effortless</subtitle>
  <updated>2005-07-31T12:29:29Z</updated>
  <id>tag:example.org,2003:3</id>
  <link rel="alternate" type="text/html" hreflang="en" href="http://example.org/"/>
  <link rel="self" type="application/atom+xml" href="http://example.org/feed.atom"/>
  <rights>Copyright (c) 2003, Mark Pilgrim</rights>
  <generator uri="http://www.example.com/" version="1.0">Example Toolkit</generator>
  <entry>
    <title>Atom draft-07 snapshot</title>
    <link rel="alternate" type="text/html" href="http://example.org/2005/04/02/atom"/>
    <link rel="enclosure" type="audio/mpeg" length="1337" href="http://example.org/audio/ph34r_my_podcast.mp3"/>
    <id>tag:example.org,2003:3.2397</id>
    <updated>2005-07-31T12:29:29Z</updated>
    <published>2003-12-13T08:29:29-04:00</published>
    <author>
      <name>Mark Pilgrim</name>
      <uri>http://example.org/</uri>
      <email>f8dy@example.com</email>
    </author>
    <contributor><name>Sam Ruby</name></contributor>
    <contributor><name>Joe Gregorio</name></contributor>
    <content type="xhtml" xml:lang="en">
      <div xmlns="http://www.w3.org/1999/xhtml"><p><i>[Update: The Atom draft is finished.]</i></p></div>
    </content>
  </entry>
</feed>"#;

#[test]
fn test_atom_feed() {
    let feed = parse_str(SAMPLE).unwrap();

    assert_eq!(feed.dialect(), Dialect::Atom);
    assert_eq!(feed.version.as_deref(), Some("1.0"));
    assert_eq!(feed.title.as_deref(), Some("dive into mark"));
    assert_eq!(
        feed.description.as_deref(),
        Some("A <em>lot</em> of effort went into making this effortless")
    );
    assert_eq!(feed.id.as_deref(), Some("tag:example.org,2003:3"));
    assert_eq!(
        feed.updated,
        Some(Utc.with_ymd_and_hms(2005, 7, 31, 12, 29, 29).unwrap())
    );
    assert_eq!(
        feed.copyright.as_deref(),
        Some("Copyright (c) 2003, Mark Pilgrim")
    );
    assert_eq!(feed.generator.as_deref(), Some("Example Toolkit"));
}

#[test]
fn test_atom_self_and_plain_links_split() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <link rel="self" href="http://example.com/feed"/>
  <link href="http://example.com/"/>
</feed>"#;
    let feed = parse_str(xml).unwrap();
    assert_eq!(feed.feed_link.as_deref(), Some("http://example.com/feed"));
    assert_eq!(feed.link.as_deref(), Some("http://example.com/"));
}

#[test]
fn test_atom_entry() {
    let feed = parse_str(SAMPLE).unwrap();
    assert_eq!(feed.items.len(), 1);
    let entry = &feed.items[0];

    assert_eq!(entry.title.as_deref(), Some("Atom draft-07 snapshot"));
    assert_eq!(entry.guid.as_deref(), Some("tag:example.org,2003:3.2397"));
    assert_eq!(
        entry.link.as_deref(),
        Some("http://example.org/2005/04/02/atom")
    );
    assert_eq!(
        entry.published,
        Some(Utc.with_ymd_and_hms(2003, 12, 13, 12, 29, 29).unwrap())
    );
    assert_eq!(
        entry.authors,
        vec![Person {
            name: Some("Mark Pilgrim".to_string()),
            url: Some("http://example.org/".to_string()),
            email: Some("f8dy@example.com".to_string()),
        }]
    );
    assert_eq!(
        entry.contributors,
        vec![Person::named("Sam Ruby"), Person::named("Joe Gregorio")]
    );
    assert_eq!(entry.enclosures.len(), 1);
    assert_eq!(
        entry.content.as_deref(),
        Some("[Update: The Atom draft is finished.]")
    );
}

#[test]
fn test_atom_alternate_link_after_plain_link() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <link href="http://example.org/2003/12/13/atom03"/>
    <link rel="alternate" href="http://example.org/2003/12/13/atom03.html"/>
    <link rel="edit" href="http://example.org/2003/12/13/atom03/edit"/>
  </entry>
</feed>"#;
    let feed = parse_str(xml).unwrap();
    assert_eq!(
        feed.items[0].link.as_deref(),
        Some("http://example.org/2003/12/13/atom03.html")
    );
}

#[test]
fn test_atom_entries_in_document_order() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry><title>1</title></entry>
  <entry><title>2</title></entry>
  <entry><title>3</title></entry>
</feed>"#;
    let feed = parse_str(xml).unwrap();
    let titles: Vec<_> = feed
        .items
        .iter()
        .filter_map(|e| e.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["1", "2", "3"]);
}

#[test]
fn test_atom_prefixed_root() {
    let xml = r#"<atom:feed xmlns:atom="http://www.w3.org/2005/Atom">
  <atom:title>Prefixed</atom:title>
  <atom:entry><atom:title>E</atom:title></atom:entry>
</atom:feed>"#;
    let feed = parse_str(xml).unwrap();
    assert_eq!(feed.title.as_deref(), Some("Prefixed"));
    assert_eq!(feed.items[0].title.as_deref(), Some("E"));
}
