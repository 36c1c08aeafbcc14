//! Dialect detection and fatal errors

use std::io::Read;

use syndfeed_rs::{
    Dialect, FeedError, ModuleRegistry, Parser, ParserConfig, SniffReader, detect_dialect, parse,
    parse_str,
};

#[test]
fn test_rss_root_detected() {
    let feed = parse_str(r#"<rss version="2.0"><channel/></rss>"#).unwrap();
    assert_eq!(feed.dialect(), Dialect::Rss);
}

#[test]
fn test_atom_root_detected() {
    let feed = parse_str(r#"<feed xmlns="http://www.w3.org/2005/Atom"/>"#).unwrap();
    assert_eq!(feed.dialect(), Dialect::Atom);
}

#[test]
fn test_unknown_root_rejected() {
    let xml = r#"<?xml version="1.0"?><books><book>Dune</book></books>"#;
    match parse_str(xml) {
        Err(FeedError::UnrecognizedFormat(msg)) => assert!(msg.contains("books")),
        other => panic!("expected UnrecognizedFormat, got {:?}", other),
    }
}

#[test]
fn test_rdf_root_rejected() {
    let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#;
    assert!(matches!(
        parse_str(xml),
        Err(FeedError::UnrecognizedFormat(_))
    ));
}

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(parse_str(""), Err(FeedError::UnrecognizedFormat(_))));
}

#[test]
fn test_malformed_document_rejected() {
    let cases = [
        "<rss><channel></rss>",
        "<rss><channel><title>Unclosed</title></channel>",
        "<feed><entry></feed>",
    ];
    for xml in cases {
        assert!(
            matches!(parse_str(xml), Err(FeedError::MalformedDocument(_))),
            "{xml}"
        );
    }
}

#[test]
fn test_leading_comments_and_whitespace() {
    let xml = "\n\n  <!-- feed follows -->\n<?xml-stylesheet href=\"s.xsl\"?>\n<rss version=\"2.0\"><channel><title>T</title></channel></rss>";
    let feed = parse(xml.as_bytes()).unwrap();
    assert_eq!(feed.title.as_deref(), Some("T"));
}

#[test]
fn test_sniff_reader_replay_is_lossless() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>Replay</title></feed>"#;
    let sniffer = SniffReader::new(xml.as_bytes(), 16).unwrap();
    assert!(detect_dialect(sniffer.prefix()).is_err());

    let mut replayed = Vec::new();
    sniffer.into_reader().read_to_end(&mut replayed).unwrap();
    assert_eq!(replayed, xml.as_bytes());
}

#[test]
fn test_deep_nesting_rejected() {
    let depth = 100_000;
    let xml = format!(
        "<rss><channel><docs>{}{}</docs></channel></rss>",
        "<b>".repeat(depth),
        "</b>".repeat(depth)
    );
    let err = parse_str(&xml).unwrap_err();
    assert!(matches!(err, FeedError::MalformedDocument(_)));
}

#[test]
fn test_max_depth_configurable() {
    let xml = r#"<rss version="2.0"><channel><item><title>Deep</title></item></channel></rss>"#;
    let parser = Parser::new(
        ParserConfig {
            max_depth: 3,
            ..ParserConfig::new()
        },
        ModuleRegistry::with_builtins(),
    );
    assert!(matches!(parser.parse_str(xml), Err(FeedError::MalformedDocument(_))));

    let parser = Parser::new(
        ParserConfig {
            max_depth: 4,
            ..ParserConfig::new()
        },
        ModuleRegistry::with_builtins(),
    );
    let feed = parser.parse_str(xml).unwrap();
    assert_eq!(feed.items[0].title.as_deref(), Some("Deep"));
}
