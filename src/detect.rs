//! Feed dialect detection
//!
//! Detection only looks at a bounded prefix of the input. [`SniffReader`]
//! keeps that prefix and replays it in front of the unread remainder, so
//! the parse that follows sees exactly the original byte sequence.

use std::io::{Chain, Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::{Dialect, FeedError, Result};

/// Reader that peeks a bounded prefix and replays it on demand
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use syndfeed_rs::{Dialect, SniffReader};
///
/// let xml = r#"<rss version="2.0"><channel/></rss>"#;
/// let sniffer = SniffReader::new(xml.as_bytes(), 8).unwrap();
/// assert_eq!(sniffer.prefix(), b"<rss ver");
///
/// let mut replayed = String::new();
/// sniffer.into_reader().read_to_string(&mut replayed).unwrap();
/// assert_eq!(replayed, xml);
/// ```
#[derive(Debug)]
pub struct SniffReader<R> {
    prefix: Vec<u8>,
    inner: R,
}

impl<R: Read> SniffReader<R> {
    /// Read up to `limit` bytes from `inner` into the peek buffer
    ///
    /// Fewer bytes are kept when the input is shorter than `limit`.
    pub fn new(mut inner: R, limit: usize) -> Result<Self> {
        let mut prefix = Vec::with_capacity(limit.min(64 * 1024));
        inner.by_ref().take(limit as u64).read_to_end(&mut prefix)?;
        Ok(Self { prefix, inner })
    }

    /// Bytes read so far
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Classify the document from the buffered prefix
    pub fn detect(&self) -> Result<Dialect> {
        detect_dialect(&self.prefix)
    }

    /// Reader yielding the buffered prefix followed by the unread input
    pub fn into_reader(self) -> Chain<Cursor<Vec<u8>>, R> {
        Cursor::new(self.prefix).chain(self.inner)
    }
}

/// Classify a document by the local name of its first element
///
/// `rss` means RSS and `feed` means Atom. Any other root, or no complete
/// start tag within `prefix`, is [`FeedError::UnrecognizedFormat`].
///
/// # Example
///
/// ```
/// use syndfeed_rs::{detect_dialect, Dialect};
///
/// let xml = br#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom">"#;
/// assert_eq!(detect_dialect(xml).unwrap(), Dialect::Atom);
/// assert!(detect_dialect(b"<books/>").is_err());
/// ```
pub fn detect_dialect(prefix: &[u8]) -> Result<Dialect> {
    let mut reader = Reader::from_reader(prefix);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let dialect = match e.local_name().as_ref() {
                    b"rss" => Dialect::Rss,
                    b"feed" => Dialect::Atom,
                    other => {
                        return Err(FeedError::UnrecognizedFormat(format!(
                            "unknown root element <{}>",
                            String::from_utf8_lossy(other)
                        )));
                    }
                };
                debug!("Detected {} document", dialect);
                return Ok(dialect);
            }
            Ok(Event::Eof) => {
                return Err(FeedError::UnrecognizedFormat(
                    "no root element found".to_string(),
                ));
            }
            Err(e) => {
                return Err(FeedError::UnrecognizedFormat(format!(
                    "no root element found: {}",
                    e
                )));
            }
            Ok(_) => {}
        }

        buf.clear();
    }
}
