//! Parse entry points
//!
//! A parse reads the document prefix to pick a dialect, builds the XML tree
//! from the replayed stream, then hands the root to the matching walker.

use std::io::{BufReader, Read};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::date::parse_date;
use crate::detect::SniffReader;
use crate::module::{Dispatch, ModuleRegistry, Target};
use crate::xml::parse_document;
use crate::{Dialect, Element, Feed, ParserConfig, Result, atom, rss};

/// Feed parser with its own configuration and extension modules
///
/// # Example
///
/// ```
/// use syndfeed_rs::{ModuleRegistry, Parser, ParserConfig};
///
/// let mut config = ParserConfig::new();
/// config.capture_extensions = false;
/// let parser = Parser::new(config, ModuleRegistry::with_builtins());
///
/// let feed = parser
///     .parse_str(r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>T</title></feed>"#)
///     .unwrap();
/// assert_eq!(feed.title.as_deref(), Some("T"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
    registry: ModuleRegistry,
}

impl Parser {
    /// Create a parser from a configuration and a module registry
    pub fn new(config: ParserConfig, registry: ModuleRegistry) -> Self {
        Self { config, registry }
    }

    /// Parser configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Modules used by this parser
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Mutable access to the modules, for registration between parses
    pub fn registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.registry
    }

    /// Parse a feed from any reader
    pub fn parse<R: Read>(&self, reader: R) -> Result<Feed> {
        Context::new(&self.config, &self.registry).parse(reader)
    }

    /// Parse a feed held in memory
    pub fn parse_str(&self, xml: &str) -> Result<Feed> {
        self.parse(xml.as_bytes())
    }
}

/// Parse a feed with the built-in modules and default configuration
///
/// # Example
///
/// ```
/// use syndfeed_rs::{parse, Dialect};
///
/// let xml = r#"<rss version="2.0"><channel><title>News</title></channel></rss>"#;
/// let feed = parse(xml.as_bytes()).unwrap();
///
/// assert_eq!(feed.dialect(), Dialect::Rss);
/// assert_eq!(feed.version.as_deref(), Some("2.0"));
/// assert_eq!(feed.title.as_deref(), Some("News"));
/// ```
pub fn parse<R: Read>(reader: R) -> Result<Feed> {
    parse_with_registry(reader, ModuleRegistry::builtin())
}

/// Parse a feed held in memory with the built-in modules
pub fn parse_str(xml: &str) -> Result<Feed> {
    parse(xml.as_bytes())
}

/// Parse a feed with a caller-supplied module registry
pub fn parse_with_registry<R: Read>(reader: R, registry: &ModuleRegistry) -> Result<Feed> {
    let config = ParserConfig::default();
    Context::new(&config, registry).parse(reader)
}

/// Borrowed configuration and modules for one parse
pub(crate) struct Context<'a> {
    pub(crate) config: &'a ParserConfig,
    registry: &'a ModuleRegistry,
}

impl<'a> Context<'a> {
    pub(crate) fn new(config: &'a ParserConfig, registry: &'a ModuleRegistry) -> Self {
        Self { config, registry }
    }

    fn parse<R: Read>(&self, reader: R) -> Result<Feed> {
        let sniffer = SniffReader::new(reader, self.config.sniff_limit)?;
        let dialect = sniffer.detect()?;
        let input = BufReader::new(sniffer.into_reader());
        let root = parse_document(input, self.config.max_depth)?;

        let feed = match dialect {
            Dialect::Rss => rss::parse_rss(&root, self),
            Dialect::Atom => atom::parse_atom(&root, self),
        };
        debug!("Parsed {} feed with {} items", dialect, feed.items.len());
        Ok(feed)
    }

    /// Hand an extension element to the module for `namespace`
    pub(crate) fn dispatch(
        &self,
        namespace: &str,
        element: &Element,
        target: Target<'_>,
    ) -> Dispatch {
        self.registry
            .dispatch(namespace, element, target, self.config.capture_extensions)
    }

    /// Parse the element text as a date into `field`
    ///
    /// An unparsable date leaves `field` untouched.
    pub(crate) fn set_date(&self, field: &mut Option<DateTime<Utc>>, element: &Element) {
        match parse_date(&element.text()) {
            Ok(date) => *field = Some(date),
            Err(e) => debug!("Ignoring <{}> date: {}", element.name(), e),
        }
    }
}
