//! Normalized document model
//!
//! Every parse produces one [`Feed`] regardless of the source dialect. Fields
//! that the document does not provide are left empty (`None` or an empty
//! collection); nothing in the model is mandatory.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// Syndication dialect of the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    /// RSS 2.0 (and the 0.9x family sharing the `<rss>` root)
    Rss,
    /// Atom 1.0
    Atom,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Rss => f.write_str("RSS"),
            Dialect::Atom => f.write_str("Atom"),
        }
    }
}

/// Web feed normalized from RSS 2.0 or Atom 1.0
///
/// # Examples
///
/// ```
/// use syndfeed_rs::{Dialect, Feed, Item};
///
/// let mut feed = Feed::new(Dialect::Rss);
/// feed.title = Some("Example".to_string());
/// feed.items.push(Item::default());
///
/// assert_eq!(feed.dialect(), Dialect::Rss);
/// assert_eq!(feed.items.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feed {
    /// Source dialect, fixed at construction
    dialect: Dialect,
    /// Dialect version (`version` attribute of the root element)
    pub version: Option<String>,
    /// Feed-level identifier (Atom `id`)
    pub id: Option<String>,
    /// Feed title
    pub title: Option<String>,
    /// Link to the website the feed describes
    pub link: Option<String>,
    /// Link to the feed document itself (`rel="self"`)
    pub feed_link: Option<String>,
    /// Every link `href` seen at feed scope, in document order
    pub links: Vec<String>,
    /// RSS `description` or Atom `subtitle`
    pub description: Option<String>,
    /// Last modification time
    pub updated: Option<DateTime<Utc>>,
    /// Publication time
    pub published: Option<DateTime<Utc>>,
    /// Feed authors
    pub authors: Vec<Person>,
    /// Feed contributors
    pub contributors: Vec<Person>,
    /// Content language (e.g. `en-us`)
    pub language: Option<String>,
    /// Logo or channel image URL
    pub image_url: Option<String>,
    /// Software that produced the feed
    pub generator: Option<String>,
    /// Rights statement
    pub copyright: Option<String>,
    /// Category labels
    pub categories: Vec<String>,
    /// Entries in document order
    pub items: Vec<Item>,
    /// Namespace declarations on the root element (prefix → URI)
    pub namespaces: BTreeMap<String, String>,
    /// Feed-scope extension elements kept by registered modules
    pub extensions: Vec<ExtensionElement>,
}

impl Feed {
    /// Create an empty feed of the given dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            version: None,
            id: None,
            title: None,
            link: None,
            feed_link: None,
            links: Vec::new(),
            description: None,
            updated: None,
            published: None,
            authors: Vec::new(),
            contributors: Vec::new(),
            language: None,
            image_url: None,
            generator: None,
            copyright: None,
            categories: Vec::new(),
            items: Vec::new(),
            namespaces: BTreeMap::new(),
            extensions: Vec::new(),
        }
    }

    /// Source dialect of this feed
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Resolve a namespace prefix declared on the root element
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }
}

/// A single entry in the feed (RSS `item`, Atom `entry`)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Entry title
    pub title: Option<String>,
    /// Full content (Atom `content`, RSS `content:encoded`)
    pub content: Option<String>,
    /// Summary (Atom `summary`, RSS `description`)
    pub description: Option<String>,
    /// Link to the entry on the web
    pub link: Option<String>,
    /// Last modification time
    pub updated: Option<DateTime<Utc>>,
    /// Publication time
    pub published: Option<DateTime<Utc>>,
    /// Entry authors
    pub authors: Vec<Person>,
    /// Entry contributors
    pub contributors: Vec<Person>,
    /// Comments page URL
    pub comments_url: Option<String>,
    /// Globally unique identifier (RSS `guid`, Atom `id`)
    pub guid: Option<String>,
    /// Representative image URL
    ///
    /// Neither walker nor any built-in module sets this; it is filled only by
    /// modules the caller registers (for example a Media RSS handler).
    pub image_url: Option<String>,
    /// Rights statement
    pub copyright: Option<String>,
    /// Category labels
    pub categories: Vec<String>,
    /// Media attachments
    pub enclosures: Vec<Enclosure>,
    /// Extension elements kept by registered modules
    pub extensions: Vec<ExtensionElement>,
}

/// An author or contributor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    /// Display name
    pub name: Option<String>,
    /// Home page URL
    pub url: Option<String>,
    /// Email address
    pub email: Option<String>,
}

impl Person {
    /// Person known only by name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.email.is_none()
    }
}

/// A media attachment of an item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enclosure {
    /// Location of the attachment
    pub url: Option<String>,
    /// Declared size in bytes, as written in the document
    pub length: Option<String>,
    /// MIME type (e.g. `audio/mpeg`)
    pub mime_type: Option<String>,
}

/// A namespaced element kept verbatim because no richer mapping exists
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtensionElement {
    /// Local element name
    pub name: String,
    /// Namespace prefix as written in the document
    pub prefix: Option<String>,
    /// Inner text
    pub value: String,
}
