//! Owned XML document tree
//!
//! Both element walkers and every extension module operate on this tree.
//! It is built in one pass from `quick_xml::NsReader` events, so each element
//! knows the namespace URI its prefix resolved to at the point it appeared.
//!
//! Entity references inside text are resolved against the HTML5 entity table
//! (a superset of the five XML entities) because feeds routinely use
//! `&nbsp;` and friends without declaring them. DTDs are never expanded.

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::NsReader;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;

use crate::{DEFAULT_MAX_DEPTH, FeedError, Result};

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (text or CDATA section)
    Text(String),
}

/// An attribute of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Prefix as written (`xmlns` for namespace declarations)
    pub prefix: Option<String>,
    /// Local name
    pub name: String,
    /// Unescaped value
    pub value: String,
}

/// An XML element with its attributes and children
///
/// # Examples
///
/// ```
/// use syndfeed_rs::Element;
///
/// let root = Element::parse_str(
///     r#"<channel><title>News</title><link href="http://x/"/></channel>"#,
/// )
/// .unwrap();
///
/// assert_eq!(root.name(), "channel");
/// assert_eq!(root.child("title").unwrap().text(), "News");
/// assert_eq!(root.child("link").unwrap().attr("href"), Some("http://x/"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    prefix: Option<String>,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with the given local name and no content
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the namespace prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the resolved namespace URI
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add an unprefixed attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            prefix: None,
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a text node
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Parse a complete document and return its root element
    ///
    /// Nesting is limited to [`DEFAULT_MAX_DEPTH`] levels.
    pub fn parse_str(xml: &str) -> Result<Element> {
        parse_document(xml.as_bytes(), DEFAULT_MAX_DEPTH)
    }

    /// Local name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix as written in the document
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Namespace URI the element resolved to, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of an unprefixed attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.prefix.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// `xmlns:prefix="uri"` declarations on this element
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|a| a.prefix.as_deref() == Some("xmlns"))
            .map(|a| (a.name.as_str(), a.value.as_str()))
    }

    /// Child nodes, text included
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|e| e.name == name)
    }

    /// Concatenated text of all descendants, untouched
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// Concatenated text of all descendants with surrounding whitespace removed
    pub fn text(&self) -> String {
        let text = self.inner_text();
        if text.trim().len() == text.len() {
            text
        } else {
            text.trim().to_string()
        }
    }

    /// Trimmed text, or `None` when the element holds only whitespace
    pub fn value(&self) -> Option<String> {
        let text = self.text();
        if text.is_empty() { None } else { Some(text) }
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}

/// Store the trimmed text of `element` in `field`, keeping the old value
/// when the element is blank
pub(crate) fn assign(field: &mut Option<String>, element: &Element) {
    if let Some(value) = element.value() {
        *field = Some(value);
    }
}

/// Build a document tree from a buffered reader
///
/// Fails with [`FeedError::MalformedDocument`] on syntax errors, mismatched
/// end tags, an unclosed root, a second root, a document with no root, or
/// elements nested more than `max_depth` levels deep (at least one level is
/// always allowed).
pub fn parse_document<R: BufRead>(input: R, max_depth: usize) -> Result<Element> {
    let max_depth = max_depth.max(1);
    let mut reader = NsReader::from_reader(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((ns, Event::Start(ref e))) => {
                check_depth(&stack, max_depth)?;
                let element = open_element(ns, e)?;
                if root.is_some() {
                    return Err(malformed("content after the root element"));
                }
                stack.push(element);
            }
            Ok((ns, Event::Empty(ref e))) => {
                check_depth(&stack, max_depth)?;
                let element = open_element(ns, e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok((_, Event::End(_))) => {
                // End names are checked by the reader
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok((_, Event::Text(ref e))) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(decode_text(e)));
                }
            }
            Ok((_, Event::CData(e))) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    parent.children.push(Node::Text(text));
                }
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(quick_xml::Error::Io(e)) => {
                return Err(FeedError::Io(std::io::Error::new(e.kind(), e.to_string())));
            }
            Err(e) => return Err(malformed(format!("XML parse error: {}", e))),
        }

        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| malformed("document has no root element"))
}

fn malformed(msg: impl Into<String>) -> FeedError {
    FeedError::MalformedDocument(msg.into())
}

fn check_depth(stack: &[Element], max_depth: usize) -> Result<()> {
    if stack.len() >= max_depth {
        return Err(malformed(format!("elements nested deeper than {} levels", max_depth)));
    }
    Ok(())
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("content after the root element")),
    }
    Ok(())
}

fn open_element(ns: ResolveResult<'_>, e: &BytesStart<'_>) -> Result<Element> {
    let name = e.name();
    let namespace = match ns {
        ResolveResult::Bound(ns) => Some(lossy(ns.as_ref())),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    };

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(format!("invalid attribute: {}", err)))?;
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => lossy(&attr.value),
        };
        attributes.push(Attribute {
            prefix: attr.key.prefix().map(|p| lossy(p.as_ref())),
            name: lossy(attr.key.local_name().as_ref()),
            value,
        });
    }

    Ok(Element {
        name: lossy(name.local_name().as_ref()),
        prefix: name.prefix().map(|p| lossy(p.as_ref())),
        namespace,
        attributes,
        children: Vec::new(),
    })
}

fn decode_text(e: &BytesText<'_>) -> String {
    match e.unescape_with(|entity| resolve_html5_entity(entity)) {
        Ok(text) => text.into_owned(),
        // Undeclared entity or stray '&': keep the raw text
        Err(_) => lossy(e),
    }
}

fn lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

/// Decode HTML entity references, leaving anything unrecognized as written
///
/// Unlike XML unescaping this never fails: a bare `&` or an unknown entity
/// is copied through unchanged.
pub fn unescape_html(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest[1..]
            .find(';')
            .filter(|&end| end > 0 && end <= 32)
            .and_then(|end| decode_entity(&rest[1..=end]).map(|text| (text, end + 2)));

        match decoded {
            Some((text, consumed)) => {
                out.push_str(&text);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<Cow<'static, str>> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        let c = match char::from_u32(code) {
            Some('\0') | None => char::REPLACEMENT_CHARACTER,
            Some(c) => c,
        };
        return Some(Cow::Owned(c.to_string()));
    }
    resolve_html5_entity(entity).map(Cow::Borrowed)
}
