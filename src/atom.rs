//! Atom 1.0 element walker

use tracing::trace;

use crate::module::{ATOM, Target};
use crate::parser::Context;
use crate::xml::{assign, unescape_html};
use crate::{Dialect, Element, Enclosure, Feed, Item, Person};

/// Atom 0.3 namespace; its vocabulary overlaps 1.0 for the fields we map
const ATOM_03: &str = "http://purl.org/atom/ns#";

/// Build a [`Feed`] from a `<feed>` root element
pub(crate) fn parse_atom(root: &Element, ctx: &Context<'_>) -> Feed {
    let mut feed = Feed::new(Dialect::Atom);
    feed.version = root
        .attr("version")
        .map(str::to_string)
        .or_else(|| (root.namespace() == Some(ATOM)).then(|| "1.0".to_string()));
    feed.namespaces = root
        .namespace_declarations()
        .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
        .collect();

    let mut state = FeedState::default();
    for el in root.children() {
        if let Some(namespace) = foreign_namespace(el) {
            ctx.dispatch(namespace, el, Target::Feed(&mut feed));
            continue;
        }
        match AtomFeedField::from_name(el.name()) {
            Some(field) => field.apply(el, &mut feed, &mut state, ctx),
            None => trace!("Skipping <{}> in feed", el.name()),
        }
    }
    feed
}

fn parse_entry(entry: &Element, ctx: &Context<'_>) -> Item {
    let mut item = Item::default();
    let mut state = EntryState::default();
    for el in entry.children() {
        if let Some(namespace) = foreign_namespace(el) {
            ctx.dispatch(namespace, el, Target::Item(&mut item));
            continue;
        }
        match AtomEntryField::from_name(el.name()) {
            Some(field) => field.apply(el, &mut item, &mut state, ctx),
            None => trace!("Skipping <{}> in entry", el.name()),
        }
    }
    item
}

/// Namespace of an element that is not part of the Atom vocabulary
fn foreign_namespace(element: &Element) -> Option<&str> {
    element
        .namespace()
        .filter(|ns| *ns != ATOM && *ns != ATOM_03)
}

fn person(element: &Element) -> Option<Person> {
    let child = |name: &str| element.child(name).and_then(Element::value);
    let person = Person {
        name: child("name"),
        url: child("uri").or_else(|| child("url")),
        email: child("email"),
    };
    if person.is_empty() {
        element.value().map(Person::named)
    } else {
        Some(person)
    }
}

fn category(element: &Element) -> Option<String> {
    element
        .attr("term")
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| element.value())
}

fn href(element: &Element) -> Option<String> {
    element
        .attr("href")
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}

fn html_text(field: &mut Option<String>, element: &Element, ctx: &Context<'_>) {
    if let Some(text) = element.value() {
        *field = Some(if ctx.config.unescape_html {
            unescape_html(&text)
        } else {
            text
        });
    }
}

#[derive(Debug, Default)]
struct FeedState {
    logo_seen: bool,
}

#[derive(Debug, Default)]
struct EntryState {
    alternate_seen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomFeedField {
    Title,
    Link,
    Updated,
    Published,
    Author,
    Contributor,
    Category,
    Generator,
    Logo,
    Icon,
    Rights,
    Subtitle,
    Id,
    Entry,
}

impl AtomFeedField {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "title" => Self::Title,
            "link" => Self::Link,
            "updated" => Self::Updated,
            "published" => Self::Published,
            "author" => Self::Author,
            "contributor" => Self::Contributor,
            "category" => Self::Category,
            "generator" => Self::Generator,
            "logo" => Self::Logo,
            "icon" => Self::Icon,
            "rights" => Self::Rights,
            "subtitle" => Self::Subtitle,
            "id" => Self::Id,
            "entry" => Self::Entry,
            _ => return None,
        })
    }

    fn apply(self, el: &Element, feed: &mut Feed, state: &mut FeedState, ctx: &Context<'_>) {
        match self {
            Self::Title => assign(&mut feed.title, el),
            Self::Link => {
                let Some(href) = href(el) else { return };
                if el.attr("rel") == Some("self") {
                    feed.feed_link = Some(href.clone());
                } else if feed.link.is_none() {
                    feed.link = Some(href.clone());
                }
                feed.links.push(href);
            }
            Self::Updated => ctx.set_date(&mut feed.updated, el),
            Self::Published => ctx.set_date(&mut feed.published, el),
            Self::Author => feed.authors.extend(person(el)),
            Self::Contributor => feed.contributors.extend(person(el)),
            Self::Category => feed.categories.extend(category(el)),
            Self::Generator => assign(&mut feed.generator, el),
            Self::Logo => {
                assign(&mut feed.image_url, el);
                state.logo_seen = true;
            }
            Self::Icon => {
                if !state.logo_seen {
                    assign(&mut feed.image_url, el);
                }
            }
            Self::Rights => assign(&mut feed.copyright, el),
            Self::Subtitle => assign(&mut feed.description, el),
            Self::Id => assign(&mut feed.id, el),
            Self::Entry => feed.items.push(parse_entry(el, ctx)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomEntryField {
    Id,
    Title,
    Updated,
    Published,
    Author,
    Contributor,
    Content,
    Link,
    Summary,
    Category,
    Rights,
}

impl AtomEntryField {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "id" => Self::Id,
            "title" => Self::Title,
            "updated" => Self::Updated,
            "published" => Self::Published,
            "author" => Self::Author,
            "contributor" => Self::Contributor,
            "content" => Self::Content,
            "link" => Self::Link,
            "summary" => Self::Summary,
            "category" => Self::Category,
            "rights" => Self::Rights,
            _ => return None,
        })
    }

    fn apply(self, el: &Element, item: &mut Item, state: &mut EntryState, ctx: &Context<'_>) {
        match self {
            Self::Id => assign(&mut item.guid, el),
            Self::Title => assign(&mut item.title, el),
            Self::Updated => ctx.set_date(&mut item.updated, el),
            Self::Published => ctx.set_date(&mut item.published, el),
            Self::Author => item.authors.extend(person(el)),
            Self::Contributor => item.contributors.extend(person(el)),
            Self::Content => html_text(&mut item.content, el, ctx),
            Self::Link => {
                let Some(href) = href(el) else { return };
                match el.attr("rel") {
                    Some("alternate") => {
                        if !state.alternate_seen {
                            item.link = Some(href);
                            state.alternate_seen = true;
                        }
                    }
                    rel => {
                        if rel == Some("enclosure") {
                            item.enclosures.push(Enclosure {
                                url: Some(href.clone()),
                                length: el.attr("length").map(str::to_string),
                                mime_type: el.attr("type").map(str::to_string),
                            });
                        }
                        if item.link.is_none() {
                            item.link = Some(href);
                        }
                    }
                }
            }
            Self::Summary => html_text(&mut item.description, el, ctx),
            Self::Category => item.categories.extend(category(el)),
            Self::Rights => assign(&mut item.copyright, el),
        }
    }
}
