//! RSS 2.0 element walker

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::module::Target;
use crate::parser::Context;
use crate::xml::assign;
use crate::{Dialect, Element, Enclosure, Feed, Item, Person};

/// Build a [`Feed`] from an `<rss>` root element
pub(crate) fn parse_rss(root: &Element, ctx: &Context<'_>) -> Feed {
    let mut feed = Feed::new(Dialect::Rss);
    feed.version = root.attr("version").map(str::to_string);

    let namespaces: BTreeMap<String, String> = root
        .namespace_declarations()
        .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
        .collect();

    let walker = Walker {
        ctx,
        namespaces: &namespaces,
    };
    match root.child("channel") {
        Some(channel) => walker.channel(channel, &mut feed),
        None => debug!("RSS document has no <channel>"),
    }

    feed.namespaces = namespaces;
    feed
}

struct Walker<'a> {
    ctx: &'a Context<'a>,
    namespaces: &'a BTreeMap<String, String>,
}

impl Walker<'_> {
    fn channel(&self, channel: &Element, feed: &mut Feed) {
        for el in channel.children() {
            if el.prefix().is_some() {
                self.extension(el, Target::Feed(feed));
                continue;
            }
            match ChannelField::from_name(el.name()) {
                Some(field) => field.apply(el, feed, self),
                None => trace!("Skipping <{}> in channel", el.name()),
            }
        }
    }

    fn item(&self, element: &Element) -> Item {
        let mut item = Item::default();
        for el in element.children() {
            if el.prefix().is_some() {
                self.extension(el, Target::Item(&mut item));
                continue;
            }
            match ItemField::from_name(el.name()) {
                Some(field) => field.apply(el, &mut item, self.ctx),
                None => trace!("Skipping <{}> in item", el.name()),
            }
        }
        item
    }

    /// Route a prefixed element to the module for its namespace
    fn extension(&self, element: &Element, target: Target<'_>) {
        let namespace = element
            .prefix()
            .and_then(|prefix| self.namespaces.get(prefix))
            .map(String::as_str)
            .or(element.namespace());

        match namespace {
            Some(namespace) => {
                self.ctx.dispatch(namespace, element, target);
            }
            None => trace!("Undeclared prefix on <{}>", element.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelField {
    Title,
    Description,
    Link,
    Category,
    Copyright,
    Generator,
    Image,
    Language,
    LastBuildDate,
    PubDate,
    Item,
}

impl ChannelField {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "title" => Self::Title,
            "description" => Self::Description,
            "link" => Self::Link,
            "category" => Self::Category,
            "copyright" => Self::Copyright,
            "generator" => Self::Generator,
            "image" => Self::Image,
            "language" => Self::Language,
            "lastBuildDate" => Self::LastBuildDate,
            "pubDate" => Self::PubDate,
            "item" => Self::Item,
            _ => return None,
        })
    }

    fn apply(self, el: &Element, feed: &mut Feed, walker: &Walker<'_>) {
        match self {
            Self::Title => assign(&mut feed.title, el),
            Self::Description => assign(&mut feed.description, el),
            Self::Link => {
                if let Some(link) = el.value() {
                    feed.links.push(link.clone());
                    feed.link = Some(link);
                }
            }
            Self::Category => feed.categories.extend(el.value()),
            Self::Copyright => assign(&mut feed.copyright, el),
            Self::Generator => assign(&mut feed.generator, el),
            Self::Image => {
                if let Some(url) = el.child("url") {
                    assign(&mut feed.image_url, url);
                }
            }
            Self::Language => assign(&mut feed.language, el),
            Self::LastBuildDate => walker.ctx.set_date(&mut feed.updated, el),
            Self::PubDate => walker.ctx.set_date(&mut feed.published, el),
            Self::Item => feed.items.push(walker.item(el)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Author,
    Category,
    Comments,
    Description,
    Enclosure,
    Guid,
    Link,
    PubDate,
    Title,
}

impl ItemField {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "author" => Self::Author,
            "category" => Self::Category,
            "comments" => Self::Comments,
            "description" => Self::Description,
            "enclosure" => Self::Enclosure,
            "guid" => Self::Guid,
            "link" => Self::Link,
            "pubDate" => Self::PubDate,
            "title" => Self::Title,
            _ => return None,
        })
    }

    fn apply(self, el: &Element, item: &mut Item, ctx: &Context<'_>) {
        match self {
            Self::Author => item.authors.extend(el.value().map(Person::named)),
            Self::Category => item.categories.extend(el.value()),
            Self::Comments => assign(&mut item.comments_url, el),
            Self::Description => assign(&mut item.description, el),
            Self::Enclosure => {
                let attr = |name: &str| {
                    el.attr(name)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                };
                let enclosure = Enclosure {
                    url: attr("url"),
                    length: attr("length"),
                    mime_type: attr("type"),
                };
                if enclosure != Enclosure::default() {
                    item.enclosures.push(enclosure);
                }
            }
            Self::Guid => assign(&mut item.guid, el),
            Self::Link => assign(&mut item.link, el),
            Self::PubDate => ctx.set_date(&mut item.published, el),
            Self::Title => assign(&mut item.title, el),
        }
    }
}
