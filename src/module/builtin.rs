//! Modules registered by [`ModuleRegistry::with_builtins`]

use crate::date::parse_date;
use crate::xml::assign;
use crate::{Element, FeedError, Person, Result};

use super::{Module, ModuleRegistry, Outcome, Target};

/// Dublin Core elements
pub const DUBLIN_CORE: &str = "http://purl.org/dc/elements/1.1/";
/// Dublin Core elements, `https` spelling
pub const DUBLIN_CORE_HTTPS: &str = "https://purl.org/dc/elements/1.1/";
/// RSS 1.0 Content module
pub const CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";
/// RSS 1.0 Content module, `https` spelling
pub const CONTENT_HTTPS: &str = "https://purl.org/rss/1.0/modules/content/";
/// RSS 1.0 Syndication module
pub const SYNDICATION: &str = "http://purl.org/rss/1.0/modules/syndication/";
/// RSS 1.0 Syndication module, `https` spelling
pub const SYNDICATION_HTTPS: &str = "https://purl.org/rss/1.0/modules/syndication/";
/// Atom 1.0 namespace
pub const ATOM: &str = "http://www.w3.org/2005/Atom";

pub(super) fn register_all(registry: &mut ModuleRegistry) {
    registry.register(DUBLIN_CORE, DublinCoreModule);
    registry.register(DUBLIN_CORE_HTTPS, DublinCoreModule);
    registry.register(CONTENT, ContentModule);
    registry.register(CONTENT_HTTPS, ContentModule);
    registry.register(SYNDICATION, SyndicationModule);
    registry.register(SYNDICATION_HTTPS, SyndicationModule);
    registry.register(ATOM, AtomModule);
}

fn timestamp(element: &Element) -> Result<chrono::DateTime<chrono::Utc>> {
    parse_date(&element.text())
        .map_err(|e| FeedError::Extension(format!("<{}>: {}", element.name(), e)))
}

/// Dublin Core metadata (`dc:creator`, `dc:date`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct DublinCoreModule;

impl Module for DublinCoreModule {
    fn handle(&self, element: &Element, target: Target<'_>) -> Result<Outcome> {
        match target {
            Target::Feed(feed) => match element.name() {
                "title" => assign(&mut feed.title, element),
                "creator" => feed.authors.extend(element.value().map(Person::named)),
                "description" => assign(&mut feed.description, element),
                "contributor" => feed.contributors.extend(element.value().map(Person::named)),
                "date" => feed.updated = Some(timestamp(element)?),
                "language" => assign(&mut feed.language, element),
                "rights" => assign(&mut feed.copyright, element),
                _ => return Ok(Outcome::Ignored),
            },
            Target::Item(item) => match element.name() {
                "title" => assign(&mut item.title, element),
                "creator" => item.authors.extend(element.value().map(Person::named)),
                "description" => assign(&mut item.description, element),
                "contributor" => item.contributors.extend(element.value().map(Person::named)),
                "date" => item.published = Some(timestamp(element)?),
                "rights" => assign(&mut item.copyright, element),
                _ => return Ok(Outcome::Ignored),
            },
        }
        Ok(Outcome::Applied)
    }
}

/// `content:encoded` full item bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentModule;

impl Module for ContentModule {
    fn handle(&self, element: &Element, target: Target<'_>) -> Result<Outcome> {
        match (element.name(), target) {
            ("encoded", Target::Item(item)) => {
                assign(&mut item.content, element);
                Ok(Outcome::Applied)
            }
            _ => Ok(Outcome::Ignored),
        }
    }
}

/// RSS Syndication module; only `sy:updateBase` has a model field
#[derive(Debug, Clone, Copy, Default)]
pub struct SyndicationModule;

impl Module for SyndicationModule {
    fn handle(&self, element: &Element, target: Target<'_>) -> Result<Outcome> {
        match (element.name(), target) {
            ("updateBase", Target::Feed(feed)) => {
                feed.updated = Some(timestamp(element)?);
                Ok(Outcome::Applied)
            }
            _ => Ok(Outcome::Ignored),
        }
    }
}

/// `atom:link` inside an RSS channel
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomModule;

impl Module for AtomModule {
    fn handle(&self, element: &Element, target: Target<'_>) -> Result<Outcome> {
        let (Target::Feed(feed), "link") = (target, element.name()) else {
            return Ok(Outcome::Ignored);
        };
        let Some(href) = element.attr("href").filter(|h| !h.is_empty()) else {
            return Ok(Outcome::Ignored);
        };

        if element.attr("rel") == Some("self") {
            feed.feed_link = Some(href.to_string());
        } else if feed.link.is_none() {
            feed.link = Some(href.to_string());
        }
        feed.links.push(href.to_string());
        Ok(Outcome::Applied)
    }
}
