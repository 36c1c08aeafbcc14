#![doc = include_str!("../README.md")]

mod atom;
mod config;
/// Free-form feed date parsing
pub mod date;
mod detect;
mod error;
mod model;
/// Extension modules for namespaced elements
pub mod module;
mod parser;
mod rss;
/// Owned XML document tree
pub mod xml;

pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_SNIFF_LIMIT, ParserConfig};
pub use date::{DATE_LAYOUTS, parse_date};
pub use detect::{SniffReader, detect_dialect};
pub use error::{DateError, FeedError, Result};
pub use model::{Dialect, Enclosure, ExtensionElement, Feed, Item, Person};
pub use module::{Module, ModuleRegistry, Outcome, Target};
pub use parser::{Parser, parse, parse_str, parse_with_registry};
pub use xml::{Attribute, Element, Node};
