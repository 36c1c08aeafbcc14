//! Extension modules for namespaced elements
//!
//! Neither RSS 2.0 nor Atom 1.0 define elements such as `dc:creator` or
//! `content:encoded`. A [`Module`] registered for a namespace URI receives
//! every element of that namespace the walkers encounter, together with the
//! [`Target`] currently being built.
//!
//! A registry is a plain value: populate it first, then hand it to the
//! parser by shared reference. Registration therefore cannot race with a
//! parse that uses the same registry.
//!
//! # Example
//!
//! ```
//! use syndfeed_rs::module::{ModuleRegistry, Outcome, Target};
//! use syndfeed_rs::{Person, parse_with_registry};
//!
//! let mut registry = ModuleRegistry::with_builtins();
//! registry.register_fn("http://www.itunes.com/dtds/podcast-1.0.dtd", |el, target| {
//!     match (el.name(), target) {
//!         ("author", Target::Item(item)) => {
//!             item.authors.push(Person::named(el.text()));
//!             Ok(Outcome::Applied)
//!         }
//!         _ => Ok(Outcome::Ignored),
//!     }
//! });
//!
//! let xml = r#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
//!   <channel><item><itunes:author>Jane</itunes:author></item></channel>
//! </rss>"#;
//!
//! let feed = parse_with_registry(xml.as_bytes(), &registry).unwrap();
//! assert_eq!(feed.items[0].authors[0].name.as_deref(), Some("Jane"));
//! ```

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, LazyLock};

use tracing::{debug, trace};

use crate::{Element, ExtensionElement, Feed, Item, Result};

pub use self::builtin::{
    ATOM, AtomModule, CONTENT, CONTENT_HTTPS, ContentModule, DUBLIN_CORE, DUBLIN_CORE_HTTPS,
    DublinCoreModule, SYNDICATION, SYNDICATION_HTTPS, SyndicationModule,
};

/// The feed or item an extension element applies to
#[derive(Debug)]
pub enum Target<'a> {
    /// Element appeared at channel / feed scope
    Feed(&'a mut Feed),
    /// Element appeared inside an item / entry
    Item(&'a mut Item),
}

impl Target<'_> {
    /// Shorter-lived copy of this target
    pub fn reborrow(&mut self) -> Target<'_> {
        match self {
            Target::Feed(feed) => Target::Feed(feed),
            Target::Item(item) => Target::Item(item),
        }
    }

    /// True for feed-scope targets
    pub fn is_feed(&self) -> bool {
        matches!(self, Target::Feed(_))
    }

    /// Extension elements captured on the target
    pub fn extensions_mut(&mut self) -> &mut Vec<ExtensionElement> {
        match self {
            Target::Feed(feed) => &mut feed.extensions,
            Target::Item(item) => &mut item.extensions,
        }
    }
}

/// What a module did with an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The element was mapped onto the target
    Applied,
    /// No mapping exists; the element is kept as an [`ExtensionElement`]
    Ignored,
}

/// Handler for the elements of one XML namespace
///
/// Errors returned from `handle` are logged and discarded; they never abort
/// the parse. Closures with the same signature implement this trait.
pub trait Module: Send + Sync {
    /// Apply `element` to `target`
    fn handle(&self, element: &Element, target: Target<'_>) -> Result<Outcome>;
}

impl<F> Module for F
where
    F: Fn(&Element, Target<'_>) -> Result<Outcome> + Send + Sync,
{
    fn handle(&self, element: &Element, target: Target<'_>) -> Result<Outcome> {
        self(element, target)
    }
}

/// Result of routing an element through the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dispatch {
    Applied,
    Captured,
    Ignored,
    Failed,
    Unregistered,
}

static BUILTIN: LazyLock<ModuleRegistry> = LazyLock::new(ModuleRegistry::with_builtins);

/// Namespace URI → module mapping
///
/// `Default` yields the built-in modules, the same as
/// [`ModuleRegistry::with_builtins`].
#[derive(Clone)]
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a registry without any modules
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Create a registry holding the Dublin Core, Content, Syndication and
    /// Atom modules
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Shared read-only registry of the built-in modules
    pub fn builtin() -> &'static ModuleRegistry {
        &BUILTIN
    }

    /// Register `module` for `namespace`, replacing any previous module
    pub fn register(&mut self, namespace: impl Into<String>, module: impl Module + 'static) {
        self.modules.insert(namespace.into(), Arc::new(module));
    }

    /// Register a closure as the module for `namespace`
    pub fn register_fn<F>(&mut self, namespace: impl Into<String>, handler: F)
    where
        F: Fn(&Element, Target<'_>) -> Result<Outcome> + Send + Sync + 'static,
    {
        self.register(namespace, handler);
    }

    /// Remove the module for `namespace`
    pub fn unregister(&mut self, namespace: &str) -> bool {
        self.modules.remove(namespace).is_some()
    }

    /// Module registered for `namespace`
    pub fn lookup(&self, namespace: &str) -> Option<&dyn Module> {
        self.modules.get(namespace).map(|m| m.as_ref())
    }

    /// Check whether `namespace` has a module
    pub fn contains(&self, namespace: &str) -> bool {
        self.modules.contains_key(namespace)
    }

    /// Number of registered namespaces
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if no modules are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Registered namespace URIs, sorted
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        namespaces.sort_unstable();
        namespaces
    }

    /// Route `element` to the module for `namespace`
    ///
    /// Ignored elements are captured on the target when `capture` is set.
    /// A module that errors or panics leaves the target as the module left it
    /// and the parse continues.
    pub(crate) fn dispatch(
        &self,
        namespace: &str,
        element: &Element,
        mut target: Target<'_>,
        capture: bool,
    ) -> Dispatch {
        let Some(module) = self.lookup(namespace) else {
            trace!("No module for <{}> in {}", element.name(), namespace);
            return Dispatch::Unregistered;
        };

        trace!("Dispatching <{}> to module for {}", element.name(), namespace);
        let result = catch_unwind(AssertUnwindSafe(|| {
            module.handle(element, target.reborrow())
        }));

        match result {
            Ok(Ok(Outcome::Applied)) => Dispatch::Applied,
            Ok(Ok(Outcome::Ignored)) if capture => {
                target.extensions_mut().push(ExtensionElement {
                    name: element.name().to_string(),
                    prefix: element.prefix().map(str::to_string),
                    value: element.inner_text(),
                });
                Dispatch::Captured
            }
            Ok(Ok(Outcome::Ignored)) => Dispatch::Ignored,
            Ok(Err(e)) => {
                debug!("Module for {} failed on <{}>: {}", namespace, element.name(), e);
                Dispatch::Failed
            }
            Err(_) => {
                debug!("Module for {} panicked on <{}>", namespace, element.name());
                Dispatch::Failed
            }
        }
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}
