//! Parser configuration

/// Default number of bytes inspected for format detection
pub const DEFAULT_SNIFF_LIMIT: usize = 1024;

/// Default maximum element nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Feed parser configuration
///
/// Controls how much input is inspected for dialect detection and which
/// optional transformations the element walkers apply.
///
/// # Example
///
/// ```
/// use syndfeed_rs::ParserConfig;
///
/// // Recommended: start from the defaults
/// let config = ParserConfig::new();
/// assert_eq!(config.sniff_limit, 1024);
///
/// // Or construct manually
/// let config = ParserConfig {
///     sniff_limit: 4096,
///     max_depth: 64,
///     capture_extensions: false,
///     unescape_html: true,
/// };
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Maximum number of bytes read before the dialect is decided
    ///
    /// Documents with a long prolog (comments, DOCTYPE, stylesheet
    /// instructions) may need a larger value.
    #[cfg_attr(feature = "serde", serde(default = "default_sniff_limit"))]
    pub sniff_limit: usize,

    /// Deepest element nesting accepted, the root counting as one level
    ///
    /// Deeper documents fail with `FeedError::MalformedDocument`.
    #[cfg_attr(feature = "serde", serde(default = "default_max_depth"))]
    pub max_depth: usize,

    /// Keep namespaced elements that a registered module ignored as
    /// `ExtensionElement`s on the feed or item
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub capture_extensions: bool,

    /// Decode HTML entities in Atom `content` and `summary`
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub unescape_html: bool,
}

#[cfg(feature = "serde")]
fn default_sniff_limit() -> usize {
    DEFAULT_SNIFF_LIMIT
}

#[cfg(feature = "serde")]
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl ParserConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self {
            sniff_limit: DEFAULT_SNIFF_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
            capture_extensions: true,
            unescape_html: true,
        }
    }

    /// Create a default configuration with a custom detection prefix size
    ///
    /// A limit of zero is raised to one byte so detection can make progress.
    pub fn with_sniff_limit(limit: usize) -> Self {
        Self {
            sniff_limit: limit.max(1),
            ..Self::new()
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
