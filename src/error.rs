//! Feed parsing error types

use thiserror::Error;

/// Errors that abort a feed parse
#[derive(Error, Debug)]
pub enum FeedError {
    /// IO error while reading the input stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well-formed XML
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The root element is neither `<rss>` nor `<feed>`
    #[error("Unrecognized feed format: {0}")]
    UnrecognizedFormat(String),

    /// An extension module could not interpret its element
    ///
    /// Only produced by module handlers. The dispatcher absorbs it, so it
    /// never reaches the caller of a parse.
    #[error("Extension module error: {0}")]
    Extension(String),
}

/// Date parsing failures
///
/// These never abort a feed parse; the affected timestamp is left unset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The date string was empty or whitespace only
    #[error("Empty date string")]
    EmptyInput,

    /// No known layout matched the date string
    #[error("Unrecognized date format: {0}")]
    UnrecognizedFormat(String),
}

/// Result type alias using FeedError
pub type Result<T> = std::result::Result<T, FeedError>;
