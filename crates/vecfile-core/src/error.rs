//! Error taxonomy for vector file I/O.
//!
//! Three top-level classes, mirroring where a failure originates:
//!
//! - [`Error::Io`] - filesystem and stream failures (open, permission, disk full)
//! - [`Error::Format`] - structurally invalid or inconsistent serialized content
//! - [`Error::UnsupportedFormat`] - a path suffix that maps to no known format
//!
//! Errors are never swallowed: codecs and adapters fail on the first detected
//! inconsistency, and no partially populated vector is ever returned.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for all Vecfile operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally invalid or semantically inconsistent serialized content.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Path suffix does not map to a supported container format.
    #[error("unsupported format for {path:?} (expected .xml or .xml.gz)")]
    UnsupportedFormat {
        /// The offending path, verbatim.
        path: PathBuf,
    },
}

/// Detailed reasons a serialized document was rejected.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The document is not well-formed XML.
    #[error("malformed XML at byte {offset}: {message}")]
    Syntax {
        /// Byte offset into the document where parsing stopped.
        offset: usize,
        /// What the parser expected or found.
        message: String,
    },

    /// An element appeared where a different one was required.
    #[error("expected element <{expected}>, found <{found}>")]
    UnexpectedElement {
        /// The element name the schema requires here.
        expected: &'static str,
        /// The element name actually found.
        found: String,
    },

    /// A required element was absent.
    #[error("missing element <{element}>")]
    MissingElement {
        /// The absent element's name.
        element: &'static str,
    },

    /// A required attribute was absent.
    #[error("element <{element}> is missing attribute {attribute:?}")]
    MissingAttribute {
        /// The element the attribute belongs on.
        element: &'static str,
        /// The absent attribute's name.
        attribute: &'static str,
    },

    /// An attribute value failed to parse.
    #[error("attribute {attribute:?} has invalid value {text:?}")]
    BadAttribute {
        /// The attribute's name.
        attribute: &'static str,
        /// The unparsable text, verbatim.
        text: String,
    },

    /// Declared container size disagrees with the number of entries found.
    #[error("declared size {declared} does not match entry count {found}")]
    SizeMismatch {
        /// The `size` attribute value.
        declared: usize,
        /// How many entries the body actually held.
        found: usize,
    },

    /// An entry index fell outside `[0, size)`.
    #[error("entry index {index} out of range for size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The declared container size.
        size: usize,
    },

    /// The same entry index appeared more than once.
    #[error("duplicate entry index {index}")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },

    /// A NaN or infinite value was encountered and non-finite values are
    /// not enabled.
    #[error("non-finite value {text:?} at entry index {index}")]
    NonFiniteValue {
        /// Index of the offending entry.
        index: usize,
        /// Textual form of the value.
        text: String,
    },

    /// A `.gz` file did not contain valid gzip data.
    #[error("corrupt gzip data: {0}")]
    CorruptGzip(String),

    /// The file content was not valid UTF-8.
    #[error("file content is not valid UTF-8")]
    InvalidEncoding,
}
