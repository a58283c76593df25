//! # Vecfile
//!
//! A small numerical I/O library: write a vector of `f64` values to an XML
//! file (optionally gzip-compressed) and read it back bit-exactly.
//!
//! If you're new here, start with [`write`] and [`read`] - the format and
//! compression are inferred from the path suffix: `.xml` for plain XML,
//! `.xml.gz` for gzip-compressed XML. Any other suffix is rejected before
//! any I/O happens.
//!
//! ## Quick Start
//!
//! ```rust
//! use vecfile::DenseVector;
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("x.xml.gz");
//!
//! let x = DenseVector::constant(197, 1.0);
//! vecfile::write(&path, &x)?;
//!
//! let y = vecfile::read(&path)?;
//! assert_eq!(x, y);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Guarantees
//!
//! - Round-trip identity: every value survives bit-for-bit, not merely
//!   within floating-point tolerance.
//! - Strict decoding: a malformed or inconsistent document is a
//!   [`FormatError`]; no partial vector is ever returned.
//! - Crash safety: writes go through a temp file and an atomic rename, so
//!   a failed write never leaves a truncated file behind.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Re-export the consumer-facing API
pub use vecfile_core::codec::{VectorCodec, XmlCodec};
pub use vecfile_core::error::{Error, FormatError, Result};
pub use vecfile_core::types::{DenseVector, VectorData};
pub use vecfile_io::compress::Compression;
pub use vecfile_io::router::{
    CodecOptions, ContainerFormat, PathDescriptor, read, read_with, write, write_with,
};
