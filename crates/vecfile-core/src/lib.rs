//! # vecfile-core
//!
//! Core layer for Vecfile: vector types, error taxonomy, and the XML
//! container codec.
//!
//! This crate knows nothing about files or compression. It maps between an
//! in-memory vector of `f64` values and the textual XML container format,
//! and defines the error taxonomy shared by the whole workspace.
//!
//! ## Modules
//!
//! - [`types`] - Vector types ([`DenseVector`]) and the [`VectorData`] capability trait
//! - [`codec`] - Container codecs ([`XmlCodec`] behind the [`VectorCodec`] trait)
//! - [`error`] - Error taxonomy ([`Error`], [`FormatError`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use codec::{VectorCodec, XmlCodec};
pub use error::{Error, FormatError, Result};
pub use types::{DenseVector, VectorData};
