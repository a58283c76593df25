//! Container codecs for vector documents.
//!
//! A codec maps between an in-memory vector and one textual container
//! format. Codecs are pure: encoding reads through the [`VectorData`] view
//! without retaining it, decoding returns a freshly owned
//! [`DenseVector`], and neither touches the filesystem.
//!
//! Only the XML container format exists today ([`XmlCodec`]); the
//! [`VectorCodec`] trait is the seam future formats plug into.

mod xml;

pub use xml::XmlCodec;

use crate::error::Result;
use crate::types::{DenseVector, VectorData};

/// Bidirectional mapping between a vector and one container format.
pub trait VectorCodec {
    /// Serializes `vector` into the container's textual form.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented (for the XML
    /// codec: a non-finite value while non-finite values are disabled).
    fn encode_to_string(&self, vector: &dyn VectorData) -> Result<String>;

    /// Parses a document into a new vector.
    ///
    /// Decoding is strict: the first structural or semantic inconsistency
    /// aborts with a [`FormatError`](crate::error::FormatError) and no
    /// partial vector is returned.
    fn decode_str(&self, text: &str) -> Result<DenseVector>;
}
