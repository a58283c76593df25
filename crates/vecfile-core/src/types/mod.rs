//! Vector types for Vecfile.
//!
//! This module contains the owned vector type and the narrow capability
//! trait the codecs operate on:
//! - [`DenseVector`] - fixed-length, contiguously stored `f64` sequence
//! - [`VectorData`] - read-only "has a size, has indexable values" view

mod vector;

pub use vector::{DenseVector, VectorData};
