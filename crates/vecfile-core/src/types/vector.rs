//! Dense vector storage and the structural capability trait.

use serde::{Deserialize, Serialize};

/// Read-only view of an indexable sequence of `f64` values.
///
/// The codecs encode anything implementing this trait, so backends with
/// their own storage (pooled, mapped, foreign-owned) can be serialized
/// without converting to a [`DenseVector`] first. Decoding always returns
/// a freshly allocated [`DenseVector`]; the codec never retains or aliases
/// caller data across calls.
pub trait VectorData {
    /// Number of values in the vector.
    fn size(&self) -> usize;

    /// Value at `index`.
    ///
    /// Callers only pass indices in `[0, size())`.
    fn value(&self, index: usize) -> f64;
}

/// An ordered, fixed-length sequence of `f64` values, indexed from 0.
///
/// The length is fixed at construction; there is no push/pop surface, so
/// the size invariant holds by construction. Values themselves are mutable
/// through [`values_mut`](Self::values_mut) or indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseVector {
    values: Vec<f64>,
}

impl DenseVector {
    /// Creates a zero-filled vector of the given size.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![0.0; size],
        }
    }

    /// Creates a vector with every entry set to `value`.
    #[must_use]
    pub fn constant(size: usize, value: f64) -> Self {
        Self {
            values: vec![value; size],
        }
    }

    /// Takes ownership of an existing buffer.
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of values.
    #[must_use]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a zero-length vector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only view of the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable view of the values. The length cannot change.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Consumes the vector and returns the underlying buffer.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl VectorData for DenseVector {
    fn size(&self) -> usize {
        self.values.len()
    }

    fn value(&self, index: usize) -> f64 {
        self.values[index]
    }
}

impl From<Vec<f64>> for DenseVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl std::ops::Index<usize> for DenseVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl std::ops::IndexMut<usize> for DenseVector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}
