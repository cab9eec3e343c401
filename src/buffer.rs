//! Reference-counted copy-on-write storage shared by all typed arrays.
//!
//! A [`SharedBuffer`] is either *null* (never set) or holds an
//! `Arc<Vec<f64>>`. Cloning only bumps the reference count. Reading never
//! copies; [`SharedBuffer::make_mut`] duplicates the data only when another
//! holder still references it, so every other holder keeps the old values.
//!
//! # Example
//!
//! ```rust
//! use trueno_histogram::SharedBuffer;
//!
//! let a = SharedBuffer::from(vec![1.0, 2.0]);
//! let mut b = a.clone();
//! assert!(a.ptr_eq(&b));
//!
//! b.make_mut()[0] = 10.0;
//! assert_eq!(a.as_slice(), &[1.0, 2.0]);
//! assert_eq!(b.as_slice(), &[10.0, 2.0]);
//! ```

use std::sync::Arc;

/// Nullable copy-on-write buffer of `f64` values.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    data: Option<Arc<Vec<f64>>>,
}

impl SharedBuffer {
    /// Creates the null buffer.
    #[must_use]
    pub const fn null() -> Self {
        Self { data: None }
    }

    /// Creates a zero-filled buffer of `len` elements.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![0.0; len])
    }

    /// Creates a buffer of `len` copies of `value`.
    #[must_use]
    pub fn filled(len: usize, value: f64) -> Self {
        Self::from_vec(vec![value; len])
    }

    /// Takes ownership of `values` without copying.
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            data: Some(Arc::new(values)),
        }
    }

    /// Returns true if the buffer has never been set.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// Number of elements (0 for null).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.len())
    }

    /// Returns true if the buffer is null or holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the values (empty for null).
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match &self.data {
            Some(data) => data.as_slice(),
            None => &[],
        }
    }

    /// Mutable view of the values, detaching from other holders first.
    ///
    /// A null buffer yields an empty slice and stays null.
    pub fn make_mut(&mut self) -> &mut [f64] {
        match self.data.as_mut() {
            Some(arc) => {
                if Arc::strong_count(arc) > 1 {
                    tracing::trace!(len = arc.len(), "detaching shared buffer");
                }
                Arc::make_mut(arc).as_mut_slice()
            }
            None => Default::default(),
        }
    }

    /// Returns true if both buffers are non-null and point at the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Number of holders sharing this storage (0 for null).
    #[must_use]
    pub fn use_count(&self) -> usize {
        self.data.as_ref().map_or(0, Arc::strong_count)
    }

    /// Copies the values out into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Resizes to `len`, zero-filling new positions. Null buffers stay null.
    pub(crate) fn resize(&mut self, len: usize) {
        if let Some(arc) = self.data.as_mut() {
            if arc.len() != len {
                Arc::make_mut(arc).resize(len, 0.0);
            }
        }
    }
}

impl PartialEq for SharedBuffer {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl From<Vec<f64>> for SharedBuffer {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

impl From<&[f64]> for SharedBuffer {
    fn from(values: &[f64]) -> Self {
        Self::from_vec(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for SharedBuffer {
    fn from(values: [f64; N]) -> Self {
        Self::from_vec(values.to_vec())
    }
}
