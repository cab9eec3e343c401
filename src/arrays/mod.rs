//! Strongly-typed numeric arrays.
//!
//! Every wrapper holds a [`SharedBuffer`] and a semantic role fixed by its
//! type. Wrappers of different roles never convert implicitly; the legitimate
//! transforms (edges to points, counts to frequencies, variances to standard
//! deviations) are explicit constructors, the ones needing bin widths taking
//! a [`BinEdges`] argument.

pub(crate) mod convert;

/// Declares a typed array over a [`SharedBuffer`].
macro_rules! typed_array {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            buffer: $crate::buffer::SharedBuffer,
        }

        impl $name {
            /// Role name used in error messages.
            pub const NAME: &'static str = stringify!($name);

            /// Creates the null (unset) array.
            #[must_use]
            pub const fn null() -> Self {
                Self { buffer: $crate::buffer::SharedBuffer::null() }
            }

            /// Creates `len` zero values.
            #[must_use]
            pub fn new(len: usize) -> Self {
                Self { buffer: $crate::buffer::SharedBuffer::zeros(len) }
            }

            /// Creates `len` copies of `value`.
            #[must_use]
            pub fn with_value(len: usize, value: f64) -> Self {
                Self { buffer: $crate::buffer::SharedBuffer::filled(len, value) }
            }

            /// Wraps `buffer` without copying.
            #[must_use]
            pub fn from_buffer(buffer: $crate::buffer::SharedBuffer) -> Self {
                Self { buffer }
            }

            /// Returns true if the array has not been set.
            #[must_use]
            pub fn is_null(&self) -> bool {
                self.buffer.is_null()
            }

            /// Number of values.
            #[must_use]
            pub fn len(&self) -> usize {
                self.buffer.len()
            }

            /// Returns true if the array is null or holds no values.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.buffer.is_empty()
            }

            /// Read-only view of the values.
            #[must_use]
            pub fn as_slice(&self) -> &[f64] {
                self.buffer.as_slice()
            }

            /// Mutable view of the values; copies first if the storage is shared.
            pub fn make_mut(&mut self) -> &mut [f64] {
                self.buffer.make_mut()
            }

            /// Iterates over the values.
            pub fn iter(&self) -> std::slice::Iter<'_, f64> {
                self.as_slice().iter()
            }

            /// Another reference to the underlying storage.
            #[must_use]
            pub fn shared_data(&self) -> $crate::buffer::SharedBuffer {
                self.buffer.clone()
            }

            /// Unwraps into the underlying storage.
            #[must_use]
            pub fn into_buffer(self) -> $crate::buffer::SharedBuffer {
                self.buffer
            }

            /// Number of holders of the underlying storage.
            #[must_use]
            pub fn use_count(&self) -> usize {
                self.buffer.use_count()
            }

            /// Copies the values into a vector.
            #[must_use]
            pub fn to_vec(&self) -> Vec<f64> {
                self.buffer.to_vec()
            }
        }

        impl From<Vec<f64>> for $name {
            fn from(values: Vec<f64>) -> Self {
                Self::from_buffer(values.into())
            }
        }

        impl From<&[f64]> for $name {
            fn from(values: &[f64]) -> Self {
                Self::from_buffer(values.into())
            }
        }

        impl<const N: usize> From<[f64; N]> for $name {
            fn from(values: [f64; N]) -> Self {
                Self::from_buffer(values.into())
            }
        }

        impl From<usize> for $name {
            fn from(len: usize) -> Self {
                Self::new(len)
            }
        }

        impl From<$crate::buffer::SharedBuffer> for $name {
            fn from(buffer: $crate::buffer::SharedBuffer) -> Self {
                Self::from_buffer(buffer)
            }
        }

        impl std::ops::Index<usize> for $name {
            type Output = f64;

            fn index(&self, index: usize) -> &f64 {
                &self.as_slice()[index]
            }
        }

        impl std::ops::IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut f64 {
                &mut self.make_mut()[index]
            }
        }

        impl AsRef<[f64]> for $name {
            fn as_ref(&self) -> &[f64] {
                self.as_slice()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a f64;
            type IntoIter = std::slice::Iter<'a, f64>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    };
}

/// Scalar multiplication.
macro_rules! impl_scalable {
    ($name:ident) => {
        impl std::ops::MulAssign<f64> for $name {
            fn mul_assign(&mut self, factor: f64) {
                self.make_mut().iter_mut().for_each(|v| *v *= factor);
            }
        }

        impl std::ops::Mul<f64> for $name {
            type Output = Self;

            fn mul(mut self, factor: f64) -> Self {
                self *= factor;
                self
            }
        }
    };
}

/// Scalar offset.
macro_rules! impl_offsetable {
    ($name:ident) => {
        impl std::ops::AddAssign<f64> for $name {
            fn add_assign(&mut self, offset: f64) {
                self.make_mut().iter_mut().for_each(|v| *v += offset);
            }
        }

        impl std::ops::SubAssign<f64> for $name {
            fn sub_assign(&mut self, offset: f64) {
                self.make_mut().iter_mut().for_each(|v| *v -= offset);
            }
        }

        impl std::ops::Add<f64> for $name {
            type Output = Self;

            fn add(mut self, offset: f64) -> Self {
                self += offset;
                self
            }
        }

        impl std::ops::Sub<f64> for $name {
            type Output = Self;

            fn sub(mut self, offset: f64) -> Self {
                self -= offset;
                self
            }
        }
    };
}

/// Element-wise addition and subtraction of same-typed arrays.
///
/// Panics if the lengths differ.
macro_rules! impl_addable {
    ($name:ident) => {
        impl std::ops::AddAssign<&$name> for $name {
            fn add_assign(&mut self, other: &$name) {
                assert_eq!(self.len(), other.len(), "{} length mismatch", Self::NAME);
                self.make_mut().iter_mut().zip(other.iter()).for_each(|(a, b)| *a += b);
            }
        }

        impl std::ops::SubAssign<&$name> for $name {
            fn sub_assign(&mut self, other: &$name) {
                assert_eq!(self.len(), other.len(), "{} length mismatch", Self::NAME);
                self.make_mut().iter_mut().zip(other.iter()).for_each(|(a, b)| *a -= b);
            }
        }

        impl std::ops::Add<&$name> for $name {
            type Output = Self;

            fn add(mut self, other: &$name) -> Self {
                self += other;
                self
            }
        }

        impl std::ops::Sub<&$name> for $name {
            type Output = Self;

            fn sub(mut self, other: &$name) -> Self {
                self -= other;
                self
            }
        }
    };
}

mod uncertainty;
mod x;
mod y;

pub use uncertainty::{
    CountStandardDeviations, CountVariances, FrequencyStandardDeviations, FrequencyVariances,
};
pub use x::{BinEdges, PointStandardDeviations, PointVariances, Points};
pub use y::{Counts, Frequencies};
