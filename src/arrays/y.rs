//! Y-axis arrays: counts and frequencies.

use super::convert;
use super::x::BinEdges;
use crate::error::Result;

typed_array!(
    /// Accumulated value per bin.
    Counts
);

typed_array!(
    /// Counts divided by bin width.
    Frequencies
);

impl_addable!(Counts);
impl_scalable!(Counts);
impl_addable!(Frequencies);
impl_scalable!(Frequencies);

impl Counts {
    /// Integrates `frequencies` over the bin widths of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`](crate::Error::SizeMismatch) unless
    /// `edges` has one more element than `frequencies`.
    pub fn from_frequencies(frequencies: &Frequencies, edges: &BinEdges) -> Result<Self> {
        convert::apply_widths(&frequencies.shared_data(), edges.as_slice(), convert::to_count)
            .map(Self::from_buffer)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.iter().sum()
    }
}

impl Frequencies {
    /// Divides `counts` by the bin widths of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`](crate::Error::SizeMismatch) unless
    /// `edges` has one more element than `counts`.
    pub fn from_counts(counts: &Counts, edges: &BinEdges) -> Result<Self> {
        convert::apply_widths(&counts.shared_data(), edges.as_slice(), convert::to_frequency)
            .map(Self::from_buffer)
    }
}
