//! Uncertainty arrays for counts and frequencies.

use super::convert;
use super::x::BinEdges;
use crate::error::Result;

typed_array!(
    /// Variances of counts.
    CountVariances
);

typed_array!(
    /// Standard deviations of counts.
    CountStandardDeviations
);

typed_array!(
    /// Variances of frequencies.
    FrequencyVariances
);

typed_array!(
    /// Standard deviations of frequencies.
    FrequencyStandardDeviations
);

impl_addable!(CountVariances);
impl_scalable!(CountVariances);
impl_addable!(FrequencyVariances);
impl_scalable!(FrequencyVariances);
impl_scalable!(CountStandardDeviations);
impl_scalable!(FrequencyStandardDeviations);

impl From<&CountStandardDeviations> for CountVariances {
    fn from(sd: &CountStandardDeviations) -> Self {
        Self::from_buffer(convert::map_values(&sd.shared_data(), convert::variance))
    }
}

impl From<&CountVariances> for CountStandardDeviations {
    fn from(var: &CountVariances) -> Self {
        Self::from_buffer(convert::map_values(&var.shared_data(), convert::standard_deviation))
    }
}

impl From<&FrequencyStandardDeviations> for FrequencyVariances {
    fn from(sd: &FrequencyStandardDeviations) -> Self {
        Self::from_buffer(convert::map_values(&sd.shared_data(), convert::variance))
    }
}

impl From<&FrequencyVariances> for FrequencyStandardDeviations {
    fn from(var: &FrequencyVariances) -> Self {
        Self::from_buffer(convert::map_values(&var.shared_data(), convert::standard_deviation))
    }
}

impl CountStandardDeviations {
    /// Scales frequency standard deviations by the bin widths of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`](crate::Error::SizeMismatch) on incompatible lengths.
    pub fn from_frequency_standard_deviations(
        sd: &FrequencyStandardDeviations,
        edges: &BinEdges,
    ) -> Result<Self> {
        convert::apply_widths(&sd.shared_data(), edges.as_slice(), convert::to_count)
            .map(Self::from_buffer)
    }
}

impl FrequencyStandardDeviations {
    /// Divides count standard deviations by the bin widths of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`](crate::Error::SizeMismatch) on incompatible lengths.
    pub fn from_count_standard_deviations(
        sd: &CountStandardDeviations,
        edges: &BinEdges,
    ) -> Result<Self> {
        convert::apply_widths(&sd.shared_data(), edges.as_slice(), convert::to_frequency)
            .map(Self::from_buffer)
    }
}

impl CountVariances {
    /// Scales frequency variances by the squared bin widths of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`](crate::Error::SizeMismatch) on incompatible lengths.
    pub fn from_frequency_variances(var: &FrequencyVariances, edges: &BinEdges) -> Result<Self> {
        convert::apply_widths(&var.shared_data(), edges.as_slice(), |v, w| v * w * w)
            .map(Self::from_buffer)
    }
}

impl FrequencyVariances {
    /// Divides count variances by the squared bin widths of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`](crate::Error::SizeMismatch) on incompatible lengths.
    pub fn from_count_variances(var: &CountVariances, edges: &BinEdges) -> Result<Self> {
        convert::apply_widths(&var.shared_data(), edges.as_slice(), |v, w| v / (w * w))
            .map(Self::from_buffer)
    }
}
