//! Builder for histograms from untyped arrays.

use super::Histogram;
use crate::arrays::{BinEdges, Points};
use crate::buffer::SharedBuffer;
use crate::error::{Error, Result};

/// Builder for creating histograms when the X shape is only known from the
/// array lengths, as with data read from files.
///
/// ```rust
/// use trueno_histogram::{HistogramBuilder, XMode, YMode};
///
/// let h = HistogramBuilder::new()
///     .x(vec![0.0, 1.0, 2.0])
///     .y(vec![5.0, 6.0])
///     .distribution(true)
///     .build()?;
/// assert_eq!(h.x_mode(), XMode::BinEdges);
/// assert_eq!(h.y_mode(), YMode::Frequencies);
/// # Ok::<(), trueno_histogram::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistogramBuilder {
    x: Option<SharedBuffer>,
    y: Option<SharedBuffer>,
    e: Option<SharedBuffer>,
    dx: Option<SharedBuffer>,
    distribution: bool,
}

impl HistogramBuilder {
    /// Create a new histogram builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the X values (points or bin edges).
    #[must_use]
    pub fn x(mut self, x: impl Into<SharedBuffer>) -> Self {
        self.x = Some(x.into());
        self
    }

    /// Set the Y values.
    #[must_use]
    pub fn y(mut self, y: impl Into<SharedBuffer>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Set the standard deviations of Y.
    #[must_use]
    pub fn e(mut self, e: impl Into<SharedBuffer>) -> Self {
        self.e = Some(e.into());
        self
    }

    /// Set the point standard deviations.
    #[must_use]
    pub fn dx(mut self, dx: impl Into<SharedBuffer>) -> Self {
        self.dx = Some(dx.into());
        self
    }

    /// Treat Y as frequencies (`true`) or counts (`false`, the default).
    #[must_use]
    pub fn distribution(mut self, distribution: bool) -> Self {
        self.distribution = distribution;
        self
    }

    /// Build and validate the histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] without X or Y and
    /// [`Error::SizeMismatch`] if X is neither as long as Y nor one longer.
    pub fn build(self) -> Result<Histogram> {
        let x = self.x.ok_or(Error::MissingData("X"))?;
        let y = self.y.ok_or(Error::MissingData("Y"))?;

        let mut histogram = if x.len() == y.len() {
            Histogram::new(Points::from_buffer(x))?
        } else if x.len() == y.len() + 1 {
            Histogram::new(BinEdges::from_buffer(x))?
        } else {
            return Err(Error::SizeMismatch {
                array: "X",
                expected: y.len() + 1,
                actual: x.len(),
            });
        };

        if self.distribution {
            histogram.set_frequencies(y)?;
            if let Some(e) = self.e {
                histogram.set_frequency_standard_deviations(e)?;
            }
        } else {
            histogram.set_counts(y)?;
            if let Some(e) = self.e {
                histogram.set_count_standard_deviations(e)?;
            }
        }
        if let Some(dx) = self.dx {
            histogram.set_shared_dx(dx)?;
        }
        Ok(histogram)
    }
}
