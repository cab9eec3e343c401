//! # Trueno-Histogram
//!
//! Histogram data model for spectroscopy and scattering data.
//!
//! A [`Histogram`] stores bin positions as points or bin edges, values as
//! counts or frequencies, and their standard deviations. Every array is a
//! reference-counted copy-on-write buffer, so histograms and their arrays are
//! cheap to clone and share. Strongly-typed wrappers ([`Counts`],
//! [`Frequencies`], [`BinEdges`], ...) make mixing up the meaning of an array
//! a compile error, and conversions between flavours happen on demand.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_histogram::prelude::*;
//!
//! let h = Histogram::with_y(BinEdges::from([1.0, 2.0, 3.0, 5.0]), Counts::from([2.0, 3.0, 4.0]))?;
//!
//! // Whole-array conversion
//! assert_eq!(h.frequencies().as_slice(), &[2.0, 3.0, 2.0]);
//!
//! // Per-bin access without converting whole arrays
//! let total: f64 = h.iter().map(|bin| bin.counts()).sum();
//! assert_eq!(total, 9.0);
//! # Ok::<(), trueno_histogram::Error>(())
//! ```
//!
//! ## Arithmetic
//!
//! Scalar scaling uses the standard operators. Combining two histograms goes
//! through [`HistogramMath`], configured by [`Config`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Storage
// ============================================================================

/// Reference-counted copy-on-write storage.
pub mod buffer;

/// Strongly-typed array wrappers.
pub mod arrays;

// ============================================================================
// Histogram
// ============================================================================

/// Histogram aggregate, per-bin items and iteration.
pub mod histogram;

/// Binary and scalar arithmetic.
pub mod math;

/// Rebinning and integration.
pub mod transform;

// ============================================================================
// Configuration and Errors
// ============================================================================

/// Configuration loading.
pub mod config;

/// Error types for histogram operations.
pub mod error;

pub use arrays::{
    BinEdges, CountStandardDeviations, CountVariances, Counts, Frequencies,
    FrequencyStandardDeviations, FrequencyVariances, PointStandardDeviations, PointVariances,
    Points,
};
pub use buffer::SharedBuffer;
pub use config::Config;
pub use error::{Error, Result};
pub use histogram::{
    Histogram, HistogramBuilder, HistogramItem, HistogramIterator, Uncertainty, XData, XMode,
    XValues, YData, YMode,
};
pub use math::HistogramMath;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_histogram::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arrays::{
        BinEdges, CountStandardDeviations, CountVariances, Counts, Frequencies,
        FrequencyStandardDeviations, FrequencyVariances, PointStandardDeviations,
        PointVariances, Points,
    };
    pub use crate::buffer::SharedBuffer;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::histogram::{Histogram, HistogramBuilder, HistogramItem, XMode, YMode};
    pub use crate::math::HistogramMath;
}
