//! The [`Histogram`] aggregate.
//!
//! A histogram stores one X array (points or bin edges), one Y array (counts
//! or frequencies), the standard deviations of Y (always in Y's own flavour)
//! and optionally the standard deviations of the points. All four are
//! [`SharedBuffer`]s, so cloning a histogram is cheap and copies happen only
//! when one of the clones mutates.
//!
//! Consumers ask for the flavour they need ([`Histogram::counts`],
//! [`Histogram::frequencies`], [`Histogram::bin_edges`], ...) and never need to
//! know what is stored natively. Converted arrays are computed on demand;
//! [`Histogram::iter`] gives per-bin access without converting whole arrays.
//!
//! # Example
//!
//! ```rust
//! use trueno_histogram::{BinEdges, Counts, Histogram};
//!
//! let h = Histogram::with_y(BinEdges::from([0.1, 0.2, 0.4]), Counts::from([10.0, 100.0]))?;
//! let freq = h.frequencies();
//! assert!((freq[1] - 500.0).abs() < 1e-9);
//! # Ok::<(), trueno_histogram::Error>(())
//! ```

mod builder;
mod item;
mod iterator;

pub use builder::HistogramBuilder;
pub use item::HistogramItem;
pub use iterator::HistogramIterator;

use std::fmt;
use std::ops::Range;

use crate::arrays::convert;
use crate::arrays::{
    BinEdges, CountStandardDeviations, CountVariances, Counts, Frequencies,
    FrequencyStandardDeviations, FrequencyVariances, PointStandardDeviations, PointVariances,
    Points,
};
use crate::buffer::SharedBuffer;
use crate::error::{Error, Result};

/// Storage shape of the X array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XMode {
    /// One X value per bin.
    Points,
    /// One more X value than bins.
    BinEdges,
}

impl fmt::Display for XMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points => write!(f, "Points"),
            Self::BinEdges => write!(f, "BinEdges"),
        }
    }
}

/// Native flavour of the Y data; latched by the first Y assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YMode {
    /// No Y data assigned yet.
    #[default]
    Uninitialized,
    /// Y holds counts.
    Counts,
    /// Y holds frequencies.
    Frequencies,
}

impl fmt::Display for YMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Counts => write!(f, "Counts"),
            Self::Frequencies => write!(f, "Frequencies"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Typed X arrays a histogram can be built from.
pub trait XData: sealed::Sealed {
    /// Storage shape this type implies.
    const MODE: XMode;

    /// Unwraps into the storage the histogram will share.
    fn into_x_buffer(self) -> SharedBuffer;
}

/// Typed Y arrays a histogram can be built from.
pub trait YData: sealed::Sealed {
    /// Y mode this type latches.
    const MODE: YMode;

    /// Unwraps into the storage the histogram will share.
    fn into_y_buffer(self) -> SharedBuffer;
}

/// Uncertainty arrays, tied at the type level to their Y flavour.
pub trait Uncertainty: sealed::Sealed {
    /// The Y array these uncertainties belong to.
    type Y: YData;

    /// Converts to standard deviations in the flavour of [`Self::Y`].
    fn into_standard_deviations(self) -> SharedBuffer;
}

macro_rules! impl_x_data {
    ($name:ident, $mode:expr) => {
        impl sealed::Sealed for $name {}
        impl XData for $name {
            const MODE: XMode = $mode;
            fn into_x_buffer(self) -> SharedBuffer {
                self.into_buffer()
            }
        }
    };
}

macro_rules! impl_y_data {
    ($name:ident, $mode:expr) => {
        impl sealed::Sealed for $name {}
        impl YData for $name {
            const MODE: YMode = $mode;
            fn into_y_buffer(self) -> SharedBuffer {
                self.into_buffer()
            }
        }
    };
}

impl_x_data!(Points, XMode::Points);
impl_x_data!(BinEdges, XMode::BinEdges);
impl_y_data!(Counts, YMode::Counts);
impl_y_data!(Frequencies, YMode::Frequencies);

impl sealed::Sealed for CountStandardDeviations {}
impl Uncertainty for CountStandardDeviations {
    type Y = Counts;
    fn into_standard_deviations(self) -> SharedBuffer {
        self.into_buffer()
    }
}

impl sealed::Sealed for CountVariances {}
impl Uncertainty for CountVariances {
    type Y = Counts;
    fn into_standard_deviations(self) -> SharedBuffer {
        CountStandardDeviations::from(&self).into_buffer()
    }
}

impl sealed::Sealed for FrequencyStandardDeviations {}
impl Uncertainty for FrequencyStandardDeviations {
    type Y = Frequencies;
    fn into_standard_deviations(self) -> SharedBuffer {
        self.into_buffer()
    }
}

impl sealed::Sealed for FrequencyVariances {}
impl Uncertainty for FrequencyVariances {
    type Y = Frequencies;
    fn into_standard_deviations(self) -> SharedBuffer {
        FrequencyStandardDeviations::from(&self).into_buffer()
    }
}

/// X data accepted by [`Histogram::set_points`], [`Histogram::set_bin_edges`]
/// and [`Histogram::set_shared_x`].
#[derive(Debug, Clone, PartialEq)]
pub enum XValues {
    /// Untagged values, interpreted in the role the setter asks for.
    Raw(SharedBuffer),
    /// Values tagged as points.
    Points(Points),
    /// Values tagged as bin edges.
    BinEdges(BinEdges),
}

impl From<SharedBuffer> for XValues {
    fn from(buffer: SharedBuffer) -> Self {
        Self::Raw(buffer)
    }
}

impl From<Vec<f64>> for XValues {
    fn from(values: Vec<f64>) -> Self {
        Self::Raw(values.into())
    }
}

impl From<&[f64]> for XValues {
    fn from(values: &[f64]) -> Self {
        Self::Raw(values.into())
    }
}

impl<const N: usize> From<[f64; N]> for XValues {
    fn from(values: [f64; N]) -> Self {
        Self::Raw(values.into())
    }
}

impl From<Points> for XValues {
    fn from(points: Points) -> Self {
        Self::Points(points)
    }
}

impl From<BinEdges> for XValues {
    fn from(edges: BinEdges) -> Self {
        Self::BinEdges(edges)
    }
}

/// One binned 1-D spectrum with uncertainties.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    x_mode: XMode,
    y_mode: YMode,
    x: SharedBuffer,
    y: SharedBuffer,
    e: SharedBuffer,
    dx: SharedBuffer,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::empty(XMode::Points, YMode::Uninitialized)
    }
}

impl Histogram {
    /// Creates a histogram with no bins.
    #[must_use]
    pub fn empty(x_mode: XMode, y_mode: YMode) -> Self {
        Self {
            x_mode,
            y_mode,
            x: SharedBuffer::from_vec(Vec::new()),
            y: SharedBuffer::null(),
            e: SharedBuffer::null(),
            dx: SharedBuffer::null(),
        }
    }

    /// Creates a histogram from X data only; Y is assigned later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] for a single bin edge and
    /// [`Error::MissingData`] for null X.
    pub fn new<X: XData>(x: X) -> Result<Self> {
        let x = x.into_x_buffer();
        if x.is_null() {
            return Err(Error::MissingData("X"));
        }
        if X::MODE == XMode::BinEdges && x.len() == 1 {
            return Err(Error::SizeMismatch {
                array: BinEdges::NAME,
                expected: 2,
                actual: 1,
            });
        }
        Ok(Self {
            x_mode: X::MODE,
            x,
            ..Self::empty(X::MODE, YMode::Uninitialized)
        })
    }

    /// Creates a histogram from X and Y; uncertainties start at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the lengths are incompatible.
    pub fn with_y<X: XData, Y: YData>(x: X, y: Y) -> Result<Self> {
        let mut histogram = Self::new(x)?;
        histogram.assign_y(Y::MODE, y.into_y_buffer())?;
        Ok(histogram)
    }

    /// Creates a histogram from X, Y and matching uncertainties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the lengths are incompatible.
    pub fn with_y_and_e<X: XData, E: Uncertainty>(x: X, y: E::Y, e: E) -> Result<Self> {
        let mut histogram = Self::with_y(x, y)?;
        histogram.assign_e(<E::Y as YData>::MODE, e.into_standard_deviations())?;
        Ok(histogram)
    }

    /// Storage shape of X.
    #[must_use]
    pub fn x_mode(&self) -> XMode {
        self.x_mode
    }

    /// Native Y flavour.
    #[must_use]
    pub fn y_mode(&self) -> YMode {
        self.y_mode
    }

    /// Number of bins.
    #[must_use]
    pub fn size(&self) -> usize {
        match self.x_mode {
            XMode::Points => self.x.len(),
            XMode::BinEdges => self.x.len().saturating_sub(1),
        }
    }

    /// Returns true if the histogram has no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns true once Y values have been assigned.
    #[must_use]
    pub fn has_y(&self) -> bool {
        !self.y.is_null()
    }

    // ------------------------------------------------------------------
    // Raw storage
    // ------------------------------------------------------------------

    /// Stored X values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        self.x.as_slice()
    }

    /// Stored Y values (empty if unset).
    #[must_use]
    pub fn y(&self) -> &[f64] {
        self.y.as_slice()
    }

    /// Stored standard deviations of Y (empty if unset).
    #[must_use]
    pub fn e(&self) -> &[f64] {
        self.e.as_slice()
    }

    /// Stored point standard deviations (empty if unset).
    #[must_use]
    pub fn dx(&self) -> &[f64] {
        self.dx.as_slice()
    }

    /// Mutable X values; detaches from other holders first.
    pub fn mutable_x(&mut self) -> &mut [f64] {
        self.x.make_mut()
    }

    /// Mutable Y values; detaches from other holders first.
    pub fn mutable_y(&mut self) -> &mut [f64] {
        self.y.make_mut()
    }

    /// Mutable E values; detaches from other holders first.
    pub fn mutable_e(&mut self) -> &mut [f64] {
        self.e.make_mut()
    }

    /// Mutable Dx values; detaches from other holders first.
    pub fn mutable_dx(&mut self) -> &mut [f64] {
        self.dx.make_mut()
    }

    /// Another reference to the X storage.
    #[must_use]
    pub fn shared_x(&self) -> SharedBuffer {
        self.x.clone()
    }

    /// Another reference to the Y storage.
    #[must_use]
    pub fn shared_y(&self) -> SharedBuffer {
        self.y.clone()
    }

    /// Another reference to the E storage.
    #[must_use]
    pub fn shared_e(&self) -> SharedBuffer {
        self.e.clone()
    }

    /// Another reference to the Dx storage.
    #[must_use]
    pub fn shared_dx(&self) -> SharedBuffer {
        self.dx.clone()
    }

    /// Replaces the X storage without changing its shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::XModeMismatch`] if `x` is tagged with the other shape
    /// and [`Error::SizeMismatch`] if its length does not fit.
    pub fn set_shared_x(&mut self, x: impl Into<XValues>) -> Result<()> {
        let (mode, buffer) = match x.into() {
            XValues::Raw(buffer) => (self.x_mode, buffer),
            XValues::Points(points) => (XMode::Points, points.into_buffer()),
            XValues::BinEdges(edges) => (XMode::BinEdges, edges.into_buffer()),
        };
        if mode != self.x_mode {
            tracing::debug!(expected = %self.x_mode, actual = %mode, "rejected X with wrong shape");
            return Err(Error::XModeMismatch {
                expected: self.x_mode,
                actual: mode,
            });
        }
        self.check_x_len(mode, &buffer)?;
        self.x = buffer;
        Ok(())
    }

    /// Replaces the Y storage in the latched flavour.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] before a Y mode is latched and
    /// [`Error::SizeMismatch`] if the length does not fit.
    pub fn set_shared_y(&mut self, y: SharedBuffer) -> Result<()> {
        let mode = self.require_y_mode()?;
        self.assign_y(mode, y)
    }

    /// Replaces the E storage (standard deviations in the latched flavour).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] before a Y mode is latched and
    /// [`Error::SizeMismatch`] if the length does not fit.
    pub fn set_shared_e(&mut self, e: SharedBuffer) -> Result<()> {
        let mode = self.require_y_mode()?;
        self.assign_e(mode, e)
    }

    /// Replaces or, with a null buffer, clears the Dx storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the length does not fit.
    pub fn set_shared_dx(&mut self, dx: SharedBuffer) -> Result<()> {
        self.set_point_standard_deviations(PointStandardDeviations::from_buffer(dx))
    }

    // ------------------------------------------------------------------
    // X views and setters
    // ------------------------------------------------------------------

    /// X as points, sharing storage when stored natively.
    #[must_use]
    pub fn points(&self) -> Points {
        match self.x_mode {
            XMode::Points => Points::from_buffer(self.x.clone()),
            XMode::BinEdges => {
                tracing::trace!(len = self.x.len(), "computing points from bin edges");
                Points::from(convert::points_from_edges(self.x()))
            }
        }
    }

    /// X as bin edges, sharing storage when stored natively.
    #[must_use]
    pub fn bin_edges(&self) -> BinEdges {
        match self.x_mode {
            XMode::BinEdges => BinEdges::from_buffer(self.x.clone()),
            XMode::Points => {
                tracing::trace!(len = self.x.len(), "computing bin edges from points");
                BinEdges::from(convert::edges_from_points(self.x()))
            }
        }
    }

    /// Stores X as points, converting tagged bin edges. Keeps the bin count.
    ///
    /// Passing the histogram's own point storage is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the data does not describe
    /// [`size`](Self::size) bins.
    pub fn set_points(&mut self, x: impl Into<XValues>) -> Result<()> {
        let points = match x.into() {
            XValues::Raw(buffer) => Points::from_buffer(buffer),
            XValues::Points(points) => points,
            XValues::BinEdges(edges) => {
                self.check_x_len(XMode::BinEdges, &edges.shared_data())?;
                Points::from_bin_edges(&edges)?
            }
        };
        self.store_x(XMode::Points, points.into_buffer())
    }

    /// Stores X as bin edges, converting tagged points. Keeps the bin count.
    ///
    /// Passing the histogram's own edge storage is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the data does not describe
    /// [`size`](Self::size) bins.
    pub fn set_bin_edges(&mut self, x: impl Into<XValues>) -> Result<()> {
        let edges = match x.into() {
            XValues::Raw(buffer) => BinEdges::from_buffer(buffer),
            XValues::BinEdges(edges) => edges,
            XValues::Points(points) => {
                self.check_x_len(XMode::Points, &points.shared_data())?;
                BinEdges::from_points(&points)
            }
        };
        self.store_x(XMode::BinEdges, edges.into_buffer())
    }

    fn store_x(&mut self, mode: XMode, buffer: SharedBuffer) -> Result<()> {
        self.check_x_len(mode, &buffer)?;
        if mode == self.x_mode && self.x.ptr_eq(&buffer) {
            return Ok(());
        }
        self.x_mode = mode;
        self.x = buffer;
        Ok(())
    }

    fn check_x_len(&self, mode: XMode, buffer: &SharedBuffer) -> Result<()> {
        if buffer.is_null() {
            return Err(Error::MissingData("X"));
        }
        let bins = self.size();
        let (array, expected) = match mode {
            XMode::Points => (Points::NAME, bins),
            XMode::BinEdges if bins == 0 => (BinEdges::NAME, 0),
            XMode::BinEdges => (BinEdges::NAME, bins + 1),
        };
        if buffer.len() != expected {
            tracing::debug!(array, expected, actual = buffer.len(), "rejected X data");
            return Err(Error::SizeMismatch {
                array,
                expected,
                actual: buffer.len(),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Y and E views
    // ------------------------------------------------------------------

    /// Counts, converted from frequencies if necessary; null without Y data.
    #[must_use]
    pub fn counts(&self) -> Counts {
        Counts::from_buffer(self.in_flavour(&self.y, YMode::Counts))
    }

    /// Count standard deviations; null without Y data.
    #[must_use]
    pub fn count_standard_deviations(&self) -> CountStandardDeviations {
        CountStandardDeviations::from_buffer(self.in_flavour(&self.e, YMode::Counts))
    }

    /// Count variances; null without Y data.
    #[must_use]
    pub fn count_variances(&self) -> CountVariances {
        CountVariances::from(&self.count_standard_deviations())
    }

    /// Frequencies, converted from counts if necessary; null without Y data.
    #[must_use]
    pub fn frequencies(&self) -> Frequencies {
        Frequencies::from_buffer(self.in_flavour(&self.y, YMode::Frequencies))
    }

    /// Frequency standard deviations; null without Y data.
    #[must_use]
    pub fn frequency_standard_deviations(&self) -> FrequencyStandardDeviations {
        FrequencyStandardDeviations::from_buffer(self.in_flavour(&self.e, YMode::Frequencies))
    }

    /// Frequency variances; null without Y data.
    #[must_use]
    pub fn frequency_variances(&self) -> FrequencyVariances {
        FrequencyVariances::from(&self.frequency_standard_deviations())
    }

    /// Point standard deviations (Dx); null if unset.
    #[must_use]
    pub fn point_standard_deviations(&self) -> PointStandardDeviations {
        PointStandardDeviations::from_buffer(self.dx.clone())
    }

    /// Point variances; null if Dx is unset.
    #[must_use]
    pub fn point_variances(&self) -> PointVariances {
        PointVariances::from(&self.point_standard_deviations())
    }

    /// `values` (stored in the latched flavour) expressed in `target`.
    fn in_flavour(&self, values: &SharedBuffer, target: YMode) -> SharedBuffer {
        if self.y_mode == target {
            return values.clone();
        }
        let kernel = match (self.y_mode, target) {
            (YMode::Frequencies, YMode::Counts) => convert::to_count,
            (YMode::Counts, YMode::Frequencies) => convert::to_frequency,
            _ => return SharedBuffer::null(),
        };
        if values.is_null() {
            return SharedBuffer::null();
        }
        let edges = self.bin_edges();
        // Setters keep one width per value.
        convert::apply_widths(values, edges.as_slice(), kernel).unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Y and E setters
    // ------------------------------------------------------------------

    /// Sets Y as counts, latching [`YMode::Counts`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidModeTransition`] if frequencies were set before
    /// and [`Error::SizeMismatch`] if the length does not fit.
    pub fn set_counts(&mut self, counts: impl Into<Counts>) -> Result<()> {
        self.assign_y(YMode::Counts, counts.into().into_buffer())
    }

    /// Sets Y as frequencies, latching [`YMode::Frequencies`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidModeTransition`] if counts were set before
    /// and [`Error::SizeMismatch`] if the length does not fit.
    pub fn set_frequencies(&mut self, frequencies: impl Into<Frequencies>) -> Result<()> {
        self.assign_y(YMode::Frequencies, frequencies.into().into_buffer())
    }

    /// Sets E from count standard deviations, latching [`YMode::Counts`].
    ///
    /// # Errors
    ///
    /// Same as [`set_counts`](Self::set_counts).
    pub fn set_count_standard_deviations(
        &mut self,
        sd: impl Into<CountStandardDeviations>,
    ) -> Result<()> {
        self.assign_e(YMode::Counts, sd.into().into_buffer())
    }

    /// Sets E from count variances, latching [`YMode::Counts`].
    ///
    /// # Errors
    ///
    /// Same as [`set_counts`](Self::set_counts).
    pub fn set_count_variances(&mut self, var: impl Into<CountVariances>) -> Result<()> {
        self.assign_e(YMode::Counts, var.into().into_standard_deviations())
    }

    /// Sets E from frequency standard deviations, latching [`YMode::Frequencies`].
    ///
    /// # Errors
    ///
    /// Same as [`set_frequencies`](Self::set_frequencies).
    pub fn set_frequency_standard_deviations(
        &mut self,
        sd: impl Into<FrequencyStandardDeviations>,
    ) -> Result<()> {
        self.assign_e(YMode::Frequencies, sd.into().into_buffer())
    }

    /// Sets E from frequency variances, latching [`YMode::Frequencies`].
    ///
    /// # Errors
    ///
    /// Same as [`set_frequencies`](Self::set_frequencies).
    pub fn set_frequency_variances(&mut self, var: impl Into<FrequencyVariances>) -> Result<()> {
        self.assign_e(YMode::Frequencies, var.into().into_standard_deviations())
    }

    /// Sets Dx; a null argument clears it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] unless there is one value per bin.
    pub fn set_point_standard_deviations(
        &mut self,
        sd: impl Into<PointStandardDeviations>,
    ) -> Result<()> {
        let buffer = sd.into().into_buffer();
        if !buffer.is_null() {
            self.check_bins(PointStandardDeviations::NAME, buffer.len())?;
        }
        self.dx = buffer;
        Ok(())
    }

    /// Sets Dx from point variances; a null argument clears it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] unless there is one value per bin.
    pub fn set_point_variances(&mut self, var: impl Into<PointVariances>) -> Result<()> {
        self.set_point_standard_deviations(PointStandardDeviations::from(&var.into()))
    }

    fn require_y_mode(&self) -> Result<YMode> {
        if self.y_mode == YMode::Uninitialized {
            return Err(Error::InvalidOperation(
                "Y mode must be set before replacing Y or E storage".to_string(),
            ));
        }
        Ok(self.y_mode)
    }

    fn check_y_mode(&self, requested: YMode) -> Result<()> {
        match self.y_mode {
            YMode::Uninitialized => Ok(()),
            current if current == requested => Ok(()),
            current => {
                tracing::debug!(%current, %requested, "rejected Y mode change");
                Err(Error::InvalidModeTransition { current, requested })
            }
        }
    }

    fn latch_y_mode(&mut self, mode: YMode) {
        if self.y_mode == YMode::Uninitialized {
            tracing::debug!(%mode, "Y mode latched");
            self.y_mode = mode;
        }
    }

    fn check_bins(&self, array: &'static str, len: usize) -> Result<()> {
        if len != self.size() {
            tracing::debug!(array, expected = self.size(), actual = len, "rejected data");
            return Err(Error::SizeMismatch {
                array,
                expected: self.size(),
                actual: len,
            });
        }
        Ok(())
    }

    /// Stores Y. A null buffer only latches the mode.
    fn assign_y(&mut self, mode: YMode, buffer: SharedBuffer) -> Result<()> {
        self.check_y_mode(mode)?;
        if !buffer.is_null() {
            self.check_bins(y_name(mode), buffer.len())?;
        }
        self.latch_y_mode(mode);
        if buffer.is_null() || self.y.ptr_eq(&buffer) {
            return Ok(());
        }
        if self.e.is_null() {
            self.e = SharedBuffer::zeros(buffer.len());
        }
        self.y = buffer;
        Ok(())
    }

    /// Stores E as standard deviations. A null buffer only latches the mode.
    fn assign_e(&mut self, mode: YMode, buffer: SharedBuffer) -> Result<()> {
        self.check_y_mode(mode)?;
        if !buffer.is_null() {
            self.check_bins(e_name(mode), buffer.len())?;
        }
        self.latch_y_mode(mode);
        if buffer.is_null() || self.e.ptr_eq(&buffer) {
            return Ok(());
        }
        self.e = buffer;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mode conversion, resize, slice
    // ------------------------------------------------------------------

    /// Stores Y and E as counts from now on. No-op if already counts or unset.
    pub fn convert_to_counts(&mut self) {
        if self.y_mode != YMode::Frequencies {
            return;
        }
        tracing::debug!(bins = self.size(), "converting frequencies to counts");
        let y = self.in_flavour(&self.y, YMode::Counts);
        let e = self.in_flavour(&self.e, YMode::Counts);
        self.y = y;
        self.e = e;
        self.y_mode = YMode::Counts;
    }

    /// Stores Y and E as frequencies from now on. No-op if already frequencies or unset.
    pub fn convert_to_frequencies(&mut self) {
        if self.y_mode != YMode::Counts {
            return;
        }
        tracing::debug!(bins = self.size(), "converting counts to frequencies");
        let y = self.in_flavour(&self.y, YMode::Frequencies);
        let e = self.in_flavour(&self.e, YMode::Frequencies);
        self.y = y;
        self.e = e;
        self.y_mode = YMode::Frequencies;
    }

    /// Changes the bin count to `bins`, zero-filling or truncating every array.
    pub fn resize(&mut self, bins: usize) {
        let x_len = match self.x_mode {
            XMode::Points => bins,
            XMode::BinEdges if bins == 0 => 0,
            XMode::BinEdges => bins + 1,
        };
        self.x.resize(x_len);
        self.y.resize(bins);
        self.e.resize(bins);
        self.dx.resize(bins);
    }

    /// Copies the bins in `range` into a new histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `range` is reversed or exceeds
    /// [`size`](Self::size).
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        if range.start > range.end || range.end > self.size() {
            return Err(Error::InvalidRange(format!(
                "bins {}..{} outside 0..{}",
                range.start,
                range.end,
                self.size()
            )));
        }
        let x_range = match self.x_mode {
            XMode::Points => range.clone(),
            XMode::BinEdges if range.is_empty() => range.start..range.start,
            XMode::BinEdges => range.start..range.end + 1,
        };
        let copy = |buffer: &SharedBuffer, r: Range<usize>| {
            if buffer.is_null() {
                SharedBuffer::null()
            } else {
                SharedBuffer::from(&buffer.as_slice()[r])
            }
        };
        Ok(Self {
            x_mode: self.x_mode,
            y_mode: self.y_mode,
            x: copy(&self.x, x_range),
            y: copy(&self.y, range.clone()),
            e: copy(&self.e, range.clone()),
            dx: copy(&self.dx, range),
        })
    }

    /// Copy sharing this histogram's X and Dx, with Y/E replaced.
    pub(crate) fn with_values(&self, y_mode: YMode, y: Vec<f64>, e: Vec<f64>) -> Self {
        Self {
            x_mode: self.x_mode,
            y_mode,
            x: self.x.clone(),
            y: SharedBuffer::from_vec(y),
            e: SharedBuffer::from_vec(e),
            dx: self.dx.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Iterator positioned at the first bin.
    #[must_use]
    pub fn begin(&self) -> HistogramIterator<'_> {
        HistogramIterator::new(self, 0)
    }

    /// Iterator positioned one past the last bin.
    #[must_use]
    pub fn end(&self) -> HistogramIterator<'_> {
        HistogramIterator::new(self, self.size())
    }

    /// Iterates over all bins.
    #[must_use]
    pub fn iter(&self) -> HistogramIterator<'_> {
        self.begin()
    }

    /// View of bin `index`, if it exists.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<HistogramItem<'_>> {
        (index < self.size()).then(|| HistogramItem::new(self, index))
    }
}

impl<'a> IntoIterator for &'a Histogram {
    type Item = HistogramItem<'a>;
    type IntoIter = HistogramIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

fn y_name(mode: YMode) -> &'static str {
    match mode {
        YMode::Frequencies => Frequencies::NAME,
        _ => Counts::NAME,
    }
}

fn e_name(mode: YMode) -> &'static str {
    match mode {
        YMode::Frequencies => FrequencyStandardDeviations::NAME,
        _ => CountStandardDeviations::NAME,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn increasing_edges(max_bins: usize) -> impl Strategy<Value = Vec<f64>> {
        (0.0f64..10.0, prop::collection::vec(0.01f64..5.0, 1..=max_bins)).prop_map(
            |(start, widths)| {
                let mut edges = vec![start];
                for w in widths {
                    let last = edges[edges.len() - 1];
                    edges.push(last + w);
                }
                edges
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// N+1 edges accept N counts and reject N-1 or N+1.
        #[test]
        fn prop_bin_edges_accept_matching_counts(edges in increasing_edges(50)) {
            let n = edges.len() - 1;
            let x = BinEdges::from(edges);
            prop_assert!(Histogram::with_y(x.clone(), Counts::new(n)).is_ok());
            prop_assert!(Histogram::with_y(x.clone(), Counts::new(n + 1)).is_err());
            if n > 0 {
                prop_assert!(Histogram::with_y(x, Counts::new(n - 1)).is_err());
            }
        }

        /// Points-native histograms return their own points unchanged.
        #[test]
        fn prop_points_identity(points in prop::collection::vec(-100.0f64..100.0, 0..50)) {
            let h = Histogram::new(Points::from(points.clone())).unwrap();
            prop_assert_eq!(h.points().to_vec(), points);
        }

        /// counts == frequencies * width regardless of native flavour.
        #[test]
        fn prop_counts_frequencies_consistent(
            edges in increasing_edges(30),
            seed in 0.0f64..1000.0,
            as_frequencies in any::<bool>(),
        ) {
            let n = edges.len() - 1;
            let values: Vec<f64> = (0..n).map(|i| seed + i as f64).collect();
            let x = BinEdges::from(edges);
            let h = if as_frequencies {
                Histogram::with_y(x, Frequencies::from(values)).unwrap()
            } else {
                Histogram::with_y(x, Counts::from(values)).unwrap()
            };
            let counts = h.counts();
            let freq = h.frequencies();
            let widths = h.bin_edges().widths();
            for i in 0..n {
                let expected = freq[i] * widths[i];
                prop_assert!((counts[i] - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }

        /// Resize keeps low-index values and the X/Y length relationship.
        #[test]
        fn prop_resize_preserves_prefix(edges in increasing_edges(30), new_size in 0usize..40) {
            let n = edges.len() - 1;
            let counts: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
            let mut h = Histogram::with_y(BinEdges::from(edges.clone()), Counts::from(counts.clone())).unwrap();
            h.resize(new_size);
            prop_assert_eq!(h.size(), new_size);
            prop_assert_eq!(h.x().len(), if new_size == 0 { 0 } else { new_size + 1 });
            let keep = n.min(new_size);
            prop_assert_eq!(&h.y()[..keep], &counts[..keep]);
            if keep > 0 {
                prop_assert_eq!(&h.x()[..=keep], &edges[..=keep]);
            }
        }
    }
}
