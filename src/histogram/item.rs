//! Per-bin view into a [`Histogram`].

use super::{Histogram, XMode, YMode};
use crate::arrays::convert;

/// One bin of a histogram, computed on demand.
///
/// Every accessor evaluates the same kernels as the whole-array accessors of
/// [`Histogram`], restricted to this bin, so `item.counts()` is bit-identical
/// to `histogram.counts()[item.index()]` without converting the other bins.
///
/// Y-derived accessors panic if the histogram has no Y data.
#[derive(Debug, Clone, Copy)]
pub struct HistogramItem<'a> {
    histogram: &'a Histogram,
    index: usize,
}

impl<'a> HistogramItem<'a> {
    pub(crate) fn new(histogram: &'a Histogram, index: usize) -> Self {
        Self { histogram, index }
    }

    /// Bin index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The histogram this bin belongs to.
    #[must_use]
    pub fn histogram(&self) -> &'a Histogram {
        self.histogram
    }

    /// Stored X value (the lower edge in bin-edge mode).
    #[must_use]
    pub fn x(&self) -> f64 {
        self.histogram.x()[self.index]
    }

    /// Stored Y value.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.histogram.y()[self.index]
    }

    /// Stored standard deviation of Y.
    #[must_use]
    pub fn e(&self) -> f64 {
        self.histogram.e()[self.index]
    }

    /// Bin center.
    #[must_use]
    pub fn center(&self) -> f64 {
        let x = self.histogram.x();
        match self.histogram.x_mode() {
            XMode::Points => x[self.index],
            XMode::BinEdges => convert::midpoint(x[self.index], x[self.index + 1]),
        }
    }

    /// Bin width; in point mode derived from the neighbouring points.
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        let x = self.histogram.x();
        match self.histogram.x_mode() {
            XMode::Points => convert::point_width(x, self.index),
            XMode::BinEdges => convert::edge_width(x, self.index),
        }
    }

    /// Counts in this bin.
    #[must_use]
    pub fn counts(&self) -> f64 {
        match self.histogram.y_mode() {
            YMode::Frequencies => convert::to_count(self.y(), self.bin_width()),
            _ => self.y(),
        }
    }

    /// Standard deviation of the counts.
    #[must_use]
    pub fn count_standard_deviation(&self) -> f64 {
        match self.histogram.y_mode() {
            YMode::Frequencies => convert::to_count(self.e(), self.bin_width()),
            _ => self.e(),
        }
    }

    /// Variance of the counts.
    #[must_use]
    pub fn count_variance(&self) -> f64 {
        convert::variance(self.count_standard_deviation())
    }

    /// Frequency in this bin.
    #[must_use]
    pub fn frequency(&self) -> f64 {
        match self.histogram.y_mode() {
            YMode::Counts => convert::to_frequency(self.y(), self.bin_width()),
            _ => self.y(),
        }
    }

    /// Standard deviation of the frequency.
    #[must_use]
    pub fn frequency_standard_deviation(&self) -> f64 {
        match self.histogram.y_mode() {
            YMode::Counts => convert::to_frequency(self.e(), self.bin_width()),
            _ => self.e(),
        }
    }

    /// Variance of the frequency.
    #[must_use]
    pub fn frequency_variance(&self) -> f64 {
        convert::variance(self.frequency_standard_deviation())
    }

    /// Standard deviation of the point position, if Dx is set.
    #[must_use]
    pub fn point_standard_deviation(&self) -> Option<f64> {
        self.histogram.dx().get(self.index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrays::{BinEdges, Counts, FrequencyStandardDeviations, Frequencies, Points};

    #[test]
    fn test_bin_width_edges() {
        let h = Histogram::with_y(BinEdges::from([1.0, 2.0, 3.0, 5.0]), Counts::from([2.0, 3.0, 4.0]))
            .unwrap();
        let widths: Vec<f64> = h.iter().map(|item| item.bin_width()).collect();
        assert_eq!(widths, vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_bin_width_points_matches_edges() {
        let h = Histogram::new(Points::from([1.1, 1.2, 1.4, 2.0])).unwrap();
        let widths = h.bin_edges().widths();
        for item in &h {
            assert_eq!(item.bin_width(), widths[item.index()]);
        }
    }

    #[test]
    fn test_single_point_width() {
        let h = Histogram::new(Points::from([3.0])).unwrap();
        assert_eq!(h.begin().item().map(|i| i.bin_width()), Some(1.0));
    }

    #[test]
    fn test_center() {
        let h = Histogram::new(BinEdges::from([1.0, 2.0, 4.0])).unwrap();
        let centers: Vec<f64> = h.iter().map(|item| item.center()).collect();
        assert_eq!(centers, h.points().to_vec());
        assert_eq!(centers, vec![1.5, 3.0]);
    }

    #[test]
    fn test_frequency_mode_items() {
        let h = Histogram::with_y_and_e(
            BinEdges::from([0.0, 2.0, 3.0]),
            Frequencies::from([1.0, 4.0]),
            FrequencyStandardDeviations::from([0.5, 2.0]),
        )
        .unwrap();
        let first = h.begin().item().unwrap();
        assert_eq!(first.frequency(), 1.0);
        assert_eq!(first.counts(), 2.0);
        assert_eq!(first.count_standard_deviation(), 1.0);
        assert_eq!(first.count_variance(), 1.0);
        assert_eq!(first.frequency_variance(), 0.25);
        assert_eq!(first.x(), 0.0);
        assert_eq!(first.point_standard_deviation(), None);
    }

    #[test]
    fn test_items_match_whole_arrays_exactly() {
        let h = Histogram::with_y_and_e(
            Points::from([0.3, 0.7, 1.9, 2.2, 5.0]),
            Counts::from([3.0, 1.7, 9.1, 0.0, 2.5]),
            crate::arrays::CountStandardDeviations::from([0.1, 0.3, 0.7, 1.1, 1.3]),
        )
        .unwrap();
        let freq = h.frequencies();
        let fsd = h.frequency_standard_deviations();
        let fvar = h.frequency_variances();
        for item in &h {
            let i = item.index();
            assert_eq!(item.frequency().to_bits(), freq[i].to_bits());
            assert_eq!(item.frequency_standard_deviation().to_bits(), fsd[i].to_bits());
            assert_eq!(item.frequency_variance().to_bits(), fvar[i].to_bits());
            assert_eq!(item.counts().to_bits(), h.counts()[i].to_bits());
        }
    }

    #[test]
    #[should_panic]
    fn test_counts_without_y_panics() {
        let h = Histogram::new(Points::from([1.0])).unwrap();
        let _ = h.begin().item().map(|i| i.counts());
    }
}
