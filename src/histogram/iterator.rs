//! Random-access cursor over the bins of a [`Histogram`].
//!
//! The cursor position lives in `[0, size]`; `size` is the end sentinel.
//! Moving past either end clamps instead of wrapping.
//!
//! ```rust
//! use trueno_histogram::{Frequencies, Histogram, Points};
//!
//! let h = Histogram::with_y(Points::from([1.1, 1.2, 1.4]), Frequencies::from([2.0, 3.0, 4.0]))?;
//! let mut it = h.begin();
//! assert_eq!(it.item().map(|bin| bin.frequency()), Some(2.0));
//! it += 3;
//! assert_eq!(it, h.end());
//! # Ok::<(), trueno_histogram::Error>(())
//! ```

use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::{Histogram, HistogramItem};

/// Cursor over histogram bins, also usable as a standard [`Iterator`].
#[derive(Debug, Clone, Copy)]
pub struct HistogramIterator<'a> {
    histogram: &'a Histogram,
    index: usize,
}

impl<'a> HistogramIterator<'a> {
    pub(crate) fn new(histogram: &'a Histogram, index: usize) -> Self {
        Self {
            histogram,
            index: index.min(histogram.size()),
        }
    }

    /// Current position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true at the end sentinel.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.index >= self.histogram.size()
    }

    /// Bin under the cursor; `None` at the end.
    #[must_use]
    pub fn item(&self) -> Option<HistogramItem<'a>> {
        (!self.is_end()).then(|| HistogramItem::new(self.histogram, self.index))
    }

    /// Moves one bin forward.
    pub fn increment(&mut self) {
        self.advance(1);
    }

    /// Moves one bin back.
    pub fn decrement(&mut self) {
        self.advance(-1);
    }

    /// Moves by `delta` bins, clamped to `[0, size]`.
    pub fn advance(&mut self, delta: isize) {
        let size = self.histogram.size();
        self.index = if delta < 0 {
            self.index.saturating_sub(delta.unsigned_abs())
        } else {
            self.index.saturating_add(delta.unsigned_abs()).min(size)
        };
    }

    /// Signed number of bins from `self` to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> isize {
        if other.index >= self.index {
            isize::try_from(other.index - self.index).unwrap_or(isize::MAX)
        } else {
            isize::try_from(self.index - other.index).map_or(isize::MIN, |d| -d)
        }
    }
}

impl PartialEq for HistogramIterator<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.histogram, other.histogram) && self.index == other.index
    }
}

impl Eq for HistogramIterator<'_> {}

impl AddAssign<isize> for HistogramIterator<'_> {
    fn add_assign(&mut self, delta: isize) {
        self.advance(delta);
    }
}

impl SubAssign<isize> for HistogramIterator<'_> {
    fn sub_assign(&mut self, delta: isize) {
        self.advance(delta.saturating_neg());
    }
}

impl Add<isize> for HistogramIterator<'_> {
    type Output = Self;

    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl Sub<isize> for HistogramIterator<'_> {
    type Output = Self;

    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

impl<'a> Iterator for HistogramIterator<'a> {
    type Item = HistogramItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.item()?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.histogram.size() - self.index;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index = self.index.saturating_add(n).min(self.histogram.size());
        self.next()
    }
}

impl ExactSizeIterator for HistogramIterator<'_> {}

impl FusedIterator for HistogramIterator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrays::{BinEdges, Counts, Frequencies, Points};

    fn points_hist() -> Histogram {
        Histogram::with_y(Points::from([1.1, 1.2, 1.4]), Frequencies::from([2.0, 3.0, 4.0]))
            .unwrap()
    }

    #[test]
    fn test_begin_and_end() {
        let h = points_hist();
        let mut it = h.begin();
        assert_eq!(it.item().map(|i| i.frequency()), Some(2.0));
        it.increment();
        it.increment();
        assert_ne!(it, h.end());
        it.increment();
        assert_eq!(it, h.end());
        assert!(it.item().is_none());
    }

    #[test]
    fn test_advance_clamps() {
        let h = points_hist();
        let mut it = h.begin();
        it.advance(10);
        assert_eq!(it.index(), 3);
        it.advance(-10);
        assert_eq!(it.index(), 0);
        it.decrement();
        assert_eq!(it.index(), 0);
        it.advance(isize::MIN);
        assert_eq!(it.index(), 0);
        it.advance(isize::MAX);
        assert_eq!(it, h.end());
    }

    #[test]
    fn test_arithmetic_operators() {
        let h = points_hist();
        let it = h.begin() + 2;
        assert_eq!(it.index(), 2);
        assert_eq!((it - 1).index(), 1);
        assert_eq!((h.end() - 1).item().map(|i| i.frequency()), Some(4.0));
    }

    #[test]
    fn test_distance() {
        let h = points_hist();
        assert_eq!(h.begin().distance_to(&h.end()), 3);
        assert_eq!(h.end().distance_to(&h.begin()), -3);
        assert_eq!(h.begin().distance_to(&h.begin()), 0);
    }

    #[test]
    fn test_equality_requires_same_histogram() {
        let a = points_hist();
        let b = a.clone();
        assert_ne!(a.begin(), b.begin());
        assert_eq!(a.begin(), a.iter());
    }

    #[test]
    fn test_std_iterator() {
        let h = Histogram::with_y(BinEdges::from([1.0, 2.0, 3.0, 5.0]), Counts::from([2.0, 3.0, 4.0]))
            .unwrap();
        assert_eq!(h.iter().len(), 3);
        let counts: Vec<f64> = h.iter().map(|i| i.counts()).collect();
        assert_eq!(counts, vec![2.0, 3.0, 4.0]);
        assert_eq!(h.iter().nth(2).map(|i| i.index()), Some(2));
        assert!(h.iter().nth(5).is_none());

        let mut it = h.iter();
        it.by_ref().for_each(drop);
        assert!(it.next().is_none());
    }

    #[test]
    fn test_early_exit_scan() {
        let h = Histogram::with_y(Points::linear(1000, 0.0, 1.0), Counts::with_value(1000, 1.0))
            .unwrap();
        let found = h.iter().find(|bin| bin.center() >= 500.0).map(|bin| bin.index());
        assert_eq!(found, Some(500));
    }

    #[test]
    fn test_empty_histogram() {
        let h = Histogram::default();
        assert_eq!(h.begin(), h.end());
        assert_eq!(h.iter().count(), 0);
    }
}
