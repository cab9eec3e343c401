//! X-axis arrays: points, bin edges and point uncertainties.

use super::convert;
use crate::buffer::SharedBuffer;
use crate::error::{Error, Result};

typed_array!(
    /// Representative X value of each bin, one per bin.
    Points
);

typed_array!(
    /// Boundaries of the bins, one more than the number of bins.
    BinEdges
);

typed_array!(
    /// Variances of the point positions.
    PointVariances
);

typed_array!(
    /// Standard deviations of the point positions (the histogram's Dx).
    PointStandardDeviations
);

impl_offsetable!(Points);
impl_scalable!(Points);
impl_offsetable!(BinEdges);
impl_scalable!(BinEdges);
impl_scalable!(PointVariances);
impl_scalable!(PointStandardDeviations);

impl Points {
    /// Bin centers of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateConstruction`] for a single edge, which
    /// bounds no bin.
    pub fn from_bin_edges(edges: &BinEdges) -> Result<Self> {
        if edges.is_null() {
            return Ok(Self::null());
        }
        if edges.len() == 1 {
            return Err(Error::DegenerateConstruction("a single bin edge bounds no bin"));
        }
        Ok(Self::from(convert::points_from_edges(edges.as_slice())))
    }

    /// `count` points `start, start + step, ...`.
    #[must_use]
    pub fn linear(count: usize, start: f64, step: f64) -> Self {
        Self::from(linear_values(count, start, step))
    }
}

impl BinEdges {
    /// Edges surrounding `points`.
    ///
    /// Inner edges are midpoints between neighbouring points; the outer edges
    /// are extrapolated by half the neighbouring spacing. A single point `p`
    /// yields `[p - 0.5, p + 0.5]`.
    #[must_use]
    pub fn from_points(points: &Points) -> Self {
        if points.is_null() {
            return Self::null();
        }
        Self::from(convert::edges_from_points(points.as_slice()))
    }

    /// `count` edges `start, start + step, ...`.
    #[must_use]
    pub fn linear(count: usize, start: f64, step: f64) -> Self {
        Self::from(linear_values(count, start, step))
    }

    /// `count` edges starting at `start`, each `factor` times the previous.
    #[must_use]
    pub fn logarithmic(count: usize, start: f64, factor: f64) -> Self {
        let values = std::iter::successors(Some(start), |v| Some(v * factor)).take(count).collect();
        Self::from_buffer(SharedBuffer::from_vec(values))
    }

    /// Widths of all bins.
    #[must_use]
    pub fn widths(&self) -> Vec<f64> {
        self.as_slice().windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Returns true if every edge is larger than the one before.
    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.as_slice().windows(2).all(|w| w[1] > w[0])
    }
}

fn linear_values(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

impl From<&PointStandardDeviations> for PointVariances {
    fn from(sd: &PointStandardDeviations) -> Self {
        Self::from_buffer(convert::map_values(&sd.shared_data(), convert::variance))
    }
}

impl From<&PointVariances> for PointStandardDeviations {
    fn from(var: &PointVariances) -> Self {
        Self::from_buffer(convert::map_values(&var.shared_data(), convert::standard_deviation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_from_edges() {
        let points = Points::from_bin_edges(&BinEdges::from([1.0, 2.0, 3.0, 5.0])).unwrap();
        assert_eq!(points.as_slice(), &[1.5, 2.5, 4.0]);
    }

    #[test]
    fn test_points_from_empty_edges() {
        let points = Points::from_bin_edges(&BinEdges::from(Vec::<f64>::new())).unwrap();
        assert!(!points.is_null());
        assert!(points.is_empty());
    }

    #[test]
    fn test_points_from_single_edge_fails() {
        let result = Points::from_bin_edges(&BinEdges::from([1.0]));
        assert!(matches!(result, Err(Error::DegenerateConstruction(_))));
    }

    #[test]
    fn test_points_from_null_edges_is_null() {
        assert!(Points::from_bin_edges(&BinEdges::null()).unwrap().is_null());
    }

    #[test]
    fn test_edges_from_points() {
        let edges = BinEdges::from_points(&Points::from([1.0, 2.0, 4.0]));
        assert_eq!(edges.as_slice(), &[0.5, 1.5, 3.0, 5.0]);
    }

    #[test]
    fn test_edges_from_single_point() {
        let edges = BinEdges::from_points(&Points::from([2.0]));
        assert_eq!(edges.as_slice(), &[1.5, 2.5]);
    }

    #[test]
    fn test_linear_and_logarithmic() {
        assert_eq!(BinEdges::linear(4, 0.0, 0.5).as_slice(), &[0.0, 0.5, 1.0, 1.5]);
        assert_eq!(Points::linear(2, 1.0, 1.0).as_slice(), &[1.0, 2.0]);
        assert_eq!(BinEdges::logarithmic(4, 1.0, 2.0).as_slice(), &[1.0, 2.0, 4.0, 8.0]);
        assert!(BinEdges::logarithmic(0, 1.0, 2.0).is_empty());
    }

    #[test]
    fn test_widths_and_monotonicity() {
        let edges = BinEdges::from([1.0, 2.0, 3.0, 5.0]);
        assert_eq!(edges.widths(), vec![1.0, 1.0, 2.0]);
        assert!(edges.is_strictly_increasing());
        assert!(!BinEdges::from([1.0, 1.0]).is_strictly_increasing());
    }

    #[test]
    fn test_offset_and_scale() {
        let edges = BinEdges::from([1.0, 2.0]) + 1.0;
        assert_eq!(edges.as_slice(), &[2.0, 3.0]);
        let edges = edges * 2.0;
        assert_eq!(edges.as_slice(), &[4.0, 6.0]);
        let points = Points::from([1.0]) - 0.5;
        assert_eq!(points.as_slice(), &[0.5]);
    }

    #[test]
    fn test_offset_does_not_touch_shared_copy() {
        let a = Points::from([1.0, 2.0]);
        let mut b = a.clone();
        b += 10.0;
        assert_eq!(a.as_slice(), &[1.0, 2.0]);
        assert_eq!(b.as_slice(), &[11.0, 12.0]);
    }

    #[test]
    fn test_point_uncertainty_conversions() {
        let sd = PointStandardDeviations::from([2.0, 3.0]);
        let var = PointVariances::from(&sd);
        assert_eq!(var.as_slice(), &[4.0, 9.0]);
        assert_eq!(PointStandardDeviations::from(&var), sd);
    }

    #[test]
    fn test_typed_array_basics() {
        let mut points = Points::new(3);
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], 0.0);
        points[1] = 4.0;
        assert_eq!(points.to_vec(), vec![0.0, 4.0, 0.0]);

        let filled = Points::with_value(2, 7.0);
        assert_eq!(filled.iter().sum::<f64>(), 14.0);

        let null = Points::null();
        assert!(null.is_null());
        assert!(null.is_empty());
        assert_ne!(null, Points::from(Vec::<f64>::new()));
        assert_eq!(Points::default(), Points::null());
        assert_eq!(Points::from(2_usize).len(), 2);
    }

    #[test]
    fn test_shared_data_counts_holders() {
        let points = Points::from([1.0, 2.0]);
        let buffer = points.shared_data();
        assert_eq!(points.use_count(), 2);
        assert!(buffer.ptr_eq(&points.clone().into_buffer()));
    }
}
