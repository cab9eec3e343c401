//! Per-element conversion kernels.
//!
//! Whole-array conversions and [`HistogramItem`](crate::HistogramItem) both
//! evaluate these same functions, so a value computed for a single bin is
//! bit-identical to the same index of the fully converted array.

use crate::buffer::SharedBuffer;
use crate::error::{Error, Result};

/// Center of the interval `[lo, hi]`.
#[inline]
pub(crate) fn midpoint(lo: f64, hi: f64) -> f64 {
    0.5 * (lo + hi)
}

/// Bin edge `k` (0..=n) derived from `n` points.
///
/// Outer edges are extrapolated by half the neighbouring spacing, inner edges
/// are midpoints. A single point `p` spans `[p - 0.5, p + 0.5]`.
///
/// `points` must be non-empty and `k <= points.len()`.
#[inline]
pub(crate) fn edge_from_points(points: &[f64], k: usize) -> f64 {
    let n = points.len();
    if n == 1 {
        return if k == 0 { points[0] - 0.5 } else { points[0] + 0.5 };
    }
    if k == 0 {
        points[0] - 0.5 * (points[1] - points[0])
    } else if k == n {
        points[n - 1] + 0.5 * (points[n - 1] - points[n - 2])
    } else {
        midpoint(points[k - 1], points[k])
    }
}

/// All `n + 1` edges for `n` points (empty for no points).
pub(crate) fn edges_from_points(points: &[f64]) -> Vec<f64> {
    if points.is_empty() {
        return Vec::new();
    }
    (0..=points.len()).map(|k| edge_from_points(points, k)).collect()
}

/// Bin centers for a run of edges (empty for fewer than two edges).
pub(crate) fn points_from_edges(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| midpoint(w[0], w[1])).collect()
}

/// Width of bin `i` given edges.
#[inline]
pub(crate) fn edge_width(edges: &[f64], i: usize) -> f64 {
    edges[i + 1] - edges[i]
}

/// Width of bin `i` given points, consistent with [`edges_from_points`].
#[inline]
pub(crate) fn point_width(points: &[f64], i: usize) -> f64 {
    edge_from_points(points, i + 1) - edge_from_points(points, i)
}

#[inline]
pub(crate) fn to_count(frequency: f64, width: f64) -> f64 {
    frequency * width
}

#[inline]
pub(crate) fn to_frequency(count: f64, width: f64) -> f64 {
    count / width
}

#[inline]
pub(crate) fn variance(standard_deviation: f64) -> f64 {
    standard_deviation * standard_deviation
}

#[inline]
pub(crate) fn standard_deviation(variance: f64) -> f64 {
    variance.sqrt()
}

/// Checks that `edges_len` edges bound `values_len` bins.
pub(crate) fn check_edges(values_len: usize, edges_len: usize) -> Result<()> {
    if values_len == 0 && edges_len == 0 {
        return Ok(());
    }
    if edges_len != values_len + 1 {
        return Err(Error::SizeMismatch {
            array: "BinEdges",
            expected: values_len + 1,
            actual: edges_len,
        });
    }
    Ok(())
}

/// Applies `f(value, width)` element-wise. Null input gives null output.
pub(crate) fn apply_widths(
    values: &SharedBuffer,
    edges: &[f64],
    f: impl Fn(f64, f64) -> f64,
) -> Result<SharedBuffer> {
    if values.is_null() {
        return Ok(SharedBuffer::null());
    }
    check_edges(values.len(), edges.len())?;
    tracing::trace!(len = values.len(), "converting through bin widths");
    let out = values
        .as_slice()
        .iter()
        .zip(edges.windows(2))
        .map(|(&v, w)| f(v, w[1] - w[0]))
        .collect();
    Ok(SharedBuffer::from_vec(out))
}

/// Applies `f` element-wise. Null input gives null output.
pub(crate) fn map_values(values: &SharedBuffer, f: impl Fn(f64) -> f64) -> SharedBuffer {
    if values.is_null() {
        return SharedBuffer::null();
    }
    SharedBuffer::from_vec(values.as_slice().iter().map(|&v| f(v)).collect())
}
