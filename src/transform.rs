//! Rebinning and integration.

use crate::arrays::BinEdges;
use crate::error::{Error, Result};
use crate::histogram::{Histogram, YMode};

impl Histogram {
    /// Redistributes Y onto `edges` by fractional bin overlap.
    ///
    /// Counts are split in proportion to the overlap with each old bin and
    /// their variances likewise. Frequencies are integrated over the overlap
    /// and divided by the new width, with uncertainties combined in
    /// quadrature. The result stores bin edges, keeps the Y mode and has no Dx.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] without Y and [`Error::InvalidBinEdges`]
    /// if either set of edges is not strictly increasing.
    pub fn rebin(&self, edges: &BinEdges) -> Result<Histogram> {
        if !self.has_y() {
            return Err(Error::MissingData("Y"));
        }
        if edges.is_null() {
            return Err(Error::MissingData("BinEdges"));
        }
        if edges.len() == 1 {
            return Err(Error::InvalidBinEdges("a single edge bounds no bin".to_string()));
        }
        if !edges.is_strictly_increasing() {
            return Err(Error::InvalidBinEdges("new edges must be strictly increasing".to_string()));
        }
        let current = self.bin_edges();
        if !current.is_strictly_increasing() {
            return Err(Error::InvalidBinEdges(
                "histogram edges must be strictly increasing".to_string(),
            ));
        }

        let old = current.as_slice();
        let new = edges.as_slice();
        let n_old = old.len().saturating_sub(1);
        let n_new = new.len().saturating_sub(1);
        let frequencies = self.y_mode() == YMode::Frequencies;
        let (ys, es) = (self.y(), self.e());

        tracing::debug!(from = n_old, to = n_new, %frequencies, "rebinning");

        let mut y = vec![0.0; n_new];
        let mut e2 = vec![0.0; n_new];
        let mut first = 0;
        for j in 0..n_new {
            let (lo, hi) = (new[j], new[j + 1]);
            while first < n_old && old[first + 1] <= lo {
                first += 1;
            }
            let mut i = first;
            while i < n_old && old[i] < hi {
                let overlap = hi.min(old[i + 1]) - lo.max(old[i]);
                if overlap > 0.0 {
                    if frequencies {
                        y[j] += ys[i] * overlap;
                        e2[j] += (es[i] * overlap).powi(2);
                    } else {
                        let fraction = overlap / (old[i + 1] - old[i]);
                        y[j] += ys[i] * fraction;
                        e2[j] += es[i] * es[i] * fraction;
                    }
                }
                i += 1;
            }
        }

        let mut e: Vec<f64> = e2.into_iter().map(f64::sqrt).collect();
        if frequencies {
            for (j, w) in new.windows(2).enumerate() {
                let width = w[1] - w[0];
                y[j] /= width;
                e[j] /= width;
            }
        }

        let mut out = Histogram::new(edges.clone())?;
        if frequencies {
            out.set_frequencies(y)?;
            out.set_frequency_standard_deviations(e)?;
        } else {
            out.set_counts(y)?;
            out.set_count_standard_deviations(e)?;
        }
        Ok(out)
    }

    /// Sum of counts within `[xmin, xmax]`, weighting partial bins by the
    /// covered fraction of their width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `xmin > xmax` (or either is NaN) and
    /// [`Error::MissingData`] without Y.
    pub fn integrate(&self, xmin: f64, xmax: f64) -> Result<f64> {
        if !(xmin <= xmax) {
            return Err(Error::InvalidRange(format!("xmin {xmin} exceeds xmax {xmax}")));
        }
        if !self.has_y() {
            return Err(Error::MissingData("Y"));
        }
        let edges = self.bin_edges();
        let counts = self.counts();
        let total = edges
            .as_slice()
            .windows(2)
            .zip(counts.iter())
            .map(|(w, &c)| {
                let overlap = xmax.min(w[1]) - xmin.max(w[0]);
                let width = w[1] - w[0];
                if overlap <= 0.0 {
                    0.0
                } else if overlap >= width {
                    c
                } else {
                    c * overlap / width
                }
            })
            .sum();
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrays::{
        CountStandardDeviations, Counts, Frequencies, FrequencyStandardDeviations, Points,
    };
    use approx::assert_relative_eq;

    fn counts_hist() -> Histogram {
        Histogram::with_y_and_e(
            BinEdges::from([0.0, 1.0, 2.0, 3.0, 4.0]),
            Counts::from([1.0, 2.0, 3.0, 4.0]),
            CountStandardDeviations::from([1.0, 1.0, 1.0, 1.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_rebin_counts_merge() {
        let out = counts_hist().rebin(&BinEdges::from([0.0, 2.0, 4.0])).unwrap();
        assert_eq!(out.y(), &[3.0, 7.0]);
        assert_relative_eq!(out.e()[0], 2.0_f64.sqrt());
        assert_eq!(out.y_mode(), YMode::Counts);
        assert!(out.dx().is_empty());
    }

    #[test]
    fn test_rebin_counts_split() {
        let out = counts_hist().rebin(&BinEdges::from([0.5, 1.5])).unwrap();
        assert_relative_eq!(out.y()[0], 1.5);
        assert_relative_eq!(out.e()[0], 1.0);
    }

    #[test]
    fn test_rebin_conserves_total_counts() {
        let h = counts_hist();
        let out = h.rebin(&BinEdges::linear(9, 0.0, 0.5)).unwrap();
        assert_relative_eq!(out.counts().sum(), h.counts().sum(), max_relative = 1e-12);
    }

    #[test]
    fn test_rebin_outside_range_is_zero() {
        let out = counts_hist().rebin(&BinEdges::from([10.0, 11.0])).unwrap();
        assert_eq!(out.y(), &[0.0]);
    }

    #[test]
    fn test_rebin_frequencies() {
        let h = Histogram::with_y_and_e(
            BinEdges::from([0.0, 1.0, 2.0]),
            Frequencies::from([2.0, 4.0]),
            FrequencyStandardDeviations::from([1.0, 1.0]),
        )
        .unwrap();
        let out = h.rebin(&BinEdges::from([0.0, 2.0])).unwrap();
        assert_eq!(out.y_mode(), YMode::Frequencies);
        assert_relative_eq!(out.y()[0], 3.0);
        assert_relative_eq!(out.e()[0], 2.0_f64.sqrt() / 2.0);
    }

    #[test]
    fn test_rebin_points_mode() {
        let h = Histogram::with_y(Points::from([0.5, 1.5]), Counts::from([1.0, 1.0])).unwrap();
        let out = h.rebin(&BinEdges::from([0.0, 2.0])).unwrap();
        assert_relative_eq!(out.y()[0], 2.0);
    }

    #[test]
    fn test_rebin_errors() {
        let h = counts_hist();
        assert!(matches!(h.rebin(&BinEdges::from([1.0])), Err(Error::InvalidBinEdges(_))));
        assert!(matches!(h.rebin(&BinEdges::from([2.0, 1.0])), Err(Error::InvalidBinEdges(_))));
        assert!(matches!(h.rebin(&BinEdges::null()), Err(Error::MissingData(_))));

        let no_y = Histogram::new(BinEdges::from([0.0, 1.0])).unwrap();
        assert!(matches!(no_y.rebin(&BinEdges::from([0.0, 1.0])), Err(Error::MissingData("Y"))));
    }

    #[test]
    fn test_integrate() {
        let h = counts_hist();
        assert_eq!(h.integrate(0.0, 4.0).unwrap(), 10.0);
        assert_eq!(h.integrate(-5.0, 50.0).unwrap(), 10.0);
        assert_relative_eq!(h.integrate(0.5, 2.5).unwrap(), 0.5 + 2.0 + 1.5);
        assert_eq!(h.integrate(1.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_integrate_frequencies() {
        let h = Histogram::with_y(BinEdges::from([0.0, 2.0, 3.0]), Frequencies::from([1.0, 5.0]))
            .unwrap();
        assert_eq!(h.integrate(0.0, 3.0).unwrap(), 7.0);
    }

    #[test]
    fn test_integrate_errors() {
        let h = counts_hist();
        assert!(matches!(h.integrate(2.0, 1.0), Err(Error::InvalidRange(_))));
        assert!(matches!(h.integrate(f64::NAN, 1.0), Err(Error::InvalidRange(_))));
        let no_y = Histogram::new(BinEdges::from([0.0, 1.0])).unwrap();
        assert!(matches!(no_y.integrate(0.0, 1.0), Err(Error::MissingData("Y"))));
    }
}
