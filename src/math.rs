//! Arithmetic on histograms with uncertainty propagation.
//!
//! Scaling by a scalar uses the standard operators. Combining two histograms
//! can fail (incompatible X, meaningless mode combinations), so it goes
//! through [`HistogramMath`], which also carries the X comparison tolerance.

use std::ops::{Div, DivAssign, Mul, MulAssign};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::histogram::{Histogram, YMode};

impl MulAssign<f64> for Histogram {
    /// Scales Y by `factor` and E by its magnitude.
    fn mul_assign(&mut self, factor: f64) {
        self.mutable_y().iter_mut().for_each(|y| *y *= factor);
        let magnitude = factor.abs();
        self.mutable_e().iter_mut().for_each(|e| *e *= magnitude);
    }
}

impl DivAssign<f64> for Histogram {
    /// Divides Y by `divisor` and E by its magnitude. Division by zero
    /// follows IEEE 754.
    fn div_assign(&mut self, divisor: f64) {
        self.mutable_y().iter_mut().for_each(|y| *y /= divisor);
        let magnitude = divisor.abs();
        self.mutable_e().iter_mut().for_each(|e| *e /= magnitude);
    }
}

impl Mul<f64> for Histogram {
    type Output = Histogram;

    fn mul(mut self, factor: f64) -> Histogram {
        self *= factor;
        self
    }
}

impl Mul<f64> for &Histogram {
    type Output = Histogram;

    fn mul(self, factor: f64) -> Histogram {
        self.clone() * factor
    }
}

impl Div<f64> for Histogram {
    type Output = Histogram;

    fn div(mut self, divisor: f64) -> Histogram {
        self /= divisor;
        self
    }
}

impl Div<f64> for &Histogram {
    type Output = Histogram;

    fn div(self, divisor: f64) -> Histogram {
        self.clone() / divisor
    }
}

/// Binary operations between histograms.
///
/// Results share the left operand's X and Dx storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramMath {
    x_tolerance: f64,
    check_x: bool,
}

impl Default for HistogramMath {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl HistogramMath {
    /// Create from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            x_tolerance: config.x_tolerance,
            check_x: config.check_x,
        }
    }

    /// Relative tolerance used when comparing X values.
    #[must_use]
    pub fn x_tolerance(&self) -> f64 {
        self.x_tolerance
    }

    /// Checks that two histograms can be combined bin by bin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingData`] if either has no Y,
    /// [`Error::SizeMismatch`] or [`Error::XModeMismatch`] for different
    /// shapes and [`Error::XDataMismatch`] when X values differ beyond the
    /// tolerance.
    pub fn check_compatible(&self, lhs: &Histogram, rhs: &Histogram) -> Result<()> {
        if !lhs.has_y() || !rhs.has_y() {
            return Err(Error::MissingData("Y"));
        }
        if lhs.size() != rhs.size() {
            return Err(Error::SizeMismatch {
                array: "Y",
                expected: lhs.size(),
                actual: rhs.size(),
            });
        }
        if lhs.x_mode() != rhs.x_mode() {
            return Err(Error::XModeMismatch {
                expected: lhs.x_mode(),
                actual: rhs.x_mode(),
            });
        }
        if !self.check_x || lhs.shared_x().ptr_eq(&rhs.shared_x()) {
            return Ok(());
        }
        let mismatch = lhs
            .x()
            .iter()
            .zip(rhs.x())
            .position(|(&a, &b)| !within_tolerance(a, b, self.x_tolerance));
        if let Some(i) = mismatch {
            tracing::debug!(index = i, "rejected histograms with different X");
            return Err(Error::XDataMismatch(format!(
                "X[{i}] differs: {} vs {}",
                lhs.x()[i],
                rhs.x()[i]
            )));
        }
        Ok(())
    }

    /// Bin-wise sum; uncertainties add in quadrature.
    ///
    /// # Errors
    ///
    /// Fails if the histograms are incompatible or hold different Y modes.
    pub fn add(&self, lhs: &Histogram, rhs: &Histogram) -> Result<Histogram> {
        self.check_compatible(lhs, rhs)?;
        require_same_mode("add", lhs, rhs)?;
        Ok(combine(lhs, rhs, lhs.y_mode(), |y1, e1, y2, e2| (y1 + y2, e1.hypot(e2))))
    }

    /// Bin-wise difference; uncertainties add in quadrature.
    ///
    /// # Errors
    ///
    /// Fails if the histograms are incompatible or hold different Y modes.
    pub fn subtract(&self, lhs: &Histogram, rhs: &Histogram) -> Result<Histogram> {
        self.check_compatible(lhs, rhs)?;
        require_same_mode("subtract", lhs, rhs)?;
        Ok(combine(lhs, rhs, lhs.y_mode(), |y1, e1, y2, e2| (y1 - y2, e1.hypot(e2))))
    }

    /// Bin-wise product. Counts times counts is rejected; the result holds
    /// counts if either operand does.
    ///
    /// # Errors
    ///
    /// Fails if the histograms are incompatible or both hold counts.
    pub fn multiply(&self, lhs: &Histogram, rhs: &Histogram) -> Result<Histogram> {
        self.check_compatible(lhs, rhs)?;
        let mode = match (lhs.y_mode(), rhs.y_mode()) {
            (YMode::Counts, YMode::Counts) => {
                return Err(Error::InvalidOperation(
                    "cannot multiply two histograms holding counts".to_string(),
                ))
            }
            (YMode::Counts, _) | (_, YMode::Counts) => YMode::Counts,
            _ => YMode::Frequencies,
        };
        Ok(combine(lhs, rhs, mode, |y1, e1, y2, e2| (y1 * y2, (e1 * y2).hypot(e2 * y1))))
    }

    /// Bin-wise quotient. Frequencies divided by counts is rejected; counts
    /// divided by counts gives frequencies.
    ///
    /// # Errors
    ///
    /// Fails if the histograms are incompatible or the mode combination is
    /// frequencies over counts.
    pub fn divide(&self, lhs: &Histogram, rhs: &Histogram) -> Result<Histogram> {
        self.check_compatible(lhs, rhs)?;
        let mode = match (lhs.y_mode(), rhs.y_mode()) {
            (YMode::Frequencies, YMode::Counts) => {
                return Err(Error::InvalidOperation(
                    "cannot divide frequencies by counts".to_string(),
                ))
            }
            (YMode::Counts, YMode::Counts) => YMode::Frequencies,
            (mode, _) => mode,
        };
        Ok(combine(lhs, rhs, mode, |y1, e1, y2, e2| {
            (y1 / y2, (e1 / y2).hypot(e2 * y1 / (y2 * y2)))
        }))
    }
}

fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= tolerance * a.abs().max(b.abs())
}

fn require_same_mode(op: &str, lhs: &Histogram, rhs: &Histogram) -> Result<()> {
    if lhs.y_mode() != rhs.y_mode() {
        return Err(Error::InvalidOperation(format!(
            "cannot {op} {} and {}",
            lhs.y_mode(),
            rhs.y_mode()
        )));
    }
    Ok(())
}

fn combine(
    lhs: &Histogram,
    rhs: &Histogram,
    mode: YMode,
    f: impl Fn(f64, f64, f64, f64) -> (f64, f64),
) -> Histogram {
    let (y, e): (Vec<f64>, Vec<f64>) = lhs
        .y()
        .iter()
        .zip(lhs.e())
        .zip(rhs.y().iter().zip(rhs.e()))
        .map(|((&y1, &e1), (&y2, &e2))| f(y1, e1, y2, e2))
        .unzip();
    lhs.with_values(mode, y, e)
}
