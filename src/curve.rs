//! Response curves used for every tunable in the generator.
//!
//! Three shapes cover all of them:
//! - [`LinearCurve`]: piecewise-linear interpolation over control points,
//!   extrapolating the end segments unless clamped.
//! - [`ThresholdCurve`]: maps a value to one of `n + 1` outputs split by `n` thresholds.
//! - [`QuantizeCurve`]: splits a continuous domain into equal-width buckets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a curve's control points are unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("curve needs at least two control points, got {0}")]
    TooFewPoints(usize),
    #[error("domain and range lengths differ ({0} vs {1})")]
    LengthMismatch(usize, usize),
    #[error("curve domain must be finite and strictly increasing")]
    UnsortedDomain,
    #[error("quantize curve needs at least one bucket")]
    NoBuckets,
}

/// Piecewise-linear curve through `(domain[i], range[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearCurve {
    pub domain: Vec<f32>,
    pub range: Vec<f32>,
    /// Clamp inputs to the domain instead of extrapolating.
    #[serde(default)]
    pub clamp: bool,
}

impl LinearCurve {
    pub fn new(domain: impl Into<Vec<f32>>, range: impl Into<Vec<f32>>) -> Self {
        Self {
            domain: domain.into(),
            range: range.into(),
            clamp: false,
        }
    }

    /// Returns the same curve with input clamping enabled.
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        if self.domain.len() != self.range.len() {
            return Err(CurveError::LengthMismatch(self.domain.len(), self.range.len()));
        }
        if self.domain.len() < 2 {
            return Err(CurveError::TooFewPoints(self.domain.len()));
        }
        let sorted = self.domain.windows(2).all(|w| w[0] < w[1]);
        let finite = self
            .domain
            .iter()
            .chain(self.range.iter())
            .all(|v| v.is_finite());
        if !sorted || !finite {
            return Err(CurveError::UnsortedDomain);
        }
        Ok(())
    }

    /// Evaluates the curve at `x`.
    pub fn eval(&self, x: f32) -> f32 {
        let n = self.domain.len().min(self.range.len());
        match n {
            0 => return 0.0,
            1 => return self.range[0],
            _ => {}
        }

        let x = if self.clamp {
            x.clamp(self.domain[0], self.domain[n - 1])
        } else {
            x
        };

        // Segment whose left control point is the last interior point <= x.
        let i = self.domain[1..n - 1].partition_point(|&d| d <= x);
        let (d0, d1) = (self.domain[i], self.domain[i + 1]);
        let (r0, r1) = (self.range[i], self.range[i + 1]);
        let t = (x - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }
}

/// Step function: `values[k]` where `k` counts the thresholds `<= x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCurve<T> {
    pub thresholds: Vec<f32>,
    pub values: Vec<T>,
}

impl<T> ThresholdCurve<T> {
    pub fn new(thresholds: impl Into<Vec<f32>>, values: impl Into<Vec<T>>) -> Self {
        Self {
            thresholds: thresholds.into(),
            values: values.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        if self.values.len() != self.thresholds.len() + 1 {
            return Err(CurveError::LengthMismatch(
                self.thresholds.len() + 1,
                self.values.len(),
            ));
        }
        if !self.thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(CurveError::UnsortedDomain);
        }
        Ok(())
    }

    /// Index of the band containing `x`.
    pub fn band(&self, x: f32) -> usize {
        self.thresholds
            .partition_point(|&d| d <= x)
            .min(self.values.len().saturating_sub(1))
    }

    pub fn eval(&self, x: f32) -> &T {
        &self.values[self.band(x)]
    }
}

/// Splits `[lo, hi]` into `buckets` equal bins; inputs outside the domain land in the end bins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizeCurve {
    pub lo: f32,
    pub hi: f32,
    pub buckets: usize,
}

impl QuantizeCurve {
    pub fn new(lo: f32, hi: f32, buckets: usize) -> Self {
        Self { lo, hi, buckets }
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        if self.buckets == 0 {
            return Err(CurveError::NoBuckets);
        }
        if !(self.lo.is_finite() && self.hi.is_finite() && self.lo < self.hi) {
            return Err(CurveError::UnsortedDomain);
        }
        Ok(())
    }

    pub fn index(&self, x: f32) -> usize {
        let last = self.buckets.saturating_sub(1);
        let t = (x - self.lo) / (self.hi - self.lo) * self.buckets as f32;
        if !(t > 0.0) {
            return 0;
        }
        (t.floor() as usize).min(last)
    }
}
