//! One-axis parametric line
//!
//! A beam's position on a single axis as an affine function of travel `t`:
//! `value(t) = slope * t + base`. Two of these make up a [`Beam`](super::Beam).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParametricLine {
    pub slope: f64,
    pub base: f64,
}

impl ParametricLine {
    pub fn new(slope: f64, base: f64) -> Self {
        Self { slope, base }
    }

    /// Travel parameter at which this axis reaches `value`
    ///
    /// Returns `None` when the slope is zero: a stationary axis never reaches
    /// another coordinate.
    #[inline]
    pub fn solve_for_t(&self, value: f64) -> Option<f64> {
        if self.slope == 0.0 {
            return None;
        }
        Some((value - self.base) / self.slope)
    }

    /// Coordinate on this axis after travelling `t`
    #[inline]
    pub fn position_at(&self, t: f64) -> f64 {
        self.slope * t + self.base
    }

    /// True if travelling forward moves this axis toward `value`
    #[inline]
    pub fn approaches(&self, value: f64) -> bool {
        (self.slope > 0.0 && value > self.base) || (self.slope < 0.0 && value < self.base)
    }
}
