//! A traveling fragment of the volley
//!
//! The two axes are independent [`ParametricLine`]s sharing one travel
//! parameter. Every collision rebases both lines at the contact point, so
//! `t = 0` is always the beam's most recent contact and `t` itself is distance
//! along a unit direction.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::line::ParametricLine;

/// One ray of the volley (value type: clones never alias)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub x: ParametricLine,
    pub y: ParametricLine,
    /// Remaining striking force
    pub balls: u32,
    /// Total distance covered since the shot was fired
    pub distance: f64,
    /// Where this beam crossed the ground (set once it grounds)
    pub contact_x: f64,
}

impl Beam {
    /// Fire a beam from `origin` along `direction`
    pub fn launch(origin: DVec2, direction: DVec2, balls: u32) -> Self {
        Self {
            x: ParametricLine::new(direction.x, origin.x),
            y: ParametricLine::new(direction.y, origin.y),
            balls,
            distance: 0.0,
            contact_x: 0.0,
        }
    }

    /// Current contact point (t = 0)
    #[inline]
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x.base, self.y.base)
    }

    #[inline]
    pub fn direction(&self) -> DVec2 {
        DVec2::new(self.x.slope, self.y.slope)
    }

    #[inline]
    pub fn position_at(&self, t: f64) -> DVec2 {
        DVec2::new(self.x.position_at(t), self.y.position_at(t))
    }

    /// x coordinate where the beam's y reaches `target_y`
    #[inline]
    pub fn x_at(&self, target_y: f64) -> Option<f64> {
        self.y.solve_for_t(target_y).map(|t| self.x.position_at(t))
    }

    /// y coordinate where the beam's x reaches `target_x`
    #[inline]
    pub fn y_at(&self, target_x: f64) -> Option<f64> {
        self.x.solve_for_t(target_x).map(|t| self.y.position_at(t))
    }

    /// Bounce off a vertical surface at `new_base_x`
    pub fn reflect_x(&mut self, new_base_x: f64) {
        self.x.slope = -self.x.slope;
        self.x.base = new_base_x;
    }

    /// Bounce off a horizontal surface at `new_base_y`
    pub fn reflect_y(&mut self, new_base_y: f64) {
        self.y.slope = -self.y.slope;
        self.y.base = new_base_y;
    }

    pub fn rebase_x(&mut self, base: f64) {
        self.x.base = base;
    }

    pub fn rebase_y(&mut self, base: f64) {
        self.y.base = base;
    }

    /// Keep travelling unreflected from `at`, leaving `absorbed` balls behind
    ///
    /// This is the remainder half of a fragmentation: the block took fewer
    /// balls than arrived, so the rest carry on through where it stood.
    pub fn pass_through(&mut self, absorbed: u32, at: DVec2) {
        debug_assert!(absorbed <= self.balls);
        self.balls = self.balls.saturating_sub(absorbed);
        self.rebase_x(at.x);
        self.rebase_y(at.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal() -> Beam {
        Beam::launch(DVec2::new(0.0, 0.0), DVec2::new(0.6, 0.8), 3)
    }

    #[test]
    fn test_cross_axis_queries() {
        let beam = diagonal();
        let x = beam.x_at(0.8).unwrap();
        assert!((x - 0.6).abs() < 1e-12);
        let y = beam.y_at(0.3).unwrap();
        assert!((y - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_beam_never_reaches_other_x() {
        let beam = Beam::launch(DVec2::new(0.25, 0.0), DVec2::new(0.0, 1.0), 1);
        assert_eq!(beam.y_at(0.5), None);
        assert_eq!(beam.x_at(2.0), Some(0.25));
    }

    #[test]
    fn test_reflect_and_rebase() {
        let mut beam = diagonal();
        beam.reflect_y(1.0);
        assert_eq!(beam.y.slope, -0.8);
        assert_eq!(beam.y.base, 1.0);
        assert_eq!(beam.x.slope, 0.6);

        beam.reflect_x(-1.0);
        assert_eq!(beam.x.slope, -0.6);
        assert_eq!(beam.x.base, -1.0);

        beam.rebase_x(0.5);
        assert_eq!(beam.x.slope, -0.6);
        assert_eq!(beam.origin(), DVec2::new(0.5, 1.0));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = diagonal();
        let mut copy = original;
        copy.reflect_y(2.0);
        copy.balls = 1;
        assert_eq!(original.y.slope, 0.8);
        assert_eq!(original.balls, 3);
    }

    #[test]
    fn test_pass_through_keeps_direction() {
        let mut beam = diagonal();
        beam.pass_through(1, DVec2::new(0.3, 0.4));
        assert_eq!(beam.balls, 2);
        assert_eq!(beam.direction(), DVec2::new(0.6, 0.8));
        assert_eq!(beam.origin(), DVec2::new(0.3, 0.4));
    }
}
