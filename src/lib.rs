//! Breakout Volley - ray-traced shot resolution for a grid brick-breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (beams, collisions, grid, round loop)
//! - `agents`: Headless players that pick firing angles
//! - `settings`: Data-driven run configuration
//! - `error`: Simulation error conditions

pub mod agents;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{AgentKind, Settings};

use glam::DVec2;

/// Board configuration constants
pub mod consts {
    /// Block columns across the board
    pub const COLUMNS: usize = 7;
    /// Block rows, including the spawn row at the top
    pub const ROWS: usize = 8;
    /// Row that receives freshly spawned blocks each round
    pub const SPAWN_ROW: usize = ROWS - 1;

    /// Grid index to normalized coordinate scale (7 columns across [-1, 1])
    pub const SCALE: f64 = COLUMNS as f64 / 2.0;

    /// Shooter line, one block below row 0
    pub const GROUND_Y: f64 = -1.0 / SCALE;
    /// Top of the spawn row
    pub const CEILING_Y: f64 = ROWS as f64 / SCALE;
    pub const LEFT_WALL_X: f64 = -1.0;
    pub const RIGHT_WALL_X: f64 = 1.0;

    /// Smallest travel parameter accepted as a future collision
    pub const T_EPSILON: f64 = 1e-9;

    /// Resolver calls allowed per shot before the shot is declared divergent
    pub const DEFAULT_MAX_COLLISIONS: usize = 1000;
}

/// Left edge of a grid column in normalized coordinates
#[inline]
pub fn column_to_x(column: usize) -> f64 {
    column as f64 / consts::SCALE - 1.0
}

/// Bottom edge of a grid row in normalized coordinates
#[inline]
pub fn row_to_y(row: usize) -> f64 {
    row as f64 / consts::SCALE
}

/// Convert a firing angle in [-1, 1] (scaled to ±90° from vertical) to a unit direction
///
/// Positive y points away from the shooter, toward the spawn row.
#[inline]
pub fn angle_to_direction(angle: f64) -> DVec2 {
    let theta = (angle * 90.0).to_radians();
    DVec2::new(theta.sin(), theta.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_edges_span_board() {
        assert!((column_to_x(0) - consts::LEFT_WALL_X).abs() < 1e-12);
        assert!((column_to_x(consts::COLUMNS) - consts::RIGHT_WALL_X).abs() < 1e-12);
        assert!((row_to_y(consts::ROWS) - consts::CEILING_Y).abs() < 1e-12);
        assert!(consts::GROUND_Y < row_to_y(0));
    }

    #[test]
    fn test_angle_to_direction() {
        let up = angle_to_direction(0.0);
        assert_eq!(up.x, 0.0);
        assert!((up.y - 1.0).abs() < 1e-12);

        let right = angle_to_direction(0.5);
        assert!(right.x > 0.0 && right.y > 0.0);
        assert!((right.length() - 1.0).abs() < 1e-12);

        let left = angle_to_direction(-0.5);
        assert!((left.x + right.x).abs() < 1e-12);
    }
}
