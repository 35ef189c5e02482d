//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Straight-line beams, no time stepping
//! - Seeded RNG only (spawn rows)
//! - Stable iteration order (FIFO beams, column-major blocks)
//! - No rendering or platform dependencies

pub mod beam;
pub mod collision;
pub mod grid;
pub mod line;
pub mod round;
pub mod state;
pub mod volley;

pub use beam::Beam;
pub use collision::{Collision, Face, Surface, next_collision};
pub use grid::Grid;
pub use line::ParametricLine;
pub use round::{GameSummary, Player, Transition};
pub use state::{Round, Snapshot};
pub use volley::{ShotReport, shoot};
