//! Simulation error conditions

use std::fmt;

/// Errors raised while resolving a shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimError {
    /// Firing angle outside [-1, 1] (or NaN)
    InvalidInput { angle: f64 },
    /// The collision search found neither a block nor a boundary ahead of the beam
    InternalInconsistency { x: f64, y: f64, vx: f64, vy: f64 },
    /// The shot used up its collision budget without every beam grounding
    SimulationDivergence { collisions: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidInput { angle } => {
                write!(f, "invalid firing angle {} (expected -1.0..=1.0)", angle)
            }
            SimError::InternalInconsistency { x, y, vx, vy } => write!(
                f,
                "no collision ahead of beam at ({:.4}, {:.4}) heading ({:.4}, {:.4})",
                x, y, vx, vy
            ),
            SimError::SimulationDivergence { collisions } => {
                write!(f, "shot did not settle after {} collisions", collisions)
            }
        }
    }
}

impl std::error::Error for SimError {}
