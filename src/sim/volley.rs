//! Volley resolution
//!
//! A shot starts as one beam carrying every ball. Beams are processed from a
//! FIFO work queue, one collision per dequeue. A block weaker than the beam
//! splits it: the reflected part carries what the block absorbed and the rest
//! continues straight through. The shooter comes to rest where the beam with the
//! shortest total travel crossed the ground.

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::beam::Beam;
use super::collision::{Collision, next_collision};
use super::grid::Grid;
use crate::angle_to_direction;
use crate::consts::{GROUND_Y, LEFT_WALL_X, RIGHT_WALL_X};
use crate::error::SimError;

/// What one shot did
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShotReport {
    /// New shooter position (None when the shot was skipped)
    pub landing_x: Option<f64>,
    /// Travel of the beam that set `landing_x`
    pub landing_distance: Option<f64>,
    /// Hit points removed from the grid across every fragment
    pub blocks_hit: u32,
    /// Pass-through splits
    pub fragments: u32,
    /// Resolver calls spent
    pub collisions: usize,
    /// Beams that reached the ground
    pub grounded: u32,
}

impl ShotReport {
    pub fn is_skipped(&self) -> bool {
        self.collisions == 0
    }
}

/// Fire `balls` from `shooter_x` at `angle` and resolve the whole volley
///
/// `angle` is in [-1, 1], scaled to ±90° from straight up. The two horizontal
/// extremes would never reach the ground and are accepted as no-ops.
///
/// The grid is only updated when the shot settles; on error it is untouched.
pub fn shoot(
    grid: &mut Grid,
    shooter_x: f64,
    balls: u32,
    angle: f64,
    max_collisions: usize,
) -> Result<ShotReport, SimError> {
    if !(-1.0..=1.0).contains(&angle) {
        return Err(SimError::InvalidInput { angle });
    }
    if angle.abs() == 1.0 {
        log::debug!("horizontal shot at {} skipped", angle);
        return Ok(ShotReport::default());
    }

    let mut scratch = *grid;
    let mut report = ShotReport::default();
    let root = Beam::launch(
        DVec2::new(shooter_x.clamp(LEFT_WALL_X, RIGHT_WALL_X), GROUND_Y),
        angle_to_direction(angle),
        balls,
    );
    let mut queue = VecDeque::from([root]);

    while let Some(mut beam) = queue.pop_front() {
        if report.collisions >= max_collisions {
            return Err(SimError::SimulationDivergence {
                collisions: report.collisions,
            });
        }
        report.collisions += 1;

        match next_collision(&mut beam, &mut scratch)? {
            Collision::Ground => {
                report.grounded += 1;
                let shorter = report.landing_distance.is_none_or(|d| beam.distance < d);
                if beam.distance > 0.0 && shorter {
                    report.landing_distance = Some(beam.distance);
                    report.landing_x = Some(beam.contact_x);
                }
                log::debug!(
                    "beam grounded at x={:.4} after {:.4} ({} in flight)",
                    beam.contact_x,
                    beam.distance,
                    queue.len()
                );
            }
            Collision::Block {
                beam: reflected,
                absorbed,
                column,
                row,
                ..
            } => {
                report.blocks_hit += absorbed;
                if reflected.balls != beam.balls {
                    beam.pass_through(absorbed, reflected.origin());
                    report.fragments += 1;
                    log::debug!(
                        "block ({}, {}) split beam: {} bounced, {} pass through",
                        column,
                        row,
                        reflected.balls,
                        beam.balls
                    );
                    queue.push_back(beam);
                }
                queue.push_back(reflected);
            }
            Collision::Boundary { beam: reflected, .. } => queue.push_back(reflected),
        }
    }

    *grid = scratch;
    Ok(report)
}
