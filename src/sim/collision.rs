//! Nearest-collision search for a single beam
//!
//! The board is an axis-aligned box (walls at x = ±1, ceiling above the spawn
//! row, ground at the shooter line) holding a grid of unit blocks. Blocks sit
//! strictly inside the box, so any block hit comes before the box exit and
//! boundaries are only consulted when no block is in the way.

use glam::DVec2;

use super::beam::Beam;
use super::grid::Grid;
use crate::consts::{CEILING_Y, GROUND_Y, LEFT_WALL_X, RIGHT_WALL_X, T_EPSILON};
use crate::error::SimError;
use crate::{column_to_x, row_to_y};

/// Which face of a block the beam struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Top or bottom face (y slope flips)
    Horizontal,
    /// Left or right face (x slope flips)
    Vertical,
}

/// Static boundary that reflected the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Ceiling,
    Wall,
    /// Ceiling and wall at the same instant
    Corner,
}

/// Outcome of one collision step
#[derive(Debug, Clone, PartialEq)]
pub enum Collision {
    /// Struck a block; `beam` is the reflected part carrying the `absorbed` balls
    Block {
        beam: Beam,
        column: usize,
        row: usize,
        face: Face,
        absorbed: u32,
    },
    /// Bounced off a static boundary with all balls intact
    Boundary { beam: Beam, surface: Surface },
    /// Crossed the ground while falling; the input beam's `distance` and
    /// `contact_x` now hold the landing
    Ground,
}

#[derive(Debug, Clone, Copy)]
struct BlockHit {
    t: f64,
    column: usize,
    row: usize,
    face: Face,
    contact: DVec2,
}

/// Find and apply the beam's nearest future collision
///
/// Block hits subtract the absorbed balls from `grid`. The input beam's
/// `distance` is advanced by the travel to the collision in every case, so a
/// pass-through remainder keeps an accurate running total.
pub fn next_collision(beam: &mut Beam, grid: &mut Grid) -> Result<Collision, SimError> {
    if let Some(hit) = nearest_block_hit(beam, grid) {
        let mut next = *beam;
        match hit.face {
            Face::Horizontal => {
                next.reflect_y(hit.contact.y);
                next.rebase_x(hit.contact.x);
            }
            Face::Vertical => {
                next.reflect_x(hit.contact.x);
                next.rebase_y(hit.contact.y);
            }
        }

        let available = grid.get(hit.column, hit.row);
        let absorbed = grid.damage(hit.column, hit.row, beam.balls.min(available));
        next.balls = absorbed;
        next.distance += hit.t;
        beam.distance += hit.t;

        log::trace!(
            "block ({}, {}) hit at ({:.4}, {:.4}): {} of {} balls absorbed, {} hp left",
            hit.column,
            hit.row,
            hit.contact.x,
            hit.contact.y,
            absorbed,
            beam.balls,
            grid.get(hit.column, hit.row)
        );

        return Ok(Collision::Block {
            beam: next,
            column: hit.column,
            row: hit.row,
            face: hit.face,
            absorbed,
        });
    }

    boundary_collision(beam)
}

/// Nearest block face the beam is heading toward
fn nearest_block_hit(beam: &Beam, grid: &Grid) -> Option<BlockHit> {
    let mut best: Option<BlockHit> = None;
    let origin = beam.origin();

    for (column, row, _) in grid.blocks() {
        let (min_x, max_x) = (column_to_x(column), column_to_x(column + 1));
        let (min_y, max_y) = (row_to_y(row), row_to_y(row + 1));

        // Block lies entirely behind the beam on one axis
        if (min_x >= origin.x && beam.x.slope <= 0.0)
            || (max_x <= origin.x && beam.x.slope >= 0.0)
            || (min_y >= origin.y && beam.y.slope <= 0.0)
            || (max_y <= origin.y && beam.y.slope >= 0.0)
        {
            continue;
        }

        let mut consider = |t: f64, face: Face, contact: DVec2| {
            if t > T_EPSILON && best.is_none_or(|b| t < b.t) {
                best = Some(BlockHit {
                    t,
                    column,
                    row,
                    face,
                    contact,
                });
            }
        };

        // Face toward the beam: bottom when rising, top when falling
        let edge_y = if beam.y.slope > 0.0 { min_y } else { max_y };
        if let Some(t) = beam.y.solve_for_t(edge_y) {
            let hit_x = beam.x.position_at(t);
            if (min_x..=max_x).contains(&hit_x) {
                consider(t, Face::Horizontal, DVec2::new(hit_x, edge_y));
            }
        }

        let edge_x = if beam.x.slope > 0.0 { min_x } else { max_x };
        if let Some(t) = beam.x.solve_for_t(edge_x) {
            let hit_y = beam.y.position_at(t);
            if (min_y..=max_y).contains(&hit_y) {
                consider(t, Face::Vertical, DVec2::new(edge_x, hit_y));
            }
        }
    }

    best
}

/// Exit through the box: ground terminates, everything else reflects
fn boundary_collision(beam: &mut Beam) -> Result<Collision, SimError> {
    let horizontal = if beam.y.slope > 0.0 {
        Some(CEILING_Y)
    } else if beam.y.slope < 0.0 {
        Some(GROUND_Y)
    } else {
        None
    };
    let vertical = if beam.x.slope > 0.0 {
        Some(RIGHT_WALL_X)
    } else if beam.x.slope < 0.0 {
        Some(LEFT_WALL_X)
    } else {
        None
    };

    // Only the boundary ahead on each axis is tested, so a beam resting on the
    // surface it just left can never select it again
    let t_horizontal = horizontal
        .and_then(|y| beam.y.solve_for_t(y))
        .filter(|&t| t >= 0.0);
    let t_vertical = vertical
        .and_then(|x| beam.x.solve_for_t(x))
        .filter(|&t| t >= 0.0);

    let t = match (t_horizontal, t_vertical) {
        (Some(h), Some(v)) => h.min(v),
        (Some(h), None) => h,
        (None, Some(v)) => v,
        (None, None) => {
            return Err(SimError::InternalInconsistency {
                x: beam.x.base,
                y: beam.y.base,
                vx: beam.x.slope,
                vy: beam.y.slope,
            });
        }
    };
    let hits_horizontal = t_horizontal.is_some_and(|h| h - t <= T_EPSILON);
    let hits_vertical = t_vertical.is_some_and(|v| v - t <= T_EPSILON);

    let contact = beam.position_at(t);
    beam.distance += t;

    if hits_horizontal && beam.y.slope < 0.0 {
        beam.contact_x = contact.x.clamp(LEFT_WALL_X, RIGHT_WALL_X);
        log::trace!(
            "grounded at x={:.4} after {:.4}",
            beam.contact_x,
            beam.distance
        );
        return Ok(Collision::Ground);
    }

    let mut next = *beam;
    next.rebase_x(contact.x);
    next.rebase_y(contact.y);
    if hits_horizontal {
        next.reflect_y(CEILING_Y);
    }
    if let Some(wall) = vertical.filter(|_| hits_vertical) {
        next.reflect_x(wall);
    }

    let surface = match (hits_horizontal, hits_vertical) {
        (true, true) => Surface::Corner,
        (true, false) => Surface::Ceiling,
        _ => Surface::Wall,
    };
    Ok(Collision::Boundary {
        beam: next,
        surface,
    })
}
