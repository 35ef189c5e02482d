//! Block hit-point grid
//!
//! Indexed `[column][row]`, row 0 nearest the shooter and row 7 the spawn row.
//! A zero cell is empty; a positive cell is the hits still needed to clear it.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{COLUMNS, ROWS, SPAWN_ROW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u32; ROWS]; COLUMNS],
}

impl Grid {
    /// An empty board
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, column: usize, row: usize) -> u32 {
        self.cells[column][row]
    }

    #[inline]
    pub fn set(&mut self, column: usize, row: usize, hit_points: u32) {
        self.cells[column][row] = hit_points;
    }

    /// Take up to `amount` hit points from a cell, returning what was taken
    pub fn damage(&mut self, column: usize, row: usize, amount: u32) -> u32 {
        let cell = &mut self.cells[column][row];
        let taken = amount.min(*cell);
        *cell -= taken;
        taken
    }

    /// Live blocks as `(column, row, hit_points)`, column-major
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(column, rows)| {
            rows.iter()
                .enumerate()
                .filter(|(_, hp)| **hp > 0)
                .map(move |(row, hp)| (column, row, *hp))
        })
    }

    pub fn total_hit_points(&self) -> u64 {
        self.cells.iter().flatten().map(|&hp| u64::from(hp)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().next().is_none()
    }

    /// A block has reached the shooter's row (loss condition)
    pub fn is_bottom_row_occupied(&self) -> bool {
        (0..COLUMNS).any(|column| self.cells[column][0] != 0)
    }

    /// Clear the spawn row and fill 1-6 distinct random columns with `round` hit points
    pub fn spawn_row<R: Rng>(&mut self, rng: &mut R, round: u32) {
        for column in self.cells.iter_mut() {
            column[SPAWN_ROW] = 0;
        }

        let count = rng.random_range(1..COLUMNS);
        for column in rand::seq::index::sample(rng, COLUMNS, count).iter() {
            self.cells[column][SPAWN_ROW] = round;
        }
    }

    /// Move every row one step toward the shooter and respawn the top row
    pub fn shift_down<R: Rng>(&mut self, rng: &mut R, round: u32) {
        for column in self.cells.iter_mut() {
            column.copy_within(1.., 0);
        }
        self.spawn_row(rng, round);
    }
}

/// Spawn row printed first, one line per row
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for column in 0..COLUMNS {
                match self.cells[column][row] {
                    0 => write!(f, "   .")?,
                    hp => write!(f, "{:4}", hp)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
