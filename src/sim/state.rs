//! Round state
//!
//! Everything that survives from one shot to the next: the grid, where the
//! shooter stands, the round number and the spawn RNG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::{DEFAULT_MAX_COLLISIONS, LEFT_WALL_X, RIGHT_WALL_X};

/// Read-only view handed to players and renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub shooter_x: f64,
    pub round: u32,
}

/// One game in progress
///
/// The RNG only feeds spawn-row selection; inject a seeded one for
/// reproducible games.
#[derive(Debug, Clone)]
pub struct Round<R: Rng = Pcg32> {
    pub(crate) grid: Grid,
    pub(crate) shooter_x: f64,
    pub(crate) round: u32,
    /// Hit points removed by the current round's shot
    pub(crate) blocks_hit: u32,
    pub(crate) max_collisions: usize,
    pub(crate) rng: R,
}

impl Round<Pcg32> {
    /// Fresh game with a PCG spawn stream
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Round<R> {
    /// Round 1 with one spawned row
    pub fn new(rng: R) -> Self {
        let mut state = Self::with_grid(Grid::new(), rng);
        state.new_grid_row();
        state
    }

    /// Round 1 on a prepared board (no spawn)
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self {
            grid,
            shooter_x: 0.0,
            round: 1,
            blocks_hit: 0,
            max_collisions: DEFAULT_MAX_COLLISIONS,
            rng,
        }
    }

    pub fn with_max_collisions(mut self, max_collisions: usize) -> Self {
        self.max_collisions = max_collisions;
        self
    }

    pub fn with_shooter_x(mut self, shooter_x: f64) -> Self {
        self.shooter_x = shooter_x.clamp(LEFT_WALL_X, RIGHT_WALL_X);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn shooter_x(&self) -> f64 {
        self.shooter_x
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn blocks_hit(&self) -> u32 {
        self.blocks_hit
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            shooter_x: self.shooter_x,
            round: self.round,
        }
    }

    /// Reseed the spawn row at the current round's strength
    pub fn new_grid_row(&mut self) {
        self.grid.spawn_row(&mut self.rng, self.round);
    }

    /// Shift every row toward the shooter and respawn the top
    pub fn next_grid(&mut self) {
        self.grid.shift_down(&mut self.rng, self.round);
    }

    /// A block has reached the shooter row
    pub fn is_over(&self) -> bool {
        self.grid.is_bottom_row_occupied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLUMNS, SPAWN_ROW};

    #[test]
    fn test_new_round_spawns_first_row() {
        let state = Round::seeded(12345);
        assert_eq!(state.round(), 1);
        assert_eq!(state.shooter_x(), 0.0);
        assert_eq!(state.blocks_hit(), 0);

        let spawned = (0..COLUMNS)
            .filter(|&c| state.grid().get(c, SPAWN_ROW) == 1)
            .count();
        assert!((1..COLUMNS).contains(&spawned));
        assert_eq!(state.grid().blocks().count(), spawned);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Round::seeded(99999);
        let b = Round::seeded(99999);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_next_grid_spawns_at_current_strength() {
        let mut state = Round::seeded(5);
        state.round = 4;
        state.next_grid();
        assert!(
            (0..COLUMNS)
                .map(|c| state.grid().get(c, SPAWN_ROW))
                .all(|hp| hp == 0 || hp == 4)
        );
        // The round-1 row moved down one
        assert!((0..COLUMNS).any(|c| state.grid().get(c, SPAWN_ROW - 1) == 1));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = Round::seeded(1).with_shooter_x(2.0);
        assert_eq!(state.shooter_x(), 1.0);

        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
    }
}
