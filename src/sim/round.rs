//! Round controller
//!
//! Drives a [`Round`] through shoot → observe → advance until a block reaches
//! the shooter's row. Angles come from, and transitions go to, a [`Player`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::state::{Round, Snapshot};
use super::volley::{ShotReport, shoot};
use crate::error::SimError;

/// Anything that can play: a human pointer, a scripted agent, a learner
pub trait Player {
    /// Firing angle in [-1, 1] for the coming shot
    fn input(&mut self, view: &Snapshot) -> f64;

    /// Called once per shot, before the grid advances
    fn observe(&mut self, transition: &Transition);
}

/// State change caused by one shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Grid before the shot
    pub prior: Grid,
    /// Grid after the shot, before rows shift
    pub after: Grid,
    pub blocks_hit: u32,
    pub round: u32,
    pub angle: f64,
    pub shooter_x: f64,
    pub report: ShotReport,
}

/// Outcome of a whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSummary {
    /// Shots taken
    pub rounds: u32,
    /// Hit points removed over the game
    pub blocks_hit: u64,
    /// True if a block reached the shooter row, false if the round cap stopped play
    pub lost: bool,
}

impl<R: Rng> Round<R> {
    /// Fire the current round's volley at `angle`
    ///
    /// On success the shooter moves to the landing point and the hit counter is
    /// set. On error nothing changes.
    pub fn shoot(&mut self, angle: f64) -> Result<ShotReport, SimError> {
        let report = shoot(
            &mut self.grid,
            self.shooter_x,
            self.round,
            angle,
            self.max_collisions,
        )
        .inspect_err(|err| log::warn!("round {}: shot abandoned: {}", self.round, err))?;

        if let Some(x) = report.landing_x {
            self.shooter_x = x;
        }
        self.blocks_hit = report.blocks_hit;
        Ok(report)
    }

    /// Play one round: ask for an angle, shoot, report, then advance the board
    pub fn step<P: Player + ?Sized>(&mut self, player: &mut P) -> Result<Transition, SimError> {
        let angle = player.input(&self.snapshot());
        let prior = self.grid;
        let report = self.shoot(angle)?;

        let transition = Transition {
            prior,
            after: self.grid,
            blocks_hit: self.blocks_hit,
            round: self.round,
            angle,
            shooter_x: self.shooter_x,
            report,
        };
        player.observe(&transition);

        log::info!(
            "round {}: angle {:.3}, {} hit, {} fragments, shooter at {:.3}",
            self.round,
            angle,
            self.blocks_hit,
            report.fragments,
            self.shooter_x
        );

        self.round += 1;
        self.next_grid();
        self.blocks_hit = 0;
        log::debug!("board for round {}:\n{}", self.round, self.grid);

        Ok(transition)
    }

    /// Play until a block reaches the shooter row, or `max_rounds` shots
    pub fn run<P: Player + ?Sized>(
        &mut self,
        player: &mut P,
        max_rounds: Option<u32>,
    ) -> Result<GameSummary, SimError> {
        let mut summary = GameSummary::default();

        while !self.is_over() {
            if max_rounds.is_some_and(|cap| summary.rounds >= cap) {
                return Ok(summary);
            }
            let transition = self.step(player)?;
            summary.rounds += 1;
            summary.blocks_hit += u64::from(transition.blocks_hit);
        }

        summary.lost = true;
        log::info!(
            "game over after {} rounds ({} hit)",
            summary.rounds,
            summary.blocks_hit
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLUMNS, SPAWN_ROW};

    /// Fires a fixed script of angles and keeps every transition
    struct Scripted {
        angles: Vec<f64>,
        seen: Vec<Transition>,
    }

    impl Scripted {
        fn new(angles: &[f64]) -> Self {
            Self {
                angles: angles.to_vec(),
                seen: Vec::new(),
            }
        }
    }

    impl Player for Scripted {
        fn input(&mut self, view: &Snapshot) -> f64 {
            let i = (view.round as usize - 1) % self.angles.len();
            self.angles[i]
        }

        fn observe(&mut self, transition: &Transition) {
            self.seen.push(*transition);
        }
    }

    #[test]
    fn test_step_advances_round() {
        let mut state = Round::seeded(12345);
        let first_row: Vec<u32> = (0..COLUMNS)
            .map(|c| state.grid().get(c, SPAWN_ROW))
            .collect();
        let mut player = Scripted::new(&[1.0]);

        let transition = state.step(&mut player).unwrap();
        assert_eq!(transition.round, 1);
        assert_eq!(transition.prior, transition.after);
        assert!(transition.report.is_skipped());

        assert_eq!(state.round(), 2);
        assert_eq!(state.blocks_hit(), 0);
        assert_eq!(player.seen.len(), 1);
        // The round-1 row moved down
        let moved: Vec<u32> = (0..COLUMNS)
            .map(|c| state.grid().get(c, SPAWN_ROW - 1))
            .collect();
        assert_eq!(moved, first_row);
    }

    #[test]
    fn test_shot_moves_shooter_and_counts_hits() {
        let mut grid = Grid::new();
        grid.set(3, 5, 1);
        let mut state = Round::with_grid(grid, rand_pcg::Pcg32::new(1, 1));

        let report = state.shoot(0.05).unwrap();
        assert_eq!(report.blocks_hit, 1);
        assert_eq!(state.blocks_hit(), 1);
        assert_eq!(state.grid().get(3, 5), 0);
        assert_eq!(Some(state.shooter_x()), report.landing_x);
        assert!(state.shooter_x() > 0.0);
    }

    #[test]
    fn test_observe_sees_post_shot_grid() {
        let mut grid = Grid::new();
        grid.set(3, 6, 1);
        let mut state = Round::with_grid(grid, rand_pcg::Pcg32::new(2, 1));
        let mut player = Scripted::new(&[0.0]);

        state.step(&mut player).unwrap();
        let seen = &player.seen[0];
        assert_eq!(seen.prior.get(3, 6), 1);
        assert_eq!(seen.after.get(3, 6), 0);
        assert_eq!(seen.blocks_hit, 1);
        assert_eq!(seen.shooter_x, 0.0);
    }

    #[test]
    fn test_failed_shot_changes_nothing() {
        let mut grid = Grid::new();
        grid.set(1, 1, 2);
        let mut state = Round::with_grid(grid, rand_pcg::Pcg32::new(3, 1))
            .with_shooter_x(0.3)
            .with_max_collisions(1);
        let before = state.snapshot();

        let err = state.shoot(-0.2).unwrap_err();
        assert!(matches!(err, SimError::SimulationDivergence { .. }));
        assert_eq!(state.snapshot(), before);

        let err = state.shoot(2.0).unwrap_err();
        assert_eq!(err, SimError::InvalidInput { angle: 2.0 });
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_passive_player_loses_after_seven_rounds() {
        let mut state = Round::seeded(42);
        let mut player = Scripted::new(&[1.0, -1.0]);

        let summary = state.run(&mut player, None).unwrap();
        assert!(summary.lost);
        assert_eq!(summary.rounds, 7);
        assert_eq!(summary.blocks_hit, 0);
        assert!(state.is_over());
        assert_eq!(state.round(), 8);
    }

    #[test]
    fn test_round_cap_stops_play() {
        let mut state = Round::seeded(42);
        let mut player = Scripted::new(&[1.0]);

        let summary = state.run(&mut player, Some(3)).unwrap();
        assert!(!summary.lost);
        assert_eq!(summary.rounds, 3);
        assert_eq!(state.round(), 4);
    }
}
