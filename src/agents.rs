//! Headless players
//!
//! Stand-ins for the pointer and learning front ends: they answer angles
//! without any outside input and keep a running tally of what they observed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Player, Snapshot, Transition};

/// Totals gathered through `observe`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub shots: u32,
    pub blocks_hit: u64,
    /// Most hit points removed by a single shot
    pub best_shot: u32,
}

impl Tally {
    fn record(&mut self, transition: &Transition) {
        self.shots += 1;
        self.blocks_hit += u64::from(transition.blocks_hit);
        self.best_shot = self.best_shot.max(transition.blocks_hit);
    }
}

/// Always fires at the same angle
#[derive(Debug, Clone, Default)]
pub struct FixedAngle {
    pub angle: f64,
    pub tally: Tally,
}

impl FixedAngle {
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            tally: Tally::default(),
        }
    }
}

impl Player for FixedAngle {
    fn input(&mut self, _view: &Snapshot) -> f64 {
        self.angle
    }

    fn observe(&mut self, transition: &Transition) {
        self.tally.record(transition);
    }
}

/// Fires uniformly within `±spread`
#[derive(Debug, Clone)]
pub struct RandomAngle {
    rng: Pcg32,
    spread: f64,
    pub tally: Tally,
}

impl RandomAngle {
    pub fn new(seed: u64, spread: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            spread: spread.clamp(0.0, 1.0),
            tally: Tally::default(),
        }
    }
}

impl Player for RandomAngle {
    fn input(&mut self, view: &Snapshot) -> f64 {
        let angle = self.rng.random_range(-self.spread..=self.spread);
        log::trace!(
            "round {}: aiming {:.3} from x={:.3}",
            view.round,
            angle,
            view.shooter_x
        );
        angle
    }

    fn observe(&mut self, transition: &Transition) {
        self.tally.record(transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Round;

    #[test]
    fn test_random_angles_stay_in_spread() {
        let mut player = RandomAngle::new(7, 0.6);
        let view = Round::seeded(7).snapshot();
        for _ in 0..500 {
            let angle = player.input(&view);
            assert!((-0.6..=0.6).contains(&angle));
        }
    }

    #[test]
    fn test_fixed_player_tallies_game() {
        let mut state = Round::seeded(2024);
        let mut player = FixedAngle::new(0.0);

        let summary = state.run(&mut player, Some(5)).unwrap();
        assert_eq!(player.tally.shots, summary.rounds);
        assert_eq!(player.tally.blocks_hit, summary.blocks_hit);
        assert!(u64::from(player.tally.best_shot) <= summary.blocks_hit);
    }

    #[test]
    fn test_random_games_are_reproducible() {
        let play = |seed: u64| {
            let mut state = Round::seeded(seed);
            let mut player = RandomAngle::new(seed, 0.6);
            let outcome = state.run(&mut player, Some(12));
            (outcome, state.snapshot(), player.tally)
        };
        assert_eq!(play(31337), play(31337));
    }
}
