//! Run settings
//!
//! Loaded from a JSON file; every field has a default so partial files work.
//! Command-line flags are layered on top by the binary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::agents::{FixedAngle, RandomAngle};
use crate::consts::DEFAULT_MAX_COLLISIONS;
use crate::sim::Player;

/// Which headless player fires the shots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentKind {
    /// Same angle every round
    Fixed { angle: f64 },
    /// Uniform angle in ±spread
    Random { spread: f64 },
}

impl Default for AgentKind {
    fn default() -> Self {
        AgentKind::Random { spread: 0.9 }
    }
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Fixed { .. } => "fixed",
            AgentKind::Random { .. } => "random",
        }
    }

    /// Build the player for one episode
    pub fn build(&self, seed: u64) -> Box<dyn Player> {
        match *self {
            AgentKind::Fixed { angle } => Box::new(FixedAngle::new(angle)),
            AgentKind::Random { spread } => Box::new(RandomAngle::new(seed, spread)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base seed; episode `n` uses `seed + n`. Random when unset.
    pub seed: Option<u64>,
    /// Games to play
    pub episodes: u32,
    /// Stop a game after this many rounds even if it is not lost
    pub max_rounds: Option<u32>,
    /// Resolver calls allowed per shot
    pub max_collisions: usize,
    pub agent: AgentKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            episodes: 1,
            max_rounds: None,
            max_collisions: DEFAULT_MAX_COLLISIONS,
            agent: AgentKind::default(),
        }
    }
}

impl Settings {
    /// Read and validate a JSON settings file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.episodes > 0, "episodes must be at least 1");
        ensure!(self.max_collisions > 0, "max_collisions must be at least 1");
        match self.agent {
            AgentKind::Fixed { angle } if !(-1.0..=1.0).contains(&angle) => {
                bail!("fixed angle {} outside -1.0..=1.0", angle)
            }
            AgentKind::Random { spread } if !(0.0..=1.0).contains(&spread) => {
                bail!("random spread {} outside 0.0..=1.0", spread)
            }
            _ => Ok(()),
        }
    }
}
