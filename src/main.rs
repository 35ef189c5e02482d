//! Breakout Volley entry point
//!
//! Plays headless games with a scripted agent and prints a summary per game.
//! `RUST_LOG=info` shows each round, `debug` adds boards and fragments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use breakout_volley::sim::{Player, Round, Snapshot, Transition};
use breakout_volley::{AgentKind, Settings};

/// Command-line overrides for the settings file
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Base seed for spawn rows and the random agent
    #[arg(long)]
    seed: Option<u64>,
    /// Number of games to play
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    episodes: Option<u32>,
    /// Stop each game after this many rounds
    #[arg(long, value_name = "ROUNDS")]
    max_rounds: Option<u32>,
    /// Resolver calls allowed per shot
    #[arg(long, value_name = "COUNT")]
    max_collisions: Option<usize>,
    /// Fire every shot at this angle (-1.0..=1.0) instead of randomly
    #[arg(long, allow_negative_numbers = true, conflicts_with = "spread")]
    angle: Option<f64>,
    /// Random agent angle range (0.0..=1.0)
    #[arg(long)]
    spread: Option<f64>,
    /// Print every round transition as a JSON line
    #[arg(long)]
    json: bool,
    /// Write the effective settings to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,
}

impl CliArgs {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(episodes) = self.episodes {
            settings.episodes = episodes;
        }
        if self.max_rounds.is_some() {
            settings.max_rounds = self.max_rounds;
        }
        if let Some(max_collisions) = self.max_collisions {
            settings.max_collisions = max_collisions;
        }
        if let Some(angle) = self.angle {
            settings.agent = AgentKind::Fixed { angle };
        } else if let Some(spread) = self.spread {
            settings.agent = AgentKind::Random { spread };
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Serialize)]
struct Record<'a> {
    episode: u32,
    #[serde(flatten)]
    transition: &'a Transition,
}

/// Wraps a player and echoes each transition to stdout
struct JsonLines<'a> {
    inner: &'a mut dyn Player,
    episode: u32,
}

impl Player for JsonLines<'_> {
    fn input(&mut self, view: &Snapshot) -> f64 {
        self.inner.input(view)
    }

    fn observe(&mut self, transition: &Transition) {
        self.inner.observe(transition);
        let record = Record {
            episode: self.episode,
            transition,
        };
        match serde_json::to_string(&record) {
            Ok(line) => println!("{}", line),
            Err(err) => log::warn!("could not encode round {}: {}", transition.round, err),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let settings = args.settings()?;

    if let Some(path) = &args.write_config {
        return settings.save(path);
    }

    let base_seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Breakout Volley: {} episode(s), {} agent, seed {}",
        settings.episodes,
        settings.agent.as_str(),
        base_seed
    );

    let mut failures = 0;
    for episode in 0..settings.episodes {
        let seed = base_seed.wrapping_add(u64::from(episode));
        let mut state = Round::seeded(seed).with_max_collisions(settings.max_collisions);
        let mut player = settings.agent.build(seed);

        let outcome = if args.json {
            let mut echo = JsonLines {
                inner: player.as_mut(),
                episode,
            };
            state.run(&mut echo, settings.max_rounds)
        } else {
            state.run(player.as_mut(), settings.max_rounds)
        };

        match outcome.with_context(|| format!("episode {} (seed {})", episode, seed)) {
            Ok(summary) => eprintln!(
                "episode {}: seed {}, {} rounds, {} hit, {}",
                episode,
                seed,
                summary.rounds,
                summary.blocks_hit,
                if summary.lost { "lost" } else { "round cap" }
            ),
            Err(err) => {
                failures += 1;
                log::error!("{:#}", err);
                eprintln!("episode {}: seed {}, aborted: {:#}", episode, seed, err);
            }
        }
    }

    anyhow::ensure!(
        failures == 0,
        "{} of {} episode(s) aborted",
        failures,
        settings.episodes
    );
    Ok(())
}
