//! Brick Breaker entry point
//!
//! Headless runner: drives the simulation with the autopilot (or no input)
//! and optionally prints JSON snapshots for an external renderer.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use brick_breaker::consts::TICK_RATE;
use brick_breaker::game::NoInput;
use brick_breaker::sim::{GamePhase, TickOutcome};
use brick_breaker::{Autopilot, Config, Game, InputSource, Renderer, Snapshot};

#[derive(Debug, Parser)]
#[command(name = "brick-breaker", about = "Headless brick breaker simulation")]
struct Args {
    /// JSON config file (fields not given keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 60 * TICK_RATE as u64)]
    ticks: u64,

    /// Idle at the menu instead of letting the autopilot play
    #[arg(long)]
    no_autoplay: bool,

    /// Rounds the autopilot restarts before quitting
    #[arg(long, default_value_t = 0)]
    restarts: u32,

    /// Ticks the autopilot lingers on a finished round
    #[arg(long, default_value_t = TICK_RATE)]
    linger: u32,

    /// Print a JSON snapshot every N ticks (0 = never)
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,
}

/// Writes JSON lines to stdout and logs HUD changes
struct JsonRenderer<W: Write> {
    out: W,
    every: u64,
    last_phase: Option<GamePhase>,
    last_hud: (u32, u32),
    /// Tick of the last printed snapshot; frozen phases repeat a tick
    last_printed: Option<u64>,
}

impl<W: Write> JsonRenderer<W> {
    fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every,
            last_phase: None,
            last_hud: (0, 0),
            last_printed: None,
        }
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn draw(&mut self, snapshot: &Snapshot) {
        let hud = (snapshot.score, snapshot.lives);
        if self.last_phase != Some(snapshot.phase) || self.last_hud != hud {
            log::debug!(
                "[{:?}] score {} lives {} bricks {}",
                snapshot.phase,
                snapshot.score,
                snapshot.lives,
                snapshot.alive_bricks
            );
            self.last_phase = Some(snapshot.phase);
            self.last_hud = hud;
        }

        if self.every == 0
            || snapshot.tick % self.every != 0
            || self.last_printed == Some(snapshot.tick)
        {
            return;
        }
        self.last_printed = Some(snapshot.tick);
        match serde_json::to_string(snapshot) {
            Ok(json) => {
                if let Err(e) = writeln!(self.out, "{}", json) {
                    log::warn!("Snapshot write failed: {}", e);
                }
            }
            Err(e) => log::warn!("Snapshot encode failed: {}", e),
        }
    }
}

fn default_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let seed = args.seed.unwrap_or_else(default_seed);

    log::info!("Brick Breaker (headless) starting, seed {}", seed);
    let mut game = Game::new(config, seed).context("invalid configuration")?;

    let mut input: Box<dyn InputSource> = if args.no_autoplay {
        Box::new(NoInput)
    } else {
        Box::new(Autopilot::new(args.restarts).with_linger(args.linger))
    };
    let stdout = io::stdout();
    let mut renderer = JsonRenderer::new(stdout.lock(), args.snapshot_every);

    let outcome = game.run_ticks(args.ticks, input.as_mut(), &mut renderer);
    renderer.out.flush().context("failed to flush stdout")?;

    let state = game.state();
    match outcome {
        TickOutcome::Quit => log::info!("Quit"),
        TickOutcome::Continue => log::info!("Tick limit reached"),
    }
    log::info!(
        "Finished in {:?}: score {}, lives {}, {} bricks left",
        state.phase,
        state.score,
        state.lives,
        state.alive_bricks()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brick_breaker::sim::GameState;

    #[test]
    fn test_autoplay_is_default_switch() {
        let args = Args::try_parse_from(["brick-breaker"]).unwrap();
        assert!(!args.no_autoplay);
        assert_eq!(args.linger, TICK_RATE);

        let args = Args::try_parse_from(["brick-breaker", "--no-autoplay"]).unwrap();
        assert!(args.no_autoplay);
    }

    #[test]
    fn test_frozen_tick_printed_once() {
        let mut state = GameState::new(Config::default(), 1);
        state.start();
        state.time_ticks = 10;
        state.phase = GamePhase::GameOver;
        let snapshot = Snapshot::capture(&state);

        let mut renderer = JsonRenderer::new(Vec::new(), 5);
        for _ in 0..60 {
            renderer.draw(&snapshot);
        }
        let text = String::from_utf8(renderer.out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_prints_every_nth_tick() {
        let mut state = GameState::new(Config::default(), 1);
        let mut renderer = JsonRenderer::new(Vec::new(), 2);
        for tick in 0..6 {
            state.time_ticks = tick;
            renderer.draw(&Snapshot::capture(&state));
        }
        let text = String::from_utf8(renderer.out).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
