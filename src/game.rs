//! Game loop orchestrator
//!
//! Owns the `GameState`, converts real frame time into fixed ticks, polls the
//! input collaborator before each tick and hands a snapshot to the renderer
//! after it.

use crate::config::{Config, ConfigError};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, TickOutcome, tick};
use crate::snapshot::Snapshot;

/// Supplies the input for the next tick
pub trait InputSource {
    /// `snapshot` is the frame the player is currently looking at
    fn poll(&mut self, snapshot: &Snapshot) -> TickInput;
}

/// Consumes a snapshot once per tick
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}

/// Input source that never presses anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _snapshot: &Snapshot) -> TickInput {
        TickInput::default()
    }
}

/// Renderer that discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _snapshot: &Snapshot) {}
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    accumulator: f32,
    last_snapshot: Snapshot,
    last_phase: GamePhase,
}

impl Game {
    /// Validate `config` and set up a new game at the menu
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(config, seed);
        log::info!("New game with seed {}", seed);
        Ok(Self {
            last_snapshot: Snapshot::capture(&state),
            last_phase: state.phase,
            state,
            accumulator: 0.0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for tests and tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Snapshot of the most recent tick
    pub fn snapshot(&self) -> &Snapshot {
        &self.last_snapshot
    }

    /// Run exactly one tick with the given input
    pub fn step(&mut self, input: &TickInput) -> TickOutcome {
        let outcome = tick(&mut self.state, input);
        self.log_events();
        self.last_snapshot = Snapshot::capture(&self.state);
        outcome
    }

    /// Poll, tick and draw once
    pub fn step_with<I, R>(&mut self, input: &mut I, renderer: &mut R) -> TickOutcome
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let tick_input = input.poll(&self.last_snapshot);
        let outcome = self.step(&tick_input);
        renderer.draw(&self.last_snapshot);
        outcome
    }

    /// Feed real elapsed time; runs as many fixed ticks as have accrued.
    ///
    /// At most `MAX_SUBSTEPS` ticks run per call; leftover time is dropped
    /// rather than letting a slow frame snowball.
    pub fn advance<I, R>(&mut self, frame_dt: f32, input: &mut I, renderer: &mut R) -> TickOutcome
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        self.accumulator += frame_dt.clamp(0.0, 0.25);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.step_with(input, renderer) == TickOutcome::Quit {
                return TickOutcome::Quit;
            }
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!("Simulation falling behind, dropping {:.3}s", self.accumulator);
            self.accumulator = 0.0;
        }
        TickOutcome::Continue
    }

    /// Run up to `ticks` ticks back to back (headless mode)
    pub fn run_ticks<I, R>(&mut self, ticks: u64, input: &mut I, renderer: &mut R) -> TickOutcome
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        for _ in 0..ticks {
            if self.step_with(input, renderer) == TickOutcome::Quit {
                log::info!("Quit requested at score {}", self.state.score);
                return TickOutcome::Quit;
            }
        }
        TickOutcome::Continue
    }

    fn log_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::Started => log::info!("Game started"),
                GameEvent::Restarted => log::info!("Game restarted"),
                GameEvent::Launched { angle } => log::debug!("Ball launched at {:.3} rad", angle),
                GameEvent::LifeLost { lives_left } => {
                    log::debug!("Life lost, {} remaining", lives_left)
                }
                _ => {}
            }
        }
        if self.state.phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }
    }
}
