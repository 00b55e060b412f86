//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here and is owned by `GameState`.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use super::rect::Rect;
use super::tick::generate_bricks;
use crate::color::Rgb;
use crate::config::Config;
use crate::heading_to_velocity;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start input
    Menu,
    /// Active gameplay (ball may still be resting on the paddle)
    Playing,
    /// All lives lost
    GameOver,
    /// Every brick destroyed
    Win,
}

impl GamePhase {
    /// Only an explicit restart leaves a terminal phase
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    Restarted,
    Launched { angle: f32 },
    PaddleHit { pos: Vec2 },
    BrickDestroyed { row: u32, col: u32, points: u32 },
    LifeLost { lives_left: u32 },
    Won,
    GameOver,
}

/// The ball: rests on the paddle until launched, then moves freely
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current speed; velocity magnitude after every collision response
    pub speed: f32,
    pub radius: f32,
    pub launched: bool,
    /// Recent positions for rendering (oldest first)
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    pub fn new(config: &Config) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed: config.ball.initial_speed,
            radius: config.ball.radius,
            launched: false,
            trail: VecDeque::with_capacity(config.ball.trail_length.saturating_add(1)),
        };
        ball.reset(config);
        ball
    }

    /// Put the ball back above the paddle, unlaunched, at starting speed
    pub fn reset(&mut self, config: &Config) {
        self.pos = Vec2::new(config.screen.width / 2.0, config.ball_rest_y());
        self.vel = Vec2::ZERO;
        self.speed = config.ball.initial_speed;
        self.radius = config.ball.radius;
        self.launched = false;
        self.trail.clear();
    }

    /// Launch upward at a random angle within `[-spread, spread]`.
    ///
    /// Returns the chosen angle, or `None` if the ball was already moving.
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R, spread: f32) -> Option<f32> {
        if self.launched {
            return None;
        }
        let angle = rng.random_range(-spread..=spread);
        self.vel = heading_to_velocity(angle, self.speed);
        self.launched = true;
        Some(angle)
    }

    /// Follow the paddle while resting, otherwise move and bounce off walls.
    ///
    /// The bottom edge is not a wall; falling out is handled by the resolver.
    pub fn update(&mut self, paddle_x: f32, config: &Config) {
        if !self.launched {
            self.pos = Vec2::new(paddle_x, config.ball_rest_y());
            return;
        }

        self.record_trail(config.ball.trail_length);
        self.pos += self.vel;

        let width = config.screen.width;
        if self.pos.x - self.radius <= 0.0 {
            self.pos.x = self.radius;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + self.radius >= width {
            self.pos.x = width - self.radius;
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y - self.radius <= 0.0 {
            self.pos.y = self.radius;
            self.vel.y = self.vel.y.abs();
        }
    }

    /// Record current position, evicting the oldest past `max_len`
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }

    /// Raise speed by `increment` (capped at `max`), keeping direction
    pub fn accelerate(&mut self, increment: f32, max: f32) {
        self.speed = (self.speed + increment).min(max);
        let dir = self.vel.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.vel = dir * self.speed;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Horizontal center
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Top edge
    pub y: f32,
}

impl Paddle {
    pub fn new(config: &Config) -> Self {
        Self {
            x: config.screen.width / 2.0,
            width: config.paddle.width,
            height: config.paddle.height,
            y: config.paddle_y(),
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x - self.half_width(), self.y, self.width, self.height)
    }

    /// Apply held directions in order (left, then right) and clamp on screen
    pub fn step(&mut self, left: bool, right: bool, speed: f32, screen_width: f32) {
        if left {
            self.x -= speed;
        }
        if right {
            self.x += speed;
        }
        self.x = self
            .x
            .clamp(self.half_width(), screen_width - self.half_width());
    }
}

/// A destructible brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub rect: Rect,
    pub color: Rgb,
    pub points: u32,
    pub row: u32,
    pub col: u32,
    alive: bool,
}

impl Brick {
    pub fn new(rect: Rect, color: Rgb, points: u32, row: u32, col: u32) -> Self {
        Self {
            rect,
            color,
            points,
            row,
            col,
            alive: true,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Destroy the brick. Returns false if it was already gone.
    pub fn destroy(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Grid in row-major order
    pub bricks: Vec<Brick>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
    /// Seeded source for launch angles and particles
    pub rng: Pcg32,
    pub(crate) config: Config,
}

impl GameState {
    /// Create a new game sitting at the menu.
    ///
    /// `config` is assumed valid; `Game::new` validates it first.
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            lives: config.rules.starting_lives,
            time_ticks: 0,
            paddle: Paddle::new(&config),
            ball: Ball::new(&config),
            bricks: generate_bricks(&config),
            particles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    /// Leave the menu. Returns false (and does nothing) from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        true
    }

    /// Fresh round: score, lives, paddle, ball, bricks and particles reset.
    ///
    /// Ignored at the menu, which only `start` leaves.
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            return false;
        }
        self.score = 0;
        self.lives = self.config.rules.starting_lives;
        self.paddle = Paddle::new(&self.config);
        self.ball.reset(&self.config);
        self.bricks = generate_bricks(&self.config);
        self.particles.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        true
    }
}
