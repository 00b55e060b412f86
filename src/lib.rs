//! Brick Breaker - a classic ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game phases)
//! - `game`: Fixed-rate orchestrator and the input/render collaborator traits
//! - `snapshot`: Read-only frame data handed to a renderer
//! - `config`: Immutable game configuration
//! - `autopilot`: Demo input that plays the game by itself

pub mod autopilot;
pub mod color;
pub mod config;
pub mod game;
pub mod sim;
pub mod snapshot;

pub use autopilot::Autopilot;
pub use color::Rgb;
pub use config::{Config, ConfigError};
pub use game::{Game, InputSource, Renderer};
pub use snapshot::Snapshot;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    /// Pixels per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the bottom edge to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;
    /// Extra depth below the paddle top that still counts as a hit
    pub const PADDLE_HIT_BAND: f32 = 6.0;

    /// Ball defaults (speeds are pixels per tick)
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED_INITIAL: f32 = 5.0;
    pub const BALL_SPEED_MAX: f32 = 9.0;
    /// Speed gained per destroyed brick
    pub const BALL_SPEED_INCREMENT: f32 = 0.03;
    /// Largest paddle deflection from vertical (radians, ~63 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = 1.1;
    /// Launch angle is sampled from [-spread, spread] around straight up
    pub const LAUNCH_SPREAD: f32 = 0.6;
    /// Gap between a resting ball and the paddle top
    pub const BALL_REST_GAP: f32 = 2.0;
    pub const TRAIL_LENGTH: usize = 8;
    /// Longest trail a config may ask for
    pub const MAX_TRAIL_LENGTH: usize = 1024;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 6;
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 24.0;
    pub const BRICK_PADDING: f32 = 4.0;
    pub const BRICK_OFFSET_TOP: f32 = 80.0;
    pub const POINTS_PER_ROW: [u32; 6] = [7, 7, 5, 5, 3, 1];
    /// Upper bound on rows * cols
    pub const MAX_BRICKS: u32 = 4096;

    /// Particle defaults
    pub const PADDLE_BURST: usize = 5;
    pub const BRICK_BURST: usize = 15;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const MAX_PARTICLES: usize = 512;

    pub const STARTING_LIVES: u32 = 3;
}

/// Velocity for a heading measured from straight up (positive = rightward).
///
/// Screen space has y growing downward, so "up" is negative y.
#[inline]
pub fn heading_to_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.sin() * speed, -angle.cos() * speed)
}

/// Inverse of [`heading_to_velocity`]: heading of a velocity from straight up.
#[inline]
pub fn velocity_heading(vel: Vec2) -> f32 {
    vel.x.atan2(-vel.y)
}
