//! Game configuration
//!
//! Built once and handed to the simulation at construction; never mutated
//! afterwards. Every section uses `#[serde(default)]`, so a JSON file only
//! needs the fields it wants to override.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{PADDLE_COLOR, Rgb, default_brick_palette};
use crate::consts::*;

/// Configuration loading/validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values are individually valid but make an unplayable game
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Inclusive range for randomized spawn parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> SpawnRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Distance from the bottom of the screen to the paddle top
    pub bottom_offset: f32,
    pub hit_band: f32,
    pub color: Rgb,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            bottom_offset: PADDLE_BOTTOM_OFFSET,
            hit_band: PADDLE_HIT_BAND,
            color: PADDLE_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    pub max_bounce_angle: f32,
    pub launch_spread: f32,
    pub rest_gap: f32,
    pub trail_length: usize,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            initial_speed: BALL_SPEED_INITIAL,
            max_speed: BALL_SPEED_MAX,
            speed_increment: BALL_SPEED_INCREMENT,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
            launch_spread: LAUNCH_SPREAD,
            rest_gap: BALL_REST_GAP,
            trail_length: TRAIL_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: u32,
    pub cols: u32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    /// Points by row, repeating when there are more rows than entries
    pub points_per_row: Vec<u32>,
    /// Colors by row, repeating when there are more rows than entries
    pub palette: Vec<Rgb>,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_top: BRICK_OFFSET_TOP,
            points_per_row: POINTS_PER_ROW.to_vec(),
            palette: default_brick_palette(),
        }
    }
}

impl BrickConfig {
    /// Total width of the grid, padding between columns only
    pub fn grid_width(&self) -> f32 {
        self.cols as f32 * (self.width + self.padding) - self.padding
    }

    /// Left margin that centers the grid horizontally
    pub fn offset_left(&self, screen_width: f32) -> f32 {
        ((screen_width - self.grid_width()) / 2.0).floor()
    }

    pub fn points_for_row(&self, row: u32) -> u32 {
        self.points_per_row[row as usize % self.points_per_row.len()]
    }

    pub fn color_for_row(&self, row: u32) -> Rgb {
        self.palette[row as usize % self.palette.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles emitted when the ball bounces off the paddle
    pub paddle_burst: usize,
    /// Particles emitted when a brick breaks
    pub brick_burst: usize,
    /// Initial speed, pixels per tick
    pub speed: SpawnRange<f32>,
    /// Lifespan in ticks
    pub life: SpawnRange<u32>,
    pub size: SpawnRange<f32>,
    /// Downward acceleration per tick
    pub gravity: f32,
    pub max_particles: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            paddle_burst: PADDLE_BURST,
            brick_burst: BRICK_BURST,
            speed: SpawnRange::new(1.0, 4.0),
            life: SpawnRange::new(15, 35),
            size: SpawnRange::new(2.0, 5.0),
            gravity: PARTICLE_GRAVITY,
            max_particles: MAX_PARTICLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_lives: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub particles: ParticleConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_y(&self) -> f32 {
        self.screen.height - self.paddle.bottom_offset
    }

    /// Y coordinate of a ball resting on the paddle
    pub fn ball_rest_y(&self) -> f32 {
        self.paddle_y() - self.ball.radius - self.ball.rest_gap
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            return invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen.width, self.screen.height
            ));
        }
        if self.paddle.width <= 0.0 || self.paddle.height <= 0.0 {
            return invalid("paddle dimensions must be positive".into());
        }
        if self.paddle.width > self.screen.width {
            return invalid(format!(
                "paddle width {} exceeds screen width {}",
                self.paddle.width, self.screen.width
            ));
        }
        if self.paddle.speed < 0.0 {
            return invalid("paddle speed must not be negative".into());
        }
        if self.paddle_y() <= 0.0 || self.paddle_y() >= self.screen.height {
            return invalid(format!(
                "paddle bottom offset {} places the paddle off screen",
                self.paddle.bottom_offset
            ));
        }
        if self.ball.radius <= 0.0 {
            return invalid("ball radius must be positive".into());
        }
        if self.ball.initial_speed <= 0.0 || self.ball.initial_speed > self.ball.max_speed {
            return invalid(format!(
                "ball speeds must satisfy 0 < initial ({}) <= max ({})",
                self.ball.initial_speed, self.ball.max_speed
            ));
        }
        if self.ball.speed_increment < 0.0 {
            return invalid("ball speed increment must not be negative".into());
        }
        if self.ball.launch_spread < 0.0 || self.ball.max_bounce_angle < 0.0 {
            return invalid("ball angles must not be negative".into());
        }
        if self.ball.trail_length > MAX_TRAIL_LENGTH {
            return invalid(format!(
                "trail length {} exceeds {}",
                self.ball.trail_length, MAX_TRAIL_LENGTH
            ));
        }
        if self.bricks.rows == 0 || self.bricks.cols == 0 {
            return invalid("brick grid needs at least one row and one column".into());
        }
        match self.bricks.rows.checked_mul(self.bricks.cols) {
            Some(count) if count <= MAX_BRICKS => {}
            _ => {
                return invalid(format!(
                    "brick grid {}x{} exceeds {} bricks",
                    self.bricks.rows, self.bricks.cols, MAX_BRICKS
                ));
            }
        }
        if self.bricks.width <= 0.0 || self.bricks.height <= 0.0 {
            return invalid("brick dimensions must be positive".into());
        }
        if self.bricks.grid_width() > self.screen.width {
            return invalid(format!(
                "brick grid width {} exceeds screen width {}",
                self.bricks.grid_width(),
                self.screen.width
            ));
        }
        if self.bricks.points_per_row.is_empty() {
            return invalid("points_per_row must not be empty".into());
        }
        if self.bricks.palette.is_empty() {
            return invalid("brick palette must not be empty".into());
        }
        let particles = &self.particles;
        if !particles.speed.is_ordered()
            || !particles.life.is_ordered()
            || !particles.size.is_ordered()
        {
            return invalid("particle ranges must have min <= max".into());
        }
        if particles.life.min == 0 {
            return invalid("particle life must be at least one tick".into());
        }
        if self.rules.starting_lives == 0 {
            return invalid("starting lives must be at least 1".into());
        }
        Ok(())
    }
}
