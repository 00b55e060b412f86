//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks in grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particle;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BounceAxis, bounce_axis, first_brick_hit, paddle_bounce_velocity};
pub use particle::{Particle, ParticleBurst};
pub use rect::Rect;
pub use state::{Ball, Brick, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, TickOutcome, generate_bricks, resolve_collisions, tick};
