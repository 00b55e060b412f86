//! Fixed timestep simulation tick
//!
//! Core game loop step: phase transitions from input, then paddle, ball,
//! collisions and particles, always in that order.

use super::collision::{
    ball_out_of_bounds, bounce_axis, first_brick_hit, paddle_bounce_velocity, paddle_contact,
    reflect,
};
use super::particle::{ParticleBurst, spawn_burst, update_particles};
use super::rect::Rect;
use super::state::{Brick, GameEvent, GamePhase, GameState};
use crate::config::Config;
use crate::velocity_heading;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Leave the menu
    pub start: bool,
    /// Launch the resting ball
    pub launch: bool,
    /// Start a fresh round
    pub restart: bool,
    /// Exit the game
    pub quit: bool,
}

/// Whether the loop should keep running after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    state.events.clear();

    if input.quit {
        return TickOutcome::Quit;
    }

    // The start press itself never launches the ball
    let was_playing = state.phase == GamePhase::Playing;

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.start();
            }
        }
        GamePhase::Playing | GamePhase::GameOver | GamePhase::Win => {
            if input.restart {
                state.restart();
            }
        }
    }

    if state.phase != GamePhase::Playing {
        return TickOutcome::Continue;
    }

    if was_playing && input.launch {
        let spread = state.config.ball.launch_spread;
        if let Some(angle) = state.ball.launch(&mut state.rng, spread) {
            state.events.push(GameEvent::Launched { angle });
        }
    }

    state.time_ticks += 1;

    let config = &state.config;
    state
        .paddle
        .step(input.left, input.right, config.paddle.speed, config.screen.width);
    state.ball.update(state.paddle.x, config);

    let bursts = resolve_collisions(state);
    for burst in &bursts {
        spawn_burst(
            &mut state.particles,
            &mut state.rng,
            burst,
            &state.config.particles,
        );
    }
    update_particles(&mut state.particles, state.config.particles.gravity);

    TickOutcome::Continue
}

/// Resolve paddle, brick, win and fall-out for the current ball position.
///
/// Mutates the ball, bricks, score, lives and phase, and returns the particle
/// bursts to emit. At most one brick is resolved per call: when the ball
/// overlaps two bricks, the second is left alive for a later tick.
pub fn resolve_collisions(state: &mut GameState) -> Vec<ParticleBurst> {
    let mut bursts = Vec::new();
    let config = &state.config;
    let ball = &mut state.ball;

    if paddle_contact(ball, &state.paddle, config.paddle.hit_band) {
        ball.vel = paddle_bounce_velocity(
            ball.pos.x,
            state.paddle.x,
            state.paddle.half_width(),
            config.ball.max_bounce_angle,
            ball.speed,
        );
        ball.pos.y = state.paddle.y - ball.radius;
        bursts.push(ParticleBurst {
            pos: ball.pos,
            color: config.paddle.color,
            count: config.particles.paddle_burst,
        });
        log::debug!(
            "Paddle hit at {:.1}, heading {:.3} rad",
            ball.pos.x,
            velocity_heading(ball.vel)
        );
        state.events.push(GameEvent::PaddleHit { pos: ball.pos });
    }

    if let Some(index) = first_brick_hit(&ball.bounds(), &state.bricks) {
        let brick = &mut state.bricks[index];
        brick.destroy();
        state.score += brick.points;
        bursts.push(ParticleBurst {
            pos: brick.rect.center(),
            color: brick.color,
            count: config.particles.brick_burst,
        });

        let axis = bounce_axis(ball.pos, ball.radius, &brick.rect);
        ball.vel = reflect(ball.vel, axis);
        ball.accelerate(config.ball.speed_increment, config.ball.max_speed);

        log::debug!(
            "Brick ({}, {}) destroyed for {} points, speed now {:.2}",
            brick.row,
            brick.col,
            brick.points,
            ball.speed
        );
        state.events.push(GameEvent::BrickDestroyed {
            row: brick.row,
            col: brick.col,
            points: brick.points,
        });
    }

    if state.bricks.iter().all(|b| !b.is_alive()) {
        log::info!("All bricks cleared, final score {}", state.score);
        state.phase = GamePhase::Win;
        state.events.push(GameEvent::Won);
        return bursts;
    }

    if ball_out_of_bounds(ball, config.screen.height) {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        if state.lives == 0 {
            log::info!("Game over, final score {}", state.score);
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
        } else {
            log::info!("Ball lost, {} lives left", state.lives);
            ball.reset(config);
        }
    }

    bursts
}

/// Build the brick grid in row-major order
pub fn generate_bricks(config: &Config) -> Vec<Brick> {
    let layout = &config.bricks;
    let offset_left = layout.offset_left(config.screen.width);
    let count = (layout.rows as usize).saturating_mul(layout.cols as usize);
    let mut bricks = Vec::with_capacity(count);

    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let x = offset_left + col as f32 * (layout.width + layout.padding);
            let y = layout.offset_top + row as f32 * (layout.height + layout.padding);
            bricks.push(Brick::new(
                Rect::new(x, y, layout.width, layout.height),
                layout.color_for_row(row),
                layout.points_for_row(row),
                row,
                col,
            ));
        }
    }

    bricks
}
