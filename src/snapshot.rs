//! Read-only frame data for renderers
//!
//! A `Snapshot` is captured after each tick and is everything a renderer (or
//! input source) may look at. It owns its data, so holding one never blocks
//! the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::color::Rgb;
use crate::sim::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 0-1, newest points are most opaque
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub launched: bool,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaddleView {
    /// Horizontal center
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Rgb,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    /// Already faded by remaining life
    pub color: Rgb,
    pub size: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u32,
    pub lives: u32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub paddle: PaddleView,
    pub ball: BallView,
    pub bricks: Vec<BrickView>,
    pub alive_bricks: usize,
    pub particles: Vec<ParticleView>,
    /// Ball is resting on the paddle during play
    pub show_launch_hint: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let config = state.config();
        let ball = &state.ball;
        let trail_len = ball.trail.len();
        let trail = ball
            .trail
            .iter()
            .enumerate()
            .map(|(i, &pos)| TrailPoint {
                pos,
                alpha: (i + 1) as f32 / trail_len as f32,
            })
            .collect();

        Self {
            phase: state.phase,
            tick: state.time_ticks,
            score: state.score,
            lives: state.lives,
            screen_width: config.screen.width,
            screen_height: config.screen.height,
            paddle: PaddleView {
                x: state.paddle.x,
                y: state.paddle.y,
                width: state.paddle.width,
                height: state.paddle.height,
                color: config.paddle.color,
            },
            ball: BallView {
                pos: ball.pos,
                vel: ball.vel,
                radius: ball.radius,
                speed: ball.speed,
                launched: ball.launched,
                trail,
            },
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickView {
                    x: b.rect.x,
                    y: b.rect.y,
                    w: b.rect.w,
                    h: b.rect.h,
                    color: b.color,
                    alive: b.is_alive(),
                })
                .collect(),
            alive_bricks: state.alive_bricks(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.faded_color(),
                    size: p.display_size(),
                })
                .collect(),
            show_launch_hint: state.phase == GamePhase::Playing && !ball.launched,
        }
    }
}
