//! Idle/demo mode - a scripted player that drives the paddle
//!
//! Starts the game, launches the ball and steers under it. Used by the
//! headless runner and for soak-testing the simulation.

use crate::game::InputSource;
use crate::sim::{GamePhase, TickInput};
use crate::snapshot::Snapshot;

/// Demo input source
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Restarts left before quitting from a finished round
    restarts_left: u32,
    /// Ticks to wait on a finished round before acting
    linger_ticks: u32,
    waited: u32,
}

impl Autopilot {
    pub fn new(restarts: u32) -> Self {
        Self {
            restarts_left: restarts,
            linger_ticks: 60,
            waited: 0,
        }
    }

    /// Pause this many ticks on the win/game-over screen
    pub fn with_linger(mut self, ticks: u32) -> Self {
        self.linger_ticks = ticks;
        self
    }

    /// Where the paddle center should go
    fn target_x(snapshot: &Snapshot) -> f32 {
        let ball = &snapshot.ball;
        let paddle = &snapshot.paddle;
        if !ball.launched || ball.vel.y <= 0.0 {
            return ball.pos.x;
        }

        // Predict where the ball crosses the paddle line, folding wall bounces
        let ticks_to_paddle = ((paddle.y - ball.pos.y) / ball.vel.y).max(0.0);
        let lo = ball.radius;
        let hi = snapshot.screen_width - ball.radius;
        let span = hi - lo;
        let mut x = ball.pos.x + ball.vel.x * ticks_to_paddle - lo;
        if span > 0.0 {
            x = x.rem_euclid(2.0 * span);
            if x > span {
                x = 2.0 * span - x;
            }
        }

        // Add oscillating offset based on time to create variety in bounce angles
        let time_factor = snapshot.tick as f32 * 0.01;
        let wobble = time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15;
        let offset = wobble * paddle.width * 0.5;
        x + lo + offset
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(0)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &Snapshot) -> TickInput {
        let mut input = TickInput::default();
        if snapshot.phase.is_terminal() {
            if self.waited < self.linger_ticks {
                self.waited += 1;
            } else if self.restarts_left > 0 {
                self.restarts_left -= 1;
                self.waited = 0;
                input.restart = true;
            } else {
                input.quit = true;
            }
            return input;
        }
        if snapshot.phase == GamePhase::Menu {
            input.start = true;
            return input;
        }

        if !snapshot.ball.launched {
            input.launch = true;
        }
        let target = Self::target_x(snapshot);
        let deadzone = snapshot.paddle.width * 0.1;
        input.left = snapshot.paddle.x > target + deadzone;
        input.right = snapshot.paddle.x < target - deadzone;
        input
    }
}
