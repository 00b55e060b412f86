//! Collision detection and response for the ball
//!
//! Pure functions over ball/paddle/brick geometry. The tick applies the
//! results in a fixed order: paddle, one brick, win check, fall-out check.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Ball, Brick, Paddle};
use crate::heading_to_velocity;

/// Which velocity component a brick hit flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Side hit: flip vx
    Horizontal,
    /// Top/bottom hit: flip vy
    Vertical,
}

/// Is the descending ball inside the thin hit band at the paddle top?
///
/// The paddle is widened by the ball radius on both sides; the band spans
/// from one radius above the top edge to `radius + hit_band` below it.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, hit_band: f32) -> bool {
    if ball.vel.y <= 0.0 {
        return false;
    }
    let rect = paddle.rect();
    let r = ball.radius;
    let within_x = ball.pos.x > rect.left() - r && ball.pos.x < rect.right() + r;
    let within_y = ball.pos.y > rect.top() - r && ball.pos.y < rect.top() + r + hit_band;
    within_x && within_y
}

/// Outgoing velocity for a paddle hit.
///
/// The hit offset from the paddle center (normalized to -1..1) maps linearly
/// to an angle from vertical, so edge hits leave at up to `max_angle`.
pub fn paddle_bounce_velocity(
    ball_x: f32,
    paddle_x: f32,
    half_width: f32,
    max_angle: f32,
    speed: f32,
) -> Vec2 {
    let relative_x = ((ball_x - paddle_x) / half_width).clamp(-1.0, 1.0);
    heading_to_velocity(relative_x * max_angle, speed)
}

/// Index of the first alive brick (grid order) overlapping the ball's box.
///
/// Only one brick is reported even if the ball overlaps several.
pub fn first_brick_hit(ball_bounds: &Rect, bricks: &[Brick]) -> Option<usize> {
    bricks
        .iter()
        .position(|brick| brick.is_alive() && ball_bounds.overlaps(&brick.rect))
}

/// Pick the reflection axis from the ball center's offset to the brick center.
///
/// Offsets are normalized by the brick half-extent plus the ball radius, so a
/// wide brick is not biased toward side hits. Ties flip vy.
pub fn bounce_axis(ball_pos: Vec2, radius: f32, brick: &Rect) -> BounceAxis {
    let offset = ball_pos - brick.center();
    let half = brick.half_extents();
    let nx = (offset.x / (half.x + radius)).abs();
    let ny = (offset.y / (half.y + radius)).abs();
    if nx > ny {
        BounceAxis::Horizontal
    } else {
        BounceAxis::Vertical
    }
}

#[inline]
pub fn reflect(vel: Vec2, axis: BounceAxis) -> Vec2 {
    match axis {
        BounceAxis::Horizontal => Vec2::new(-vel.x, vel.y),
        BounceAxis::Vertical => Vec2::new(vel.x, -vel.y),
    }
}

/// Ball fully below the bottom edge
pub fn ball_out_of_bounds(ball: &Ball, screen_height: f32) -> bool {
    ball.pos.y > screen_height + ball.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::Config;

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(&Config::default());
        ball.pos = pos;
        ball.vel = vel;
        ball.launched = true;
        ball
    }

    fn brick(x: f32, y: f32) -> Brick {
        Brick::new(Rect::new(x, y, 70.0, 24.0), Rgb::WHITE, 7, 0, 0)
    }

    #[test]
    fn test_paddle_contact_requires_descent() {
        let paddle = Paddle::new(&Config::default());
        let down = ball_at(Vec2::new(400.0, 548.0), Vec2::new(0.0, 5.0));
        let up = ball_at(Vec2::new(400.0, 548.0), Vec2::new(0.0, -5.0));
        assert!(paddle_contact(&down, &paddle, 6.0));
        assert!(!paddle_contact(&up, &paddle, 6.0));
    }

    #[test]
    fn test_paddle_contact_band() {
        let paddle = Paddle::new(&Config::default());
        let vel = Vec2::new(0.0, 5.0);
        // Top edge at 550, radius 8, band 6: open interval (542, 564)
        assert!(!paddle_contact(&ball_at(Vec2::new(400.0, 542.0), vel), &paddle, 6.0));
        assert!(paddle_contact(&ball_at(Vec2::new(400.0, 543.0), vel), &paddle, 6.0));
        assert!(paddle_contact(&ball_at(Vec2::new(400.0, 563.0), vel), &paddle, 6.0));
        assert!(!paddle_contact(&ball_at(Vec2::new(400.0, 564.0), vel), &paddle, 6.0));
    }

    #[test]
    fn test_paddle_contact_inflated_by_radius() {
        let paddle = Paddle::new(&Config::default());
        let vel = Vec2::new(0.0, 5.0);
        // Paddle spans 340..460; inflated bounds are (332, 468)
        assert!(paddle_contact(&ball_at(Vec2::new(333.0, 550.0), vel), &paddle, 6.0));
        assert!(!paddle_contact(&ball_at(Vec2::new(332.0, 550.0), vel), &paddle, 6.0));
        assert!(paddle_contact(&ball_at(Vec2::new(467.0, 550.0), vel), &paddle, 6.0));
        assert!(!paddle_contact(&ball_at(Vec2::new(468.0, 550.0), vel), &paddle, 6.0));
    }

    #[test]
    fn test_paddle_center_bounces_straight_up() {
        let v = paddle_bounce_velocity(400.0, 400.0, 60.0, 1.1, 5.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_paddle_edge_angle_clamped() {
        let edge = paddle_bounce_velocity(460.0, 400.0, 60.0, 1.1, 5.0);
        let beyond = paddle_bounce_velocity(470.0, 400.0, 60.0, 1.1, 5.0);
        assert!((edge - beyond).length() < 1e-6);
        assert!((crate::velocity_heading(edge) - 1.1).abs() < 1e-5);
        assert!((edge.length() - 5.0).abs() < 1e-5);

        let left = paddle_bounce_velocity(340.0, 400.0, 60.0, 1.1, 5.0);
        assert!((crate::velocity_heading(left) + 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_first_brick_hit_skips_dead() {
        let mut bricks = vec![brick(0.0, 0.0), brick(74.0, 0.0)];
        let bounds = Rect::around_circle(Vec2::new(72.0, 12.0), 8.0);
        assert_eq!(first_brick_hit(&bounds, &bricks), Some(0));
        bricks[0].destroy();
        assert_eq!(first_brick_hit(&bounds, &bricks), Some(1));
        bricks[1].destroy();
        assert_eq!(first_brick_hit(&bounds, &bricks), None);
    }

    #[test]
    fn test_bounce_axis_side_hit() {
        let rect = Rect::new(0.0, 0.0, 70.0, 24.0);
        assert_eq!(
            bounce_axis(Vec2::new(-5.0, 12.0), 8.0, &rect),
            BounceAxis::Horizontal
        );
        assert_eq!(
            bounce_axis(Vec2::new(35.0, -5.0), 8.0, &rect),
            BounceAxis::Vertical
        );
    }

    #[test]
    fn test_bounce_axis_uses_normalized_penetration() {
        // Offset (30, 14) from center: raw |dx| > |dy| would pick a side hit,
        // but 30/43 < 14/20 so the wide brick reports a top/bottom hit.
        let rect = Rect::new(0.0, 0.0, 70.0, 24.0);
        let pos = rect.center() + Vec2::new(30.0, 14.0);
        assert_eq!(bounce_axis(pos, 8.0, &rect), BounceAxis::Vertical);
    }

    #[test]
    fn test_bounce_axis_tie_flips_vy() {
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        let pos = rect.center() + Vec2::new(5.0, 5.0);
        assert_eq!(bounce_axis(pos, 8.0, &rect), BounceAxis::Vertical);
    }

    #[test]
    fn test_reflect() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(reflect(v, BounceAxis::Horizontal), Vec2::new(-3.0, 4.0));
        assert_eq!(reflect(v, BounceAxis::Vertical), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_out_of_bounds_past_radius() {
        let vel = Vec2::new(0.0, 5.0);
        assert!(!ball_out_of_bounds(&ball_at(Vec2::new(400.0, 608.0), vel), 600.0));
        assert!(ball_out_of_bounds(&ball_at(Vec2::new(400.0, 608.5), vel), 600.0));
    }
}
