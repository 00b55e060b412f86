//! Cosmetic particle bursts
//!
//! Particles never touch gameplay state. They are spawned from collision
//! bursts, fall under a constant gravity and fade out with their life.

use glam::Vec2;
use rand::Rng;

use crate::color::Rgb;
use crate::config::ParticleConfig;

/// A request to emit `count` particles at `pos`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBurst {
    pub pos: Vec2,
    pub color: Rgb,
    pub count: usize,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    /// Spawn with a random direction, speed, lifespan and size
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        pos: Vec2,
        color: Rgb,
        config: &ParticleConfig,
    ) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(config.speed.min..=config.speed.max);
        let life = rng.random_range(config.life.min..=config.life.max);
        let size = rng.random_range(config.size.min..=config.size.max);
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            life,
            max_life: life,
            size,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, gravity: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Remaining-life fraction in 0-1
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    pub fn faded_color(&self) -> Rgb {
        self.color.scaled(self.alpha())
    }

    /// Rendered size, never below one pixel
    pub fn display_size(&self) -> f32 {
        (self.size * self.alpha()).max(1.0)
    }
}

/// Emit a burst, dropping the oldest particles past `max_particles`
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    burst: &ParticleBurst,
    config: &ParticleConfig,
) {
    for _ in 0..burst.count {
        particles.push(Particle::spawn(rng, burst.pos, burst.color, config));
    }
    if particles.len() > config.max_particles {
        let excess = particles.len() - config.max_particles;
        particles.drain(..excess);
    }
}

/// Advance every particle and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, gravity: f32) {
    for particle in particles.iter_mut() {
        particle.update(gravity);
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst(count: usize) -> ParticleBurst {
        ParticleBurst {
            pos: Vec2::new(100.0, 100.0),
            color: Rgb(200, 100, 50),
            count,
        }
    }

    #[test]
    fn test_spawn_within_ranges() {
        let config = ParticleConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, Vec2::ZERO, Rgb::WHITE, &config);
            let speed = p.vel.length();
            assert!(speed >= config.speed.min - 1e-4 && speed <= config.speed.max + 1e-4);
            assert!(p.life >= config.life.min && p.life <= config.life.max);
            assert!(p.size >= config.size.min && p.size <= config.size.max);
            assert_eq!(p.life, p.max_life);
        }
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            color: Rgb::WHITE,
            life: 10,
            max_life: 10,
            size: 4.0,
        };
        p.update(0.1);
        assert_eq!(p.pos, Vec2::new(1.0, 0.0));
        assert!((p.vel.y - 0.1).abs() < 1e-6);
        assert_eq!(p.life, 9);
        p.update(0.1);
        assert!((p.pos.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_fade_follows_life() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Rgb(200, 100, 50),
            life: 5,
            max_life: 10,
            size: 4.0,
        };
        assert!((p.alpha() - 0.5).abs() < 1e-6);
        assert_eq!(p.faded_color(), Rgb(100, 50, 25));
        assert!((p.display_size() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_display_size_floor() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Rgb::WHITE,
            life: 1,
            max_life: 30,
            size: 2.0,
        };
        assert_eq!(p.display_size(), 1.0);
    }

    #[test]
    fn test_expired_particles_removed() {
        let config = ParticleConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, &burst(12), &config);
        assert_eq!(particles.len(), 12);

        for _ in 0..config.life.max {
            update_particles(&mut particles, config.gravity);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_burst_respects_cap() {
        let config = ParticleConfig {
            max_particles: 20,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, &burst(15), &config);
        spawn_burst(&mut particles, &mut rng, &burst(15), &config);
        assert_eq!(particles.len(), 20);
    }
}
