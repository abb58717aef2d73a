//! Stochastic event generators: shooting stars and activity bursts.
//!
//! Shooting stars spawn at a random screen edge, aimed roughly at the
//! opposite side with some jitter, and die at lifetime expiry. Activity
//! bursts raise node activity within a radius and are triggered ambiently,
//! by taps, and by scroll spikes.

use crate::config::TICK_RATE;
use crate::node::Node;
use crate::render::Viewport;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;

/// Depth plane shooting stars travel on.
const STAR_PLANE: f32 = -50.0;

/// A streak crossing the viewport.
#[derive(Clone, Debug)]
pub struct ShootingStar {
    pub position: Vec3,
    /// Units per nominal frame.
    pub velocity: Vec2,
    pub age: f32,
    pub lifetime: f32,
}

impl ShootingStar {
    /// Remaining-life fraction, 1 at spawn fading to 0.
    #[inline]
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / self.lifetime).max(0.0)
    }

    /// Trail tail position; the trail shortens as the star fades.
    pub fn tail(&self, full_trail: f32) -> Vec3 {
        let dir = self.velocity.normalize_or_zero();
        let len = full_trail * self.fade();
        self.position - Vec3::new(dir.x, dir.y, 0.0) * len
    }
}

/// Fixed-capacity set of live shooting stars.
#[derive(Debug)]
pub struct StarField {
    stars: Vec<ShootingStar>,
    capacity: usize,
    speed: f32,
    lifetime: f32,
}

impl StarField {
    pub fn new(capacity: usize, speed: f32, lifetime: f32) -> Self {
        Self {
            stars: Vec::with_capacity(capacity),
            capacity,
            speed,
            lifetime,
        }
    }

    /// Spawn a star at a random edge of the wrap region, aimed at the
    /// opposite side plus jitter. Dropped silently at capacity.
    pub fn spawn(&mut self, viewport: Viewport, rng: &mut SmallRng) -> bool {
        if self.stars.len() >= self.capacity {
            return false;
        }

        let (hx, hy) = viewport.half();
        let (wx, wy) = viewport.wrap();
        let (x, y) = match rng.gen_range(0..4u8) {
            0 => (-wx, (rng.gen::<f32>() - 0.5) * hy),
            1 => (wx, (rng.gen::<f32>() - 0.5) * hy),
            2 => ((rng.gen::<f32>() - 0.5) * hx, -wy),
            _ => ((rng.gen::<f32>() - 0.5) * hx, wy),
        };

        // Aim back across the viewport center, jittered.
        let angle = (-y).atan2(-x) + (rng.gen::<f32>() - 0.5) * 0.3;
        self.stars.push(ShootingStar {
            position: Vec3::new(x, y, STAR_PLANE),
            velocity: Vec2::new(angle.cos(), angle.sin()) * self.speed,
            age: 0.0,
            lifetime: self.lifetime,
        });
        true
    }

    /// Spawn with an explicit lifetime (tests and scripted events).
    pub fn spawn_with_lifetime(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        lifetime: f32,
    ) -> bool {
        if self.stars.len() >= self.capacity {
            return false;
        }
        self.stars.push(ShootingStar {
            position: Vec3::new(position.x, position.y, STAR_PLANE),
            velocity,
            age: 0.0,
            lifetime,
        });
        true
    }

    /// Age and move every star; expired stars are removed.
    pub fn step(&mut self, dt: f32) {
        let scale = dt * TICK_RATE;
        for star in &mut self.stars {
            star.age += dt;
            star.position.x += star.velocity.x * scale;
            star.position.y += star.velocity.y * scale;
        }
        self.stars.retain(|s| s.age < s.lifetime);
    }

    #[inline]
    pub fn stars(&self) -> &[ShootingStar] {
        &self.stars
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// Raise activity of every node within `radius` of `center`.
///
/// The boost falls off linearly with distance and the result clamps to 1.
pub fn burst_at(nodes: &mut [Node], center: Vec2, radius: f32, strength: f32) {
    if radius <= 0.0 {
        return;
    }
    for node in nodes {
        let dist = node.position.truncate().distance(center);
        if dist < radius {
            let boost = (1.0 - dist / radius) * strength;
            node.activity = (node.activity + boost).min(1.0);
        }
    }
}
