//! Signal particles traveling along active connections.
//!
//! A signal snapshots both endpoint positions at spawn time and animates
//! linearly between them; it does not follow the nodes afterwards. The pool
//! has a fixed capacity and silently drops spawn requests once full.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;

/// A short-lived pulse traveling from one connection endpoint to the other.
#[derive(Clone, Debug)]
pub struct SignalParticle {
    pub from: Vec3,
    pub to: Vec3,
    /// Travel progress in [0, 1]; the particle is removed at 1.
    pub progress: f32,
    /// Progress per second.
    pub speed: f32,
}

impl SignalParticle {
    /// Current interpolated position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.from.lerp(self.to, self.progress)
    }

    /// Remaining life, used directly as render alpha.
    #[inline]
    pub fn alpha(&self) -> f32 {
        1.0 - self.progress
    }
}

/// Fixed-capacity pool of signal particles.
#[derive(Debug)]
pub struct SignalPool {
    particles: Vec<SignalParticle>,
    capacity: usize,
    speed_band: (f32, f32),
}

impl SignalPool {
    pub fn new(capacity: usize, speed_band: (f32, f32)) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            speed_band,
        }
    }

    /// Spawn a signal at progress 0 with a randomized speed.
    ///
    /// Returns `false` when the pool is full and the request was dropped.
    pub fn spawn(&mut self, from: Vec3, to: Vec3, rng: &mut SmallRng) -> bool {
        if self.particles.len() >= self.capacity {
            return false;
        }
        self.particles.push(SignalParticle {
            from,
            to,
            progress: 0.0,
            speed: rng.gen_range(self.speed_band.0..self.speed_band.1),
        });
        true
    }

    /// Advance all signals; each is removed exactly once when it arrives.
    pub fn step(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.progress += particle.speed * dt;
        }
        self.particles.retain(|p| p.progress < 1.0);
    }

    #[inline]
    pub fn particles(&self) -> &[SignalParticle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
