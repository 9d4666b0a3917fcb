//! Deterministic particle layout inside the time tunnel.

use std::f32::consts::TAU;

use drift_config::ParticleConfig;
use glam::Vec3;

use crate::seed::{ParticleStream, ScalarStream};

/// A single particle. Immutable after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position at drift clock zero.
    pub base_position: Vec3,
    /// Drift velocity in world units per second of drift clock.
    pub velocity: Vec3,
    /// Point size before distance fade.
    pub size: f32,
    /// Phase offset in radians. Handed to renderers as a per-particle
    /// attribute; the kinematics never read it.
    pub phase: f32,
}

/// The full, fixed set of particles for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    tunnel_length: f32,
    spread: f32,
}

impl ParticleField {
    /// Lay out `config.count` particles.
    ///
    /// Each particle draws from its own stream keyed by `(seed, index)`, so the
    /// same configuration always yields the same field and particle `i` does
    /// not depend on how many particles precede it.
    pub fn generate(config: &ParticleConfig) -> Self {
        let spread = config.spread.max(0.0);
        let tunnel_length = config.tunnel_length;
        let range = config.velocity_range.max(0.0);

        let particles = (0..config.count)
            .map(|index| {
                let mut s = ParticleStream::open(config.generator, config.seed, index);
                let angle = s.next_unit() * TAU;
                // sqrt keeps the disk density uniform instead of piling up at the axis.
                let radius = spread * s.next_unit().sqrt();
                let depth = (s.next_unit() - 0.5) * tunnel_length;
                let velocity = Vec3::new(
                    s.next_range(-range, range),
                    s.next_range(-range, range),
                    s.next_range(-range, range),
                );
                Particle {
                    base_position: Vec3::new(radius * angle.cos(), radius * angle.sin(), depth),
                    velocity,
                    size: config.base_size * (0.5 + s.next_unit()),
                    phase: s.next_unit() * TAU,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            count = particles.len(),
            seed = config.seed,
            generator = ?config.generator,
            "generated particle field"
        );

        Self {
            particles,
            tunnel_length,
            spread,
        }
    }

    /// All particles in generation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True for an empty field.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Tunnel length the field was laid out for.
    pub fn tunnel_length(&self) -> f32 {
        self.tunnel_length
    }

    /// Tunnel radius the field was laid out for.
    pub fn spread(&self) -> f32 {
        self.spread
    }
}
