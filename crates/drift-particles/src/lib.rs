//! Viscous particle field for the time tunnel.
//!
//! Particles are laid out once from a seeded scalar stream and never mutated
//! afterwards. Every frame their render positions are re-derived from a single
//! "drift clock" whose rate depends on scroll velocity: particles nearly
//! freeze when the reader stops and flow when they scroll fast.

mod field;
mod kinematics;
mod seed;

pub use field::{Particle, ParticleField};
pub use kinematics::{
    DEPTH_FADE_DISTANCE, FrameInput, ParticleFrame, ParticleSystem, viscosity_for, wrap_depth,
};
pub use seed::{ChaChaStream, ParticleStream, ScalarStream, SineHashStream};
