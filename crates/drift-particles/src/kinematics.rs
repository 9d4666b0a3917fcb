//! Per-frame particle update: viscosity, drift, depth wrap, cursor gravity.

use drift_config::ParticleConfig;
use drift_timeline::{Rgb, TemporalPalette};
use glam::{Vec2, Vec3};

use crate::field::ParticleField;

/// Depth at which particles have faded out completely.
pub const DEPTH_FADE_DISTANCE: f32 = 80.0;

/// Instantaneous viscosity for a scroll velocity: `1` when still, toward `0`
/// when scrolling fast.
#[inline]
pub fn viscosity_for(scroll_velocity: f32, velocity_gain: f32) -> f32 {
    let v = if scroll_velocity.is_nan() {
        0.0
    } else {
        scroll_velocity.max(0.0)
    };
    let scaled = v * velocity_gain.max(0.0);
    if scaled.is_nan() {
        return 1.0;
    }
    1.0 / (1.0 + scaled)
}

/// Wrap a coordinate into `[-length/2, length/2)`, keeping the overflow.
///
/// A value just past `+length/2` reappears just past `-length/2`. A
/// non-positive length or non-finite input maps to `0`.
#[inline]
pub fn wrap_depth(z: f32, length: f32) -> f32 {
    if !(length > 0.0) || !z.is_finite() {
        return 0.0;
    }
    let half = length * 0.5;
    let wrapped = (z + half).rem_euclid(length) - half;
    // rem_euclid can round up to `length` for tiny negative inputs.
    if wrapped >= half { -half } else { wrapped }
}

/// Distance travelled along one axis after `clock` units of drift, reduced
/// modulo `period` in double precision so late-session drift stays smooth.
#[inline]
fn drift_travel(velocity: f32, clock: f64, period: f32) -> f32 {
    if !(period > 0.0) {
        return 0.0;
    }
    (f64::from(velocity) * clock).rem_euclid(f64::from(period)) as f32
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// What the particle system needs to know about the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Scroll speed in progress units per second.
    pub scroll_velocity: f32,
    /// Time progress in `[0, 1]`.
    pub time_progress: f32,
    /// Safe-zone motion multiplier in `(0, 1]`.
    pub zone_damping: f32,
    /// Cursor in normalized device coordinates, if it is over the canvas.
    pub cursor: Option<Vec2>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            dt: 0.0,
            scroll_velocity: 0.0,
            time_progress: 0.0,
            zone_damping: 1.0,
            cursor: None,
        }
    }
}

/// Read-only render attributes for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ParticleFrame<'a> {
    /// World-space positions, one per particle.
    pub positions: &'a [Vec3],
    /// Point sizes after fade.
    pub sizes: &'a [f32],
    /// Alpha per particle.
    pub alphas: &'a [f32],
    /// Shimmer phase per particle in radians, constant for the session.
    pub phases: &'a [f32],
    /// Shared tint for this frame.
    pub tint: Rgb,
    /// Current (smoothed) viscosity.
    pub viscosity: f32,
}

/// Owns the particle field and its render buffers.
///
/// Buffers are sized once at construction; [`update`](Self::update) only
/// overwrites them.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    field: ParticleField,
    settings: ParticleConfig,
    palette: TemporalPalette,
    viscosity: f32,
    drift_clock: f64,
    last_step: f32,
    tint: Rgb,
    positions: Vec<Vec3>,
    sizes: Vec<f32>,
    alphas: Vec<f32>,
    phases: Vec<f32>,
}

impl ParticleSystem {
    /// Generate the field and allocate render buffers.
    pub fn new(settings: ParticleConfig, palette: TemporalPalette) -> Self {
        let field = ParticleField::generate(&settings);
        let n = field.len();
        let positions = field.particles().iter().map(|p| p.base_position).collect();
        let sizes = field.particles().iter().map(|p| p.size).collect();
        let phases = field.particles().iter().map(|p| p.phase).collect();
        Self {
            field,
            settings,
            palette,
            viscosity: 1.0,
            drift_clock: 0.0,
            last_step: 0.0,
            tint: palette.past,
            positions,
            sizes,
            alphas: vec![1.0; n],
            phases,
        }
    }

    /// The immutable particle field.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Settings the field was generated from.
    pub fn settings(&self) -> &ParticleConfig {
        &self.settings
    }

    /// Smoothed viscosity in `[0, 1]`.
    pub fn viscosity(&self) -> f32 {
        self.viscosity
    }

    /// Accumulated drift time.
    pub fn drift_clock(&self) -> f64 {
        self.drift_clock
    }

    /// Drift-clock advance of the last frame. A particle moved by at most
    /// `|velocity| * last_step` that frame, before wrapping and gravity.
    pub fn last_step(&self) -> f32 {
        self.last_step
    }

    /// Motion multiplier at the current viscosity: `1` free, `1 - damping_share` frozen.
    pub fn flow(&self) -> f32 {
        1.0 - self.viscosity * self.settings.damping_share
    }

    /// Advance one frame and rewrite the render buffers.
    pub fn update(&mut self, input: &FrameInput) -> ParticleFrame<'_> {
        let dt = if input.dt.is_finite() { input.dt.max(0.0) } else { 0.0 };
        let time_progress = if input.time_progress.is_nan() {
            0.0
        } else {
            input.time_progress.clamp(0.0, 1.0)
        };
        let zone = if input.zone_damping.is_finite() {
            input.zone_damping.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let target = viscosity_for(input.scroll_velocity, self.settings.velocity_gain);
        let response = self.settings.viscosity_response;
        let blend = if response > 0.0 { (dt * response).min(1.0) } else { 1.0 };
        self.viscosity += (target - self.viscosity) * blend;

        self.last_step = dt * self.flow() * zone;
        self.drift_clock += f64::from(self.last_step);
        self.tint = self.palette.at(time_progress);

        let length = self.field.tunnel_length();
        let spread = self.field.spread();
        let lateral = spread * 2.0;
        let depth_shift = time_progress * length;
        let clock = self.drift_clock;
        let viscosity = self.viscosity;
        let strength = self.settings.gravity_strength;
        let gravity = match input.cursor {
            Some(cursor) if strength > 0.0 && cursor.is_finite() => Some(cursor * spread),
            _ => None,
        };
        let floor = self.settings.gravity_floor.max(f32::EPSILON);

        for (((particle, pos), size), alpha) in self
            .field
            .particles()
            .iter()
            .zip(self.positions.iter_mut())
            .zip(self.sizes.iter_mut())
            .zip(self.alphas.iter_mut())
        {
            let base = particle.base_position;
            let v = particle.velocity;
            let mut p = Vec3::new(
                wrap_depth(base.x + drift_travel(v.x, clock, lateral), lateral),
                wrap_depth(base.y + drift_travel(v.y, clock, lateral), lateral),
                wrap_depth(base.z + drift_travel(v.z, clock, length) + depth_shift, length),
            );

            if let Some(cursor) = gravity {
                let to_cursor = cursor - p.truncate();
                let dist_sq = to_cursor.length_squared().max(floor);
                let pull = to_cursor.normalize_or_zero() * (strength * viscosity / dist_sq * 0.5);
                p.x += pull.x;
                p.y += pull.y;
            }

            let fade = 1.0 - smoothstep(0.0, DEPTH_FADE_DISTANCE, p.z.abs());
            *pos = p;
            *size = particle.size * fade * (1.0 + viscosity * 0.5);
            *alpha = fade * (0.5 + viscosity * 0.5);
        }

        self.frame()
    }

    /// The most recently computed frame.
    pub fn frame(&self) -> ParticleFrame<'_> {
        ParticleFrame {
            positions: &self.positions,
            sizes: &self.sizes,
            alphas: &self.alphas,
            phases: &self.phases,
            tint: self.tint,
            viscosity: self.viscosity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(count: u32) -> ParticleSystem {
        let settings = ParticleConfig {
            count,
            gravity_strength: 0.0,
            ..ParticleConfig::default()
        };
        ParticleSystem::new(settings, TemporalPalette::PARTICLES)
    }

    fn frame(dt: f32, scroll_velocity: f32) -> FrameInput {
        FrameInput {
            dt,
            scroll_velocity,
            time_progress: 0.5,
            ..FrameInput::default()
        }
    }

    /// Largest per-frame move, measured through the wrap (minimal image).
    fn max_displacement(sys: &ParticleSystem, before: &[Vec3], after: &[Vec3]) -> f32 {
        let length = sys.field().tunnel_length();
        let lateral = sys.field().spread() * 2.0;
        before
            .iter()
            .zip(after)
            .map(|(a, b)| {
                let d = *b - *a;
                Vec3::new(
                    wrap_depth(d.x, lateral),
                    wrap_depth(d.y, lateral),
                    wrap_depth(d.z, length),
                )
                .length()
            })
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_viscosity_curve() {
        assert_eq!(viscosity_for(0.0, 10.0), 1.0);
        assert!((viscosity_for(0.1, 10.0) - 0.5).abs() < 1e-6);
        assert!(viscosity_for(100.0, 10.0) < 0.001);
        assert_eq!(viscosity_for(-5.0, 10.0), 1.0);
        assert_eq!(viscosity_for(f32::NAN, 10.0), 1.0);
        assert_eq!(viscosity_for(f32::INFINITY, 10.0), 0.0);
    }

    #[test]
    fn test_wrap_reinserts_at_opposite_bound() {
        let length = 150.0;
        assert!((wrap_depth(76.0, length) - (-74.0)).abs() < 1e-4);
        assert!((wrap_depth(-76.0, length) - 74.0).abs() < 1e-4);
        assert_eq!(wrap_depth(75.0, length), -75.0);
        assert_eq!(wrap_depth(10.0, length), 10.0);
        assert!((wrap_depth(75.0 + 3.0 * length + 2.5, length) - (-72.5)).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_degenerate_inputs() {
        assert_eq!(wrap_depth(5.0, 0.0), 0.0);
        assert_eq!(wrap_depth(f32::NAN, 150.0), 0.0);
        assert_eq!(wrap_depth(f32::INFINITY, 150.0), 0.0);
        let tiny = wrap_depth(-1e-9, 150.0);
        assert!((-75.0..75.0).contains(&tiny));
    }

    #[test]
    fn test_depth_stays_in_tunnel_over_long_session() {
        let mut sys = system(600);
        let half = sys.field().tunnel_length() / 2.0;
        for i in 0..2000 {
            let input = FrameInput {
                dt: 1.0 / 60.0,
                scroll_velocity: if i % 200 < 100 { 2.0 } else { 0.0 },
                time_progress: (i as f32 / 2000.0),
                ..FrameInput::default()
            };
            let frame = sys.update(&input);
            for p in frame.positions {
                assert!(p.z >= -half && p.z < half, "depth {} escaped", p.z);
            }
        }
    }

    #[test]
    fn test_freeze_after_scroll_stops() {
        let mut sys = system(400);
        let dt = 1.0 / 60.0;

        for _ in 0..120 {
            sys.update(&frame(dt, 3.0));
        }
        let moving_viscosity = sys.viscosity();
        let mut prev = sys.frame().positions.to_vec();
        sys.update(&frame(dt, 3.0));
        let peak = max_displacement(&sys, &prev, sys.frame().positions);
        prev = sys.frame().positions.to_vec();

        let mut last_visc = sys.viscosity();
        let mut displacements = Vec::new();
        for _ in 0..240 {
            sys.update(&frame(dt, 0.0));
            assert!(sys.viscosity() >= last_visc);
            last_visc = sys.viscosity();
            displacements.push(max_displacement(&sys, &prev, sys.frame().positions));
            prev = sys.frame().positions.to_vec();
        }

        assert!(moving_viscosity < 0.1);
        assert!(last_visc > 0.99);
        assert!(displacements.windows(2).all(|w| w[1] <= w[0] + 5e-5));
        assert!(*displacements.last().unwrap() < peak * 0.1);
    }

    #[test]
    fn test_drift_stays_smooth_late_in_session() {
        let mut sys = system(50);
        // Roughly six hours on the page at the frozen rate.
        sys.drift_clock = 20_000.0;
        let dt = 1.0 / 60.0;
        sys.update(&frame(dt, 0.0));
        let before = sys.frame().positions.to_vec();
        sys.update(&frame(dt, 0.0));
        let step = sys.last_step();
        assert!(step > 0.0);

        let length = sys.field().tunnel_length();
        let lateral = sys.field().spread() * 2.0;
        let (mut total_moved, mut total_expected) = (0.0, 0.0);
        for ((a, b), particle) in before.iter().zip(sys.frame().positions).zip(sys.field().particles()) {
            let d = *b - *a;
            let moved = Vec3::new(
                wrap_depth(d.x, lateral),
                wrap_depth(d.y, lateral),
                wrap_depth(d.z, length),
            )
            .length();
            let expected = particle.velocity.length() * step;
            assert!((moved - expected).abs() < 2e-4, "moved {moved}, expected {expected}");
            total_moved += moved;
            total_expected += expected;
        }
        assert!((total_moved - total_expected).abs() < total_expected * 0.1);
    }

    #[test]
    fn test_phases_reach_renderers() {
        let mut sys = system(40);
        let phases: Vec<f32> = sys.field().particles().iter().map(|p| p.phase).collect();
        assert_eq!(sys.update(&frame(0.016, 0.5)).phases, phases.as_slice());
        assert_eq!(sys.update(&frame(0.016, 0.0)).phases, phases.as_slice());
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut sys = system(100);
        let before = sys.update(&frame(0.0, 1.0)).positions.to_vec();
        let after = sys.update(&frame(0.0, 1.0)).positions.to_vec();
        assert_eq!(before, after);
        sys.update(&frame(f32::NAN, f32::NAN));
        assert!(sys.frame().positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_zone_damping_slows_drift() {
        let mut free = system(10);
        let mut damped = system(10);
        let input = frame(0.1, 1.0);
        free.update(&input);
        damped.update(&FrameInput {
            zone_damping: 0.3,
            ..input
        });
        assert!((damped.last_step() - free.last_step() * 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_frozen_particles_glow() {
        let mut sys = system(50);
        let frozen: Vec<f32> = sys.update(&frame(1.0, 0.0)).alphas.to_vec();
        let mut fast = system(50);
        let flowing: Vec<f32> = fast
            .update(&FrameInput {
                dt: 1.0,
                scroll_velocity: 50.0,
                time_progress: 0.5,
                ..FrameInput::default()
            })
            .alphas
            .to_vec();
        let sum = |v: &[f32]| v.iter().sum::<f32>();
        assert!(sum(&frozen) > sum(&flowing));
    }

    #[test]
    fn test_tint_follows_shared_gradient() {
        let mut sys = system(1);
        let frame = sys.update(&FrameInput {
            time_progress: 0.25,
            ..FrameInput::default()
        });
        let p = TemporalPalette::PARTICLES;
        assert_eq!(frame.tint, p.past.lerp(p.present, 0.5));
    }

    #[test]
    fn test_cursor_gravity_pulls_toward_cursor() {
        let settings = ParticleConfig {
            count: 200,
            gravity_strength: 5.0,
            ..ParticleConfig::default()
        };
        let mut with = ParticleSystem::new(settings.clone(), TemporalPalette::PARTICLES);
        let mut without = ParticleSystem::new(settings, TemporalPalette::PARTICLES);
        let cursor = Vec2::new(0.5, 0.5);
        let pulled = with
            .update(&FrameInput {
                cursor: Some(cursor),
                ..frame(0.016, 0.0)
            })
            .positions
            .to_vec();
        let free = without.update(&frame(0.016, 0.0)).positions.to_vec();
        let target = cursor * with.field().spread();

        let closer = pulled
            .iter()
            .zip(&free)
            .filter(|(a, b)| {
                (a.truncate() - target).length() < (b.truncate() - target).length()
            })
            .count();
        assert!(closer > 190, "only {closer} particles pulled closer");
    }

    #[test]
    fn test_gravity_at_cursor_is_finite() {
        let settings = ParticleConfig {
            count: 1,
            gravity_strength: 1.0,
            velocity_range: 0.0,
            spread: 0.0,
            ..ParticleConfig::default()
        };
        let mut sys = ParticleSystem::new(settings, TemporalPalette::PARTICLES);
        let frame = sys.update(&FrameInput {
            cursor: Some(Vec2::ZERO),
            ..FrameInput::default()
        });
        assert!(frame.positions[0].is_finite());
    }

    #[test]
    fn test_buffers_are_not_reallocated() {
        let mut sys = system(300);
        let ptr = sys.frame().positions.as_ptr();
        for _ in 0..10 {
            sys.update(&frame(0.016, 0.5));
        }
        assert_eq!(ptr, sys.frame().positions.as_ptr());
    }
}
