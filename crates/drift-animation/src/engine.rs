//! Per-frame driver: scroll in, render data out.

use std::sync::Arc;

use drift_config::Config;
use drift_particles::{FrameInput, ParticleFrame, ParticleSystem};
use drift_timeline::{FogPreset, Rgb, TemporalPalette, Timeline};
use glam::Vec2;

use crate::camera::{CameraFrame, CameraMode, CameraRig};
use crate::capability::RenderCapability;
use crate::cursor::viewport_to_ndc;
use crate::error::DriftError;
use crate::scroll::{ScrollMetrics, ScrollSource};
use crate::state::{AnimationSnapshot, AnimationState};
use crate::tunnel::{RingTransform, TunnelRings};

/// Particle cap on low-power renderers.
pub const LOW_POWER_PARTICLE_LIMIT: u32 = 500;

/// Everything a renderer needs for one frame. Borrowed from the engine and
/// valid until the next [`DriftEngine::frame`].
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput<'a> {
    pub camera: CameraFrame,
    pub fog_color: Rgb,
    pub particles: ParticleFrame<'a>,
    pub rings: &'a [RingTransform],
    pub ring_tint: Rgb,
    pub state: AnimationSnapshot<'a>,
}

/// Writes computed frame data into native renderer objects.
pub trait RenderSurface {
    fn apply(&mut self, frame: &FrameOutput<'_>);
}

pub struct DriftEngine {
    state: AnimationState,
    scroll: ScrollSource,
    camera: CameraRig,
    particles: ParticleSystem,
    rings: TunnelRings,
    fog: FogPreset,
    low_power: bool,
    cursor_active: bool,
    frame_log_interval: u32,
    frames: u64,
}

fn particle_settings(config: &Config, low_power: bool) -> drift_config::ParticleConfig {
    let mut settings = config.particles.clone();
    if low_power && settings.count > LOW_POWER_PARTICLE_LIMIT {
        tracing::info!(
            requested = settings.count,
            limit = LOW_POWER_PARTICLE_LIMIT,
            "capping particles for low-power renderer"
        );
        settings.count = LOW_POWER_PARTICLE_LIMIT;
    }
    settings
}

impl DriftEngine {
    /// Build the engine for a supported renderer.
    ///
    /// An unsupported capability is an error: the host should show the
    /// static page instead.
    pub fn new(config: &Config, timeline: Arc<Timeline>, capability: &RenderCapability) -> Result<Self, DriftError> {
        if !capability.supported {
            return Err(DriftError::Unsupported {
                renderer: capability.renderer.clone(),
            });
        }
        config.validate()?;

        let particles = ParticleSystem::new(
            particle_settings(config, capability.low_power),
            TemporalPalette::PARTICLES,
        );
        tracing::info!(
            particles = particles.field().len(),
            eras = timeline.eras.len(),
            reduced_motion = config.motion.reduced_motion,
            fog = ?config.fog.preset,
            "drift engine ready"
        );

        Ok(Self {
            state: AnimationState::new(timeline.clone()),
            scroll: ScrollSource::new(),
            camera: CameraRig::new(timeline, config.camera.clone(), config.motion.reduced_motion),
            particles,
            rings: TunnelRings::default(),
            fog: FogPreset::named(config.fog.preset),
            low_power: capability.low_power,
            cursor_active: false,
            frame_log_interval: config.debug.frame_log_interval,
            frames: 0,
        })
    }

    /// Apply a changed config without losing scroll or camera state.
    ///
    /// The particle field is regenerated only when its settings changed.
    pub fn reconfigure(&mut self, config: &Config) -> Result<(), DriftError> {
        config.validate()?;
        let settings = particle_settings(config, self.low_power);
        if &settings != self.particles.settings() {
            self.particles = ParticleSystem::new(settings, TemporalPalette::PARTICLES);
        }
        self.camera.reconfigure(config.camera.clone());
        self.set_reduced_motion(config.motion.reduced_motion);
        self.fog = FogPreset::named(config.fog.preset);
        self.frame_log_interval = config.debug.frame_log_interval;
        Ok(())
    }

    /// Initial scroll measurement, visible immediately.
    pub fn mount(&mut self, metrics: ScrollMetrics) {
        self.scroll.mount(metrics, &mut self.state);
    }

    /// Queue a scroll event; the latest one is applied at the next frame.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.scroll.on_scroll(metrics);
    }

    /// Cursor moved, in viewport pixels.
    pub fn on_cursor(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.state.set_cursor_position(viewport_to_ndc(x, y, width, height));
        self.cursor_active = true;
    }

    /// Cursor left the viewport; gravity stops.
    pub fn on_cursor_leave(&mut self) {
        self.state.set_cursor_position(Vec2::ZERO);
        self.cursor_active = false;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.camera.set_mode(if reduced { CameraMode::Snap } else { CameraMode::Smooth });
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AnimationState {
        &mut self.state
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Frames computed so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Compute one frame.
    ///
    /// Order: pending scroll, camera, state time fields, particles, fog,
    /// rings. A frozen timeline keeps particles still but the camera moving.
    pub fn frame(&mut self, elapsed: f32, dt: f32) -> FrameOutput<'_> {
        self.scroll.flush(&mut self.state);
        let t = self.state.scroll_progress();

        let camera = self.camera.update(t, dt, elapsed);
        if self.state.time_progress() != t {
            self.state.set_time_progress(t);
        }
        if self.state.time_velocity() != camera.velocity {
            self.state.set_time_velocity(camera.velocity);
        }

        let time_progress = self.state.time_progress();
        let velocity = self.state.time_velocity();
        self.particles.update(&FrameInput {
            dt: if self.state.is_time_frozen() { 0.0 } else { dt },
            scroll_velocity: velocity,
            time_progress,
            zone_damping: camera.damping,
            cursor: self.cursor_active.then(|| self.state.cursor_position()),
        });
        let fog_color = self.fog.color_at(time_progress);
        self.rings.update(elapsed, velocity, time_progress);

        self.frames += 1;
        let interval = u64::from(self.frame_log_interval);
        if interval > 0 && self.frames % interval == 0 {
            tracing::debug!(
                frame = self.frames,
                progress = t,
                velocity,
                viscosity = self.particles.viscosity(),
                in_zone = camera.in_zone,
                era = self.state.current_era().map(|e| e.year.as_str()).unwrap_or("-"),
                "frame"
            );
        }

        FrameOutput {
            camera,
            fog_color,
            particles: self.particles.frame(),
            rings: self.rings.transforms(),
            ring_tint: self.rings.tint(),
            state: self.state.snapshot(),
        }
    }

    /// Compute one frame and hand it to `surface`.
    pub fn render<S: RenderSurface>(&mut self, elapsed: f32, dt: f32, surface: &mut S) {
        let frame = self.frame(elapsed, dt);
        surface.apply(&frame);
    }
}


#[cfg(test)]
#[path = "engine_tests.rs"]
mod scenario_tests;
