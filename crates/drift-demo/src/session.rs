//! Scripted scroll session and a surface that logs what it would draw.

use drift_animation::{FrameOutput, RenderSurface, ScrollMetrics};
use drift_timeline::{CubicBezier, EasingPresets};
use tracing::info;

/// One leg of the scripted tour: move from the previous position to `to`
/// (fraction of the scrollable height) over `frames` frames.
#[derive(Debug, Clone, Copy)]
struct Leg {
    frames: u32,
    to: f32,
    easing: Option<CubicBezier>,
}

/// A deterministic visitor: dwell on the hero, glide, read, flick, read,
/// and glide to the end.
#[derive(Debug, Clone)]
pub struct ScrollScript {
    legs: Vec<Leg>,
    document_height: f32,
    viewport_height: f32,
}

impl ScrollScript {
    pub fn tour(easing: &EasingPresets, document_height: f32, viewport_height: f32) -> Self {
        let glide = |frames, to| Leg {
            frames,
            to,
            easing: Some(easing.smooth),
        };
        let hold = |frames, to| Leg {
            frames,
            to,
            easing: None,
        };
        Self {
            legs: vec![
                hold(60, 0.0),
                glide(180, 0.2),
                hold(120, 0.2),
                Leg {
                    frames: 20,
                    to: 0.6,
                    easing: Some(easing.enter),
                },
                hold(120, 0.6),
                glide(240, 1.0),
                hold(60, 1.0),
            ],
            document_height,
            viewport_height,
        }
    }

    /// Total scripted frames; later frames hold the final position.
    pub fn frame_count(&self) -> u32 {
        self.legs.iter().map(|l| l.frames).sum()
    }

    fn fraction_at(&self, frame: u32) -> f32 {
        let mut from = 0.0;
        let mut start = 0;
        for leg in &self.legs {
            if frame < start + leg.frames {
                let local = (frame - start) as f32 / leg.frames as f32;
                return match leg.easing {
                    Some(curve) => from + (leg.to - from) * curve.ease(local),
                    None => leg.to,
                };
            }
            from = leg.to;
            start += leg.frames;
        }
        from
    }

    /// Page measurements at `frame`.
    pub fn metrics_at(&self, frame: u32) -> ScrollMetrics {
        let scrollable = self.document_height - self.viewport_height;
        ScrollMetrics::from_document(
            self.fraction_at(frame) * scrollable,
            self.document_height,
            self.viewport_height,
        )
    }
}

/// Stands in for the WebGL scene: records what each frame would upload.
#[derive(Debug)]
pub struct LoggingSurface {
    report_every: u64,
    overlay_fade: f32,
    frames: u64,
    era: Option<String>,
    era_changes: u32,
    peak_velocity: f32,
    min_viscosity: f32,
}

impl LoggingSurface {
    /// `overlay_fade` is the era overlay transition length in seconds.
    pub fn new(report_every: u64, overlay_fade: f32) -> Self {
        Self {
            report_every: report_every.max(1),
            overlay_fade,
            frames: 0,
            era: None,
            era_changes: 0,
            peak_velocity: 0.0,
            min_viscosity: 1.0,
        }
    }

    pub fn summary(&self) {
        info!(
            frames = self.frames,
            era_changes = self.era_changes,
            peak_velocity = self.peak_velocity,
            min_viscosity = self.min_viscosity,
            "session complete"
        );
    }
}

impl RenderSurface for LoggingSurface {
    fn apply(&mut self, frame: &FrameOutput<'_>) {
        self.frames += 1;
        self.peak_velocity = self.peak_velocity.max(frame.state.time_velocity);
        self.min_viscosity = self.min_viscosity.min(frame.particles.viscosity);

        if let Some(era) = frame.state.current_era
            && self.era.as_deref() != Some(era.year.as_str())
        {
            self.era_changes += 1;
            self.era = Some(era.year.clone());
            info!(
                year = %era.year,
                label = %era.label,
                color = %era.color,
                fade = self.overlay_fade,
                "overlay: {}",
                era.description
            );
        }

        if self.frames % self.report_every == 0 {
            let pose = frame.camera.pose;
            info!(
                frame = self.frames,
                progress = frame.state.scroll_progress,
                camera_z = pose.position.z,
                fov = pose.fov,
                viscosity = frame.particles.viscosity,
                particles = frame.particles.positions.len(),
                fog = %frame.fog_color,
                ring_scale = frame.rings.first().map(|r| r.scale).unwrap_or(1.0),
                "frame"
            );
        }
    }
}
