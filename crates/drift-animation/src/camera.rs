//! Damped camera rig following the eased keyframe path.
//!
//! Each frame the rig samples the timeline at the current progress, then
//! moves the rendered pose toward that target at
//! `dt * base_speed * zone_damping`. Inside a safe zone the camera is slowed
//! and, when enabled, a small vertical "reading breath" is layered on the
//! published pose without feeding back into the smoothing state.

use std::sync::Arc;

use drift_config::CameraConfig;
use drift_timeline::{CameraPose, Timeline};

/// How the rig reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Eased keyframes with exponential smoothing.
    #[default]
    Smooth,
    /// Reduced motion: jump to the latest reached keyframe, no smoothing.
    Snap,
}

/// Result of one rig update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Pose to render, including the reading breath.
    pub pose: CameraPose,
    /// Undamped keyframe target for this progress.
    pub target: CameraPose,
    /// Timeline progress per second since the previous update.
    pub velocity: f32,
    /// Safe-zone damping factor applied this frame.
    pub damping: f32,
    /// Whether the progress sits inside a safe zone.
    pub in_zone: bool,
}

#[derive(Debug)]
pub struct CameraRig {
    timeline: Arc<Timeline>,
    config: CameraConfig,
    mode: CameraMode,
    smoothed: Option<CameraPose>,
    prev_progress: Option<f32>,
    zone_label: Option<String>,
}

impl CameraRig {
    pub fn new(timeline: Arc<Timeline>, config: CameraConfig, reduced_motion: bool) -> Self {
        Self {
            timeline,
            config,
            mode: if reduced_motion {
                CameraMode::Snap
            } else {
                CameraMode::Smooth
            },
            smoothed: None,
            prev_progress: None,
            zone_label: None,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if self.mode != mode {
            tracing::debug!(?mode, "camera mode changed");
        }
        self.mode = mode;
    }

    /// Replace speed and breathing settings, keeping the current pose.
    pub fn reconfigure(&mut self, config: CameraConfig) {
        self.config = config;
    }

    /// Smoothed pose without the reading breath, `None` before the first update.
    pub fn smoothed(&self) -> Option<CameraPose> {
        self.smoothed
    }

    /// Advance the rig to timeline progress `t`.
    ///
    /// `dt` is the frame delta in seconds and `elapsed` the total scene time,
    /// which only phases the breath. The first update places the camera on
    /// its target and reports zero velocity.
    pub fn update(&mut self, t: f32, dt: f32, elapsed: f32) -> CameraFrame {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let dt = if dt.is_finite() { dt } else { 0.0 };

        let velocity = match self.prev_progress {
            Some(prev) if dt > 0.0 => (t - prev).abs() / dt,
            _ => 0.0,
        };
        self.prev_progress = Some(t);

        let zone = self.timeline.damping(t);
        if zone.label != self.zone_label.as_deref() {
            match (&self.zone_label, zone.label) {
                (_, Some(label)) => tracing::debug!(zone = label, factor = zone.factor, "entered safe zone"),
                (Some(label), None) => tracing::debug!(zone = %label, "left safe zone"),
                (None, None) => {}
            }
            self.zone_label = zone.label.map(str::to_string);
        }

        let (target, smoothed) = match self.mode {
            CameraMode::Snap => {
                let target = self.timeline.camera_snap(t);
                (target, target)
            }
            CameraMode::Smooth => {
                let target = self.timeline.camera_target(t);
                let smoothed = match self.smoothed {
                    Some(current) => {
                        let speed = dt * self.config.base_speed * zone.factor;
                        let speed = if speed.is_nan() { 0.0 } else { speed.clamp(0.0, 1.0) };
                        current.lerp(&target, speed)
                    }
                    None => target,
                };
                (target, smoothed)
            }
        };
        self.smoothed = Some(smoothed);

        let mut pose = smoothed;
        if self.mode == CameraMode::Smooth && self.config.breathing && zone.in_zone {
            let breath = (elapsed * self.config.breath_rate).sin() * self.config.breath_amplitude * zone.factor;
            if breath.is_finite() {
                pose.position.y += breath;
            }
        }

        CameraFrame {
            pose,
            target,
            velocity,
            damping: zone.factor,
            in_zone: zone.in_zone,
        }
    }
}
