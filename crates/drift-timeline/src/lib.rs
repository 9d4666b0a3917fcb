//! Declarative timeline data for Temporal Drift.
//!
//! Eras, camera keyframes, safe reading zones, motion and fog presets, plus the
//! small pure lookups that every renderer shares: era activation, safe-zone
//! damping, keyframe sampling, and the past/present/future color gradient.

mod color;
mod era;
mod error;
mod fog;
mod keyframe;
mod motion;
mod safe_zone;
mod timeline;

pub use color::{Rgb, TemporalPalette, temporal_gradient};
pub use era::{DEFAULT_ERA_LOOKAHEAD, Era, era_index_at};
pub use error::TimelineError;
pub use fog::{FogPreset, FogPresetName, distance_fog, temporal_fog};
pub use keyframe::{CameraKeyframe, CameraPose, ease_in_out_cubic, sample_keyframes, snap_keyframe};
pub use motion::{
    CubicBezier, DurationPresets, EasingPresets, MotionPresets, SpringPreset, SpringPresets,
    StaggerPresets, animation_duration,
};
pub use safe_zone::{SafeZone, ZoneDamping, damping_at};
pub use timeline::{TIMELINE_FILE, Timeline};
