//! The complete timeline: built-in defaults, validation, and RON overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::era::{DEFAULT_ERA_LOOKAHEAD, Era, era_index_at};
use crate::error::TimelineError;
use crate::keyframe::{CameraKeyframe, CameraPose, sample_keyframes, snap_keyframe};
use crate::motion::MotionPresets;
use crate::safe_zone::{SafeZone, ZoneDamping, damping_at};

/// File name of an optional timeline override inside the config directory.
pub const TIMELINE_FILE: &str = "timeline.ron";

/// Immutable timeline data shared by every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// Eras ordered by position.
    pub eras: Vec<Era>,
    /// Camera path ordered by time, spanning `0..=1`.
    pub keyframes: Vec<CameraKeyframe>,
    /// Reading zones in priority order.
    pub safe_zones: Vec<SafeZone>,
    /// How far before its position an era activates.
    pub era_lookahead: f32,
    /// Overlay motion presets.
    pub motion: MotionPresets,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            eras: vec![
                Era::new("2018", "The Beginning", Rgb::from_rgb8(0xff, 0x6b, 0x35), 0.15, "Where curiosity met code"),
                Era::new("2020", "Growth", Rgb::from_rgb8(0xf7, 0xc5, 0x9f), 0.3, "Foundations solidified"),
                Era::new("2022", "Momentum", Rgb::from_rgb8(0x00, 0xf5, 0xd4), 0.45, "Scale and impact"),
                Era::new("2023", "Acceleration", Rgb::from_rgb8(0x7b, 0x2c, 0xbf), 0.6, "Senior leadership"),
                Era::new("2024", "Present", Rgb::from_rgb8(0x00, 0xf0, 0xff), 0.8, "Crafting the future"),
                Era::new("Future", "What's Next", Rgb::WHITE, 0.95, "Ready to collaborate"),
            ],
            keyframes: vec![
                // Wide establishing shot.
                CameraKeyframe::new(0.0, [0.0, 0.0, 50.0], [0.0, 0.0, 0.0], 60.0),
                CameraKeyframe::new(0.1, [0.0, 2.0, 35.0], [0.0, 0.0, -20.0], 55.0),
                CameraKeyframe::new(0.2, [-3.0, 1.0, 20.0], [0.0, 0.0, -30.0], 50.0),
                CameraKeyframe::new(0.35, [0.0, 0.0, 0.0], [0.0, 0.0, -50.0], 55.0),
                CameraKeyframe::new(0.45, [3.0, -1.0, -20.0], [0.0, 0.0, -60.0], 50.0),
                CameraKeyframe::new(0.55, [0.0, 2.0, -35.0], [0.0, 0.0, -70.0], 55.0),
                CameraKeyframe::new(0.65, [-2.0, 0.0, -50.0], [0.0, 0.0, -80.0], 50.0),
                // Pull back for the skills section.
                CameraKeyframe::new(0.8, [0.0, 0.0, -65.0], [0.0, 0.0, -90.0], 60.0),
                CameraKeyframe::new(1.0, [0.0, 3.0, -80.0], [0.0, 0.0, -120.0], 65.0),
            ],
            safe_zones: vec![
                SafeZone::new(0.0, 0.08, 0.2, "Hero"),
                SafeZone::new(0.15, 0.25, 0.3, "2018 Section"),
                SafeZone::new(0.35, 0.45, 0.3, "2022 Section"),
                SafeZone::new(0.55, 0.65, 0.3, "2023 Section"),
                SafeZone::new(0.75, 0.85, 0.3, "Skills Section"),
                SafeZone::new(0.90, 1.0, 0.2, "Contact"),
            ],
            era_lookahead: DEFAULT_ERA_LOOKAHEAD,
            motion: MotionPresets::default(),
        }
    }
}

impl Timeline {
    /// Check ordering and range invariants.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.eras.is_empty() {
            return Err(TimelineError::NoEras);
        }
        let mut prev = f32::NEG_INFINITY;
        for (index, era) in self.eras.iter().enumerate() {
            if !(0.0..=1.0).contains(&era.position) || era.position <= prev {
                return Err(TimelineError::EraOrder {
                    index,
                    year: era.year.clone(),
                    position: era.position,
                });
            }
            prev = era.position;
        }

        // A single keyframe is a valid (static) path; longer paths must span 0..=1.
        if self.keyframes.is_empty() {
            return Err(TimelineError::Keyframes("path is empty".into()));
        }
        if self.keyframes.len() > 1 {
            if self.keyframes.windows(2).any(|w| w[1].time < w[0].time) {
                return Err(TimelineError::Keyframes("times are not sorted".into()));
            }
            let first = self.keyframes[0].time;
            let last = self.keyframes[self.keyframes.len() - 1].time;
            if first != 0.0 || last != 1.0 {
                return Err(TimelineError::Keyframes(format!(
                    "path spans {first}..{last}, expected 0..1"
                )));
            }
        }

        for zone in &self.safe_zones {
            let reason = if !(zone.start <= zone.end) {
                Some("start is after end")
            } else if !(zone.damping > 0.0 && zone.damping <= 1.0) {
                Some("damping must be in (0, 1]")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(TimelineError::SafeZone {
                    label: zone.label.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Load `timeline.ron` from `dir` if present, otherwise the built-in timeline.
    pub fn load_or_default(dir: &Path) -> Result<Self, TimelineError> {
        let path = dir.join(TIMELINE_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(TimelineError::ReadError)?;
        let timeline: Timeline = ron::from_str(&contents).map_err(TimelineError::ParseError)?;
        timeline.validate()?;
        tracing::info!(
            eras = timeline.eras.len(),
            keyframes = timeline.keyframes.len(),
            zones = timeline.safe_zones.len(),
            "loaded timeline from {}",
            path.display()
        );
        Ok(timeline)
    }

    /// Era active at `progress`, see [`era_index_at`].
    pub fn era_at(&self, progress: f32) -> Option<&Era> {
        era_index_at(&self.eras, progress, self.era_lookahead).map(|i| &self.eras[i])
    }

    /// Safe-zone damping at `progress`.
    pub fn damping(&self, progress: f32) -> ZoneDamping<'_> {
        damping_at(&self.safe_zones, progress)
    }

    /// Eased camera target at `progress`.
    pub fn camera_target(&self, progress: f32) -> CameraPose {
        sample_keyframes(&self.keyframes, progress)
    }

    /// Reduced-motion camera pose at `progress`.
    pub fn camera_snap(&self, progress: f32) -> CameraPose {
        snap_keyframe(&self.keyframes, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeline_is_valid() {
        Timeline::default().validate().unwrap();
    }

    #[test]
    fn test_unsorted_eras_rejected() {
        let mut timeline = Timeline::default();
        timeline.eras.swap(1, 2);
        assert!(matches!(
            timeline.validate(),
            Err(TimelineError::EraOrder { index: 2, .. })
        ));
    }

    #[test]
    fn test_empty_era_list_rejected() {
        let timeline = Timeline {
            eras: Vec::new(),
            ..Timeline::default()
        };
        assert!(matches!(timeline.validate(), Err(TimelineError::NoEras)));
    }

    #[test]
    fn test_path_must_span_unit_interval() {
        let mut timeline = Timeline::default();
        timeline.keyframes.pop();
        assert!(matches!(timeline.validate(), Err(TimelineError::Keyframes(_))));
    }

    #[test]
    fn test_single_keyframe_path_is_valid() {
        let mut timeline = Timeline::default();
        timeline.keyframes.truncate(1);
        timeline.validate().unwrap();
    }

    #[test]
    fn test_bad_zone_damping_rejected() {
        let mut timeline = Timeline::default();
        timeline.safe_zones[0].damping = 0.0;
        assert!(matches!(
            timeline.validate(),
            Err(TimelineError::SafeZone { .. })
        ));
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let timeline = Timeline::load_or_default(dir.path()).unwrap();
        assert_eq!(timeline, Timeline::default());
    }

    #[test]
    fn test_load_override_with_hex_colors() {
        let dir = tempfile::tempdir().unwrap();
        let ron_str = r##"(
            eras: [
                (year: "Then", label: "a", color: "#102030", position: 0.2, description: ""),
                (year: "Now", label: "b", color: "#ffffff", position: 0.9, description: ""),
            ],
            keyframes: [
                (time: 0.0, position: (0.0, 0.0, 10.0), look_at: (0.0, 0.0, 0.0), fov: 60.0),
                (time: 1.0, position: (0.0, 0.0, -10.0), look_at: (0.0, 0.0, -20.0), fov: 40.0),
            ],
            safe_zones: [],
        )"##;
        std::fs::write(dir.path().join(TIMELINE_FILE), ron_str).unwrap();

        let timeline = Timeline::load_or_default(dir.path()).unwrap();
        assert_eq!(timeline.eras.len(), 2);
        assert_eq!(timeline.eras[0].color, Rgb::from_rgb8(0x10, 0x20, 0x30));
        assert_eq!(timeline.era_lookahead, DEFAULT_ERA_LOOKAHEAD);
        assert_eq!(timeline.camera_target(1.0).fov, 40.0);
    }

    #[test]
    fn test_load_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let ron_str = r#"(keyframes: [(time: 0.5, position: (0.0, 0.0, 0.0), look_at: (0.0, 0.0, -1.0), fov: 60.0), (time: 0.2, position: (0.0, 0.0, 0.0), look_at: (0.0, 0.0, -1.0), fov: 60.0)])"#;
        std::fs::write(dir.path().join(TIMELINE_FILE), ron_str).unwrap();
        assert!(Timeline::load_or_default(dir.path()).is_err());
    }

    #[test]
    fn test_roundtrip_through_ron() {
        let timeline = Timeline::default();
        let s = ron::to_string(&timeline).unwrap();
        let back: Timeline = ron::from_str(&s).unwrap();
        assert_eq!(back.eras, timeline.eras);
        assert_eq!(back.safe_zones, timeline.safe_zones);
    }
}
