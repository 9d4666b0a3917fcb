//! Chrono-fog presets: atmospheric color and density along the timeline.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, TemporalPalette};

/// Named fog preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FogPresetName {
    /// Warm sepia past, clear present, cool blue-black future.
    #[default]
    Default,
    /// Denser, more saturated.
    Dramatic,
    /// Thin and dark.
    Subtle,
}

/// Fog colors and exponential density parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogPreset {
    /// Past/present/future fog colors.
    pub palette: TemporalPalette,
    /// Exponential density.
    pub density: f32,
    /// Distance at which fog starts accumulating.
    pub start: f32,
    /// Distance beyond which geometry is fully fogged.
    pub end: f32,
}

impl FogPreset {
    /// Look up a named preset.
    pub fn named(name: FogPresetName) -> Self {
        let preset = |past: [f32; 3], present: [f32; 3], future: [f32; 3], density, start, end| {
            FogPreset {
                palette: TemporalPalette {
                    past: Rgb::from(past),
                    present: Rgb::from(present),
                    future: Rgb::from(future),
                },
                density,
                start,
                end,
            }
        };
        match name {
            FogPresetName::Default => preset(
                [0.15, 0.08, 0.03],
                [0.0, 0.0, 0.0],
                [0.03, 0.08, 0.15],
                0.015,
                20.0,
                150.0,
            ),
            FogPresetName::Dramatic => preset(
                [0.2, 0.1, 0.0],
                [0.0, 0.02, 0.03],
                [0.05, 0.0, 0.15],
                0.025,
                10.0,
                100.0,
            ),
            FogPresetName::Subtle => preset(
                [0.08, 0.05, 0.02],
                [0.0, 0.0, 0.0],
                [0.02, 0.04, 0.08],
                0.008,
                30.0,
                200.0,
            ),
        }
    }

    /// Atmospheric color for the current time progress.
    #[inline]
    pub fn color_at(&self, time_progress: f32) -> Rgb {
        self.palette.at(time_progress)
    }
}

impl Default for FogPreset {
    fn default() -> Self {
        Self::named(FogPresetName::Default)
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Exponential distance fog factor in `[0, 1]` for a point `distance` away
/// from the camera.
pub fn distance_fog(preset: &FogPreset, distance: f32) -> f32 {
    if distance.is_nan() {
        return 0.0;
    }
    let past_start = (distance - preset.start).max(0.0);
    (1.0 - (-preset.density * past_start).exp()).clamp(0.0, 1.0)
}

/// Fog contribution from temporal distance: how far a world depth sits from
/// "now" along the tunnel.
///
/// Depth `-100..100` maps onto timeline `0..1`. Returns `(color, factor)`:
/// points behind the present take on the past color, points ahead the
/// future color, and the factor grows with temporal distance, capped at 0.7.
pub fn temporal_fog(preset: &FogPreset, world_z: f32, time_progress: f32) -> (Rgb, f32) {
    let z_normalized = (world_z + 100.0) / 200.0;
    let temporal_distance = (z_normalized - time_progress).abs();
    let factor = smoothstep(0.0, 0.4, temporal_distance) * 0.7;
    let palette = &preset.palette;
    let color = if z_normalized < time_progress {
        let intensity = smoothstep(0.0, 0.5, time_progress - z_normalized);
        palette.present.lerp(palette.past, intensity)
    } else {
        let intensity = smoothstep(0.0, 0.5, z_normalized - time_progress);
        palette.present.lerp(palette.future, intensity)
    };
    (color, factor)
}
