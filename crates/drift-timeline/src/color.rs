//! Linear RGB colors and the shared temporal gradient.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// A linear RGB color with components nominally in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Pure white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from float components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channel values.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self, TimelineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(TimelineError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| TimelineError::InvalidColor(hex.to_string()))
        };
        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as a lowercase `#rrggbb` string, clamping each channel.
    pub fn to_hex(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    /// Linear blend toward `other`. `t` is not clamped.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Components as an array, the layout shader uniforms expect.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Serde adapter that stores an [`Rgb`] as a `#rrggbb` string.
pub(crate) mod hex_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Rgb;

    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Three anchor colors for the past -> present -> future blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemporalPalette {
    /// Color at time progress 0.0.
    pub past: Rgb,
    /// Color at time progress 0.5.
    pub present: Rgb,
    /// Color at time progress 1.0.
    pub future: Rgb,
}

impl TemporalPalette {
    /// Default particle tint: warm orange past, cyan present, soft purple future.
    pub const PARTICLES: Self = Self {
        past: Rgb::new(1.0, 0.5, 0.2),
        present: Rgb::new(0.0, 0.9, 1.0),
        future: Rgb::new(0.8, 0.6, 1.0),
    };

    /// Tunnel ring tint: the first, third, and fourth era colors.
    pub const TUNNEL: Self = Self {
        past: Rgb::from_rgb8(0xff, 0x6b, 0x35),
        present: Rgb::from_rgb8(0x00, 0xf5, 0xd4),
        future: Rgb::from_rgb8(0x7b, 0x2c, 0xbf),
    };

    /// Blend this palette at the given time progress.
    #[inline]
    pub fn at(&self, time_progress: f32) -> Rgb {
        temporal_gradient(time_progress, self.past, self.present, self.future)
    }
}

impl Default for TemporalPalette {
    fn default() -> Self {
        Self::PARTICLES
    }
}

/// Blend past -> present over the first half of the timeline and
/// present -> future over the second half.
///
/// This is the one gradient used for fog, tunnel rings, and particle tint.
/// `time_progress` is clamped to `[0, 1]`; NaN is treated as `0`.
pub fn temporal_gradient(time_progress: f32, past: Rgb, present: Rgb, future: Rgb) -> Rgb {
    let t = if time_progress.is_nan() {
        0.0
    } else {
        time_progress.clamp(0.0, 1.0)
    };
    if t < 0.5 {
        past.lerp(present, t * 2.0)
    } else {
        present.lerp(future, (t - 0.5) * 2.0)
    }
}
