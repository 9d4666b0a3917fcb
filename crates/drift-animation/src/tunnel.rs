//! Tunnel ring pulse and rotation.

use drift_timeline::{Rgb, TemporalPalette};

pub const DEFAULT_RING_COUNT: usize = 24;

/// Per-ring transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingTransform {
    /// Uniform scale, pulsing with scroll velocity.
    pub scale: f32,
    /// Rotation about the tunnel axis in radians.
    pub angle: f32,
}

impl Default for RingTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            angle: 0.0,
        }
    }
}

/// Fixed set of rings along the tunnel; the buffer is allocated once.
#[derive(Debug, Clone)]
pub struct TunnelRings {
    palette: TemporalPalette,
    transforms: Vec<RingTransform>,
    tint: Rgb,
}

impl TunnelRings {
    pub fn new(count: usize) -> Self {
        Self {
            palette: TemporalPalette::TUNNEL,
            transforms: vec![RingTransform::default(); count],
            tint: TemporalPalette::TUNNEL.at(0.0),
        }
    }

    /// Ring `i` scales by `1 + sin(elapsed*3 + i*0.5) * 0.1 * velocity` and
    /// turns by `elapsed*0.1 + i*0.05`.
    pub fn update(&mut self, elapsed: f32, velocity: f32, time_progress: f32) -> &[RingTransform] {
        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        let velocity = if velocity.is_finite() { velocity.max(0.0) } else { 0.0 };
        for (i, ring) in self.transforms.iter_mut().enumerate() {
            let i = i as f32;
            ring.scale = 1.0 + (elapsed * 3.0 + i * 0.5).sin() * 0.1 * velocity;
            ring.angle = elapsed * 0.1 + i * 0.05;
        }
        self.tint = self.palette.at(time_progress);
        &self.transforms
    }

    pub fn transforms(&self) -> &[RingTransform] {
        &self.transforms
    }

    /// Ring color from the shared temporal gradient.
    pub fn tint(&self) -> Rgb {
        self.tint
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for TunnelRings {
    fn default() -> Self {
        Self::new(DEFAULT_RING_COUNT)
    }
}
