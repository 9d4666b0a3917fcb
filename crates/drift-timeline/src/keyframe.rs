//! Authored camera keyframes and keyframe sampling.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An authored camera pose at a point on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyframe {
    /// Normalized timeline position in `[0, 1]`.
    pub time: f32,
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl CameraKeyframe {
    /// Build a keyframe from array literals.
    pub const fn new(time: f32, position: [f32; 3], look_at: [f32; 3], fov: f32) -> Self {
        Self {
            time,
            position: Vec3::from_array(position),
            look_at: Vec3::from_array(look_at),
            fov,
        }
    }

    /// The pose stored in this keyframe.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
            fov: self.fov,
        }
    }
}

/// A camera pose: where it is, what it looks at, and how wide it sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Look-at target in world space.
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            look_at: Vec3::ZERO,
            fov: 50.0,
        }
    }
}

impl CameraPose {
    /// Component-wise linear blend between two poses.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            look_at: self.look_at.lerp(other.look_at, t),
            fov: self.fov + (other.fov - self.fov) * t,
        }
    }
}

/// Cubic ease-in-out. Monotonic on `[0, 1]` with fixed endpoints.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Sample the eased camera path at timeline position `t`.
///
/// Past the last keyframe the last pose is held; before the first keyframe
/// the first pose is held. A single keyframe is returned unchanged for every
/// `t`, and an empty path yields [`CameraPose::default`].
pub fn sample_keyframes(keyframes: &[CameraKeyframe], t: f32) -> CameraPose {
    let t = if t.is_nan() { 0.0 } else { t };
    let (k0, k1) = match keyframes {
        [] => return CameraPose::default(),
        [only] => return only.pose(),
        [.., last] if t >= last.time => return last.pose(),
        _ => keyframes
            .windows(2)
            .find(|w| w[0].time <= t && t <= w[1].time)
            .map(|w| (&w[0], &w[1]))
            .unwrap_or((&keyframes[0], &keyframes[1])),
    };

    let span = k1.time - k0.time;
    let local_t = if span > 0.0 { (t - k0.time) / span } else { 0.0 };
    let eased = ease_in_out_cubic(local_t.clamp(0.0, 1.0));
    k0.pose().lerp(&k1.pose(), eased)
}

/// Reduced-motion sampling: the latest keyframe whose time has been reached,
/// with no blending.
pub fn snap_keyframe(keyframes: &[CameraKeyframe], t: f32) -> CameraPose {
    let t = if t.is_nan() { 0.0 } else { t };
    keyframes
        .iter()
        .rev()
        .find(|k| t >= k.time)
        .or_else(|| keyframes.first())
        .map(CameraKeyframe::pose)
        .unwrap_or_default()
}
