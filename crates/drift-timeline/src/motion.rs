//! Motion presets shared by the DOM overlay and the scene: easing curves,
//! durations, stagger delays, and spring constants.

use serde::{Deserialize, Serialize};

/// A CSS-style cubic bezier easing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    /// First control point x, clamped to `[0, 1]` when evaluated.
    pub x1: f32,
    /// First control point y.
    pub y1: f32,
    /// Second control point x, clamped to `[0, 1]` when evaluated.
    pub x2: f32,
    /// Second control point y.
    pub y2: f32,
}

impl CubicBezier {
    /// Create a curve from its two control points.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn axis(p1: f32, p2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    fn axis_slope(p1: f32, p2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    /// Evaluate the eased value for input progress `t` in `[0, 1]`.
    ///
    /// Solves `x(s) = t` with a few Newton steps, falling back to bisection
    /// when the slope is too flat.
    pub fn ease(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let (x1, x2) = (self.x1.clamp(0.0, 1.0), self.x2.clamp(0.0, 1.0));

        let mut s = t;
        for _ in 0..8 {
            let err = Self::axis(x1, x2, s) - t;
            if err.abs() < 1e-6 {
                return Self::axis(self.y1, self.y2, s);
            }
            let slope = Self::axis_slope(x1, x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..32 {
            let x = Self::axis(x1, x2, s);
            if (x - t).abs() < 1e-6 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        Self::axis(self.y1, self.y2, s)
    }
}

/// Named easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EasingPresets {
    /// Smooth deceleration into rest.
    pub enter: CubicBezier,
    /// Quick acceleration away.
    pub exit: CubicBezier,
    /// Standard material curve.
    pub smooth: CubicBezier,
    /// Overshooting, spring-like.
    pub bounce: CubicBezier,
}

impl Default for EasingPresets {
    fn default() -> Self {
        Self {
            enter: CubicBezier::new(0.16, 1.0, 0.3, 1.0),
            exit: CubicBezier::new(0.7, 0.0, 0.84, 0.0),
            smooth: CubicBezier::new(0.4, 0.0, 0.2, 1.0),
            bounce: CubicBezier::new(0.34, 1.56, 0.64, 1.0),
        }
    }
}

/// Duration presets in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationPresets {
    pub instant: f32,
    pub fast: f32,
    pub normal: f32,
    pub slow: f32,
    pub dramatic: f32,
}

impl Default for DurationPresets {
    fn default() -> Self {
        Self {
            instant: 0.1,
            fast: 0.3,
            normal: 0.6,
            slow: 1.2,
            dramatic: 2.0,
        }
    }
}

/// Delay between consecutive items of a staggered reveal, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaggerPresets {
    pub tight: f32,
    pub normal: f32,
    pub relaxed: f32,
}

impl Default for StaggerPresets {
    fn default() -> Self {
        Self {
            tight: 0.03,
            normal: 0.08,
            relaxed: 0.15,
        }
    }
}

/// Spring constants for overlay transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringPreset {
    /// Spring stiffness.
    pub stiffness: f32,
    /// Damping coefficient.
    pub damping: f32,
}

/// Named springs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringPresets {
    pub snappy: SpringPreset,
    pub smooth: SpringPreset,
    pub bouncy: SpringPreset,
    pub slow: SpringPreset,
}

impl Default for SpringPresets {
    fn default() -> Self {
        let spring = |stiffness, damping| SpringPreset { stiffness, damping };
        Self {
            snappy: spring(400.0, 30.0),
            smooth: spring(200.0, 25.0),
            bouncy: spring(300.0, 15.0),
            slow: spring(100.0, 20.0),
        }
    }
}

/// All motion presets, plus the global timing scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionPresets {
    pub easing: EasingPresets,
    pub duration: DurationPresets,
    pub stagger: StaggerPresets,
    pub spring: SpringPresets,
}

impl MotionPresets {
    /// Timing multiplier: `0` under reduced motion, `1` otherwise.
    pub fn timing_scale(reduced_motion: bool) -> f32 {
        if reduced_motion { 0.0 } else { 1.0 }
    }
}

/// Effective duration for an overlay transition.
///
/// Reduced motion collapses every transition to 10 ms rather than zero so
/// completion callbacks still fire.
pub fn animation_duration(base_seconds: f32, reduced_motion: bool) -> f32 {
    if reduced_motion { 0.01 } else { base_seconds.max(0.0) }
}
