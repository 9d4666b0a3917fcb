//! Scroll-driven animation core for Temporal Drift.
//!
//! One scroll progress value drives everything: the shared
//! [`AnimationState`] both renderers read, the damped [`CameraRig`], the
//! viscous particle field, tunnel rings, and fog. [`DriftEngine`] ties them
//! together once per frame and hands the result to a [`RenderSurface`].

mod camera;
mod capability;
mod cursor;
mod engine;
mod error;
mod scroll;
mod state;
mod tunnel;

pub use camera::{CameraFrame, CameraMode, CameraRig};
pub use capability::{AnimationMode, RenderCapability, is_low_power};
pub use cursor::viewport_to_ndc;
pub use engine::{DriftEngine, FrameOutput, LOW_POWER_PARTICLE_LIMIT, RenderSurface};
pub use error::DriftError;
pub use scroll::{ScrollMetrics, ScrollSource, scroll_progress};
pub use state::{AnimationSnapshot, AnimationState, EntityId, TransitionPhase};
pub use tunnel::{DEFAULT_RING_COUNT, RingTransform, TunnelRings};
