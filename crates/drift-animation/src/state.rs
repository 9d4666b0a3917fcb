//! The shared animation state both the DOM overlay and the scene read.

use std::fmt;
use std::sync::Arc;

use drift_timeline::{Era, Timeline};
use glam::Vec2;

/// Identifier of an interactive entity, e.g. a project card slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overlay section transition phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Entering,
    Active,
    Exiting,
}

fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Mutable, single-writer animation store.
///
/// Every setter clamps instead of rejecting, and bumps [`revision`](Self::revision)
/// so consumers can poll for changes without diffing fields.
#[derive(Debug, Clone)]
pub struct AnimationState {
    timeline: Arc<Timeline>,
    scroll_progress: f32,
    time_progress: f32,
    time_velocity: f32,
    current_era: Option<usize>,
    cursor_position: Vec2,
    hover_target: Option<EntityId>,
    pulse_target: Option<EntityId>,
    transition_phase: TransitionPhase,
    time_frozen: bool,
    hero_progress: f32,
    revision: u64,
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct AnimationSnapshot<'a> {
    pub scroll_progress: f32,
    pub time_progress: f32,
    pub time_velocity: f32,
    pub current_era: Option<&'a Era>,
    pub hover_target: Option<&'a EntityId>,
    pub revision: u64,
}

impl AnimationState {
    /// Fresh state at scroll position zero, already resolved to the era
    /// covering the top of the page.
    pub fn new(timeline: Arc<Timeline>) -> Self {
        let current_era = drift_timeline::era_index_at(&timeline.eras, 0.0, timeline.era_lookahead);
        Self {
            timeline,
            scroll_progress: 0.0,
            time_progress: 0.0,
            time_velocity: 0.0,
            current_era,
            cursor_position: Vec2::ZERO,
            hover_target: None,
            pulse_target: None,
            transition_phase: TransitionPhase::Idle,
            time_frozen: false,
            hero_progress: 0.0,
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Timeline this state resolves eras against.
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// Set scroll progress and recompute the current era.
    ///
    /// Returns `true` when the era changed.
    pub fn set_scroll_progress(&mut self, progress: f32) -> bool {
        self.scroll_progress = unit(progress);
        let era = drift_timeline::era_index_at(
            &self.timeline.eras,
            self.scroll_progress,
            self.timeline.era_lookahead,
        );
        let changed = era != self.current_era;
        if changed && let Some(e) = era.map(|i| &self.timeline.eras[i]) {
            tracing::debug!(year = %e.year, label = %e.label, progress = self.scroll_progress, "era changed");
        }
        self.current_era = era;
        self.touch();
        changed
    }

    /// Set the animation time base.
    pub fn set_time_progress(&mut self, progress: f32) {
        self.time_progress = unit(progress);
        self.touch();
    }

    /// Set scroll speed in progress units per second. Negative and NaN become `0`.
    pub fn set_time_velocity(&mut self, velocity: f32) {
        self.time_velocity = if velocity.is_nan() {
            0.0
        } else {
            velocity.clamp(0.0, f32::MAX)
        };
        self.touch();
    }

    /// Set the cursor in normalized device coordinates.
    pub fn set_cursor_position(&mut self, ndc: Vec2) {
        self.cursor_position = if ndc.is_finite() {
            ndc.clamp(Vec2::NEG_ONE, Vec2::ONE)
        } else {
            Vec2::ZERO
        };
        self.touch();
    }

    pub fn set_hover_target(&mut self, target: Option<EntityId>) {
        self.hover_target = target;
        self.touch();
    }

    pub fn set_pulse_target(&mut self, target: Option<EntityId>) {
        self.pulse_target = target;
        self.touch();
    }

    pub fn set_transition_phase(&mut self, phase: TransitionPhase) {
        self.transition_phase = phase;
        self.touch();
    }

    /// Pause particle drift regardless of scroll velocity.
    pub fn set_time_frozen(&mut self, frozen: bool) {
        self.time_frozen = frozen;
        self.touch();
    }

    pub fn set_hero_progress(&mut self, progress: f32) {
        self.hero_progress = unit(progress);
        self.touch();
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    pub fn time_progress(&self) -> f32 {
        self.time_progress
    }

    pub fn time_velocity(&self) -> f32 {
        self.time_velocity
    }

    /// Active era, or `None` when the timeline has no eras.
    pub fn current_era(&self) -> Option<&Era> {
        self.current_era.map(|i| &self.timeline.eras[i])
    }

    pub fn current_era_index(&self) -> Option<usize> {
        self.current_era
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    pub fn hover_target(&self) -> Option<&EntityId> {
        self.hover_target.as_ref()
    }

    pub fn pulse_target(&self) -> Option<&EntityId> {
        self.pulse_target.as_ref()
    }

    pub fn transition_phase(&self) -> TransitionPhase {
        self.transition_phase
    }

    pub fn is_time_frozen(&self) -> bool {
        self.time_frozen
    }

    pub fn hero_progress(&self) -> f32 {
        self.hero_progress
    }

    /// Monotonic write counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether anything was written after `revision`.
    pub fn changed_since(&self, revision: u64) -> bool {
        self.revision != revision
    }

    /// Read-only view for renderers and overlays.
    pub fn snapshot(&self) -> AnimationSnapshot<'_> {
        AnimationSnapshot {
            scroll_progress: self.scroll_progress,
            time_progress: self.time_progress,
            time_velocity: self.time_velocity,
            current_era: self.current_era(),
            hover_target: self.hover_target.as_ref(),
            revision: self.revision,
        }
    }
}
