//! Scroll progress: the single time input of the whole system.

use crate::state::AnimationState;

/// Raw scroll measurements from the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Vertical scroll offset in pixels.
    pub scroll_y: f32,
    /// Total scrollable distance in pixels (document height minus viewport).
    pub scrollable_height: f32,
}

impl ScrollMetrics {
    /// Build metrics from document and viewport heights.
    pub fn from_document(scroll_y: f32, document_height: f32, viewport_height: f32) -> Self {
        Self {
            scroll_y,
            scrollable_height: document_height - viewport_height,
        }
    }

    /// Normalized progress, see [`scroll_progress`].
    pub fn progress(&self) -> f32 {
        scroll_progress(self.scroll_y, self.scrollable_height)
    }
}

/// `scroll_y / scrollable_height` clamped to `[0, 1]`.
///
/// Content shorter than the viewport (height `<= 0`) and non-finite inputs
/// yield `0`, never NaN or infinity.
pub fn scroll_progress(scroll_y: f32, scrollable_height: f32) -> f32 {
    if !(scrollable_height > 0.0) || !scrollable_height.is_finite() || scroll_y.is_nan() {
        return 0.0;
    }
    (scroll_y / scrollable_height).clamp(0.0, 1.0)
}

/// Coalesces scroll events down to one state write per frame.
#[derive(Debug, Default)]
pub struct ScrollSource {
    pending: Option<f32>,
}

impl ScrollSource {
    /// Create an unmounted source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial measurement at scene mount, written immediately.
    pub fn mount(&mut self, metrics: ScrollMetrics, state: &mut AnimationState) {
        let progress = metrics.progress();
        state.set_scroll_progress(progress);
        self.pending = None;
    }

    /// Record a scroll event. Only the latest one per frame is kept.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.pending = Some(metrics.progress());
    }

    /// Write the latest pending progress, if it differs from what the state
    /// holds. Call at frame start.
    ///
    /// Returns `true` when the state was written.
    pub fn flush(&mut self, state: &mut AnimationState) -> bool {
        match self.pending.take() {
            Some(progress) if state.scroll_progress() != progress => {
                state.set_scroll_progress(progress);
                true
            }
            _ => false,
        }
    }
}
