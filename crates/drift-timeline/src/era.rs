//! Narrative eras and the anticipatory era lookup.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, hex_serde};

/// How far ahead of its nominal position an era becomes active.
pub const DEFAULT_ERA_LOOKAHEAD: f32 = 0.05;

/// A named segment of the narrative timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Era {
    /// Year label shown in the overlay, e.g. "2018" or "Future".
    pub year: String,
    /// Short title.
    pub label: String,
    /// Accent color, stored as `#rrggbb` in timeline files.
    #[serde(with = "hex_serde")]
    pub color: Rgb,
    /// Nominal position in `[0, 1]`. Strictly increasing across the era list.
    pub position: f32,
    /// One-line description.
    pub description: String,
}

impl Era {
    /// Convenience constructor used by the built-in timeline.
    pub fn new(year: &str, label: &str, color: Rgb, position: f32, description: &str) -> Self {
        Self {
            year: year.to_string(),
            label: label.to_string(),
            color,
            position,
            description: description.to_string(),
        }
    }
}

/// Index of the era active at `progress`.
///
/// Scans from the last era backward and returns the first whose
/// `position - lookahead <= progress`, so later eras win and each era
/// activates slightly before its nominal position. Falls back to the first
/// era. Returns `None` only for an empty list.
pub fn era_index_at(eras: &[Era], progress: f32, lookahead: f32) -> Option<usize> {
    if eras.is_empty() {
        return None;
    }
    let p = if progress.is_nan() { 0.0 } else { progress };
    let found = eras
        .iter()
        .rposition(|era| era.position - lookahead <= p)
        .unwrap_or(0);
    Some(found)
}
