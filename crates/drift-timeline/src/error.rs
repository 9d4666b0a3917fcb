//! Timeline error types.

/// Errors raised while parsing or validating timeline data.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// A color string was not `#rrggbb`.
    #[error("invalid hex color: {0:?}")]
    InvalidColor(String),

    /// The era list is empty.
    #[error("timeline has no eras")]
    NoEras,

    /// Era positions must be strictly increasing inside `[0, 1]`.
    #[error("era {index} ({year}) at position {position} is out of order or out of range")]
    EraOrder {
        /// Offending era index.
        index: usize,
        /// Offending era year label.
        year: String,
        /// Offending position.
        position: f32,
    },

    /// Keyframes must be sorted and span `0.0..=1.0`.
    #[error("camera keyframes invalid: {0}")]
    Keyframes(String),

    /// A safe zone has `start > end` or a damping factor outside `(0, 1]`.
    #[error("safe zone {label:?} invalid: {reason}")]
    SafeZone {
        /// Zone label.
        label: String,
        /// What was wrong.
        reason: String,
    },

    /// Failed to read a timeline file.
    #[error("failed to read timeline: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse timeline: {0}")]
    ParseError(#[source] ron::error::SpannedError),
}
