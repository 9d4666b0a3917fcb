//! Errors from loading, saving, and validating drift settings.

use std::path::PathBuf;

/// Everything that can go wrong with `config.ron` or its overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No platform config directory and none given on the command line.
    #[error("no config directory available; pass --config <dir>")]
    NoConfigDir,

    /// Reading `config.ron` failed.
    #[error("cannot read {path}: {source}")]
    ReadError {
        /// File that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing `config.ron` (or creating its directory) failed.
    #[error("cannot write {path}: {source}")]
    WriteError {
        /// File or directory that could not be written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `config.ron` is not valid RON for [`crate::Config`].
    #[error("malformed config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Serializing the config back to RON failed.
    #[error("cannot serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A setting holds a value the animation core cannot use.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}
