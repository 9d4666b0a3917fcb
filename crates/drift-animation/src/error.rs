use drift_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriftError {
    #[error("3D rendering is unavailable on {renderer}, use the static fallback")]
    Unsupported { renderer: String },

    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
}
