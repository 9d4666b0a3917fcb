//! Tunable Temporal Drift settings.
//!
//! Camera speed, particle field shape, fog preset, and reduced motion live in
//! `config.ron` under the platform config directory. Missing fields fall back
//! to defaults, so old files keep loading. CLI flags win over the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, FogConfig, MotionConfig, ParticleConfig,
    ParticleGenerator, default_config_dir,
};
pub use error::ConfigError;
