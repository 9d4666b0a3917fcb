//! Settings structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use drift_timeline::FogPresetName;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level animation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Camera follow behavior.
    pub camera: CameraConfig,
    /// Particle field generation and kinematics.
    pub particles: ParticleConfig,
    /// Atmospheric fog.
    pub fog: FogConfig,
    /// Accessibility motion settings.
    pub motion: MotionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Camera follow configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Follow rate per second before safe-zone damping.
    pub base_speed: f32,
    /// Gentle vertical sway while the reader sits in a safe zone.
    pub breathing: bool,
    /// Sway angular rate in radians per second.
    pub breath_rate: f32,
    /// Sway amplitude in world units, scaled by the zone damping.
    pub breath_amplitude: f32,
}

/// Seed function used to lay out the particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParticleGenerator {
    /// `fract(sin(x) * 43758.5453)` hash, matching the shader-era layout.
    #[default]
    SineHash,
    /// ChaCha8 stream seeded per particle.
    ChaCha,
}

/// Particle field configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles, fixed for the session.
    pub count: u32,
    /// Field seed.
    pub seed: u64,
    /// Seed function.
    pub generator: ParticleGenerator,
    /// How strongly scroll velocity thins the viscosity.
    pub velocity_gain: f32,
    /// Fraction of motion removed at full viscosity, in `[0, 1]`.
    pub damping_share: f32,
    /// Rate (per second) at which viscosity settles toward its target.
    pub viscosity_response: f32,
    /// Tunnel length along the depth axis.
    pub tunnel_length: f32,
    /// Tunnel radius of the particle disk.
    pub spread: f32,
    /// Base point size.
    pub base_size: f32,
    /// Maximum speed per axis.
    pub velocity_range: f32,
    /// Cursor attraction strength; `0` disables gravity.
    pub gravity_strength: f32,
    /// Floor on squared cursor distance.
    pub gravity_floor: f32,
}

/// Fog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FogConfig {
    /// Which preset tints the atmosphere.
    pub preset: FogPresetName,
}

/// Accessibility configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Snap the camera to keyframes instead of gliding.
    pub reduced_motion: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a frame summary every N frames; `0` disables it.
    pub frame_log_interval: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            base_speed: 3.0,
            breathing: true,
            breath_rate: 0.5,
            breath_amplitude: 0.1,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 800,
            seed: 0,
            generator: ParticleGenerator::SineHash,
            velocity_gain: 10.0,
            damping_share: 0.95,
            viscosity_response: 4.0,
            tunnel_length: 150.0,
            spread: 15.0,
            base_size: 3.0,
            velocity_range: 0.6,
            gravity_strength: 0.1,
            gravity_floor: 0.5,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_log_interval: 0,
        }
    }
}

/// Platform config directory for Temporal Drift, e.g. `~/.config/temporal-drift`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("temporal-drift"))
        .ok_or(ConfigError::NoConfigDir)
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

impl Config {
    /// Reject values that would make the animation math meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.particles;
        if !(p.tunnel_length > 0.0) {
            return Err(invalid("particles.tunnel_length", "must be positive"));
        }
        if !(0.0..=1.0).contains(&p.damping_share) {
            return Err(invalid("particles.damping_share", "must be within 0..=1"));
        }
        if !(p.velocity_gain >= 0.0) {
            return Err(invalid("particles.velocity_gain", "must not be negative"));
        }
        if !(p.gravity_floor > 0.0) {
            return Err(invalid("particles.gravity_floor", "must be positive"));
        }
        if !(self.camera.base_speed >= 0.0) {
            return Err(invalid("camera.base_speed", "must not be negative"));
        }
        Ok(())
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.to_path_buf(),
                source,
            })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// A changed but invalid file is an error; the caller keeps its current settings.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &new_config == self {
            return Ok(None);
        }
        new_config.validate()?;
        log::info!("Config reloaded with changes");
        Ok(Some(new_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(2))
                .unwrap();
        assert!(ron_str.contains("count: 800"));
        assert!(ron_str.contains("base_speed: 3.0"));
        assert!(ron_str.contains("SineHash"));
    }

    #[test]
    fn test_defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(camera: (base_speed: 5.0))").unwrap();
        assert_eq!(config.camera.base_speed, 5.0);
        assert!(config.camera.breathing);
        assert_eq!(config.particles, ParticleConfig::default());
    }

    #[test]
    fn test_unknown_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(shader_quality: \"ultra\")");
        assert!(result.is_ok());
    }

    #[test]
    fn test_enum_settings_parse() {
        let config: Config =
            ron::from_str("(fog: (preset: Dramatic), particles: (generator: ChaCha))").unwrap();
        assert_eq!(config.fog.preset, FogPresetName::Dramatic);
        assert_eq!(config.particles.generator, ParticleGenerator::ChaCha);
    }

    #[test]
    fn test_validate_rejects_bad_tunnel() {
        let mut config = Config::default();
        config.particles.tunnel_length = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "particles.tunnel_length",
                ..
            })
        ));
        config.particles.tunnel_length = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_damping_share_out_of_range() {
        let mut config = Config::default();
        config.particles.damping_share = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.particles.count = 2400;
        config.particles.seed = 7;
        config.motion.reduced_motion = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "(particles: (damping_share: -1.0))",
        )
        .unwrap();
        assert!(Config::load_or_create(dir.path()).is_err());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.particles.velocity_gain = 20.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().particles.velocity_gain, 20.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::default().reload(dir.path()),
            Err(ConfigError::ReadError { .. })
        ));
    }
}
