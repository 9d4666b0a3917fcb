//! Command-line overrides for Temporal Drift settings.

use std::path::PathBuf;

use clap::Parser;
use drift_timeline::FogPresetName;

use crate::Config;

/// Temporal Drift command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "temporal-drift", about = "Scroll-driven temporal camera and particle core")]
pub struct CliArgs {
    /// Number of particles in the field.
    #[arg(long)]
    pub particles: Option<u32>,

    /// Particle field seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Snap the camera to keyframes instead of gliding.
    #[arg(long)]
    pub reduced_motion: Option<bool>,

    /// Fog preset (default, dramatic, subtle).
    #[arg(long)]
    pub fog: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_fog(name: &str) -> Option<FogPresetName> {
    match name.to_ascii_lowercase().as_str() {
        "default" => Some(FogPresetName::Default),
        "dramatic" => Some(FogPresetName::Dramatic),
        "subtle" => Some(FogPresetName::Subtle),
        _ => None,
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(count) = args.particles {
            self.particles.count = count;
        }
        if let Some(seed) = args.seed {
            self.particles.seed = seed;
        }
        if let Some(reduced) = args.reduced_motion {
            self.motion.reduced_motion = reduced;
        }
        if let Some(ref name) = args.fog {
            match parse_fog(name) {
                Some(preset) => self.fog.preset = preset,
                None => log::warn!("Unknown fog preset {name:?}, keeping {:?}", self.fog.preset),
            }
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            particles: Some(3000),
            reduced_motion: Some(true),
            fog: Some("Subtle".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.particles.count, 3000);
        assert!(config.motion.reduced_motion);
        assert_eq!(config.fog.preset, FogPresetName::Subtle);
        // Non-overridden fields retain defaults
        assert_eq!(config.particles.seed, 0);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_unknown_fog_keeps_current() {
        let mut config = Config::default();
        let args = CliArgs {
            fog: Some("thick".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.fog.preset, FogPresetName::Default);
    }

    #[test]
    fn test_parse_from_argv() {
        let args = CliArgs::parse_from([
            "temporal-drift",
            "--particles",
            "1200",
            "--seed",
            "99",
            "--reduced-motion",
            "true",
        ]);
        assert_eq!(args.particles, Some(1200));
        assert_eq!(args.seed, Some(99));
        assert_eq!(args.reduced_motion, Some(true));
    }
}
