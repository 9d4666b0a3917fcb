//! Structured logging for Temporal Drift.
//!
//! Wraps `tracing-subscriber`: an uptime-stamped console layer for everyone,
//! plus a JSON file layer in debug builds so a janky scroll session can be
//! replayed frame by frame afterwards. The level comes from `RUST_LOG` when
//! set, otherwise from `debug.log_level` in the config.

use std::path::Path;

use drift_config::Config;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config says otherwise.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE: &str = "drift.log";

/// Filter directive for the given config: its `log_level`, or [`DEFAULT_FILTER`]
/// when absent or blank.
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global tracing subscriber.
///
/// Fails only if a global subscriber is already installed. A log directory
/// that cannot be created just disables the file layer.
///
/// ```no_run
/// use drift_config::Config;
///
/// let config = Config::default();
/// drift_log::init_logging(None, false, Some(&config)).ok();
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<(), TryInitError> {
    let directive = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();
        return subscriber.with(file_layer).try_init();
    }

    subscriber.try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_defaults_without_config() {
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_directive_follows_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,drift_particles=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "debug,drift_particles=trace");
    }

    #[test]
    fn test_blank_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_directives_parse() {
        for directive in [
            "info",
            "debug,drift_animation=trace",
            "warn,drift_particles=debug,drift_timeline=trace",
        ] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
        }
    }

    #[test]
    fn test_second_init_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let _ = init_logging(Some(dir.path()), true, None);
        assert!(init_logging(None, false, None).is_err());
    }
}
