//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` spans and events; binaries call
//! [`init_tracing`] once at startup to decide where they go.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::errors::{Result, SprintPilotError};

/// Installs a global fmt subscriber writing to stderr.
///
/// Stdout is left for command output. If a global subscriber is already
/// installed it is kept and this call succeeds.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level).map_err(|err| {
        SprintPilotError::Config(format!("invalid log filter '{}': {err}", config.level))
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = installed {
        tracing::debug!(error = %err, "Keeping existing tracing subscriber");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_a_config_error() {
        let config = LogConfig {
            level: "sprintpilot=loud".to_string(),
            json: false,
        };
        let err = init_tracing(&config).unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }

    #[test]
    fn test_second_init_is_harmless() {
        let config = LogConfig::default();
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&LogConfig { json: true, ..config }).is_ok());
    }
}
