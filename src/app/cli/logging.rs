//! Diagnostic output on stderr.

use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

/// Environment variable holding a log filter.
pub const LOG_ENV: &str = "STORMJOB_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter: flag, then environment, then config file, then `warn`.
pub fn select_filter(
    flag: Option<&str>,
    environment: Option<&str>,
    config: Option<&str>,
) -> String {
    [flag, environment, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(filter: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| AppError::config_error(format!("Invalid log filter '{}': {}", filter, e)))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment_and_config() {
        assert_eq!(select_filter(Some("debug"), Some("info"), Some("error")), "debug");
        assert_eq!(select_filter(None, Some("info"), Some("error")), "info");
        assert_eq!(select_filter(None, None, Some("error")), "error");
        assert_eq!(select_filter(None, Some("  "), None), "warn");
    }

    #[test]
    fn invalid_filter_is_a_configuration_error() {
        let err = init_logging("stormjob=verbose").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
