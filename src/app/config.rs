//! Locate and load the user configuration file.

use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError};
use crate::ports::JobEnvironment;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "STORMJOB_CONFIG";

/// Inputs that decide where configuration and extra jobs come from.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// `--config`, takes precedence over `STORMJOB_CONFIG`.
    pub config_path: Option<PathBuf>,
    /// `--jobs-dir`, takes precedence over `jobs_dir` in the config file.
    pub jobs_dir: Option<PathBuf>,
}

/// Configuration after precedence rules are applied.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub config: AppConfig,
    pub config_path: Option<PathBuf>,
    pub jobs_dir: Option<PathBuf>,
}

impl Settings {
    pub fn load(environment: &impl JobEnvironment, options: &LoadOptions) -> Result<Self, AppError> {
        let config_path = options.config_path.clone().or_else(|| {
            environment.var(CONFIG_ENV).filter(|value| !value.trim().is_empty()).map(PathBuf::from)
        });

        let config = match &config_path {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };

        let jobs_dir = options.jobs_dir.clone().or_else(|| config.jobs_dir.clone());

        Ok(Self { config, config_path, jobs_dir })
    }
}

/// Read, parse, and validate a configuration file.
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.is_file() {
        return Err(AppError::config_error(format!("Config file not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    let config = AppConfig::parse_toml(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.anchored_at(base))
}
