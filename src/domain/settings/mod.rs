//! User configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::host::{Cluster, HostOverride};

/// Settings loaded from `stormjob.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Directory with additional job definitions.
    #[serde(default)]
    pub jobs_dir: Option<PathBuf>,
    /// Log filter used when neither `--log-level` nor `STORMJOB_LOG` is set.
    #[serde(default)]
    pub log_level: Option<String>,
    /// Per-cluster path overrides.
    #[serde(default)]
    pub hosts: HostOverrides,
}

impl AppConfig {
    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(dir) = &self.jobs_dir
            && dir.as_os_str().is_empty()
        {
            return Err(AppError::config_error("jobs_dir must not be empty"));
        }
        if let Some(level) = &self.log_level
            && level.trim().is_empty()
        {
            return Err(AppError::config_error("log_level must not be empty"));
        }
        for (cluster, patch) in self.hosts.iter() {
            validate_override(cluster, patch)?;
        }
        Ok(())
    }

    /// Resolve a relative `jobs_dir` against the directory holding the config file.
    pub fn anchored_at(mut self, config_dir: &Path) -> Self {
        if let Some(dir) = &self.jobs_dir
            && dir.is_relative()
        {
            self.jobs_dir = Some(config_dir.join(dir));
        }
        self
    }
}

/// Overrides keyed by cluster name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostOverrides {
    #[serde(default)]
    pub casper: Option<HostOverride>,
    #[serde(default)]
    pub swat: Option<HostOverride>,
}

impl HostOverrides {
    pub fn get(&self, cluster: Cluster) -> Option<&HostOverride> {
        match cluster {
            Cluster::Casper => self.casper.as_ref(),
            Cluster::Swat => self.swat.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cluster, &HostOverride)> {
        Cluster::ALL.into_iter().filter_map(|cluster| self.get(cluster).map(|p| (cluster, p)))
    }
}

fn validate_override(cluster: Cluster, patch: &HostOverride) -> Result<(), AppError> {
    let fields = [
        ("example_dir", &patch.example_dir),
        ("model_dir", &patch.model_dir),
        ("interpreter", &patch.interpreter),
        ("toolkit_root", &patch.toolkit_root),
    ];
    for (field, value) in fields {
        if let Some(path) = value
            && !path.is_absolute()
        {
            return Err(AppError::config_error(format!(
                "hosts.{}.{} must be an absolute path, got '{}'",
                cluster,
                field,
                path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::parse_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.hosts.iter().count(), 0);
    }

    #[test]
    fn parses_host_overrides() {
        let config = AppConfig::parse_toml(
            r#"
jobs_dir = "jobs"
log_level = "debug"

[hosts.casper]
model_dir = "/glade/scratch/models"
"#,
        )
        .unwrap();

        let casper = config.hosts.get(Cluster::Casper).unwrap();
        assert_eq!(casper.model_dir, Some(PathBuf::from("/glade/scratch/models")));
        assert_eq!(casper.interpreter, None);
        assert!(config.hosts.get(Cluster::Swat).is_none());
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_cluster() {
        let err = AppConfig::parse_toml("[hosts.cheyenne]\nmodel_dir = \"/x\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }

    #[test]
    fn rejects_relative_override() {
        let err = AppConfig::parse_toml("[hosts.swat]\ninterpreter = \"python3\"\n").unwrap_err();
        assert!(err.to_string().contains("hosts.swat.interpreter"));
    }

    #[test]
    fn relative_jobs_dir_is_anchored() {
        let config = AppConfig::parse_toml("jobs_dir = \"jobs\"\n").unwrap();
        let config = config.anchored_at(Path::new("/etc/stormjob"));
        assert_eq!(config.jobs_dir, Some(PathBuf::from("/etc/stormjob/jobs")));

        let config = AppConfig::parse_toml("jobs_dir = \"/abs/jobs\"\n").unwrap();
        let config = config.anchored_at(Path::new("/etc/stormjob"));
        assert_eq!(config.jobs_dir, Some(PathBuf::from("/abs/jobs")));
    }
}
