//! Cluster classification and per-cluster directory layouts.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Clusters that jobs can be submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    /// NCAR Casper. Selected when the host name contains `casper`.
    Casper,
    /// OU Schooner `swat` condo. The fallback for any other host.
    Swat,
}

impl Cluster {
    pub const ALL: [Cluster; 2] = [Cluster::Casper, Cluster::Swat];

    /// Cluster used when a host name matches nothing.
    pub const DEFAULT: Cluster = Cluster::Swat;

    pub fn name(self) -> &'static str {
        match self {
            Cluster::Casper => "casper",
            Cluster::Swat => "swat",
        }
    }

    /// Substring that identifies this cluster in a host name, if any.
    fn host_marker(self) -> Option<&'static str> {
        match self {
            Cluster::Casper => Some("casper"),
            Cluster::Swat => None,
        }
    }

    /// Classify a host name. Matching is case-insensitive; unmatched names fall back to
    /// [`Cluster::DEFAULT`].
    pub fn classify(host_name: &str) -> HostMatch {
        let lowered = host_name.to_ascii_lowercase();
        Cluster::ALL
            .into_iter()
            .find(|cluster| cluster.host_marker().is_some_and(|marker| lowered.contains(marker)))
            .map(HostMatch::Matched)
            .unwrap_or(HostMatch::Fallback(Cluster::DEFAULT))
    }

    pub fn from_name(name: &str) -> Option<Cluster> {
        Cluster::ALL.into_iter().find(|cluster| cluster.name() == name)
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of host classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMatch {
    Matched(Cluster),
    Fallback(Cluster),
}

impl HostMatch {
    pub fn cluster(self) -> Cluster {
        match self {
            HostMatch::Matched(cluster) | HostMatch::Fallback(cluster) => cluster,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, HostMatch::Fallback(_))
    }
}

/// Directory layout and interpreter for one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostEnvironment {
    /// Top-level directory with learning examples.
    pub example_dir: PathBuf,
    /// Directory of the trained model and its testing outputs.
    pub model_dir: PathBuf,
    /// Python interpreter that runs the external programs.
    pub interpreter: PathBuf,
    /// Checkout root of the interpretation toolkit.
    pub toolkit_root: PathBuf,
}

impl HostEnvironment {
    /// Strip trailing separators so templates can always append `/segment`.
    pub fn normalized(self) -> Self {
        Self {
            example_dir: trim_trailing_separator(&self.example_dir),
            model_dir: trim_trailing_separator(&self.model_dir),
            interpreter: trim_trailing_separator(&self.interpreter),
            toolkit_root: trim_trailing_separator(&self.toolkit_root),
        }
    }

    pub fn validate(&self, cluster: Cluster) -> Result<(), AppError> {
        for (field, path) in [
            ("example_dir", &self.example_dir),
            ("model_dir", &self.model_dir),
            ("interpreter", &self.interpreter),
            ("toolkit_root", &self.toolkit_root),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AppError::config_error(format!(
                    "hosts.{}.{} must not be empty",
                    cluster, field
                )));
            }
            if !path.is_absolute() {
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

    fn apply(&mut self, patch: &HostOverride) {
        if let Some(path) = &patch.example_dir {
            self.example_dir = path.clone();
        }
        if let Some(path) = &patch.model_dir {
            self.model_dir = path.clone();
        }
        if let Some(path) = &patch.interpreter {
            self.interpreter = path.clone();
        }
        if let Some(path) = &patch.toolkit_root {
            self.toolkit_root = path.clone();
        }
    }
}

/// Partial host environment used by the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostOverride {
    pub example_dir: Option<PathBuf>,
    pub model_dir: Option<PathBuf>,
    pub interpreter: Option<PathBuf>,
    pub toolkit_root: Option<PathBuf>,
}

/// Host environments for every cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostTable {
    casper: HostEnvironment,
    swat: HostEnvironment,
}

impl HostTable {
    pub fn new(casper: HostEnvironment, swat: HostEnvironment) -> Result<Self, AppError> {
        let table = Self { casper: casper.normalized(), swat: swat.normalized() };
        table.validate()?;
        Ok(table)
    }

    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        let raw: HostTable = toml::from_str(content)?;
        Self::new(raw.casper, raw.swat)
    }

    pub fn get(&self, cluster: Cluster) -> &HostEnvironment {
        match cluster {
            Cluster::Casper => &self.casper,
            Cluster::Swat => &self.swat,
        }
    }

    fn get_mut(&mut self, cluster: Cluster) -> &mut HostEnvironment {
        match cluster {
            Cluster::Casper => &mut self.casper,
            Cluster::Swat => &mut self.swat,
        }
    }

    /// Apply per-cluster overrides and re-validate.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (Cluster, &'a HostOverride)>,
    ) -> Result<Self, AppError> {
        for (cluster, patch) in overrides {
            self.get_mut(cluster).apply(patch);
        }
        Self::new(self.casper, self.swat)
    }

    fn validate(&self) -> Result<(), AppError> {
        for cluster in Cluster::ALL {
            self.get(cluster).validate(cluster)?;
        }
        Ok(())
    }
}

fn trim_trailing_separator(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() && raw.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::from(trimmed)
    }
}
