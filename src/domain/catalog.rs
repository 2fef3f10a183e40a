//! The set of jobs available to the CLI.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{debug, info};

use crate::domain::AppError;
use crate::domain::job::JobSpec;
use crate::ports::JobDefinitionSource;

/// Jobs keyed by name.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    jobs: BTreeMap<String, JobSpec>,
}

impl JobCatalog {
    /// Load every source in order. Within one source names must be unique; a later source
    /// replaces jobs of the same name from an earlier one.
    pub fn load(sources: &[&dyn JobDefinitionSource]) -> Result<Self, AppError> {
        let mut jobs = BTreeMap::new();

        for source in sources {
            let mut from_this_source = BTreeMap::new();
            for file in source.definitions()? {
                let job = JobSpec::parse_toml(&file.content).map_err(|err| match err {
                    AppError::TomlParseError(details) => {
                        AppError::invalid_job(&file.origin, details.to_string())
                    }
                    other => other,
                })?;

                match from_this_source.entry(job.name.clone()) {
                    Entry::Occupied(_) => {
                        return Err(AppError::DuplicateJob { name: job.name, origin: file.origin });
                    }
                    Entry::Vacant(slot) => {
                        debug!(job = %job.name, origin = %file.origin, "loaded job definition");
                        slot.insert(job);
                    }
                }
            }

            for (name, job) in from_this_source {
                if jobs.insert(name.clone(), job).is_some() {
                    info!(job = %name, source = %source.describe(), "job definition replaced");
                }
            }
        }

        Ok(Self { jobs })
    }

    pub fn get(&self, name: &str) -> Result<&JobSpec, AppError> {
        self.jobs.get(name).ok_or_else(|| AppError::JobNotFound {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    pub fn jobs(&self) -> impl Iterator<Item = &JobSpec> {
        self.jobs.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.jobs.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticDefinitions;

    fn job(name: &str, subsets: &str) -> String {
        format!(
            r#"
name = "{name}"
program = "scripts/run.py"

[parameters]
subset = [{subsets}]
"#
        )
    }

    #[test]
    fn later_sources_replace_earlier_jobs() {
        let builtin = StaticDefinitions::new("builtin")
            .with("a.toml", &job("alpha", r#""x""#))
            .with("b.toml", &job("beta", r#""x""#));
        let user = StaticDefinitions::new("user").with("a.toml", &job("alpha", r#""x", "y""#));

        let catalog = JobCatalog::load(&[&builtin, &user]).unwrap();
        assert_eq!(catalog.names(), vec!["alpha", "beta"]);
        assert_eq!(catalog.get("alpha").unwrap().parameters.len(), 2);
    }

    #[test]
    fn duplicate_names_within_a_source_fail() {
        let source = StaticDefinitions::new("user")
            .with("one.toml", &job("alpha", r#""x""#))
            .with("two.toml", &job("alpha", r#""y""#));

        let err = JobCatalog::load(&[&source]).unwrap_err();
        assert!(matches!(err, AppError::DuplicateJob { ref origin, .. } if origin == "two.toml"));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let source = StaticDefinitions::new("user").with("broken.toml", "name = ");
        let err = JobCatalog::load(&[&source]).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_job_lists_available_names() {
        let source = StaticDefinitions::new("builtin").with("a.toml", &job("alpha", r#""x""#));
        let catalog = JobCatalog::load(&[&source]).unwrap();

        let err = catalog.get("gamma").unwrap_err();
        assert_eq!(err.to_string(), "Job 'gamma' not found. Available: alpha");
    }
}
