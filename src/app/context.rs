use std::path::Path;

use crate::adapters::{DirectoryJobDefinitions, EmbeddedJobDefinitions, builtin_host_table};
use crate::app::config::Settings;
use crate::domain::{AppError, HostTable, JobCatalog};
use crate::ports::{JobDefinitionSource, JobEnvironment, ProgramRunner};

/// Application context holding dependencies for command execution.
pub struct AppContext<E: JobEnvironment, R: ProgramRunner> {
    environment: E,
    runner: R,
    catalog: JobCatalog,
    hosts: HostTable,
    settings: Settings,
}

impl<E: JobEnvironment, R: ProgramRunner> AppContext<E, R> {
    /// Create a context from explicit parts.
    pub fn new(
        environment: E,
        runner: R,
        catalog: JobCatalog,
        hosts: HostTable,
        settings: Settings,
    ) -> Self {
        Self { environment, runner, catalog, hosts, settings }
    }

    /// Load built-in assets, apply configuration overrides, and read the extra jobs directory.
    pub fn load(environment: E, runner: R, settings: Settings) -> Result<Self, AppError> {
        let hosts = builtin_host_table()?.with_overrides(settings.config.hosts.iter())?;

        let builtin = EmbeddedJobDefinitions::new();
        let catalog = match &settings.jobs_dir {
            Some(dir) => {
                let extra = DirectoryJobDefinitions::new(dir.clone());
                let sources: [&dyn JobDefinitionSource; 2] = [&builtin, &extra];
                JobCatalog::load(&sources)?
            }
            None => JobCatalog::load(&[&builtin])?,
        };

        Ok(Self::new(environment, runner, catalog, hosts, settings))
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn hosts(&self) -> &HostTable {
        &self.hosts
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.settings.config_path.as_deref()
    }

    pub fn jobs_dir(&self) -> Option<&Path> {
        self.settings.jobs_dir.as_deref()
    }
}
