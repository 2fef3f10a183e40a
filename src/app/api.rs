//! API facade for the application.
//!
//! Glues context creation to command execution using the production adapters.

use crate::adapters::{ProcessRunner, SystemEnvironment};
use crate::app::AppContext;
use crate::app::commands::{list, resolve, run, script, show, validate};
use crate::app::config::{LoadOptions, Settings};
use crate::domain::{AppError, Invocation};

pub use crate::app::commands::list::JobSummary;
pub use crate::app::commands::resolve::ResolveOptions;
pub use crate::app::commands::run::{RunOptions, RunResult};
pub use crate::app::commands::script::{ScriptOptions, ScriptOutcome};
pub use crate::app::commands::show::{IndexedRecord, JobDetail};
pub use crate::app::commands::validate::{ValidationFailure, ValidationReport};

/// Context wired to the real process environment and program runner.
pub type SystemContext = AppContext<SystemEnvironment, ProcessRunner>;

/// Apply configuration precedence against the real environment.
pub fn load_settings(options: &LoadOptions) -> Result<Settings, AppError> {
    Settings::load(&SystemEnvironment::new(), options)
}

/// Build the production context from loaded settings.
pub fn load_context(settings: Settings) -> Result<SystemContext, AppError> {
    AppContext::load(SystemEnvironment::new(), ProcessRunner::new(), settings)
}

fn context(options: &LoadOptions) -> Result<SystemContext, AppError> {
    load_context(load_settings(options)?)
}

/// Summaries of every known job.
pub fn list_jobs(options: &LoadOptions) -> Result<Vec<JobSummary>, AppError> {
    Ok(list::execute(&context(options)?))
}

/// Full detail for one job.
pub fn show_job(options: &LoadOptions, job: &str) -> Result<JobDetail, AppError> {
    show::execute(&context(options)?, job)
}

/// Resolve one array task without running it.
pub fn resolve_job(
    options: &LoadOptions,
    resolve_options: &ResolveOptions,
) -> Result<Invocation, AppError> {
    resolve::execute(&context(options)?, resolve_options)
}

/// Resolve one array task and execute it.
pub fn run_job(options: &LoadOptions, run_options: &RunOptions) -> Result<RunResult, AppError> {
    run::execute(&context(options)?, run_options)
}

/// Render the batch script for a job.
pub fn render_script(
    options: &LoadOptions,
    script_options: &ScriptOptions,
) -> Result<ScriptOutcome, AppError> {
    script::execute(&context(options)?, script_options)
}

/// Resolve every schedulable task of every job.
pub fn validate_jobs(options: &LoadOptions) -> Result<ValidationReport, AppError> {
    Ok(validate::execute(&context(options)?))
}
