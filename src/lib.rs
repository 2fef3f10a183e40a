//! stormjob: resolve and run parameterized batch-array jobs across the lab's clusters.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use app::api::{
    JobDetail, JobSummary, ResolveOptions, RunOptions, RunResult, ScriptOptions, ScriptOutcome,
    ValidationReport,
};
pub use app::config::LoadOptions;
pub use domain::{AppError, Cluster, Invocation};
