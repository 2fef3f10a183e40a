//! Resolve every schedulable task of every job on every cluster.

use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::domain::{Cluster, resolve_on};
use crate::ports::{JobEnvironment, ProgramRunner};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub job: String,
    pub cluster: Cluster,
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub jobs: usize,
    /// Number of resolutions attempted.
    pub checked: usize,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_ok() { 0 } else { 1 }
    }
}

pub fn execute<E: JobEnvironment, R: ProgramRunner>(ctx: &AppContext<E, R>) -> ValidationReport {
    let mut report = ValidationReport { jobs: ctx.catalog().len(), ..Default::default() };

    for job in ctx.catalog().jobs() {
        for cluster in Cluster::ALL {
            for index in job.parameters.schedulable_indices() {
                report.checked += 1;
                if let Err(err) = resolve_on(job, ctx.hosts(), cluster, index) {
                    debug!(job = %job.name, %cluster, index, error = %err, "validation failure");
                    report.failures.push(ValidationFailure {
                        job: job.name.clone(),
                        cluster,
                        index,
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    report
}
