use std::path::PathBuf;

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{AppError, ArgumentSpec, IndexMode, ParameterRecord, SchedulerDirectives};
use crate::ports::{JobEnvironment, ProgramRunner};

#[derive(Debug, Clone, Serialize)]
pub struct IndexedRecord {
    pub index: usize,
    #[serde(flatten)]
    pub record: ParameterRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    pub name: String,
    pub description: String,
    pub program: PathBuf,
    pub mode: IndexMode,
    pub array: String,
    pub scheduler: SchedulerDirectives,
    pub entries: Vec<IndexedRecord>,
    pub args: Vec<ArgumentSpec>,
}

pub fn execute<E: JobEnvironment, R: ProgramRunner>(
    ctx: &AppContext<E, R>,
    name: &str,
) -> Result<JobDetail, AppError> {
    let job = ctx.catalog().get(name)?;

    let entries = job
        .parameters
        .schedulable_indices()
        .into_iter()
        .map(|index| Ok(IndexedRecord { index, record: job.record(index)?.clone() }))
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(JobDetail {
        name: job.name.clone(),
        description: job.description.clone(),
        program: job.program.clone(),
        mode: job.parameters.mode(),
        array: job.parameters.array_spec(),
        scheduler: job.scheduler.clone(),
        entries,
        args: job.args.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeEnvironment, builtin_context};

    #[test]
    fn shows_only_scheduled_entries() {
        let ctx = builtin_context(FakeEnvironment::new("swat-node3"));
        let detail = execute(&ctx, "gradcam-randomized").unwrap();

        let indices: Vec<usize> = detail.entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![3, 4, 6, 7, 22, 26]);
        assert_eq!(detail.entries[0].record.layer.as_deref(), Some("conv3d_2"));
        assert_eq!(detail.entries[0].record.layer_label.as_deref(), Some("4"));
    }

    #[test]
    fn unknown_job_is_not_found() {
        let ctx = builtin_context(FakeEnvironment::new("swat-node3"));
        assert!(matches!(execute(&ctx, "nope"), Err(AppError::JobNotFound { .. })));
    }
}
