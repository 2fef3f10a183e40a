use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{IndexMode, JobSpec};
use crate::ports::{JobEnvironment, ProgramRunner};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub name: String,
    pub description: String,
    pub array: String,
    pub tasks: usize,
    pub mode: IndexMode,
}

impl JobSummary {
    pub fn from_job(job: &JobSpec) -> Self {
        Self {
            name: job.name.clone(),
            description: job.description.clone(),
            array: job.parameters.array_spec(),
            tasks: job.parameters.schedulable_indices().len(),
            mode: job.parameters.mode(),
        }
    }
}

pub fn execute<E: JobEnvironment, R: ProgramRunner>(ctx: &AppContext<E, R>) -> Vec<JobSummary> {
    ctx.catalog().jobs().map(JobSummary::from_job).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeEnvironment, builtin_context};

    #[test]
    fn lists_builtin_jobs_with_array_specs() {
        let ctx = builtin_context(FakeEnvironment::new("swat-node3"));
        let summaries = execute(&ctx);

        let randomized = summaries.iter().find(|s| s.name == "gradcam-randomized").unwrap();
        assert_eq!(randomized.array, "3,4,6,7,22,26");
        assert_eq!(randomized.tasks, 6);

        let mc_test = summaries.iter().find(|s| s.name == "gradcam-mc-test").unwrap();
        assert_eq!(mc_test.array, "0-17");
        assert_eq!(mc_test.mode, IndexMode::Positional);

        let product = summaries.iter().find(|s| s.name == "saliency-mc-test").unwrap();
        assert_eq!(product.array, "0-17");
        assert_eq!(product.mode, IndexMode::Product);
    }
}
