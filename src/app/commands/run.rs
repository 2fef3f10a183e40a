//! Run command: resolve one array task and execute it.

use tracing::info;

use crate::app::AppContext;
use crate::app::commands::resolve::{self, ResolveOptions};
use crate::domain::{AppError, Invocation};
use crate::ports::{JobEnvironment, ProgramRunner};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub resolve: ResolveOptions,
    /// Resolve only; do not execute.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub invocation: Invocation,
    /// Child exit code. `None` for dry runs.
    pub exit_code: Option<i32>,
}

pub fn execute<E: JobEnvironment, R: ProgramRunner>(
    ctx: &AppContext<E, R>,
    options: &RunOptions,
) -> Result<RunResult, AppError> {
    let invocation = resolve::execute(ctx, &options.resolve)?;

    if options.dry_run {
        return Ok(RunResult { invocation, exit_code: None });
    }

    info!(
        job = %invocation.job,
        cluster = %invocation.cluster,
        index = invocation.array_index,
        command = %invocation.shell_line(),
        "launching"
    );
    let exit_code = ctx.runner().run(&invocation)?;
    info!(job = %invocation.job, exit_code, "program finished");

    Ok(RunResult { invocation, exit_code: Some(exit_code) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Settings;
    use crate::testing::{FakeEnvironment, RecordingRunner, builtin_context};

    fn options(job: &str, index: usize) -> RunOptions {
        RunOptions {
            resolve: ResolveOptions {
                job: job.to_string(),
                index: Some(index),
                ..Default::default()
            },
            dry_run: false,
        }
    }

    #[test]
    fn runs_the_resolved_invocation_once() {
        let ctx = builtin_context(FakeEnvironment::new("casper-login1"));
        let result = execute(&ctx, &options("saliency-pmm-plot", 3)).unwrap();

        assert_eq!(result.exit_code, Some(0));
        let runs = ctx.runner().recorded();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], result.invocation);
        assert!(runs[0].arg("output_dir_name").unwrap().contains("/worst_misses/"));
    }

    #[test]
    fn exit_code_is_passed_through() {
        let ctx = AppContext::load(
            FakeEnvironment::new("swat-node3"),
            RecordingRunner::new(7),
            Settings::default(),
        )
        .unwrap();
        let result = execute(&ctx, &options("saliency-pmm-plot", 0)).unwrap();
        assert_eq!(result.exit_code, Some(7));
    }

    #[test]
    fn dry_run_does_not_execute() {
        let ctx = builtin_context(FakeEnvironment::new("swat-node3"));
        let result =
            execute(&ctx, &RunOptions { dry_run: true, ..options("gradcam-mc-test", 0) }).unwrap();

        assert_eq!(result.exit_code, None);
        assert!(ctx.runner().recorded().is_empty());
    }

    #[test]
    fn resolution_failure_runs_nothing() {
        let ctx = builtin_context(FakeEnvironment::new("swat-node3"));
        assert!(execute(&ctx, &options("gradcam-mc-test", 99)).is_err());
        assert!(ctx.runner().recorded().is_empty());
    }
}
