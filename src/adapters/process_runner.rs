use std::process::Command;

use tracing::{debug, warn};

use crate::domain::{AppError, Invocation};
use crate::ports::ProgramRunner;

/// Runs invocations as child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProgramRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32, AppError> {
        let mut command = Command::new(&invocation.interpreter);
        command.arg(&invocation.program);
        command.args(invocation.args.iter().map(|arg| arg.flag()));

        debug!(program = %invocation.program.display(), "spawning child process");

        let status = command.status().map_err(|e| AppError::ProgramLaunch {
            program: invocation.interpreter.display().to_string(),
            details: e.to_string(),
        })?;

        match status.code() {
            Some(code) => {
                if code != 0 {
                    warn!(job = %invocation.job, code, "external program failed");
                }
                Ok(code)
            }
            None => {
                warn!(job = %invocation.job, "external program terminated by a signal");
                Ok(1)
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{Argument, Cluster};

    fn invocation(interpreter: &str, program: &str, args: Vec<Argument>) -> Invocation {
        Invocation {
            job: "probe".into(),
            cluster: Cluster::Swat,
            array_index: 0,
            interpreter: PathBuf::from(interpreter),
            program: PathBuf::from(program),
            args,
        }
    }

    #[test]
    fn passes_through_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("exit_with_three.sh");
        std::fs::write(&script, "exit 3\n").unwrap();

        let runner = ProcessRunner::new();
        assert_eq!(runner.run(&invocation("/bin/sh", "/dev/null", vec![])).unwrap(), 0);

        let failing = invocation(
            "/bin/sh",
            script.to_str().unwrap(),
            vec![Argument { name: "num_iterations".into(), value: "5".into() }],
        );
        assert_eq!(runner.run(&failing).unwrap(), 3);
    }

    #[test]
    fn missing_interpreter_is_a_launch_error() {
        let missing = invocation("/nonexistent/python3", "script.py", vec![]);
        assert!(matches!(
            ProcessRunner::new().run(&missing),
            Err(AppError::ProgramLaunch { .. })
        ));
    }
}
