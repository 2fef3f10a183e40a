use std::sync::Mutex;

use crate::domain::{AppError, Invocation};
use crate::ports::ProgramRunner;

/// Records invocations instead of running them and returns a fixed exit code.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    exit_code: i32,
    pub runs: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new(exit_code: i32) -> Self {
        Self { exit_code, runs: Mutex::new(Vec::new()) }
    }

    pub fn recorded(&self) -> Vec<Invocation> {
        self.runs.lock().unwrap().clone()
    }
}

impl ProgramRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32, AppError> {
        self.runs.lock().unwrap().push(invocation.clone());
        Ok(self.exit_code)
    }
}
