use crate::domain::{AppError, Invocation};

/// Port for executing a resolved invocation.
pub trait ProgramRunner {
    /// Run the program to completion and return its exit code.
    fn run(&self, invocation: &Invocation) -> Result<i32, AppError>;
}
