mod job_definitions;
mod job_environment;
mod program_runner;

pub use job_definitions::{DefinitionFile, JobDefinitionSource};
pub use job_environment::{ARRAY_TASK_ID_VAR, JobEnvironment};
pub use program_runner::ProgramRunner;
