pub mod embedded_assets;
pub mod job_directory;
pub mod process_runner;
pub mod system_environment;

pub use embedded_assets::{EmbeddedJobDefinitions, batch_script_template, builtin_host_table};
pub use job_directory::DirectoryJobDefinitions;
pub use process_runner::ProcessRunner;
pub use system_environment::SystemEnvironment;
