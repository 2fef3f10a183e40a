pub mod catalog;
pub mod error;
pub mod host;
pub mod invocation;
pub mod job;
pub mod parameters;
pub mod resolver;
pub mod settings;
pub mod template;

pub use catalog::JobCatalog;
pub use error::AppError;
pub use host::{Cluster, HostEnvironment, HostMatch, HostOverride, HostTable};
pub use invocation::{Argument, Invocation};
pub use job::{ArgValue, ArgumentSpec, JobSpec, SchedulerDirectives};
pub use parameters::{IndexMode, ParameterDefinition, ParameterRecord, ParameterTable};
pub use resolver::{ResolveRequest, resolve, resolve_on};
pub use settings::{AppConfig, HostOverrides};
