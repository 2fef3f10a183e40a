use crate::app::AppContext;
use crate::domain::{AppError, Invocation, ResolveRequest, resolve};
use crate::ports::{ARRAY_TASK_ID_VAR, JobEnvironment, ProgramRunner};

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub job: String,
    /// Host name override; defaults to the executing host.
    pub host: Option<String>,
    /// Array index override; defaults to the scheduler's task id.
    pub index: Option<usize>,
    pub strict_host: bool,
}

pub fn execute<E: JobEnvironment, R: ProgramRunner>(
    ctx: &AppContext<E, R>,
    options: &ResolveOptions,
) -> Result<Invocation, AppError> {
    let job = ctx.catalog().get(&options.job)?;

    let host_name = match &options.host {
        Some(host) => host.clone(),
        None => ctx.environment().host_name()?,
    };

    let array_index = match options.index {
        Some(index) => index,
        None => ctx.environment().array_task_id()?.ok_or_else(|| {
            AppError::MissingArgument(format!(
                "No array index: pass --index or set {}",
                ARRAY_TASK_ID_VAR
            ))
        })?,
    };

    let request =
        ResolveRequest { host_name: &host_name, array_index, strict_host: options.strict_host };
    resolve(job, ctx.hosts(), &request)
}
