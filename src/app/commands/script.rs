//! Render a SLURM batch script for a job array.

use std::fs;
use std::path::PathBuf;

use minijinja::{Environment, context};
use tracing::info;

use crate::adapters::batch_script_template;
use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::invocation::shell_quote;
use crate::ports::{JobEnvironment, ProgramRunner};

const TEMPLATE_NAME: &str = "batch_script.sh";

#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    pub job: String,
    /// Write here instead of returning the script for stdout.
    pub output: Option<PathBuf>,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub content: String,
    pub written: Option<PathBuf>,
}

pub fn execute<E: JobEnvironment, R: ProgramRunner>(
    ctx: &AppContext<E, R>,
    options: &ScriptOptions,
) -> Result<ScriptOutcome, AppError> {
    let content = render(ctx, &options.job)?;

    let Some(path) = &options.output else {
        return Ok(ScriptOutcome { content, written: None });
    };

    if path.exists() && !options.force {
        return Err(AppError::OutputExists(path.clone()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &content)?;
    info!(job = %options.job, path = %path.display(), "batch script written");

    Ok(ScriptOutcome { content, written: Some(path.clone()) })
}

fn render<E: JobEnvironment, R: ProgramRunner>(
    ctx: &AppContext<E, R>,
    name: &str,
) -> Result<String, AppError> {
    let job = ctx.catalog().get(name)?;

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template(TEMPLATE_NAME, batch_script_template()?).map_err(template_error)?;

    let template = env.get_template(TEMPLATE_NAME).map_err(template_error)?;
    template
        .render(context! {
            job => &job.name,
            scheduler => &job.scheduler,
            array => job.parameters.array_spec(),
            binary => env!("CARGO_PKG_NAME"),
            config_path => ctx.config_path().map(|p| shell_quote(&p.display().to_string())),
            jobs_dir => ctx.jobs_dir().map(|p| shell_quote(&p.display().to_string())),
        })
        .map_err(template_error)
}

fn template_error(err: minijinja::Error) -> AppError {
    AppError::InternalError(format!("Failed to render batch script: {err}"))
}
