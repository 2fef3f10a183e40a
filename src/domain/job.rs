//! Job definitions: one per batch-array workload.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::parameters::{LookupError, ParameterDefinition, ParameterRecord, ParameterTable};

/// Scheduler directives declared by a job. Declared only; the scheduler enforces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerDirectives {
    /// Memory request, e.g. `16G`.
    #[serde(default = "default_memory")]
    pub memory: String,
    /// Number of tasks per array element.
    #[serde(default = "default_tasks")]
    pub tasks: u32,
    /// Wall-clock limit as `[D-]HH:MM:SS`.
    #[serde(default = "default_wall_time")]
    pub wall_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_user: Option<String>,
}

impl Default for SchedulerDirectives {
    fn default() -> Self {
        Self {
            memory: default_memory(),
            tasks: default_tasks(),
            wall_time: default_wall_time(),
            partition: None,
            mail_type: None,
            mail_user: None,
        }
    }
}

impl SchedulerDirectives {
    pub fn validate(&self, job: &str) -> Result<(), AppError> {
        if self.tasks == 0 {
            return Err(AppError::invalid_job(job, "scheduler.tasks must be greater than 0"));
        }
        if self.memory.trim().is_empty() {
            return Err(AppError::invalid_job(job, "scheduler.memory must not be empty"));
        }
        let values = [
            ("memory", Some(&self.memory)),
            ("partition", self.partition.as_ref()),
            ("mail_type", self.mail_type.as_ref()),
            ("mail_user", self.mail_user.as_ref()),
        ];
        for (field, value) in values {
            if let Some(value) = value
                && !is_directive_value(value)
            {
                return Err(AppError::invalid_job(
                    job,
                    format!(
                        "scheduler.{} {:?} must be non-empty without whitespace or quotes",
                        field, value
                    ),
                ));
            }
        }
        if !is_wall_time(&self.wall_time) {
            return Err(AppError::invalid_job(
                job,
                format!("scheduler.wall_time '{}' must look like [D-]HH:MM:SS", self.wall_time),
            ));
        }
        Ok(())
    }
}

fn default_memory() -> String {
    "8G".to_string()
}

fn default_tasks() -> u32 {
    1
}

fn default_wall_time() -> String {
    "48:00:00".to_string()
}

/// A value that stays on its own `#SBATCH` line as a single word.
fn is_directive_value(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|c| c.is_control() || c.is_whitespace() || c == '"')
}

fn is_wall_time(value: &str) -> bool {
    let clock = match value.split_once('-') {
        Some((days, clock)) => {
            if days.is_empty() || !days.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            clock
        }
        None => value,
    };
    let parts: Vec<&str> = clock.split(':').collect();
    parts.len() == 3 && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Scalar or templated argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Template(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Template(text) => f.write_str(text),
            ArgValue::Integer(value) => write!(f, "{}", value),
            ArgValue::Float(value) => write!(f, "{}", value),
            // The external programs take integer booleans.
            ArgValue::Flag(value) => f.write_str(if *value { "1" } else { "0" }),
        }
    }
}

/// One named command-line argument passed to the external program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentSpec {
    pub name: String,
    pub value: ArgValue,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobDefinition {
    name: String,
    #[serde(default)]
    description: String,
    program: PathBuf,
    #[serde(default)]
    scheduler: SchedulerDirectives,
    parameters: ParameterDefinition,
    #[serde(default)]
    args: Vec<ArgumentSpec>,
}

/// A validated job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSpec {
    pub name: String,
    pub description: String,
    /// Program path relative to the toolkit root.
    pub program: PathBuf,
    pub scheduler: SchedulerDirectives,
    pub parameters: ParameterTable,
    pub args: Vec<ArgumentSpec>,
}

impl JobSpec {
    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        let definition: JobDefinition = toml::from_str(content)?;
        Self::from_definition(definition)
    }

    fn from_definition(definition: JobDefinition) -> Result<Self, AppError> {
        let JobDefinition { name, description, program, scheduler, parameters, args } = definition;

        if !is_valid_job_name(&name) {
            return Err(AppError::invalid_job(
                &name,
                "name must start with a lowercase letter or digit and contain only [a-z0-9_-]",
            ));
        }
        if program.as_os_str().is_empty() || program.is_absolute() {
            return Err(AppError::invalid_job(
                &name,
                "program must be a non-empty path relative to the toolkit root",
            ));
        }
        scheduler.validate(&name)?;
        check_arguments(&name, &args)?;
        let parameters = ParameterTable::build(&name, parameters)?;

        Ok(Self { name, description, program, scheduler, parameters, args })
    }

    /// Select the parameter record for an array index.
    pub fn record(&self, index: usize) -> Result<&ParameterRecord, AppError> {
        self.parameters.record(index).map_err(|err| match err {
            LookupError::OutOfRange { len } => {
                AppError::IndexOutOfRange { job: self.name.clone(), index, len }
            }
            LookupError::NotScheduled => AppError::IndexNotScheduled {
                job: self.name.clone(),
                index,
                scheduled: self.parameters.array_spec(),
            },
        })
    }
}

fn is_valid_job_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

fn check_arguments(job: &str, args: &[ArgumentSpec]) -> Result<(), AppError> {
    let mut seen = BTreeSet::new();
    for arg in args {
        if arg.name.trim().is_empty() {
            return Err(AppError::invalid_job(job, "argument names must not be empty"));
        }
        if arg.name.starts_with('-') || arg.name.contains(char::is_whitespace) {
            return Err(AppError::invalid_job(
                job,
                format!("argument name '{}' must be a bare flag name", arg.name),
            ));
        }
        if !seen.insert(arg.name.as_str()) {
            return Err(AppError::invalid_job(job, format!("argument '{}' is repeated", arg.name)));
        }
    }
    Ok(())
}
