use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for stormjob operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Job definition is structurally invalid.
    #[error("Invalid job definition '{job}': {reason}")]
    InvalidJobDefinition { job: String, reason: String },

    /// Parallel parameter lists do not have the same length.
    #[error(
        "Job '{job}': parameter list '{field}' has {actual} entries but '{reference}' has {expected}"
    )]
    ParameterLengthMismatch {
        job: String,
        field: &'static str,
        reference: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Parameter table resolves to zero records.
    #[error("Job '{0}' has no parameter records")]
    EmptyParameterTable(String),

    /// Two definitions in the same source declare the same job name.
    #[error("Job '{name}' is defined more than once ({origin})")]
    DuplicateJob { name: String, origin: String },

    /// Job not found in the catalog.
    #[error("Job '{name}' not found. Available: {available}")]
    JobNotFound { name: String, available: String },

    /// Host name did not match any cluster and strict host matching is on.
    #[error("Host '{0}' does not match any known cluster")]
    HostUnrecognized(String),

    /// Array index is past the end of the parameter table.
    #[error("Array index {index} is out of range for job '{job}' ({len} parameter records)")]
    IndexOutOfRange { job: String, index: usize, len: usize },

    /// Array index is inside the table but excluded by the job's index list.
    #[error("Array index {index} is not scheduled for job '{job}' (scheduled: {scheduled})")]
    IndexNotScheduled { job: String, index: usize, scheduled: String },

    /// Array index could not be parsed.
    #[error("Invalid array index '{0}': must be a non-negative integer")]
    InvalidArrayIndex(String),

    /// Required input is missing.
    #[error("{0}")]
    MissingArgument(String),

    /// Argument template failed to render.
    #[error("Job '{job}': failed to render argument '{argument}': {details}")]
    Template { job: String, argument: String, details: String },

    /// External program could not be started.
    #[error("Failed to launch '{program}': {details}")]
    ProgramLaunch { program: String, details: String },

    /// Output file already exists and overwriting was not requested.
    #[error("Refusing to overwrite existing file: {}", .0.display())]
    OutputExists(PathBuf),

    /// Internal rendering or bookkeeping failure.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn invalid_job<J: Into<String>, R: Into<String>>(job: J, reason: R) -> Self {
        AppError::InvalidJobDefinition { job: job.into(), reason: reason.into() }
    }

    /// Coarse `io::ErrorKind` view of the error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParseError(_)
            | AppError::JsonError(_)
            | AppError::InvalidJobDefinition { .. }
            | AppError::ParameterLengthMismatch { .. }
            | AppError::EmptyParameterTable(_)
            | AppError::HostUnrecognized(_)
            | AppError::IndexOutOfRange { .. }
            | AppError::IndexNotScheduled { .. }
            | AppError::InvalidArrayIndex(_)
            | AppError::MissingArgument(_)
            | AppError::Template { .. } => io::ErrorKind::InvalidInput,
            AppError::JobNotFound { .. } => io::ErrorKind::NotFound,
            AppError::DuplicateJob { .. } | AppError::OutputExists(_) => {
                io::ErrorKind::AlreadyExists
            }
            AppError::ProgramLaunch { .. } | AppError::InternalError(_) => io::ErrorKind::Other,
        }
    }
}
