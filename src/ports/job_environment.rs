use crate::domain::AppError;

/// Environment variable carrying the scheduler's array index.
pub const ARRAY_TASK_ID_VAR: &str = "SLURM_ARRAY_TASK_ID";

/// Port for the ambient facts a scheduler task runs with.
pub trait JobEnvironment {
    /// Name of the executing host.
    fn host_name(&self) -> Result<String, AppError>;

    /// Read an environment variable. Unset and non-UTF-8 values are `None`.
    fn var(&self, key: &str) -> Option<String>;

    /// Array index supplied by the scheduler, if any.
    fn array_task_id(&self) -> Result<Option<usize>, AppError> {
        match self.var(ARRAY_TASK_ID_VAR) {
            Some(raw) => {
                let trimmed = raw.trim();
                let invalid = || AppError::InvalidArrayIndex(trimmed.to_string());
                if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                trimmed.parse::<usize>().map(Some).map_err(|_| invalid())
            }
            None => Ok(None),
        }
    }
}
