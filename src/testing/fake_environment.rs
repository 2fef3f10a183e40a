use std::collections::HashMap;

use crate::domain::AppError;
use crate::ports::{ARRAY_TASK_ID_VAR, JobEnvironment};

#[derive(Debug, Clone, Default)]
pub struct FakeEnvironment {
    host_name: Option<String>,
    vars: HashMap<String, String>,
}

impl FakeEnvironment {
    pub fn new(host_name: &str) -> Self {
        Self { host_name: Some(host_name.to_string()), vars: HashMap::new() }
    }

    /// Environment whose host name cannot be read.
    pub fn without_host() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_task_id(self, value: &str) -> Self {
        self.with_var(ARRAY_TASK_ID_VAR, value)
    }
}

impl JobEnvironment for FakeEnvironment {
    fn host_name(&self) -> Result<String, AppError> {
        self.host_name.clone().ok_or_else(|| AppError::config_error("Failed to read host name"))
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
