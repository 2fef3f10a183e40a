use std::env;

use crate::domain::AppError;
use crate::ports::JobEnvironment;

/// Reads the real process environment and host name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl JobEnvironment for SystemEnvironment {
    fn host_name(&self) -> Result<String, AppError> {
        let raw = hostname::get().map_err(|e| {
            AppError::config_error(format!("Failed to read host name: {}", e))
        })?;
        raw.into_string()
            .map_err(|_| AppError::config_error("Host name is not valid UTF-8"))
    }

    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::ports::ARRAY_TASK_ID_VAR;

    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let original = env::var(key).ok();
            unsafe {
                env::set_var(key, value);
            }
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            unsafe {
                match &self.original {
                    Some(value) => env::set_var(self.key, value),
                    None => env::remove_var(self.key),
                }
            }
        }
    }

    #[test]
    fn host_name_is_not_empty() {
        assert!(!SystemEnvironment::new().host_name().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn reads_array_task_id() {
        let _guard = EnvGuard::set(ARRAY_TASK_ID_VAR, " 17 ");
        assert_eq!(SystemEnvironment::new().array_task_id().unwrap(), Some(17));
    }

    #[test]
    #[serial]
    fn rejects_non_numeric_array_task_id() {
        for raw in ["3-5", "+3"] {
            let _guard = EnvGuard::set(ARRAY_TASK_ID_VAR, raw);
            assert!(matches!(
                SystemEnvironment::new().array_task_id(),
                Err(AppError::InvalidArrayIndex(ref value)) if value == raw
            ));
        }
    }
}
