use std::path::PathBuf;

use serde::Serialize;

use crate::domain::host::Cluster;

/// A named argument with its final value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    pub value: String,
}

impl Argument {
    pub fn flag(&self) -> String {
        format!("--{}={}", self.name, self.value)
    }
}

/// Fully resolved external-program call for one array task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub job: String,
    pub cluster: Cluster,
    pub array_index: usize,
    pub interpreter: PathBuf,
    pub program: PathBuf,
    pub args: Vec<Argument>,
}

impl Invocation {
    /// Argument vector: interpreter, program, then `--name=value` flags in declaration order.
    pub fn command_line(&self) -> Vec<String> {
        let mut line = Vec::with_capacity(self.args.len() + 2);
        line.push(self.interpreter.to_string_lossy().into_owned());
        line.push(self.program.to_string_lossy().into_owned());
        line.extend(self.args.iter().map(Argument::flag));
        line
    }

    /// Single shell-safe line, for dry runs and logs.
    pub fn shell_line(&self) -> String {
        self.command_line().iter().map(|word| shell_quote(word)).collect::<Vec<_>>().join(" ")
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.iter().find(|arg| arg.name == name).map(|arg| arg.value.as_str())
    }
}

/// Quote a word for POSIX sh; safe words pass through unchanged.
pub(crate) fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));
    if safe { word.to_string() } else { format!("'{}'", word.replace('\'', r"'\''")) }
}
