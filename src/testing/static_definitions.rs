use crate::domain::AppError;
use crate::ports::{DefinitionFile, JobDefinitionSource};

/// In-memory job definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticDefinitions {
    name: String,
    files: Vec<DefinitionFile>,
}

impl StaticDefinitions {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), files: Vec::new() }
    }

    pub fn with(mut self, origin: &str, content: &str) -> Self {
        self.files.push(DefinitionFile { origin: origin.to_string(), content: content.to_string() });
        self
    }
}

impl JobDefinitionSource for StaticDefinitions {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn definitions(&self) -> Result<Vec<DefinitionFile>, AppError> {
        Ok(self.files.clone())
    }
}
