use crate::domain::AppError;

/// A raw job definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionFile {
    /// Where the content came from, for error messages.
    pub origin: String,
    pub content: String,
}

/// Port for reading job definitions.
pub trait JobDefinitionSource {
    /// Human-readable name of the source.
    fn describe(&self) -> String;

    /// Every definition file in the source, in a stable order.
    fn definitions(&self) -> Result<Vec<DefinitionFile>, AppError>;
}
