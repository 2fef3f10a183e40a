use std::fs;
use std::path::PathBuf;

use crate::domain::AppError;
use crate::ports::{DefinitionFile, JobDefinitionSource};

/// Job definitions read from `*.toml` files in a directory (not recursive).
#[derive(Debug, Clone)]
pub struct DirectoryJobDefinitions {
    root: PathBuf,
}

impl DirectoryJobDefinitions {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl JobDefinitionSource for DirectoryJobDefinitions {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn definitions(&self) -> Result<Vec<DefinitionFile>, AppError> {
        if !self.root.is_dir() {
            return Err(AppError::config_error(format!(
                "Jobs directory not found: {}",
                self.root.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .into_iter()
            .map(|path| {
                let content = fs::read_to_string(&path)?;
                Ok(DefinitionFile { origin: path.display().to_string(), content })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_only_toml_files_in_sorted_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.toml"), "b").unwrap();
        fs::write(dir.path().join("a.toml"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.toml")).unwrap();

        let files = DirectoryJobDefinitions::new(dir.path().to_path_buf()).definitions().unwrap();
        let contents: Vec<&str> = files.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b"]);
        assert!(files[0].origin.ends_with("a.toml"));
    }

    #[test]
    fn missing_directory_is_a_configuration_error() {
        let dir = tempdir().unwrap();
        let source = DirectoryJobDefinitions::new(dir.path().join("absent"));
        assert!(matches!(source.definitions(), Err(AppError::Configuration(_))));
    }
}
