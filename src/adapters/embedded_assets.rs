use include_dir::{Dir, include_dir};

use crate::domain::{AppError, HostTable};
use crate::ports::{DefinitionFile, JobDefinitionSource};

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

const HOSTS_FILE: &str = "hosts.toml";
const JOBS_DIR: &str = "jobs";
const BATCH_SCRIPT_TEMPLATE: &str = "batch_script.sh.j2";

fn asset_content(path: &str) -> Result<&'static str, AppError> {
    ASSETS_DIR
        .get_file(path)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::InternalError(format!("Missing embedded asset: {}", path)))
}

/// Built-in host environments for every cluster.
pub fn builtin_host_table() -> Result<HostTable, AppError> {
    HostTable::parse_toml(asset_content(HOSTS_FILE)?)
}

/// Source of the batch-script template.
pub fn batch_script_template() -> Result<&'static str, AppError> {
    asset_content(BATCH_SCRIPT_TEMPLATE)
}

/// Job definitions compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedJobDefinitions;

impl EmbeddedJobDefinitions {
    pub fn new() -> Self {
        Self
    }
}

impl JobDefinitionSource for EmbeddedJobDefinitions {
    fn describe(&self) -> String {
        "built-in jobs".to_string()
    }

    fn definitions(&self) -> Result<Vec<DefinitionFile>, AppError> {
        let dir = ASSETS_DIR
            .get_dir(JOBS_DIR)
            .ok_or_else(|| AppError::InternalError("Missing embedded jobs directory".into()))?;

        let mut files: Vec<DefinitionFile> = dir
            .files()
            .filter(|file| file.path().extension().is_some_and(|ext| ext == "toml"))
            .map(|file| {
                let origin = format!("builtin:{}", file.path().display());
                let content = file.contents_utf8().ok_or_else(|| {
                    AppError::InternalError(format!("Embedded job {} is not UTF-8", origin))
                })?;
                Ok(DefinitionFile { origin, content: content.to_string() })
            })
            .collect::<Result<_, AppError>>()?;

        files.sort_by(|a, b| a.origin.cmp(&b.origin));
        Ok(files)
    }
}
