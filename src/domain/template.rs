//! Path templating for job arguments.
//!
//! Templates are minijinja expressions such as
//! `{{ model_dir }}/testing/{{ subset }}/gradcam_{{ layer }}.p`. Rendering is strict: a
//! placeholder that is unknown, or that the selected parameter record does not carry, is an
//! error rather than an empty string.

use minijinja::{Environment, UndefinedBehavior, Value};
use serde::Serialize;

use crate::domain::host::{Cluster, HostEnvironment};
use crate::domain::parameters::ParameterRecord;

/// Values a template may reference.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub job: String,
    pub cluster: String,
    pub index: usize,
    pub example_dir: String,
    pub model_dir: String,
    pub interpreter: String,
    pub toolkit_root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_label: Option<String>,
}

impl TemplateContext {
    pub fn new(
        job: &str,
        cluster: Cluster,
        index: usize,
        host: &HostEnvironment,
        record: &ParameterRecord,
    ) -> Self {
        Self {
            job: job.to_string(),
            cluster: cluster.name().to_string(),
            index,
            example_dir: host.example_dir.to_string_lossy().into_owned(),
            model_dir: host.model_dir.to_string_lossy().into_owned(),
            interpreter: host.interpreter.to_string_lossy().into_owned(),
            toolkit_root: host.toolkit_root.to_string_lossy().into_owned(),
            subset: record.subset.clone(),
            layer: record.layer.clone(),
            layer_label: record.layer_label.clone(),
        }
    }
}

/// Renders argument templates against a [`TemplateContext`].
pub struct PathRenderer {
    env: Environment<'static>,
    ctx: Value,
}

impl PathRenderer {
    pub fn new(context: &TemplateContext) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env, ctx: Value::from_serialize(context) }
    }

    /// Render one template and collapse repeated path separators.
    pub fn render(&self, template: &str) -> Result<String, String> {
        let rendered = self.env.render_str(template, &self.ctx).map_err(|e| e.to_string())?;
        Ok(collapse_separators(&rendered))
    }
}

/// Replace every run of `/` with a single `/`, except a run directly after `:` so URL
/// schemes such as `gs://` survive.
pub fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous: Option<char> = None;
    let mut after_colon = false;
    for ch in path.chars() {
        if ch == '/' {
            if previous != Some('/') {
                after_colon = previous == Some(':');
                out.push(ch);
            } else if after_colon {
                out.push(ch);
            }
        } else {
            out.push(ch);
        }
        previous = Some(ch);
    }
    out
}
