//! Array-index to parameter-record mapping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Labels selected by one array index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_label: Option<String>,
}

/// How parameter lists combine into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Lists are parallel; record `i` takes element `i` of each.
    #[default]
    Positional,
    /// Subsets crossed with layers; the layer varies fastest.
    Product,
}

/// Parameter lists as written in a job definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDefinition {
    #[serde(default)]
    pub mode: IndexMode,
    #[serde(default)]
    pub subset: Vec<String>,
    #[serde(default)]
    pub layer: Vec<String>,
    #[serde(default)]
    pub layer_label: Vec<String>,
    /// Restricts which record positions may be scheduled.
    #[serde(default)]
    pub indices: Option<Vec<usize>>,
}

/// Why an index lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    OutOfRange { len: usize },
    NotScheduled,
}

/// Validated, fully expanded parameter records for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterTable {
    mode: IndexMode,
    records: Vec<ParameterRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indices: Option<Vec<usize>>,
}

impl ParameterTable {
    /// Expand a definition into records, checking list lengths and index restrictions.
    pub fn build(job: &str, definition: ParameterDefinition) -> Result<Self, AppError> {
        let records = match definition.mode {
            IndexMode::Positional => expand_positional(job, &definition)?,
            IndexMode::Product => expand_product(job, &definition)?,
        };

        if records.is_empty() {
            return Err(AppError::EmptyParameterTable(job.to_string()));
        }

        if let Some(indices) = &definition.indices {
            check_indices(job, indices, records.len())?;
        }

        Ok(Self { mode: definition.mode, records, indices: definition.indices })
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Result<&ParameterRecord, LookupError> {
        let record =
            self.records.get(index).ok_or(LookupError::OutOfRange { len: self.records.len() })?;
        match &self.indices {
            Some(indices) if !indices.contains(&index) => Err(LookupError::NotScheduled),
            _ => Ok(record),
        }
    }

    /// Positions that may be submitted, in declaration order.
    pub fn schedulable_indices(&self) -> Vec<usize> {
        match &self.indices {
            Some(indices) => indices.clone(),
            None => (0..self.records.len()).collect(),
        }
    }

    /// Value for the scheduler's `--array` directive.
    pub fn array_spec(&self) -> String {
        match &self.indices {
            Some(indices) => {
                indices.iter().map(|index| index.to_string()).collect::<Vec<_>>().join(",")
            }
            None if self.records.len() == 1 => "0".to_string(),
            None => format!("0-{}", self.records.len() - 1),
        }
    }
}

fn expand_positional(
    job: &str,
    definition: &ParameterDefinition,
) -> Result<Vec<ParameterRecord>, AppError> {
    let lists: Vec<(&'static str, &Vec<String>)> = [
        ("subset", &definition.subset),
        ("layer", &definition.layer),
        ("layer_label", &definition.layer_label),
    ]
    .into_iter()
    .filter(|(_, values)| !values.is_empty())
    .collect();

    let Some(&(reference, first)) = lists.first() else {
        return Ok(Vec::new());
    };

    for &(field, values) in &lists[1..] {
        if values.len() != first.len() {
            return Err(AppError::ParameterLengthMismatch {
                job: job.to_string(),
                field,
                reference,
                expected: first.len(),
                actual: values.len(),
            });
        }
    }

    let records = (0..first.len())
        .map(|i| ParameterRecord {
            subset: definition.subset.get(i).cloned(),
            layer: definition.layer.get(i).cloned(),
            layer_label: definition.layer_label.get(i).cloned(),
        })
        .collect();
    Ok(records)
}

fn expand_product(
    job: &str,
    definition: &ParameterDefinition,
) -> Result<Vec<ParameterRecord>, AppError> {
    if definition.subset.is_empty() || definition.layer.is_empty() {
        return Err(AppError::invalid_job(
            job,
            "product mode requires non-empty 'subset' and 'layer' lists",
        ));
    }
    if !definition.layer_label.is_empty() && definition.layer_label.len() != definition.layer.len()
    {
        return Err(AppError::ParameterLengthMismatch {
            job: job.to_string(),
            field: "layer_label",
            reference: "layer",
            expected: definition.layer.len(),
            actual: definition.layer_label.len(),
        });
    }

    let mut records = Vec::with_capacity(definition.subset.len() * definition.layer.len());
    for subset in &definition.subset {
        for (position, layer) in definition.layer.iter().enumerate() {
            records.push(ParameterRecord {
                subset: Some(subset.clone()),
                layer: Some(layer.clone()),
                layer_label: definition.layer_label.get(position).cloned(),
            });
        }
    }
    Ok(records)
}

fn check_indices(job: &str, indices: &[usize], len: usize) -> Result<(), AppError> {
    if indices.is_empty() {
        return Err(AppError::invalid_job(job, "'indices' must not be empty when present"));
    }

    let mut seen = BTreeSet::new();
    for &index in indices {
        if index >= len {
            return Err(AppError::invalid_job(
                job,
                format!("scheduled index {} is outside the {} parameter records", index, len),
            ));
        }
        if !seen.insert(index) {
            return Err(AppError::invalid_job(job, format!("scheduled index {} is repeated", index)));
        }
    }
    Ok(())
}
