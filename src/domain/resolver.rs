//! Turn `(host name, array index)` into an [`Invocation`].

use tracing::{debug, warn};

use crate::domain::AppError;
use crate::domain::host::{Cluster, HostMatch, HostTable};
use crate::domain::invocation::{Argument, Invocation};
use crate::domain::job::{ArgValue, JobSpec};
use crate::domain::template::{PathRenderer, TemplateContext};

/// Inputs for one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest<'a> {
    pub host_name: &'a str,
    pub array_index: usize,
    /// Fail on unmatched host names instead of using the default cluster.
    pub strict_host: bool,
}

/// Resolve a job for one array task. Pure: identical inputs give identical invocations.
pub fn resolve(
    job: &JobSpec,
    hosts: &HostTable,
    request: &ResolveRequest<'_>,
) -> Result<Invocation, AppError> {
    let cluster = select_cluster(request.host_name, request.strict_host)?;
    resolve_on(job, hosts, cluster, request.array_index)
}

/// Resolve a job for an already selected cluster.
pub fn resolve_on(
    job: &JobSpec,
    hosts: &HostTable,
    cluster: Cluster,
    array_index: usize,
) -> Result<Invocation, AppError> {
    let record = job.record(array_index)?;
    let host = hosts.get(cluster);

    debug!(
        job = %job.name,
        %cluster,
        index = array_index,
        subset = record.subset.as_deref().unwrap_or("-"),
        layer = record.layer.as_deref().unwrap_or("-"),
        "resolved parameter record"
    );

    let renderer =
        PathRenderer::new(&TemplateContext::new(&job.name, cluster, array_index, host, record));

    let args = job
        .args
        .iter()
        .map(|spec| {
            let value = match &spec.value {
                ArgValue::Template(template) => {
                    renderer.render(template).map_err(|details| AppError::Template {
                        job: job.name.clone(),
                        argument: spec.name.clone(),
                        details,
                    })?
                }
                scalar => scalar.to_string(),
            };
            Ok::<_, AppError>(Argument { name: spec.name.clone(), value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Invocation {
        job: job.name.clone(),
        cluster,
        array_index,
        interpreter: host.interpreter.clone(),
        program: host.toolkit_root.join(&job.program),
        args,
    })
}

fn select_cluster(host_name: &str, strict: bool) -> Result<Cluster, AppError> {
    match Cluster::classify(host_name) {
        HostMatch::Matched(cluster) => Ok(cluster),
        HostMatch::Fallback(_) if strict => Err(AppError::HostUnrecognized(host_name.to_string())),
        HostMatch::Fallback(cluster) => {
            warn!(host = host_name, %cluster, "host matched no cluster; using default");
            Ok(cluster)
        }
    }
}
