use crate::conf::ConfigError;
use crate::conf::types::{EntrypointSpec, OperationPolicySpec, Origin, PolicySpec};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub fn parse_entrypoint(path: &Path) -> Result<EntrypointSpec, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let mut parsed: EntrypointSpec = hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))?;

    //-------------------------------------------------------------------------
    // Inject origin metadata
    //-------------------------------------------------------------------------
    parsed.origin = Origin::new(path, "entrypoint", None);
    parsed.backend.origin = Origin::new(path, "backend", None);
    parsed.admission.origin = Origin::new(path, "admission", None);

    Ok(parsed)
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PoliciesFile {
    search_policy: Option<OperationPolicySpec>,
    histogram_policy: Option<OperationPolicySpec>,
}

pub fn parse_policies(path: &Path) -> Result<Vec<PolicySpec>, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let parsed: PoliciesFile = hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))?;

    let mut policies = Vec::new();

    if let Some(mut search) = parsed.search_policy {
        search.origin = Origin::new(path, "search_policy", None);
        policies.push(PolicySpec::Search(search));
    }

    if let Some(mut histogram) = parsed.histogram_policy {
        histogram.origin = Origin::new(path, "histogram_policy", None);
        policies.push(PolicySpec::Histogram(histogram));
    }

    Ok(policies)
}
