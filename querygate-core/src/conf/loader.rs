use crate::conf::discover::discover;
use crate::conf::lower::lower_config;
use crate::conf::parse::{parse_entrypoint, parse_policies};
use crate::conf::types::ConfigSpec;
use crate::conf::validation::{ValidatedConfig, validate_spec};
use crate::conf::ConfigError;
use std::path::Path;

pub const ENTRYPOINT_FILE: &str = "querygate.hcl";

/// Load and validate a config directory, then lower it into runtime types.
///
/// Validation errors abort loading; warnings travel with the result.
pub fn load_config(root: &Path) -> Result<ValidatedConfig, ConfigError> {
    let spec = load_spec_config(root)?;

    let validation = validate_spec(&spec);
    if !validation.errors.is_empty() {
        return Err(ConfigError::Validation { report: validation });
    }

    let config = lower_config(spec)?;

    Ok(ValidatedConfig { config, validation })
}

pub fn load_spec_config(root: &Path) -> Result<ConfigSpec, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let entrypoint = parse_entrypoint(&root.join(ENTRYPOINT_FILE))?;

    //--------------------------------------------------------------------------
    // Discover and parse policy files (hard fail)
    //--------------------------------------------------------------------------
    let policy_files = match &entrypoint.include.policies {
        Some(pattern) => discover(root, pattern)?,
        None => Vec::new(),
    };

    let mut policies = Vec::new();
    for path in &policy_files {
        policies.extend(parse_policies(path)?);
    }

    tracing::debug!(
        root = %root.display(),
        policy_files = policy_files.len(),
        policies = policies.len(),
        "config files parsed"
    );

    Ok(ConfigSpec {
        entrypoint,
        policy_files,
        policies,
    })
}
