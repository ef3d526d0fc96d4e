mod entrypoint;
mod origin;
mod policy;
mod runtime;

pub use entrypoint::*;
pub use origin::Origin;
pub use policy::*;
pub use runtime::*;

use serde::Serialize;
use std::path::PathBuf;

/// Everything read from a config directory, before validation.
#[derive(Debug, Serialize)]
pub struct ConfigSpec {
    pub entrypoint: EntrypointSpec,
    /// Policy files matched by `include.policies`, sorted.
    pub policy_files: Vec<PathBuf>,
    pub policies: Vec<PolicySpec>,
}
