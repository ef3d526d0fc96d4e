use crate::admission::PolicyTable;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Validated, lowered configuration used at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    pub backend: BackendConfig,
    pub policy: PolicyTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackendConfig {
    /// Always ends with `/` so endpoint paths join beneath it.
    pub base_url: Url,
    pub timeout_seconds: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
