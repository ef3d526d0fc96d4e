use querygate_core::admission::{AdmissionGuard, PolicyTable};
use querygate_core::conf::types::BackendConfig;
use querygate_core::dispatch::{HttpBackend, QueryDispatcher};
use std::sync::Arc;
use url::Url;

/// Backend config pointing at `base_url`, which must end with `/`.
pub fn backend_config(base_url: &str, timeout_seconds: u64) -> BackendConfig {
    BackendConfig {
        base_url: Url::parse(base_url).expect("invalid test base url"),
        timeout_seconds,
    }
}

/// Production admission in front of a real HTTP backend.
pub fn dispatcher(cfg: &BackendConfig, table: PolicyTable) -> QueryDispatcher {
    let backend = HttpBackend::new(cfg).expect("failed to build http backend");
    QueryDispatcher::new(AdmissionGuard::new(Arc::new(table)), Arc::new(backend))
}
