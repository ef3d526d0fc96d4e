use crate::admission::{DEFAULT_BYPASS_TOKEN, GRACE_SECONDS, Locale};
use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};

/// Represents the top-level `querygate.hcl` file.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntrypointSpec {
    #[serde(skip)]
    pub origin: Origin,

    // Configuration schema version
    pub version: u32,

    pub backend: BackendSpec,

    #[serde(default)]
    pub admission: AdmissionSpec,

    #[serde(default)]
    pub include: IncludeSpec,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSpec {
    #[serde(skip)]
    pub origin: Origin,

    /// Base URL of the log-analytics API, including any public path prefix.
    pub base_url: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdmissionSpec {
    #[serde(skip)]
    pub origin: Origin,

    #[serde(default = "default_grace_seconds")]
    pub grace_seconds: u64,

    #[serde(default)]
    pub locale: Locale,

    //-------------------------------------------------------------------------
    // Legacy in-band bypass
    //-------------------------------------------------------------------------
    #[serde(default = "default_bypass_token")]
    pub bypass_token: String,

    #[serde(default = "default_true")]
    pub enable_bypass_token: bool,
}

impl Default for AdmissionSpec {
    fn default() -> Self {
        Self {
            origin: Origin::default(),
            grace_seconds: default_grace_seconds(),
            locale: Locale::default(),
            bypass_token: default_bypass_token(),
            enable_bypass_token: true,
        }
    }
}

/// Glob patterns, relative to the config directory, of included files.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeSpec {
    pub policies: Option<String>,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_grace_seconds() -> u64 {
    GRACE_SECONDS
}

fn default_bypass_token() -> String {
    DEFAULT_BYPASS_TOKEN.to_string()
}

fn default_true() -> bool {
    true
}
