mod discover;
mod error;
mod loader;
mod lower;
mod parse;
#[cfg(test)]
mod tests;
pub mod types;
pub(crate) mod validation;

pub use error::ConfigError;
pub use loader::{ENTRYPOINT_FILE, load_config, load_spec_config};
pub use types::{ConfigSpec, RuntimeConfig};
pub use validation::{Severity, ValidatedConfig, ValidationIssue, ValidationReport};
