use crate::conf::types::RuntimeConfig;
use crate::conf::validation::ValidationReport;

#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: RuntimeConfig,
    /// Warnings only; errors abort loading.
    pub validation: ValidationReport,
}
