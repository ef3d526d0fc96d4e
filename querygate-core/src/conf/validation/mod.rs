mod report;
mod validate;
mod validated_config;

pub use report::*;
pub use validate::*;
pub use validated_config::ValidatedConfig;
