use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The query operations that pass through admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Search,
    Histogram,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Search, Operation::Histogram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::Histogram => "histogram",
        }
    }

    /// Path segment of the backend endpoint serving this operation.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Search => "logs",
            Operation::Histogram => "charts",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" | "logs" => Ok(Self::Search),
            "histogram" | "charts" => Ok(Self::Histogram),
            _ => Err(anyhow::anyhow!("invalid operation: {}", s)),
        }
    }
}
