use crate::admission::Operation;
use std::fmt;

/// Outcome of evaluating one query against the policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admit(AdmitReason),
    Reject(Rejection),
}

impl Decision {
    pub fn is_admit(&self) -> bool {
        matches!(self, Decision::Admit(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Decision::Admit(_) => None,
            Decision::Reject(r) => Some(r),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitReason {
    /// No query text, or the window is not bounded on both ends.
    Unfiltered,
    /// Width checking was switched off for this call.
    Bypass(BypassSource),
    /// Admission is disabled for the operation.
    PolicyDisabled,
    WithinLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassSource {
    /// The caller holds the explicit unbounded-window capability.
    Capability,
    /// The query text carries the legacy in-band token.
    LegacyToken,
}

impl fmt::Display for AdmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmitReason::Unfiltered => f.write_str("unfiltered"),
            AdmitReason::Bypass(BypassSource::Capability) => f.write_str("bypass (capability)"),
            AdmitReason::Bypass(BypassSource::LegacyToken) => f.write_str("bypass (legacy token)"),
            AdmitReason::PolicyDisabled => f.write_str("policy disabled"),
            AdmitReason::WithinLimit => f.write_str("within limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    /// The query matched a pattern rule.
    Pattern { trigger: String },
    /// The query fell through to the default rule.
    Default,
    /// `end_time` precedes `start_time`.
    InvertedWindow,
}

/// A deliberate business-rule denial, returned to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub operation: Operation,
    pub kind: RejectionKind,
    pub width_seconds: i64,
    pub max_width_seconds: Option<i64>,
    pub message: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
