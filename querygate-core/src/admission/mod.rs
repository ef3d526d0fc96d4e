mod decision;
mod descriptor;
mod guard;
mod messages;
mod operation;
mod policy;

pub use decision::{AdmitReason, BypassSource, Decision, Rejection, RejectionKind};
pub use descriptor::QueryDescriptor;
pub use guard::AdmissionGuard;
pub use messages::Locale;
pub use operation::Operation;
pub use policy::{
    DEFAULT_BYPASS_TOKEN, DEFAULT_PATTERN_TRIGGER, GRACE_SECONDS, OperationPolicy, PatternRule,
    PolicyTable, WidthRule, WindowLimit,
};
