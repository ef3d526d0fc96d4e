use crate::admission::{
    AdmitReason, BypassSource, Decision, PolicyTable, QueryDescriptor, Rejection, RejectionKind,
};
use std::sync::Arc;

/// Decides whether a query may reach the backend.
///
/// The guard holds no mutable state. Clones share the same read-only
/// [`PolicyTable`], so any number of callers may evaluate concurrently.
#[derive(Debug, Clone)]
pub struct AdmissionGuard {
    table: Arc<PolicyTable>,
}

impl Default for AdmissionGuard {
    fn default() -> Self {
        Self::new(Arc::new(PolicyTable::production()))
    }
}

impl AdmissionGuard {
    pub fn new(table: Arc<PolicyTable>) -> Self {
        Self { table }
    }

    /// Evaluation order...
    /// 1. Untimed or unfiltered queries
    /// 2. Disabled rows
    /// 3. Bypass (capability, then legacy token)
    /// 4. Inverted windows
    /// 5. First matching width rule
    pub fn evaluate(&self, descriptor: &QueryDescriptor) -> Decision {
        let Some(query) = descriptor.normalized_query() else {
            return Decision::Admit(AdmitReason::Unfiltered);
        };
        if !descriptor.is_time_bounded() {
            return Decision::Admit(AdmitReason::Unfiltered);
        }

        let operation = descriptor.operation();
        let row = self.table.row(operation);
        if !row.enabled {
            return Decision::Admit(AdmitReason::PolicyDisabled);
        }

        if descriptor.unbounded_window() {
            return Decision::Admit(AdmitReason::Bypass(BypassSource::Capability));
        }

        if let Some(token) = self.table.bypass_token()
            && query.contains(token)
        {
            tracing::warn!(
                operation = %operation,
                width = descriptor.width(),
                "admission bypassed through legacy in-band token"
            );
            return Decision::Admit(AdmitReason::Bypass(BypassSource::LegacyToken));
        }

        let width = descriptor.width();
        if width < 0 {
            return Decision::Reject(Rejection {
                operation,
                kind: RejectionKind::InvertedWindow,
                width_seconds: width,
                max_width_seconds: None,
                message: self
                    .table
                    .locale()
                    .inverted_window(descriptor.start_time(), descriptor.end_time()),
            });
        }

        let pattern = row.matching_pattern(query);
        let rule = pattern.map(|p| &p.width).unwrap_or(&row.default_rule);

        if rule.exceeded_by(width) {
            let kind = match pattern {
                Some(p) => RejectionKind::Pattern {
                    trigger: p.trigger.clone(),
                },
                None => RejectionKind::Default,
            };
            return Decision::Reject(Rejection {
                operation,
                kind,
                width_seconds: width,
                max_width_seconds: Some(rule.max_width_seconds),
                message: rule.rejection_message.clone(),
            });
        }

        Decision::Admit(AdmitReason::WithinLimit)
    }
}
