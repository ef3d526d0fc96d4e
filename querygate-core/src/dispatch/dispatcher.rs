use crate::admission::{AdmissionGuard, Decision, Operation};
use crate::dispatch::{
    BackendApi, DispatchError, HistogramResponse, LogsResponse, QueryRequest, RequestId,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Runs admission in front of the backend.
///
/// A rejected query returns [`DispatchError::Rejected`] and the backend is
/// never called.
#[derive(Clone)]
pub struct QueryDispatcher {
    guard: AdmissionGuard,
    backend: Arc<dyn BackendApi>,
}

impl QueryDispatcher {
    pub fn new(guard: AdmissionGuard, backend: Arc<dyn BackendApi>) -> Self {
        Self { guard, backend }
    }

    pub async fn search(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<LogsResponse, DispatchError> {
        let request_id = self.admit(Operation::Search, request)?;
        let started = Instant::now();

        let result = self.backend.search(request, cancel).await;
        log_outcome(&request_id, Operation::Search, request, started, &result);
        result
    }

    pub async fn histogram(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<HistogramResponse, DispatchError> {
        let request_id = self.admit(Operation::Histogram, request)?;
        let started = Instant::now();

        let result = self.backend.histogram(request, cancel).await;
        log_outcome(&request_id, Operation::Histogram, request, started, &result);
        result
    }

    fn admit(
        &self,
        operation: Operation,
        request: &QueryRequest,
    ) -> Result<RequestId, DispatchError> {
        let request_id = RequestId::default();
        let descriptor = request.descriptor(operation);

        match self.guard.evaluate(&descriptor) {
            Decision::Admit(reason) => {
                tracing::debug!(
                    request_id = %request_id,
                    operation = %operation,
                    table_id = request.table_id,
                    width = descriptor.width(),
                    reason = %reason,
                    "query admitted"
                );
                Ok(request_id)
            }
            Decision::Reject(rejection) => {
                tracing::info!(
                    request_id = %request_id,
                    operation = %operation,
                    table_id = request.table_id,
                    width = rejection.width_seconds,
                    max_width = ?rejection.max_width_seconds,
                    "query rejected: {}",
                    rejection.message
                );
                Err(DispatchError::Rejected(rejection))
            }
        }
    }
}

fn log_outcome<T>(
    request_id: &RequestId,
    operation: Operation,
    request: &QueryRequest,
    started: Instant,
    result: &Result<T, DispatchError>,
) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(_) => tracing::debug!(
            request_id = %request_id,
            operation = %operation,
            table_id = request.table_id,
            elapsed_ms,
            "query dispatched"
        ),
        Err(DispatchError::Cancelled) => tracing::info!(
            request_id = %request_id,
            operation = %operation,
            table_id = request.table_id,
            elapsed_ms,
            "query cancelled"
        ),
        Err(err) => tracing::warn!(
            request_id = %request_id,
            operation = %operation,
            table_id = request.table_id,
            elapsed_ms,
            error = %err,
            "query failed"
        ),
    }
}
