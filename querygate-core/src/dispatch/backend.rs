use crate::dispatch::{DispatchError, HistogramResponse, LogsResponse, QueryRequest};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// The log-analytics API that admitted queries are sent to.
///
/// Implementations must return [`DispatchError::Cancelled`] promptly once
/// `cancel` fires.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn search(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<LogsResponse, DispatchError>;

    async fn histogram(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<HistogramResponse, DispatchError>;
}
