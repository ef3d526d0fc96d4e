use crate::admission::Operation;
use crate::conf::types::BackendConfig;
use crate::dispatch::{
    BackendApi, DispatchError, Envelope, HistogramResponse, LogsResponse, QueryRequest,
};
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

/// [`BackendApi`] over HTTP, one `GET` per query.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(cfg: &BackendConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, operation: Operation, table_id: u64) -> Result<Url, DispatchError> {
        Ok(self.base_url.join(&format!(
            "api/v1/tables/{}/{}",
            table_id,
            operation.endpoint()
        ))?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<T, DispatchError> {
        let url = self.endpoint(operation, request.table_id)?;
        let call = self.client.get(url).query(&request.to_params()).send();

        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(DispatchError::Cancelled),
            res = read_body(call) => res?,
        };

        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        if envelope.code != 0 {
            return Err(DispatchError::Backend {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        envelope.data.ok_or_else(|| DispatchError::Backend {
            code: envelope.code,
            msg: "response carried no data".to_string(),
        })
    }
}

async fn read_body(
    call: impl Future<Output = reqwest::Result<reqwest::Response>>,
) -> Result<Bytes, DispatchError> {
    let resp = call.await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DispatchError::Status { status });
    }
    Ok(resp.bytes().await?)
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn search(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<LogsResponse, DispatchError> {
        self.get(Operation::Search, request, cancel).await
    }

    async fn histogram(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<HistogramResponse, DispatchError> {
        self.get(Operation::Histogram, request, cancel).await
    }
}
