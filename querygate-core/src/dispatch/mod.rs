mod backend;
mod dispatcher;
mod error;
mod http_backend;
mod request_id;
#[cfg(test)]
mod tests;
mod types;

pub use backend::BackendApi;
pub use dispatcher::QueryDispatcher;
pub use error::DispatchError;
pub use http_backend::HttpBackend;
pub use request_id::RequestId;
pub use types::*;
pub use tokio_util::sync::CancellationToken;
