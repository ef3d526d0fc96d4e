use crate::admission::Rejection;
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Admission denied the query; nothing was sent.
    #[error("{0}")]
    Rejected(Rejection),

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded with status {status}")]
    Status { status: StatusCode },

    #[error("backend error {code}: {msg}")]
    Backend { code: i32, msg: String },

    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            DispatchError::Rejected(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, DispatchError::Rejected(_))
    }
}
