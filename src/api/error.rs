use reqwest::{Method, StatusCode, Url};
use thiserror::Error;

/// Failures talking to the quiz API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{method} {path} returned {status}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
    },
    #[error("created question has no usable identifier")]
    MissingId,
    #[error("{0} cannot be used as an API base address")]
    BaseUrl(Url),
}

impl ApiError {
    pub fn status(method: Method, path: impl Into<String>, status: StatusCode) -> Self {
        Self::Status {
            method,
            path: path.into(),
            status,
        }
    }
}
