use http::StatusCode;
use thiserror::Error;

/// Failures talking to the activities service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid activities service url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url} returned a body that is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Startup failures of the page host.
#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid listen address {0}")]
    Address(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
