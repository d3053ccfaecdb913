use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection, TLS, timeout or body read failure, or a client that could
    /// not be built.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// 401 or 403: missing scope, or the thing belongs to someone else.
    #[error("not authorized ({status}) for {url}")]
    Authorization { status: StatusCode, url: String },
    #[error("unexpected status {status} from {url}")]
    HttpStatus { status: StatusCode, url: String },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
