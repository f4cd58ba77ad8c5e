use thiserror::Error;

/// Everything that can go wrong while talking to the LogHub API.
///
/// All variants surface to the user as one generic message; the specific
/// cause only goes to the diagnostic log.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("log event {0} not found")]
    NotFound(String),

    #[error("malformed response body: {0}")]
    Decode(String),
}
