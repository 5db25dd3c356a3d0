use std::result::Result as StdResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("API invalid format: {0}")]
    ApiInvalidFormat(String),
    #[error("API connection failed: {0}")]
    ApiConnectionFailed(String),
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
    #[error("Malformed feed shape: {0}")]
    MalformedFeedShape(String),
    #[error("Feed transport failure: {0}")]
    TransportFailure(String),
    #[error("Token not found: {0}")]
    TokenNotFound(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl Error {
    /// True for every failure that happened while talking to the upstream feed service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::ApiError(_)
                | Error::ApiInvalidFormat(_)
                | Error::ApiConnectionFailed(_)
                | Error::RateLimitExceeded(_)
                | Error::TransportFailure(_)
                | Error::HttpError(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ApiInvalidFormat(err.to_string())
    }
}

pub type Result<T> = StdResult<T, Error>;
