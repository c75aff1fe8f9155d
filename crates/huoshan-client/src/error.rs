//! Client error types.

use huoshan_core::{AuthError, SettingsError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from building or sending Huoshan API requests.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No credential was given and none could be resolved.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Connection settings were rejected.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A credential field cannot be sent as an HTTP header.
    #[error("Credential field '{field}' is not a valid header value")]
    InvalidHeader {
        /// Which credential field was rejected
        field: &'static str,
    },

    /// API request failed with an HTTP error status.
    #[error("Huoshan API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body, as returned by the server
        body: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
