//! Errors in the library.
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by [`BaseClient`](crate::BaseClient), [`Publisher`](crate::Publisher)
/// and [`Reader`](crate::Reader).
#[derive(Error, Debug)]
pub enum MfError {
    /// The monitoring framework did not answer the startup reachability check.
    #[error("[ error: {url} not accessible ]")]
    Unreachable {
        /// Effective URL that was checked.
        url: String,

        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The base URL could not be turned into an endpoint root.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Transport failure after the client was constructed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The payload could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload was serialized, but not into a JSON object.
    #[error("Payload must serialize to a JSON object, got {0}")]
    PayloadNotObject(String),

    /// The server answered with a status other than 200.
    #[error("Server returned status {status}: {body}")]
    Remote {
        /// HTTP status of the response.
        status: StatusCode,

        /// Response body, parsed as JSON when possible.
        body: Value,
    },

    /// The server answered 200, but the body lacked an expected field.
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}

impl MfError {
    /// HTTP status of a [`MfError::Remote`] error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a [`MfError::Remote`] error.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Remote { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type MfResult<T> = Result<T, MfError>;
