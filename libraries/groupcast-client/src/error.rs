//! Error types for the Groupcast session client.

use groupcast_core::GroupcastError;
use thiserror::Error;

/// Errors that can occur when talking to a Groupcast server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required or token rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No session configured, or the server does not know it
    #[error("Playback session missing: {0}")]
    SessionMissing(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<ClientError> for GroupcastError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) if e.is_timeout() => GroupcastError::Timeout,
            ClientError::Request(e) => GroupcastError::Unreachable(e.to_string()),
            ClientError::ServerError { status, message } => GroupcastError::server(status, message),
            ClientError::AuthRequired => GroupcastError::Unauthorized,
            ClientError::InvalidUrl(msg) | ClientError::ServerUnreachable(msg) => {
                GroupcastError::Unreachable(msg)
            }
            ClientError::ParseError(msg) => GroupcastError::InvalidResponse(msg),
            ClientError::SessionMissing(id) => GroupcastError::SessionNotFound(id),
            ClientError::Timeout => GroupcastError::Timeout,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
