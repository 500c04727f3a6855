/// Core error types for Groupcast
use thiserror::Error;

/// Result type alias using `GroupcastError`
pub type Result<T> = std::result::Result<T, GroupcastError>;

/// Error returned by any implementation of a remote playback session.
///
/// Transport-specific clients (HTTP today) convert their own errors into
/// this type at the `SessionApi` boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupcastError {
    /// The session does not exist (or the token does not grant access to it)
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Authentication required or rejected
    #[error("Unauthorized")]
    Unauthorized,

    /// Server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The server could not be reached
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// The server answered with a body we could not understand
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GroupcastError {
    /// Create a server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether the error means the session itself is gone.
    pub fn is_session_missing(&self) -> bool {
        matches!(self, Self::SessionNotFound(_) | Self::Unauthorized)
    }
}
