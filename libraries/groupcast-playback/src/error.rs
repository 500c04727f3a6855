//! Error types for the player panel

use crate::transport::RemoteCommand;
use groupcast_core::types::{ContextId, TrackId};
use groupcast_core::GroupcastError;
use thiserror::Error;

/// Panel errors
///
/// Every remote failure is converted into one of these at the command
/// boundary; none of them is fatal except `SessionMissing`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// No usable session at mount
    #[error("Playback session missing: {0}")]
    SessionMissing(String),

    /// play/pause/seek/next/previous/play-track (or a session setting) failed
    #[error("{command} failed: {source}")]
    TransportCommandFailed {
        command: RemoteCommand,
        source: GroupcastError,
    },

    /// add/remove/clear failed; the queue view was not changed
    #[error("Queue {operation} failed: {source}")]
    QueueMutationFailed {
        operation: &'static str,
        source: GroupcastError,
    },

    /// The server queue has a context split into non-adjacent runs
    #[error("Malformed queue: context {context_id} appears in non-adjacent runs")]
    MalformedQueue { context_id: ContextId },

    /// The audio element could not load or play the current track
    #[error("Cannot play track {track_id}: {message}")]
    AudioPlayback { track_id: TrackId, message: String },

    /// Refetching the queue failed
    #[error("Queue refresh failed: {0}")]
    QueueRefreshFailed(GroupcastError),
}

impl PanelError {
    /// Whether the panel can keep running after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SessionMissing(_))
    }
}

/// Result type for panel operations
pub type Result<T> = std::result::Result<T, PanelError>;
