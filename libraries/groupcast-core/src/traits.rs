/// Core traits for Groupcast
use crate::error::Result;
use crate::types::{
    ContextId, QueueSnapshot, RepeatMode, SessionId, SessionSnapshot, ShuffleMode, TransportAck,
};
use async_trait::async_trait;

/// Request/response contract of one remote playback session.
///
/// Every method addresses the session the implementation was bound to at
/// construction. Implementations must bound each call with a timeout and
/// report expiry as [`GroupcastError::Timeout`](crate::GroupcastError::Timeout).
///
/// Nothing here mutates client state: callers adopt the returned values as
/// ground truth.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Session this API is bound to
    fn session_id(&self) -> &SessionId;

    /// Look up the session's transport state
    async fn get_session(&self) -> Result<SessionSnapshot>;

    /// Force position to zero and status to stopped
    async fn stop(&self) -> Result<TransportAck>;

    /// Resume playback
    async fn play(&self) -> Result<TransportAck>;

    /// Pause playback
    async fn pause(&self) -> Result<TransportAck>;

    /// Advance to the next entry; the ack carries the new position
    async fn next(&self) -> Result<TransportAck>;

    /// Go back to the previous entry; the ack carries the new position
    async fn previous(&self) -> Result<TransportAck>;

    /// Jump to an absolute queue index
    async fn play_track(&self, queue_position: usize) -> Result<TransportAck>;

    /// Absolute seek within the current track
    async fn seek(&self, position_ms: u64) -> Result<TransportAck>;

    /// Set session volume (0-100)
    async fn set_volume(&self, volume: u8) -> Result<TransportAck>;

    /// Set repeat mode
    async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<TransportAck>;

    /// Set session-wide shuffle mode
    async fn set_shuffle_mode(&self, mode: ShuffleMode) -> Result<TransportAck>;

    /// Fetch the ordered queue and the active position
    async fn get_queue(&self) -> Result<QueueSnapshot>;

    /// Append music ids (tracks or playlists, expanded server-side)
    async fn append_to_queue(&self, music_ids: &[String]) -> Result<()>;

    /// Remove the entry at `position`, together with its whole context when
    /// it belongs to a playlist or album
    async fn remove_from_queue(&self, position: usize) -> Result<()>;

    /// Empty the queue
    async fn clear_queue(&self) -> Result<()>;

    /// Shuffle the tracks of one context
    async fn shuffle_context(&self, context_id: &ContextId) -> Result<()>;

    /// Restore the original order of one context
    async fn unshuffle_context(&self, context_id: &ContextId) -> Result<()>;
}
