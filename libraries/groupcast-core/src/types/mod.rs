mod ids;
mod queue;
mod session;
mod track;

pub use ids::{ContextId, PlaylistId, SessionId, TrackId};
pub use queue::{ContextType, QueueContext, QueueEntry, QueueSnapshot};
pub use session::{
    PlaybackStatus, RepeatMode, SessionSnapshot, ShuffleMode, TransportAck,
};
pub use track::Track;
