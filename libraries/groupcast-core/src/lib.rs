//! Groupcast Core
//!
//! Platform-agnostic domain types, session contracts, and error handling for
//! the Groupcast player panel.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `QueueEntry`, `QueueContext`, session snapshots
//! - **Core Traits**: `SessionApi`, the request/response contract of a remote
//!   playback session
//! - **Error Handling**: Unified `GroupcastError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use groupcast_core::types::{ContextType, QueueContext, QueueEntry, RepeatMode, Track};
//!
//! let track = Track::new("t1", "Blue in Green", "Bill Evans", 337)
//!     .with_source_locator("https://stream.example.com/audio/t1.flac");
//! let entry = QueueEntry::new(0, track).with_context(QueueContext::new(
//!     "p1",
//!     ContextType::Playlist,
//!     "Late Night",
//! ));
//!
//! assert_eq!(entry.track.duration_ms(), 337_000);
//! assert_eq!(RepeatMode::None.next(), RepeatMode::Context);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{GroupcastError, Result};
pub use traits::SessionApi;

pub use types::{
    ContextId, ContextType, PlaybackStatus, PlaylistId, QueueContext, QueueEntry, QueueSnapshot,
    RepeatMode, SessionId, SessionSnapshot, ShuffleMode, Track, TrackId, TransportAck,
};
