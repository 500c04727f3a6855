//! Groupcast Session Client
//!
//! HTTP client library for the session-scoped Groupcast playback API.
//!
//! # Features
//!
//! - **Transport**: play, pause, stop, next, previous, play-track, absolute seek
//! - **Session settings**: volume, repeat mode, shuffle mode
//! - **Queue**: fetch, append, remove, clear, per-context shuffle
//! - Implements [`groupcast_core::SessionApi`], so the player panel can drive
//!   it directly
//!
//! # Example
//!
//! ```ignore
//! use groupcast_client::{ClientConfig, GroupcastClient, StaticToken};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://groupcast.example.com")
//!         .with_session("living-room")
//!         .with_tokens(Arc::new(StaticToken::new("secret")));
//!     let client = GroupcastClient::new(config)?;
//!
//!     let session = client.session()?;
//!     let state = session.session().await?;
//!     println!("{} at {}ms", state.playback_status, state.position_ms);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod session;
mod types;

// Re-export main types
pub use client::GroupcastClient;
pub use error::{ClientError, Result};
pub use session::SessionClient;
pub use types::{
    stream_locator, ClientConfig, QueueResponse, ServerContext, ServerMusic, ServerQueueEntry,
    SessionResponse, StaticToken, TokenProvider,
};
