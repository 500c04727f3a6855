//! Groupcast - Player Panel
//!
//! Headless playback-session synchronizer for the Groupcast dashboard.
//!
//! This crate keeps three things consistent:
//! - a local audio element (owned, swapped per track identity)
//! - a remote playback session (the single source of truth)
//! - a grouped view of the session queue (playlists/albums/bare tracks)
//!
//! # Architecture
//!
//! - [`model`]: pure flat queue ⇄ context group transform
//! - [`transport`]: reducer `(state, event) -> effects` with a two-phase
//!   issue/reconcile protocol and one in-flight slot per action
//! - [`editor`]: add/remove/clear with per-target guards, always followed
//!   by a refetch
//! - [`PlayerPanel`]: runs the effects against a [`SessionApi`] and an
//!   [`AudioBackend`]
//!
//! `groupcast-playback` has no HTTP or UI dependency: the session is reached
//! through the [`SessionApi`] trait and audio through [`AudioBackend`].
//!
//! # Example
//!
//! ```rust,no_run
//! use groupcast_playback::{AudioBackend, PanelConfig, PlayerPanel, VolumeChange};
//! use groupcast_core::SessionApi;
//! use std::sync::Arc;
//!
//! async fn run(api: Arc<dyn SessionApi>, audio: Arc<dyn AudioBackend>) {
//!     let mut panel = PlayerPanel::mount(api, audio, PanelConfig::default())
//!         .await
//!         .expect("session exists");
//!
//!     panel.play_pause();
//!     panel.set_volume(VolumeChange::Commit(40));
//!     panel.settle().await;
//!
//!     for group in panel.queue_groups() {
//!         println!("{} ({} tracks)", group.title, group.track_count);
//!     }
//!
//!     panel.unmount();
//! }
//! ```
//!
//! [`SessionApi`]: groupcast_core::SessionApi

mod audio;
pub mod editor;
mod error;
pub mod model;
mod panel;
pub mod transport;
mod volume;

// Public exports
pub use audio::{AudioBackend, AudioElement, AudioEvent, AudioEventSink};
pub use editor::{MutationOutcome, MutationTarget, QueueEditor, QueueMutation};
pub use error::{PanelError, Result};
pub use model::{build_groups, build_groups_or_singletons, flat_index_of, ContextGroup};
pub use panel::{PanelConfig, PanelEvent, PlayerPanel, VolumeChange, DEFAULT_SKIP_SECONDS};
pub use transport::{
    clamp_seek, CommandSlot, Effect, NavigationGuards, RemoteCommand, TransportController,
    TransportEvent, TransportState,
};
pub use volume::{gain_for, VolumeControl};
