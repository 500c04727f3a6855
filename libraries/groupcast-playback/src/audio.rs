//! Platform-agnostic audio element
//!
//! Abstracts the media element the panel plays through (a browser `<audio>`
//! tag, a desktop output stream, a simulated clock in tests). The panel owns
//! exactly one element at a time and replaces it whenever the current track
//! changes identity.

use crate::panel::PanelEvent;
use crate::transport::TransportEvent;
use groupcast_core::types::Track;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Events an element reports about itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioEvent {
    /// Enough data is buffered to start playback
    CanPlay,

    /// Playhead moved (seconds from track start)
    TimeUpdate(f64),

    /// Playback reached the natural end of the track
    Ended,

    /// The resource could not be loaded or played
    Error(String),
}

/// One loaded track
///
/// Implementations report progress through the [`AudioEventSink`] they were
/// created with, never by calling back into the panel.
pub trait AudioElement: Send {
    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead (seconds from track start)
    fn set_current_time(&mut self, seconds: f64);

    /// Set output level (0-100)
    fn set_volume(&mut self, level: u8);

    /// Stop, detach the source, and drop every listener.
    ///
    /// No event may be emitted after this returns.
    fn dispose(&mut self);
}

/// Factory for audio elements
pub trait AudioBackend: Send + Sync {
    /// Create an element bound to `track`
    ///
    /// The element starts paused at time zero.
    ///
    /// # Errors
    ///
    /// Returns a message when the track's resource cannot be opened at all.
    fn create(&self, track: &Track, sink: AudioEventSink) -> Result<Box<dyn AudioElement>, String>;
}

/// Channel handle an element reports through
///
/// Every event is tagged with the epoch of the element it came from, so
/// events from a replaced element are recognised as stale.
#[derive(Debug, Clone)]
pub struct AudioEventSink {
    epoch: u64,
    tx: UnboundedSender<PanelEvent>,
}

impl AudioEventSink {
    pub(crate) fn new(epoch: u64, tx: UnboundedSender<PanelEvent>) -> Self {
        Self { epoch, tx }
    }

    /// Epoch of the element this sink belongs to
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Report an event. Returns `false` once the panel is gone.
    pub fn emit(&self, event: AudioEvent) -> bool {
        self.tx
            .send(PanelEvent::Transport(TransportEvent::Audio {
                epoch: self.epoch,
                event,
            }))
            .is_ok()
    }
}
