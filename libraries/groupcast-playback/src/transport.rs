//! Transport state machine
//!
//! [`TransportController`] decides what should be audible and which remote
//! command is in flight. It never performs I/O: every input is a
//! [`TransportEvent`] and every output is a list of [`Effect`]s the panel
//! executes (send a request, swap the audio element, move the playhead).
//!
//! Each remote command goes through two phases:
//!
//! 1. **Issue**: claim the command's slot and emit [`Effect::Send`]. Nothing
//!    about the session is assumed yet.
//! 2. **Reconcile**: on [`TransportEvent::CommandSucceeded`] adopt what the
//!    server reported (new queue position, status, mode) and only then touch
//!    the element. On [`TransportEvent::CommandFailed`] keep the previous
//!    state and report.
//!
//! ```text
//!            QueueSynced / nav ack           CanPlay
//!   Idle ───────────────────────▶ Loading ───────────▶ Playing ◀──▶ Paused
//!    ▲                                                   │  ▲         │
//!    │ Ended (no next)                             seek  ▼  │ ack     │
//!    └────────────────────────────────────────────── Seeking ◀────────┘
//! ```

use crate::audio::AudioEvent;
use crate::error::PanelError;
use crate::volume::VolumeControl;
use groupcast_core::types::{
    ContextId, PlaybackStatus, QueueSnapshot, RepeatMode, SessionSnapshot, ShuffleMode, Track,
    TransportAck,
};
use groupcast_core::{GroupcastError, SessionApi};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Local transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    /// No track loaded
    #[default]
    Idle,

    /// Element created, waiting for it to become playable
    Loading,

    /// Element playing
    Playing,

    /// Element paused
    Paused,

    /// Absolute seek in flight; returns to playing or paused afterwards
    Seeking {
        /// Whether playback was running when the seek started
        resume_playing: bool,
    },
}

/// One in-flight slot per logical action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandSlot {
    /// Play and pause share a slot
    PlayPause,
    /// User "next" and end-of-track share a slot
    Next,
    Previous,
    PlayTrack,
    Seek,
    Volume,
    Repeat,
    Shuffle,
    /// Per-context shuffle toggles are independent of each other
    ContextShuffle(ContextId),
}

/// Remote transport command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    Play,
    Pause,
    Next,
    Previous,
    PlayTrack { queue_position: usize },
    Seek { position_ms: u64 },
    SetVolume { volume: u8 },
    SetRepeat { mode: RepeatMode },
    SetShuffle { mode: ShuffleMode },
    ShuffleContext { context_id: ContextId },
    UnshuffleContext { context_id: ContextId },
}

impl RemoteCommand {
    /// Slot this command occupies while in flight
    pub fn slot(&self) -> CommandSlot {
        match self {
            Self::Play | Self::Pause => CommandSlot::PlayPause,
            Self::Next => CommandSlot::Next,
            Self::Previous => CommandSlot::Previous,
            Self::PlayTrack { .. } => CommandSlot::PlayTrack,
            Self::Seek { .. } => CommandSlot::Seek,
            Self::SetVolume { .. } => CommandSlot::Volume,
            Self::SetRepeat { .. } => CommandSlot::Repeat,
            Self::SetShuffle { .. } => CommandSlot::Shuffle,
            Self::ShuffleContext { context_id } | Self::UnshuffleContext { context_id } => {
                CommandSlot::ContextShuffle(context_id.clone())
            }
        }
    }

    /// Whether a successful response moves the queue position
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Next | Self::Previous | Self::PlayTrack { .. }
        )
    }

    /// Send this command to the session
    pub async fn send(&self, api: &dyn SessionApi) -> groupcast_core::Result<TransportAck> {
        match self {
            Self::Play => api.play().await,
            Self::Pause => api.pause().await,
            Self::Next => api.next().await,
            Self::Previous => api.previous().await,
            Self::PlayTrack { queue_position } => api.play_track(*queue_position).await,
            Self::Seek { position_ms } => api.seek(*position_ms).await,
            Self::SetVolume { volume } => api.set_volume(*volume).await,
            Self::SetRepeat { mode } => api.set_repeat_mode(*mode).await,
            Self::SetShuffle { mode } => api.set_shuffle_mode(*mode).await,
            Self::ShuffleContext { context_id } => api
                .shuffle_context(context_id)
                .await
                .map(|()| TransportAck::default()),
            Self::UnshuffleContext { context_id } => api
                .unshuffle_context(context_id)
                .await
                .map(|()| TransportAck::default()),
        }
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => write!(f, "play"),
            Self::Pause => write!(f, "pause"),
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "previous"),
            Self::PlayTrack { queue_position } => write!(f, "play-track {}", queue_position),
            Self::Seek { position_ms } => write!(f, "seek to {}ms", position_ms),
            Self::SetVolume { volume } => write!(f, "volume {}", volume),
            Self::SetRepeat { mode } => write!(f, "repeat {}", mode),
            Self::SetShuffle { mode } => write!(f, "shuffle {}", mode),
            Self::ShuffleContext { context_id } => write!(f, "shuffle context {}", context_id),
            Self::UnshuffleContext { context_id } => write!(f, "unshuffle context {}", context_id),
        }
    }
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// User toggled play/pause
    PlayPause,
    /// User pressed next
    Next,
    /// User pressed previous
    Previous,
    /// User picked an absolute queue index
    PlayTrack(usize),
    /// Relative skip in seconds (negative rewinds)
    SkipBy(i64),
    /// Progress bar click (0.0..=1.0 of the track)
    SeekToRatio(f64),
    /// Volume drag in progress
    VolumePreview(u8),
    /// Volume drag released
    VolumeCommit(u8),
    /// Request the next repeat mode
    CycleRepeat,
    /// Request the next session shuffle mode
    CycleShuffle,
    /// Flip the shuffle flag of one context
    ToggleContextShuffle { context_id: ContextId, enabled: bool },
    /// Event from the audio element with the given epoch
    Audio { epoch: u64, event: AudioEvent },
    /// Server acknowledged a command
    CommandSucceeded {
        command: RemoteCommand,
        ack: TransportAck,
    },
    /// A command failed or timed out
    CommandFailed {
        command: RemoteCommand,
        error: GroupcastError,
    },
    /// Authoritative queue arrived
    QueueSynced(QueueSnapshot),
    /// Authoritative session settings arrived
    SessionSynced(SessionSnapshot),
    /// The server confirmed the queue was cleared and stopped
    Cleared,
}

/// Side effect requested by the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue a remote command
    Send(RemoteCommand),
    /// Dispose the current element and create one for `track`
    LoadTrack {
        epoch: u64,
        track: Track,
        autoplay: bool,
    },
    /// Start the element
    Play,
    /// Pause the element
    Pause,
    /// Move the element's playhead (seconds)
    SetCurrentTime(f64),
    /// Set the element's output level
    SetVolume(u8),
    /// Tear down the element
    Dispose,
    /// Fetch the queue again
    RefetchQueue,
    /// Surface a non-fatal error
    Report(PanelError),
}

/// Whether previous/next controls are usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationGuards {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

/// Transport reducer
#[derive(Debug, Default)]
pub struct TransportController {
    state: TransportState,

    /// Last confirmed queue
    queue: QueueSnapshot,

    /// Track bound to the current element
    loaded: Option<Track>,

    /// Identity of the current element; bumped on every load
    epoch: u64,

    /// Start playing once the loading element can play
    autoplay: bool,

    /// Advisory playhead in seconds
    current_time: f64,

    /// Playhead to roll back to when a seek fails
    last_good_time: f64,

    repeat_mode: RepeatMode,
    shuffle_mode: ShuffleMode,
    volume: VolumeControl,

    in_flight: HashSet<CommandSlot>,
    audio_error: Option<PanelError>,
}

impl TransportController {
    /// Create an idle controller with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event, returning the effects to execute in order
    pub fn handle(&mut self, event: TransportEvent) -> Vec<Effect> {
        match event {
            TransportEvent::PlayPause => self.play_pause(),
            TransportEvent::Next => self.request_next(),
            TransportEvent::Previous => self.request_previous(),
            TransportEvent::PlayTrack(position) => self.request_play_track(position),
            TransportEvent::SkipBy(seconds) => {
                let current_ms = (self.current_time * 1000.0).round() as i64;
                self.request_seek(current_ms.saturating_add(seconds.saturating_mul(1000)))
            }
            TransportEvent::SeekToRatio(ratio) => {
                let Some(duration_ms) = self.loaded.as_ref().map(Track::duration_ms) else {
                    return Vec::new();
                };
                let ratio = if ratio.is_finite() {
                    ratio.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                self.request_seek((duration_ms as f64 * ratio).round() as i64)
            }
            TransportEvent::VolumePreview(level) => {
                vec![Effect::SetVolume(self.volume.preview(level))]
            }
            TransportEvent::VolumeCommit(level) => self.commit_volume(level),
            TransportEvent::CycleRepeat => self.issue(RemoteCommand::SetRepeat {
                mode: self.repeat_mode.next(),
            }),
            TransportEvent::CycleShuffle => self.issue(RemoteCommand::SetShuffle {
                mode: self.shuffle_mode.next(),
            }),
            TransportEvent::ToggleContextShuffle {
                context_id,
                enabled,
            } => {
                if enabled {
                    self.issue(RemoteCommand::UnshuffleContext { context_id })
                } else {
                    self.issue(RemoteCommand::ShuffleContext { context_id })
                }
            }
            TransportEvent::Audio { epoch, event } => {
                if epoch != self.epoch || self.loaded.is_none() {
                    debug!(epoch, current = self.epoch, "Ignoring stale audio event");
                    return Vec::new();
                }
                self.on_audio(event)
            }
            TransportEvent::CommandSucceeded { command, ack } => {
                self.in_flight.remove(&command.slot());
                self.on_success(command, ack)
            }
            TransportEvent::CommandFailed { command, error } => {
                self.in_flight.remove(&command.slot());
                self.on_failure(command, error)
            }
            TransportEvent::QueueSynced(queue) => self.on_queue(queue),
            TransportEvent::SessionSynced(session) => self.on_session(&session),
            TransportEvent::Cleared => {
                info!("Queue cleared, unloading");
                self.on_queue(QueueSnapshot::default())
            }
        }
    }

    /// Current local state
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Last confirmed queue
    pub fn queue(&self) -> &QueueSnapshot {
        &self.queue
    }

    /// Track at the confirmed queue position
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current().map(|entry| &entry.track)
    }

    /// Track bound to the audio element
    pub fn loaded_track(&self) -> Option<&Track> {
        self.loaded.as_ref()
    }

    /// Epoch of the current element
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the element is (or is about to resume) playing
    pub fn is_playing(&self) -> bool {
        matches!(
            self.state,
            TransportState::Playing
                | TransportState::Seeking {
                    resume_playing: true
                }
        )
    }

    /// Playhead in whole seconds, for display
    pub fn current_time_seconds(&self) -> u64 {
        self.current_time.max(0.0).round() as u64
    }

    /// Playhead in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Level the element plays at
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn shuffle_mode(&self) -> ShuffleMode {
        self.shuffle_mode
    }

    /// Error of the current track's element, if it failed
    pub fn audio_error(&self) -> Option<&PanelError> {
        self.audio_error.as_ref()
    }

    /// Whether a command of this slot is outstanding
    pub fn is_in_flight(&self, slot: &CommandSlot) -> bool {
        self.in_flight.contains(slot)
    }

    /// Previous/next availability, evaluated on confirmed state only
    pub fn navigation_guards(&self) -> NavigationGuards {
        NavigationGuards {
            previous_disabled: self.previous_blocked()
                || self.in_flight.contains(&CommandSlot::Previous),
            next_disabled: self.next_blocked() || self.in_flight.contains(&CommandSlot::Next),
        }
    }

    fn previous_blocked(&self) -> bool {
        self.queue.current().is_none() || self.queue.queue_position == 0
    }

    fn next_blocked(&self) -> bool {
        self.queue.is_empty() || (self.queue.is_at_last() && self.repeat_mode == RepeatMode::None)
    }

    fn issue(&mut self, command: RemoteCommand) -> Vec<Effect> {
        if !self.in_flight.insert(command.slot()) {
            debug!(%command, "Dropping command, same action already in flight");
            return Vec::new();
        }
        debug!(%command, "Issuing command");
        vec![Effect::Send(command)]
    }

    fn play_pause(&mut self) -> Vec<Effect> {
        if self.queue.current().is_none() {
            return Vec::new();
        }

        let wants_pause = self.is_playing() || (self.state == TransportState::Loading && self.autoplay);
        if wants_pause {
            self.issue(RemoteCommand::Pause)
        } else {
            self.issue(RemoteCommand::Play)
        }
    }

    fn request_next(&mut self) -> Vec<Effect> {
        if self.next_blocked() {
            debug!(position = self.queue.queue_position, "Next rejected by navigation guard");
            return Vec::new();
        }
        self.issue(RemoteCommand::Next)
    }

    fn request_previous(&mut self) -> Vec<Effect> {
        if self.previous_blocked() {
            debug!(position = self.queue.queue_position, "Previous rejected by navigation guard");
            return Vec::new();
        }
        self.issue(RemoteCommand::Previous)
    }

    fn request_play_track(&mut self, queue_position: usize) -> Vec<Effect> {
        if queue_position >= self.queue.len() {
            debug!(queue_position, len = self.queue.len(), "Play-track index out of range");
            return Vec::new();
        }
        self.issue(RemoteCommand::PlayTrack { queue_position })
    }

    fn request_seek(&mut self, target_ms: i64) -> Vec<Effect> {
        let Some(duration_ms) = self.loaded.as_ref().map(Track::duration_ms) else {
            return Vec::new();
        };
        let resume_playing = match self.state {
            TransportState::Playing => true,
            TransportState::Paused => false,
            _ => return Vec::new(),
        };

        let position_ms = clamp_seek(target_ms, duration_ms);
        let mut effects = self.issue(RemoteCommand::Seek { position_ms });
        if effects.is_empty() {
            return effects;
        }

        // The scrubber moves now; the ack only confirms it
        self.state = TransportState::Seeking { resume_playing };
        self.current_time = position_ms as f64 / 1000.0;
        effects.insert(0, Effect::SetCurrentTime(self.current_time));
        effects
    }

    fn commit_volume(&mut self, level: u8) -> Vec<Effect> {
        if self.in_flight.contains(&CommandSlot::Volume) {
            return vec![Effect::SetVolume(self.volume.hold(level))];
        }

        let level = self.volume.preview(level);
        let mut effects = vec![Effect::SetVolume(level)];
        effects.extend(self.issue(RemoteCommand::SetVolume { volume: level }));
        effects
    }

    fn on_audio(&mut self, event: AudioEvent) -> Vec<Effect> {
        match event {
            AudioEvent::CanPlay => {
                if self.state != TransportState::Loading {
                    return Vec::new();
                }
                if self.autoplay {
                    self.state = TransportState::Playing;
                    vec![Effect::Play]
                } else {
                    self.state = TransportState::Paused;
                    Vec::new()
                }
            }
            AudioEvent::TimeUpdate(seconds) => {
                self.current_time = seconds.max(0.0);
                if !self.in_flight.contains(&CommandSlot::Seek) {
                    self.last_good_time = self.current_time;
                }
                Vec::new()
            }
            AudioEvent::Ended => self.on_ended(),
            AudioEvent::Error(message) => {
                let track_id = self
                    .loaded
                    .as_ref()
                    .map(|track| track.id.clone())
                    .unwrap_or_else(|| groupcast_core::TrackId::new(""));
                let err = PanelError::AudioPlayback { track_id, message };
                warn!(error = %err, "Audio element failed");

                self.audio_error = Some(err.clone());
                self.autoplay = false;
                if self.state != TransportState::Idle {
                    self.state = TransportState::Paused;
                }
                vec![Effect::Pause, Effect::Report(err)]
            }
        }
    }

    fn on_ended(&mut self) -> Vec<Effect> {
        self.state = TransportState::Idle;
        self.autoplay = false;

        if self.in_flight.contains(&CommandSlot::Next) {
            debug!("Track ended while next is in flight");
            return Vec::new();
        }

        if self.next_blocked() {
            info!("Reached end of queue");
            self.loaded = None;
            self.current_time = 0.0;
            self.last_good_time = 0.0;
            return vec![Effect::Dispose];
        }

        self.issue(RemoteCommand::Next)
    }

    fn on_success(&mut self, command: RemoteCommand, ack: TransportAck) -> Vec<Effect> {
        debug!(%command, ?ack, "Command acknowledged");

        match command {
            RemoteCommand::Play => self.on_play_ack(),
            RemoteCommand::Pause => self.on_pause_ack(),
            RemoteCommand::Next | RemoteCommand::Previous | RemoteCommand::PlayTrack { .. } => {
                let requested = match command {
                    RemoteCommand::PlayTrack { queue_position } => Some(queue_position),
                    _ => None,
                };
                let autoplay = !matches!(
                    ack.playback_status,
                    Some(PlaybackStatus::Paused | PlaybackStatus::Stopped)
                );
                match ack.queue_position.or(requested) {
                    Some(position) => self.adopt_position(position, autoplay),
                    None => vec![Effect::RefetchQueue],
                }
            }
            RemoteCommand::Seek { position_ms } => {
                let TransportState::Seeking { resume_playing } = self.state else {
                    return Vec::new();
                };
                self.state = if resume_playing {
                    TransportState::Playing
                } else {
                    TransportState::Paused
                };

                let confirmed = ack.position_ms.unwrap_or(position_ms) as f64 / 1000.0;
                self.last_good_time = confirmed;
                if (self.current_time - confirmed).abs() >= 0.5 {
                    self.current_time = confirmed;
                    return vec![Effect::SetCurrentTime(confirmed)];
                }
                Vec::new()
            }
            RemoteCommand::SetVolume { volume } => {
                let before = self.volume.level();
                self.volume.confirm(ack.volume.unwrap_or(volume));

                if let Some(pending) = self.volume.take_pending() {
                    return self.issue(RemoteCommand::SetVolume { volume: pending });
                }
                if self.volume.level() == before {
                    Vec::new()
                } else {
                    vec![Effect::SetVolume(self.volume.level())]
                }
            }
            RemoteCommand::SetRepeat { mode } => {
                self.repeat_mode = ack.repeat_mode.unwrap_or(mode);
                Vec::new()
            }
            RemoteCommand::SetShuffle { mode } => {
                self.shuffle_mode = ack.shuffle_mode.unwrap_or(mode);
                Vec::new()
            }
            RemoteCommand::ShuffleContext { .. } | RemoteCommand::UnshuffleContext { .. } => {
                vec![Effect::RefetchQueue]
            }
        }
    }

    fn on_play_ack(&mut self) -> Vec<Effect> {
        if self.loaded.is_none() {
            return match self.queue.current() {
                Some(entry) => {
                    let track = entry.track.clone();
                    self.load(track, true)
                }
                None => Vec::new(),
            };
        }

        match self.state {
            TransportState::Loading => {
                self.autoplay = true;
                Vec::new()
            }
            TransportState::Seeking { .. } => {
                self.state = TransportState::Seeking {
                    resume_playing: true,
                };
                vec![Effect::Play]
            }
            _ => {
                self.state = TransportState::Playing;
                vec![Effect::Play]
            }
        }
    }

    fn on_pause_ack(&mut self) -> Vec<Effect> {
        match self.state {
            TransportState::Idle => Vec::new(),
            TransportState::Loading => {
                self.autoplay = false;
                Vec::new()
            }
            TransportState::Seeking { .. } => {
                self.state = TransportState::Seeking {
                    resume_playing: false,
                };
                vec![Effect::Pause]
            }
            _ => {
                self.state = TransportState::Paused;
                vec![Effect::Pause]
            }
        }
    }

    fn adopt_position(&mut self, position: usize, autoplay: bool) -> Vec<Effect> {
        self.queue.queue_position = position;
        self.current_time = 0.0;
        self.last_good_time = 0.0;
        self.audio_error = None;

        let Some(track) = self.queue.current().map(|entry| entry.track.clone()) else {
            // The queue changed underneath us
            return vec![Effect::RefetchQueue];
        };

        if self.loaded.as_ref().map(|loaded| &loaded.id) == Some(&track.id) {
            self.loaded = Some(track);
            if autoplay {
                self.state = TransportState::Playing;
                vec![Effect::SetCurrentTime(0.0), Effect::Play]
            } else {
                self.state = TransportState::Paused;
                vec![Effect::SetCurrentTime(0.0), Effect::Pause]
            }
        } else {
            self.load(track, autoplay)
        }
    }

    fn load(&mut self, track: Track, autoplay: bool) -> Vec<Effect> {
        self.epoch += 1;
        self.loaded = Some(track.clone());
        self.autoplay = autoplay;
        self.state = TransportState::Loading;
        self.current_time = 0.0;
        self.last_good_time = 0.0;
        self.audio_error = None;

        debug!(epoch = self.epoch, track_id = %track.id, autoplay, "Loading track");
        vec![Effect::LoadTrack {
            epoch: self.epoch,
            track,
            autoplay,
        }]
    }

    fn on_failure(&mut self, command: RemoteCommand, error: GroupcastError) -> Vec<Effect> {
        warn!(%command, error = %error, "Transport command failed");
        let mut effects = Vec::new();

        match &command {
            RemoteCommand::Seek { .. } => {
                if let TransportState::Seeking { resume_playing } = self.state {
                    self.state = if resume_playing {
                        TransportState::Playing
                    } else {
                        TransportState::Paused
                    };
                    self.current_time = self.last_good_time;
                    effects.push(Effect::SetCurrentTime(self.last_good_time));
                }
            }
            RemoteCommand::SetVolume { .. } => {
                if let Some(pending) = self.volume.take_pending() {
                    effects.extend(self.issue(RemoteCommand::SetVolume { volume: pending }));
                } else {
                    effects.push(Effect::SetVolume(self.volume.revert()));
                }
            }
            _ => {}
        }

        effects.push(Effect::Report(PanelError::TransportCommandFailed {
            command,
            source: error,
        }));
        effects
    }

    fn on_queue(&mut self, queue: QueueSnapshot) -> Vec<Effect> {
        self.queue = queue;

        let Some(track) = self.queue.current().map(|entry| entry.track.clone()) else {
            self.state = TransportState::Idle;
            self.autoplay = false;
            self.current_time = 0.0;
            self.last_good_time = 0.0;
            self.audio_error = None;
            return if self.loaded.take().is_some() {
                vec![Effect::Dispose]
            } else {
                Vec::new()
            };
        };

        if self.loaded.as_ref().map(|loaded| &loaded.id) == Some(&track.id) {
            self.loaded = Some(track);
            return Vec::new();
        }

        let autoplay =
            self.is_playing() || (self.state == TransportState::Loading && self.autoplay);
        self.load(track, autoplay)
    }

    fn on_session(&mut self, session: &SessionSnapshot) -> Vec<Effect> {
        self.repeat_mode = session.repeat_mode;
        self.shuffle_mode = session.shuffle_mode;
        self.volume = VolumeControl::new(session.volume);
        vec![Effect::SetVolume(self.volume.level())]
    }
}

/// Clamp an absolute seek target into `[0, duration_ms]`
pub fn clamp_seek(target_ms: i64, duration_ms: u64) -> u64 {
    u64::try_from(target_ms).map_or(0, |target| target.min(duration_ms))
}
