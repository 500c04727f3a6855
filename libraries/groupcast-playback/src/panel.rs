//! Player panel driver
//!
//! Composes the queue model, the transport state machine and the queue
//! editor around one remote session and one audio element.
//!
//! All state lives on the panel and changes only through `&mut self`.
//! Remote calls are spawned on the tokio runtime and post their results back
//! over the panel's channel; the audio element reports through the same
//! channel. Nothing is applied until the panel pulls it with
//! [`PlayerPanel::process_next`], [`PlayerPanel::process_pending`] or
//! [`PlayerPanel::settle`].

use crate::audio::{AudioBackend, AudioElement, AudioEvent, AudioEventSink};
use crate::editor::{self, MutationOutcome, QueueEditor, QueueMutation};
use crate::error::{PanelError, Result};
use crate::model::{build_groups_or_singletons, flat_index_of, group_index_of, ContextGroup};
use crate::transport::{
    Effect, NavigationGuards, TransportController, TransportEvent, TransportState,
};
use groupcast_core::types::{
    ContextType, PlaylistId, QueueEntry, QueueSnapshot, RepeatMode, ShuffleMode, Track, TrackId,
};
use groupcast_core::{GroupcastError, SessionApi};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Default skip distance for the skip buttons
pub const DEFAULT_SKIP_SECONDS: i64 = 10;

/// Message delivered to the panel's event loop
#[derive(Debug)]
pub enum PanelEvent {
    /// Transport input (command responses, audio events)
    Transport(TransportEvent),

    /// A queue mutation and its refetch settled
    Mutation(MutationOutcome),

    /// A standalone queue refetch settled
    QueueFetched(std::result::Result<QueueSnapshot, GroupcastError>),
}

/// Volume slider input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChange {
    /// Slider moving; local only
    Preview(u8),
    /// Slider released; sent to the session
    Commit(u8),
}

/// Panel construction settings
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Distance of the skip forward/backward buttons
    pub skip_seconds: i64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            skip_seconds: DEFAULT_SKIP_SECONDS,
        }
    }
}

/// Headless player panel bound to one session
pub struct PlayerPanel {
    api: Arc<dyn SessionApi>,
    backend: Arc<dyn AudioBackend>,
    config: PanelConfig,

    element: Option<Box<dyn AudioElement>>,
    transport: TransportController,
    editor: QueueEditor,
    groups: Vec<ContextGroup>,

    tx: UnboundedSender<PanelEvent>,
    rx: UnboundedReceiver<PanelEvent>,

    /// Spawned remote calls whose result has not been applied yet
    outstanding: usize,
    last_error: Option<PanelError>,
}

impl PlayerPanel {
    /// Mount the panel: look up the session, force it to position zero with
    /// an explicit stop, then fetch the queue.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`PanelError::SessionMissing`] when the session cannot be found or
    /// refuses the initial stop. A failed queue fetch is not fatal: the panel
    /// mounts empty and reports the error.
    pub async fn mount(
        api: Arc<dyn SessionApi>,
        backend: Arc<dyn AudioBackend>,
        config: PanelConfig,
    ) -> Result<Self> {
        let session_id = api.session_id().clone();
        info!(session_id = %session_id, "Mounting player panel");

        let mut session = api.get_session().await.map_err(|err| {
            warn!(session_id = %session_id, error = %err, "Session lookup failed");
            PanelError::SessionMissing(err.to_string())
        })?;

        let ack = api.stop().await.map_err(|err| {
            warn!(session_id = %session_id, error = %err, "Initial stop failed");
            PanelError::SessionMissing(format!("initial stop failed: {}", err))
        })?;
        session.position_ms = ack.position_ms.unwrap_or(0);
        if let Some(status) = ack.playback_status {
            session.playback_status = status;
        }

        let queue = api.get_queue().await;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut panel = Self {
            api,
            backend,
            config,
            element: None,
            transport: TransportController::new(),
            editor: QueueEditor::new(),
            groups: Vec::new(),
            tx,
            rx,
            outstanding: 0,
            last_error: None,
        };

        panel.dispatch(TransportEvent::SessionSynced(session));
        match queue {
            Ok(queue) => panel.sync_queue(queue),
            Err(err) => {
                warn!(error = %err, "Initial queue fetch failed");
                panel.last_error = Some(PanelError::QueueRefreshFailed(err));
            }
        }

        info!(
            session_id = %session_id,
            entries = panel.transport.queue().len(),
            groups = panel.groups.len(),
            "Player panel mounted"
        );
        Ok(panel)
    }

    // ===== Transport commands =====

    /// Toggle play/pause
    pub fn play_pause(&mut self) {
        self.dispatch(TransportEvent::PlayPause);
    }

    /// Go to the previous entry (ignored while disabled)
    pub fn previous(&mut self) {
        self.dispatch(TransportEvent::Previous);
    }

    /// Go to the next entry (ignored while disabled)
    pub fn next(&mut self) {
        self.dispatch(TransportEvent::Next);
    }

    /// Play an entry picked from the grouped view.
    ///
    /// Returns `false` when the view is stale and no longer holds `entry`.
    pub fn play_track(&mut self, entry: &QueueEntry) -> bool {
        match flat_index_of(&self.groups, entry) {
            Some(position) => {
                self.dispatch(TransportEvent::PlayTrack(position));
                true
            }
            None => {
                debug!(position = entry.position, track_id = %entry.track.id, "Entry not in view");
                false
            }
        }
    }

    /// Relative skip; sent as an absolute seek
    pub fn skip_by(&mut self, seconds: i64) {
        self.dispatch(TransportEvent::SkipBy(seconds));
    }

    /// Skip forward by the configured distance
    pub fn skip_forward(&mut self) {
        self.skip_by(self.config.skip_seconds);
    }

    /// Skip backward by the configured distance
    pub fn skip_backward(&mut self) {
        self.skip_by(-self.config.skip_seconds);
    }

    /// Progress bar click
    pub fn seek_to_ratio(&mut self, ratio: f64) {
        self.dispatch(TransportEvent::SeekToRatio(ratio));
    }

    /// Volume slider input
    pub fn set_volume(&mut self, change: VolumeChange) {
        match change {
            VolumeChange::Preview(level) => self.dispatch(TransportEvent::VolumePreview(level)),
            VolumeChange::Commit(level) => self.dispatch(TransportEvent::VolumeCommit(level)),
        }
    }

    /// Request the next repeat mode in the cycle
    pub fn set_repeat_mode(&mut self) {
        self.dispatch(TransportEvent::CycleRepeat);
    }

    /// Request the next session shuffle mode in the cycle
    pub fn cycle_shuffle_mode(&mut self) {
        self.dispatch(TransportEvent::CycleShuffle);
    }

    /// Flip the shuffle flag of one playlist/album group.
    ///
    /// Returns `false` for bare tracks and unknown groups.
    pub fn toggle_shuffle(&mut self, group_index: usize) -> bool {
        let Some(group) = self.groups.get(group_index) else {
            return false;
        };
        let Some(context_id) = group.context_id.clone() else {
            return false;
        };
        if group.context_type == ContextType::Track {
            return false;
        }

        let enabled = group.shuffle_enabled;
        self.dispatch(TransportEvent::ToggleContextShuffle {
            context_id,
            enabled,
        });
        true
    }

    // ===== Queue commands =====

    /// Append tracks. Returns `false` if the same add is already running.
    pub fn add_tracks(&mut self, ids: Vec<TrackId>) -> bool {
        self.mutate(QueueMutation::AppendTracks(ids))
    }

    /// Append playlists. Returns `false` if the same add is already running.
    pub fn add_playlists(&mut self, ids: Vec<PlaylistId>) -> bool {
        self.mutate(QueueMutation::AppendPlaylists(ids))
    }

    /// Remove a whole group in one request
    ///
    /// Returns `false` for unknown groups and while the group's removal
    /// control is locked.
    pub fn remove_context(&mut self, group_index: usize) -> bool {
        match self.groups.get(group_index) {
            Some(group) => {
                let position = group.start_position;
                self.mutate(QueueMutation::Remove(position))
            }
            None => false,
        }
    }

    /// Empty the queue and stop
    pub fn clear_queue(&mut self) -> bool {
        self.mutate(QueueMutation::Clear)
    }

    // ===== View =====

    /// Track at the confirmed queue position
    pub fn current_track(&self) -> Option<&Track> {
        self.transport.current_track()
    }

    /// Index of the group holding the current track
    pub fn current_group_index(&self) -> Option<usize> {
        self.transport.current_track()?;
        group_index_of(&self.groups, self.transport.queue().queue_position)
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Playhead rounded to whole seconds
    pub fn current_time_seconds(&self) -> u64 {
        self.transport.current_time_seconds()
    }

    pub fn queue_groups(&self) -> &[ContextGroup] {
        &self.groups
    }

    pub fn navigation_guards(&self) -> NavigationGuards {
        self.transport.navigation_guards()
    }

    pub fn volume(&self) -> u8 {
        self.transport.volume()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.transport.repeat_mode()
    }

    pub fn shuffle_mode(&self) -> ShuffleMode {
        self.transport.shuffle_mode()
    }

    pub fn state(&self) -> TransportState {
        self.transport.state()
    }

    /// Most recent non-fatal error
    pub fn last_error(&self) -> Option<&PanelError> {
        self.last_error.as_ref()
    }

    /// Error of the current track's element
    pub fn audio_error(&self) -> Option<&PanelError> {
        self.transport.audio_error()
    }

    /// Whether the removal control of a group is disabled
    pub fn is_removing(&self, group_index: usize) -> bool {
        self.groups
            .get(group_index)
            .is_some_and(|group| self.editor.is_removing(group.start_position))
    }

    /// Whether a clear is running
    pub fn is_clearing(&self) -> bool {
        self.editor.is_clearing()
    }

    /// Whether every spawned remote call has been applied
    pub fn is_settled(&self) -> bool {
        self.outstanding == 0
    }

    // ===== Event loop =====

    /// Wait for the next event and apply it. Returns `false` if the channel
    /// closed.
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Apply every event already queued, without waiting
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Apply events until no remote call is outstanding
    pub async fn settle(&mut self) {
        loop {
            self.process_pending();
            if self.outstanding == 0 {
                break;
            }
            if !self.process_next().await {
                break;
            }
        }
    }

    /// Tear down the element; late responses are dropped with the receiver
    pub fn unmount(mut self) {
        self.teardown();
        info!(session_id = %self.api.session_id(), "Player panel unmounted");
    }

    fn teardown(&mut self) {
        if let Some(mut element) = self.element.take() {
            element.dispose();
        }
        self.rx.close();
    }

    fn handle_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::Transport(event) => {
                if matches!(
                    event,
                    TransportEvent::CommandSucceeded { .. } | TransportEvent::CommandFailed { .. }
                ) {
                    self.settle_one();
                }
                self.dispatch(event);
            }
            PanelEvent::Mutation(outcome) => {
                self.settle_one();
                self.editor.finish(&outcome);
                if let Some(err) = &outcome.error {
                    self.last_error = Some(err.clone());
                }
                let cleared =
                    matches!(outcome.mutation, QueueMutation::Clear) && outcome.mutation_succeeded();
                match outcome.queue {
                    Some(queue) => self.sync_queue(queue),
                    // Confirmed clear and stop; the refetch is not needed to unload
                    None if cleared => {
                        self.groups.clear();
                        self.dispatch(TransportEvent::Cleared);
                    }
                    None => {}
                }
            }
            PanelEvent::QueueFetched(result) => {
                self.settle_one();
                match result {
                    Ok(queue) => self.sync_queue(queue),
                    Err(err) => {
                        warn!(error = %err, "Queue refetch failed");
                        self.last_error = Some(PanelError::QueueRefreshFailed(err));
                    }
                }
            }
        }
    }

    fn settle_one(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    fn sync_queue(&mut self, queue: QueueSnapshot) {
        let (groups, warning) = build_groups_or_singletons(&queue.entries);
        self.groups = groups;
        if let Some(warning) = warning {
            self.last_error = Some(warning);
        }
        self.editor.on_queue_synced();
        self.dispatch(TransportEvent::QueueSynced(queue));
    }

    /// Run the state machine to quiescence for one input
    fn dispatch(&mut self, event: TransportEvent) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            for effect in self.transport.handle(event) {
                if let Some(follow_up) = self.execute(effect) {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    fn execute(&mut self, effect: Effect) -> Option<TransportEvent> {
        match effect {
            Effect::Send(command) => {
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                self.outstanding += 1;

                tokio::spawn(async move {
                    let result = command.send(api.as_ref()).await;
                    let event = match result {
                        Ok(ack) => TransportEvent::CommandSucceeded { command, ack },
                        Err(error) => TransportEvent::CommandFailed { command, error },
                    };
                    if tx.send(PanelEvent::Transport(event)).is_err() {
                        debug!("Panel unmounted, dropping command response");
                    }
                });
            }
            Effect::LoadTrack {
                epoch,
                track,
                autoplay,
            } => {
                if let Some(mut old) = self.element.take() {
                    old.dispose();
                }

                debug!(epoch, track_id = %track.id, autoplay, "Creating audio element");
                let sink = AudioEventSink::new(epoch, self.tx.clone());
                match self.backend.create(&track, sink) {
                    Ok(mut element) => {
                        element.set_volume(self.transport.volume());
                        self.element = Some(element);
                    }
                    Err(message) => {
                        return Some(TransportEvent::Audio {
                            epoch,
                            event: AudioEvent::Error(message),
                        });
                    }
                }
            }
            Effect::Play => {
                if let Some(element) = self.element.as_mut() {
                    element.play();
                }
            }
            Effect::Pause => {
                if let Some(element) = self.element.as_mut() {
                    element.pause();
                }
            }
            Effect::SetCurrentTime(seconds) => {
                if let Some(element) = self.element.as_mut() {
                    element.set_current_time(seconds);
                }
            }
            Effect::SetVolume(level) => {
                if let Some(element) = self.element.as_mut() {
                    element.set_volume(level);
                }
            }
            Effect::Dispose => {
                if let Some(mut element) = self.element.take() {
                    element.dispose();
                }
            }
            Effect::RefetchQueue => self.refetch_queue(),
            Effect::Report(err) => {
                debug!(error = %err, "Panel error");
                self.last_error = Some(err);
            }
        }
        None
    }

    fn refetch_queue(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let result = api.get_queue().await;
            if tx.send(PanelEvent::QueueFetched(result)).is_err() {
                debug!("Panel unmounted, dropping queue");
            }
        });
    }

    fn mutate(&mut self, mutation: QueueMutation) -> bool {
        if !self.editor.begin(&mutation) {
            return false;
        }

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let outcome = editor::apply(api.as_ref(), mutation).await;
            if tx.send(PanelEvent::Mutation(outcome)).is_err() {
                debug!("Panel unmounted, dropping mutation outcome");
            }
        });
        true
    }
}

impl Drop for PlayerPanel {
    fn drop(&mut self) {
        self.teardown();
    }
}
