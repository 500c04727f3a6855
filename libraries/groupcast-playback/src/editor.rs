//! Queue membership mutations
//!
//! Every mutation is followed by a full refetch; the queue is never spliced
//! locally since the server may reorder, dedupe, or expand a playlist id into
//! many tracks.

use crate::error::PanelError;
use groupcast_core::types::{PlaylistId, QueueSnapshot, TrackId};
use groupcast_core::SessionApi;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A queue mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueMutation {
    /// Append tracks
    AppendTracks(Vec<TrackId>),
    /// Append playlists (expanded server-side)
    AppendPlaylists(Vec<PlaylistId>),
    /// Remove the entry at a flat position, with its whole context
    Remove(usize),
    /// Empty the queue and stop
    Clear,
}

/// What a mutation locks while it runs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationTarget {
    /// Sorted ids of an append
    Append(Vec<String>),
    /// A flat queue position
    Position(usize),
    /// The whole queue
    Queue,
}

impl QueueMutation {
    /// Name used in errors and logs
    pub fn operation(&self) -> &'static str {
        match self {
            Self::AppendTracks(_) => "add tracks",
            Self::AppendPlaylists(_) => "add playlists",
            Self::Remove(_) => "remove",
            Self::Clear => "clear",
        }
    }

    /// Target locked while this mutation is in flight
    pub fn target(&self) -> MutationTarget {
        match self {
            Self::AppendTracks(_) | Self::AppendPlaylists(_) => {
                let mut ids = self.music_ids();
                ids.sort();
                MutationTarget::Append(ids)
            }
            Self::Remove(position) => MutationTarget::Position(*position),
            Self::Clear => MutationTarget::Queue,
        }
    }

    fn music_ids(&self) -> Vec<String> {
        match self {
            Self::AppendTracks(ids) => ids.iter().map(|id| id.as_str().to_string()).collect(),
            Self::AppendPlaylists(ids) => ids.iter().map(|id| id.as_str().to_string()).collect(),
            Self::Remove(_) | Self::Clear => Vec::new(),
        }
    }

    fn failed(&self, source: groupcast_core::GroupcastError) -> PanelError {
        PanelError::QueueMutationFailed {
            operation: self.operation(),
            source,
        }
    }
}

/// Result of running a mutation and its refetch
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// The mutation that ran
    pub mutation: QueueMutation,

    /// Mutation or refetch error, if any
    pub error: Option<PanelError>,

    /// Queue fetched after the mutation settled
    pub queue: Option<QueueSnapshot>,
}

impl MutationOutcome {
    /// Whether the mutation itself went through
    pub fn mutation_succeeded(&self) -> bool {
        !matches!(self.error, Some(PanelError::QueueMutationFailed { .. }))
    }
}

/// Per-target in-flight guards for queue mutations
///
/// Removals are guarded per flat position so unrelated removals stay
/// usable. A target whose mutation failed stays locked until the next
/// queue sync shows what the server really holds.
#[derive(Debug, Default)]
pub struct QueueEditor {
    in_flight: HashSet<MutationTarget>,
    unconfirmed: HashSet<MutationTarget>,
}

impl QueueEditor {
    /// Create an editor with no locks
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the mutation's target. Returns `false` if it is locked.
    pub fn begin(&mut self, mutation: &QueueMutation) -> bool {
        let target = mutation.target();
        if self.is_locked(&target) {
            debug!(operation = mutation.operation(), ?target, "Mutation target busy");
            return false;
        }
        self.in_flight.insert(target)
    }

    /// Release the target of a settled mutation
    pub fn finish(&mut self, outcome: &MutationOutcome) {
        let target = outcome.mutation.target();
        self.in_flight.remove(&target);
        if !outcome.mutation_succeeded() {
            self.unconfirmed.insert(target);
        }
    }

    /// An authoritative queue arrived; failed targets are usable again
    pub fn on_queue_synced(&mut self) {
        self.unconfirmed.clear();
    }

    /// Whether a target is in flight or awaiting confirmation
    pub fn is_locked(&self, target: &MutationTarget) -> bool {
        self.in_flight.contains(target)
            || self.unconfirmed.contains(target)
            || (*target != MutationTarget::Queue && self.in_flight.contains(&MutationTarget::Queue))
    }

    /// Whether the removal control for `position` should be disabled
    pub fn is_removing(&self, position: usize) -> bool {
        self.is_locked(&MutationTarget::Position(position))
    }

    /// Whether a clear is running
    pub fn is_clearing(&self) -> bool {
        self.in_flight.contains(&MutationTarget::Queue)
    }
}

/// Run a mutation against the session, then refetch the queue.
///
/// The refetch starts only after the mutation has fully resolved. A failed
/// mutation still refetches, so the view reflects what the server kept.
pub async fn apply(api: &dyn SessionApi, mutation: QueueMutation) -> MutationOutcome {
    debug!(operation = mutation.operation(), "Applying queue mutation");

    let result = match &mutation {
        QueueMutation::AppendTracks(_) | QueueMutation::AppendPlaylists(_) => {
            api.append_to_queue(&mutation.music_ids()).await
        }
        QueueMutation::Remove(position) => api.remove_from_queue(*position).await,
        QueueMutation::Clear => match api.clear_queue().await {
            Ok(()) => {
                // Force position zero for whatever gets queued next
                if let Err(err) = api.stop().await {
                    warn!(error = %err, "Stop after clear failed");
                }
                Ok(())
            }
            Err(err) => Err(err),
        },
    };

    let mut error = result.err().map(|err| {
        warn!(operation = mutation.operation(), error = %err, "Queue mutation failed");
        mutation.failed(err)
    });

    let queue = match api.get_queue().await {
        Ok(queue) => Some(queue),
        Err(err) => {
            warn!(error = %err, "Queue refetch failed");
            if error.is_none() {
                error = Some(PanelError::QueueRefreshFailed(err));
            }
            None
        }
    };

    MutationOutcome {
        mutation,
        error,
        queue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use groupcast_core::types::{
        ContextId, QueueEntry, RepeatMode, SessionId, SessionSnapshot, ShuffleMode, Track,
        TransportAck,
    };
    use groupcast_core::{GroupcastError, Result};
    use mockall::{mock, predicate::eq, Sequence};

    mock! {
        Session {}

        #[async_trait]
        impl SessionApi for Session {
            fn session_id(&self) -> &SessionId;
            async fn get_session(&self) -> Result<SessionSnapshot>;
            async fn stop(&self) -> Result<TransportAck>;
            async fn play(&self) -> Result<TransportAck>;
            async fn pause(&self) -> Result<TransportAck>;
            async fn next(&self) -> Result<TransportAck>;
            async fn previous(&self) -> Result<TransportAck>;
            async fn play_track(&self, queue_position: usize) -> Result<TransportAck>;
            async fn seek(&self, position_ms: u64) -> Result<TransportAck>;
            async fn set_volume(&self, volume: u8) -> Result<TransportAck>;
            async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<TransportAck>;
            async fn set_shuffle_mode(&self, mode: ShuffleMode) -> Result<TransportAck>;
            async fn get_queue(&self) -> Result<QueueSnapshot>;
            async fn append_to_queue(&self, music_ids: &[String]) -> Result<()>;
            async fn remove_from_queue(&self, position: usize) -> Result<()>;
            async fn clear_queue(&self) -> Result<()>;
            async fn shuffle_context(&self, context_id: &ContextId) -> Result<()>;
            async fn unshuffle_context(&self, context_id: &ContextId) -> Result<()>;
        }
    }

    fn two_tracks() -> QueueSnapshot {
        QueueSnapshot::new(
            vec![
                QueueEntry::new(0, Track::new("t1", "One", "A", 60)),
                QueueEntry::new(1, Track::new("t2", "Two", "A", 60)),
            ],
            0,
        )
    }

    #[tokio::test]
    async fn append_resolves_before_refetch() {
        let mut api = MockSession::new();
        let mut seq = Sequence::new();

        api.expect_append_to_queue()
            .withf(|ids| ids.len() == 2 && ids[0] == "t1" && ids[1] == "t2")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        api.expect_get_queue()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(two_tracks()));

        let outcome = apply(
            &api,
            QueueMutation::AppendTracks(vec!["t1".into(), "t2".into()]),
        )
        .await;

        assert!(outcome.error.is_none());
        assert_eq!(outcome.queue, Some(two_tracks()));
    }

    #[tokio::test]
    async fn clear_deletes_then_stops_then_refetches() {
        let mut api = MockSession::new();
        let mut seq = Sequence::new();

        api.expect_clear_queue()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        api.expect_stop()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(TransportAck::default()));
        api.expect_get_queue()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(QueueSnapshot::default()));

        let outcome = apply(&api, QueueMutation::Clear).await;

        assert!(outcome.error.is_none());
        assert_eq!(outcome.queue, Some(QueueSnapshot::default()));
    }

    #[tokio::test]
    async fn failed_remove_still_refetches() {
        let mut api = MockSession::new();
        let mut seq = Sequence::new();

        api.expect_remove_from_queue()
            .with(eq(3))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(GroupcastError::server(409, "conflict")));
        api.expect_get_queue()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(two_tracks()));

        let outcome = apply(&api, QueueMutation::Remove(3)).await;

        assert!(!outcome.mutation_succeeded());
        assert!(matches!(
            outcome.error,
            Some(PanelError::QueueMutationFailed {
                operation: "remove",
                ..
            })
        ));
        assert!(outcome.queue.is_some());
    }

    #[tokio::test]
    async fn refetch_failure_is_reported() {
        let mut api = MockSession::new();
        api.expect_append_to_queue().returning(|_| Ok(()));
        api.expect_get_queue()
            .returning(|| Err(GroupcastError::Timeout));

        let outcome = apply(&api, QueueMutation::AppendPlaylists(vec!["p1".into()])).await;

        assert!(outcome.mutation_succeeded());
        assert_eq!(
            outcome.error,
            Some(PanelError::QueueRefreshFailed(GroupcastError::Timeout))
        );
        assert!(outcome.queue.is_none());
    }

    #[test]
    fn removals_are_guarded_per_position() {
        let mut editor = QueueEditor::new();

        assert!(editor.begin(&QueueMutation::Remove(0)));
        assert!(!editor.begin(&QueueMutation::Remove(0)));
        assert!(editor.begin(&QueueMutation::Remove(4)));
        assert!(editor.is_removing(0));
        assert!(!editor.is_removing(2));
        assert!(editor.is_removing(4));
    }

    #[test]
    fn failed_target_stays_locked_until_sync() {
        let mut editor = QueueEditor::new();
        let mutation = QueueMutation::Remove(1);
        editor.begin(&mutation);

        editor.finish(&MutationOutcome {
            mutation: mutation.clone(),
            error: Some(mutation.failed(GroupcastError::Timeout)),
            queue: None,
        });
        assert!(editor.is_removing(1));
        assert!(!editor.begin(&mutation));

        editor.on_queue_synced();
        assert!(editor.begin(&mutation));
    }

    #[test]
    fn append_target_ignores_id_order() {
        let a = QueueMutation::AppendTracks(vec!["b".into(), "a".into()]);
        let b = QueueMutation::AppendTracks(vec!["a".into(), "b".into()]);
        assert_eq!(a.target(), b.target());
    }

    #[test]
    fn clear_locks_every_target() {
        let mut editor = QueueEditor::new();
        assert!(editor.begin(&QueueMutation::Clear));
        assert!(editor.is_clearing());
        assert!(!editor.begin(&QueueMutation::Remove(0)));
    }
}
