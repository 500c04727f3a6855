//! Queue grouping
//!
//! Turns the server's flat queue into display groups and maps positions in
//! the grouped view back to flat queue indices:
//!
//! ```text
//! flat:    [A(p1)] [B(p1)] [C] [D(album a1)] [E(album a1)]
//! grouped: ┌ playlist p1 ┐ ┌track┐ ┌── album a1 ──┐
//!          │  A     B    │ │  C  │ │   D     E    │
//!          └─────────────┘ └─────┘ └──────────────┘
//! ```
//!
//! The grouping is a pure view: concatenating the entries of every group
//! reproduces the flat list exactly, and equal input always yields equal
//! output.

use crate::error::{PanelError, Result};
use groupcast_core::types::{ContextId, ContextType, QueueEntry, Track};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Consecutive queue entries sharing one context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextGroup {
    /// Context identifier, `None` for a bare track
    pub context_id: Option<ContextId>,

    /// Context kind
    pub context_type: ContextType,

    /// Context title, or the track title for a bare track
    pub title: String,

    /// Number of member entries
    pub track_count: usize,

    /// Sum of member durations
    pub total_duration_ms: u64,

    /// Per-context shuffle flag
    pub shuffle_enabled: bool,

    /// Flat position of the first member
    pub start_position: usize,

    /// Member entries in queue order
    pub entries: Vec<QueueEntry>,
}

impl ContextGroup {
    fn from_entry(entry: QueueEntry) -> Self {
        let (context_id, title, shuffle_enabled) = match &entry.context {
            Some(context) => (
                Some(context.id.clone()),
                context.title.clone(),
                context.shuffle_enabled,
            ),
            None => (None, entry.track.title.clone(), false),
        };

        Self {
            context_id,
            context_type: entry.context_type(),
            title,
            track_count: 1,
            total_duration_ms: entry.track.duration_ms(),
            shuffle_enabled,
            start_position: entry.position,
            entries: vec![entry],
        }
    }

    /// Whether `entry` continues this group.
    ///
    /// Requires equal context id and type; bare and track-type entries always
    /// start their own group.
    fn accepts(&self, entry: &QueueEntry) -> bool {
        if self.context_type == ContextType::Track {
            return false;
        }
        match (&self.context_id, &entry.context) {
            (Some(id), Some(context)) => {
                *id == context.id && self.context_type == context.context_type
            }
            _ => false,
        }
    }

    fn push(&mut self, entry: QueueEntry) {
        self.track_count += 1;
        self.total_duration_ms += entry.track.duration_ms();
        self.entries.push(entry);
    }

    /// Member tracks in order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter().map(|entry| &entry.track)
    }

    /// Whether the flat `position` falls inside this group
    pub fn contains_position(&self, position: usize) -> bool {
        position >= self.start_position && position < self.start_position + self.track_count
    }
}

/// Group a flat queue.
///
/// Fails with [`PanelError::MalformedQueue`] when a playlist or album context
/// shows up again after another context interrupted it.
pub fn build_groups(entries: &[QueueEntry]) -> Result<Vec<ContextGroup>> {
    let mut groups: Vec<ContextGroup> = Vec::new();
    let mut seen: HashSet<(ContextId, ContextType)> = HashSet::new();

    for entry in entries {
        if let Some(current) = groups.last_mut() {
            if current.accepts(entry) {
                current.push(entry.clone());
                continue;
            }
        }

        if let Some(context) = &entry.context {
            if context.context_type != ContextType::Track
                && !seen.insert((context.id.clone(), context.context_type))
            {
                return Err(PanelError::MalformedQueue {
                    context_id: context.id.clone(),
                });
            }
        }

        groups.push(ContextGroup::from_entry(entry.clone()));
    }

    Ok(groups)
}

/// One group per entry, used when the server ordering cannot be grouped.
pub fn singleton_groups(entries: &[QueueEntry]) -> Vec<ContextGroup> {
    entries
        .iter()
        .cloned()
        .map(ContextGroup::from_entry)
        .collect()
}

/// Group a flat queue, degrading to singletons on a malformed ordering.
///
/// The error is returned alongside so the caller can surface it as a
/// warning.
pub fn build_groups_or_singletons(
    entries: &[QueueEntry],
) -> (Vec<ContextGroup>, Option<PanelError>) {
    match build_groups(entries) {
        Ok(groups) => (groups, None),
        Err(err) => {
            warn!(error = %err, "Falling back to one group per queue entry");
            (singleton_groups(entries), Some(err))
        }
    }
}

/// Absolute queue position of `entry` inside the grouped view.
///
/// Returns `None` when the view no longer holds that entry, e.g. because
/// the queue changed underneath a stale view.
pub fn flat_index_of(groups: &[ContextGroup], entry: &QueueEntry) -> Option<usize> {
    let group = groups
        .iter()
        .find(|group| group.contains_position(entry.position))?;
    let member = group.entries.get(entry.position - group.start_position)?;

    (member.position == entry.position && member.track.id == entry.track.id)
        .then_some(entry.position)
}

/// Index of the group holding the flat `position`
pub fn group_index_of(groups: &[ContextGroup], position: usize) -> Option<usize> {
    groups
        .iter()
        .position(|group| group.contains_position(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupcast_core::types::QueueContext;

    fn bare(position: usize, id: &str) -> QueueEntry {
        QueueEntry::new(position, Track::new(id, format!("Song {}", id), "Artist", 100))
    }

    fn in_context(position: usize, id: &str, ctx: &str, context_type: ContextType) -> QueueEntry {
        bare(position, id).with_context(QueueContext::new(ctx, context_type, format!("Ctx {}", ctx)))
    }

    #[test]
    fn empty_queue_has_no_groups() {
        assert!(build_groups(&[]).unwrap().is_empty());
    }

    #[test]
    fn consecutive_context_entries_merge() {
        let entries = vec![
            in_context(0, "a", "p1", ContextType::Playlist),
            in_context(1, "b", "p1", ContextType::Playlist),
            bare(2, "c"),
            in_context(3, "d", "a1", ContextType::Album),
            in_context(4, "e", "a1", ContextType::Album),
        ];

        let groups = build_groups(&entries).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].title, "Ctx p1");
        assert_eq!(groups[0].track_count, 2);
        assert_eq!(groups[0].total_duration_ms, 200_000);
        assert_eq!(groups[1].context_type, ContextType::Track);
        assert_eq!(groups[1].title, "Song c");
        assert!(groups[1].context_id.is_none());
        assert_eq!(groups[2].start_position, 3);
    }

    #[test]
    fn bare_tracks_never_merge() {
        let groups = build_groups(&[bare(0, "a"), bare(1, "b")]).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn track_contexts_with_shared_id_never_merge() {
        let entries = vec![
            in_context(0, "a", "x", ContextType::Track),
            in_context(1, "b", "x", ContextType::Track),
            bare(2, "c"),
            in_context(3, "d", "x", ContextType::Track),
        ];

        let groups = build_groups(&entries).unwrap();
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.track_count == 1));
    }

    #[test]
    fn same_id_different_type_does_not_merge() {
        let entries = vec![
            in_context(0, "a", "x", ContextType::Playlist),
            in_context(1, "b", "x", ContextType::Album),
        ];

        let groups = build_groups(&entries).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn split_context_is_malformed() {
        let entries = vec![
            in_context(0, "a", "p1", ContextType::Playlist),
            bare(1, "b"),
            in_context(2, "c", "p1", ContextType::Playlist),
        ];

        match build_groups(&entries) {
            Err(PanelError::MalformedQueue { context_id }) => assert_eq!(context_id.as_str(), "p1"),
            other => panic!("expected MalformedQueue, got {:?}", other),
        }

        let (groups, warning) = build_groups_or_singletons(&entries);
        assert_eq!(groups.len(), 3);
        assert!(warning.is_some());
        assert_eq!(groups[0].context_type, ContextType::Playlist);
    }

    #[test]
    fn flat_index_finds_entry_inside_group() {
        let entries = vec![
            bare(0, "a"),
            in_context(1, "b", "p1", ContextType::Playlist),
            in_context(2, "c", "p1", ContextType::Playlist),
        ];
        let groups = build_groups(&entries).unwrap();

        assert_eq!(flat_index_of(&groups, &entries[2]), Some(2));
        assert_eq!(group_index_of(&groups, 2), Some(1));
        assert_eq!(group_index_of(&groups, 3), None);
    }

    #[test]
    fn flat_index_of_stale_entry_is_none() {
        let entries = vec![bare(0, "a"), bare(1, "b")];
        let groups = build_groups(&entries).unwrap();

        // Same position, different track: the view changed underneath
        assert_eq!(flat_index_of(&groups, &bare(1, "zzz")), None);
        // Position past the end
        assert_eq!(flat_index_of(&groups, &bare(5, "a")), None);
    }

    #[test]
    fn shuffle_flag_comes_from_context() {
        let entry = bare(0, "a").with_context(
            QueueContext::new("p1", ContextType::Playlist, "Mix").shuffled(true),
        );
        let groups = build_groups(&[entry]).unwrap();
        assert!(groups[0].shuffle_enabled);
    }
}
