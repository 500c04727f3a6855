//! Property-based tests for queue grouping and transport guards
//!
//! Uses proptest to verify invariants across many random queues.

use groupcast_core::types::{ContextType, QueueContext, QueueEntry, QueueSnapshot, Track};
use groupcast_playback::{
    build_groups, build_groups_or_singletons, clamp_seek, flat_index_of, TransportController,
    TransportEvent,
};
use proptest::prelude::*;

// ===== Helpers =====

/// One run of consecutive entries: `None` = bare tracks, otherwise a context
/// type applied to every entry of the run
fn arbitrary_run() -> impl Strategy<Value = (Option<ContextType>, usize, u32)> {
    (
        prop_oneof![
            Just(None),
            Just(Some(ContextType::Track)),
            Just(Some(ContextType::Playlist)),
            Just(Some(ContextType::Album)),
        ],
        1usize..5,  // run length
        1u32..600, // duration (seconds)
    )
}

/// A well-formed flat queue: every playlist/album context occupies one run
fn arbitrary_queue() -> impl Strategy<Value = Vec<QueueEntry>> {
    prop::collection::vec(arbitrary_run(), 0..12).prop_map(|runs| {
        let mut entries = Vec::new();
        for (run_index, (context_type, len, duration)) in runs.into_iter().enumerate() {
            for _ in 0..len {
                let position = entries.len();
                let track = Track::new(
                    format!("t{}", position),
                    format!("Track {}", position),
                    "Artist",
                    duration,
                );
                let mut entry = QueueEntry::new(position, track);
                if let Some(context_type) = context_type {
                    // Track contexts deliberately share one id to mimic the
                    // server bug they must survive
                    let id = match context_type {
                        ContextType::Track => "shared".to_string(),
                        _ => format!("ctx{}", run_index),
                    };
                    entry = entry.with_context(QueueContext::new(id, context_type, "Ctx"));
                }
                entries.push(entry);
            }
        }
        entries
    })
}

/// Any flat queue, including contexts split into non-adjacent runs
fn arbitrary_messy_queue() -> impl Strategy<Value = Vec<QueueEntry>> {
    prop::collection::vec((0usize..3, any::<bool>()), 0..20).prop_map(|picks| {
        picks
            .into_iter()
            .enumerate()
            .map(|(position, (ctx, album))| {
                let entry = QueueEntry::new(
                    position,
                    Track::new(format!("t{}", position), "T", "A", 60),
                );
                let context_type = if album {
                    ContextType::Album
                } else {
                    ContextType::Playlist
                };
                entry.with_context(QueueContext::new(format!("c{}", ctx), context_type, "C"))
            })
            .collect()
    })
}

// ===== Property Tests =====

proptest! {
    /// Property: concatenating every group's entries reproduces the flat list
    #[test]
    fn grouping_is_lossless(entries in arbitrary_queue()) {
        let groups = build_groups(&entries).unwrap();

        let flattened: Vec<QueueEntry> = groups
            .iter()
            .flat_map(|group| group.entries.iter().cloned())
            .collect();
        prop_assert_eq!(&flattened, &entries);

        for group in &groups {
            prop_assert_eq!(group.track_count, group.entries.len());
            prop_assert_eq!(
                group.total_duration_ms,
                group.tracks().map(|t| t.duration_ms()).sum::<u64>()
            );
        }
    }

    /// Property: flat_index_of(build_groups(entries), entries[i]) == i
    #[test]
    fn grouping_round_trip(entries in arbitrary_queue()) {
        let groups = build_groups(&entries).unwrap();

        for (i, entry) in entries.iter().enumerate() {
            prop_assert_eq!(flat_index_of(&groups, entry), Some(i));
        }
    }

    /// Property: identical input yields structurally equal output
    #[test]
    fn grouping_is_deterministic(entries in arbitrary_queue()) {
        prop_assert_eq!(build_groups(&entries), build_groups(&entries));
    }

    /// Property: track-type entries are never merged
    #[test]
    fn track_contexts_stay_singletons(entries in arbitrary_queue()) {
        let groups = build_groups(&entries).unwrap();

        for group in groups.iter().filter(|g| g.context_type == ContextType::Track) {
            prop_assert_eq!(group.track_count, 1);
        }
    }

    /// Property: the lenient builder never loses entries, even on malformed input
    #[test]
    fn lenient_grouping_is_lossless(entries in arbitrary_messy_queue()) {
        let (groups, warning) = build_groups_or_singletons(&entries);

        let count: usize = groups.iter().map(|g| g.track_count).sum();
        prop_assert_eq!(count, entries.len());

        if warning.is_some() {
            prop_assert_eq!(groups.len(), entries.len());
        }
        for (i, entry) in entries.iter().enumerate() {
            prop_assert_eq!(flat_index_of(&groups, entry), Some(i));
        }
    }

    /// Property: seek targets always land inside the track
    #[test]
    fn seek_is_always_clamped(target in any::<i64>(), duration in 0u64..10_000_000) {
        let clamped = clamp_seek(target, duration);
        prop_assert!(clamped <= duration);
        if target <= 0 {
            prop_assert_eq!(clamped, 0);
        }
    }

    /// Property: previous is disabled only at 0, next only at the last entry
    #[test]
    fn navigation_guards_match_position(len in 1usize..30, pick in any::<prop::sample::Index>()) {
        let position = pick.index(len);
        let entries = (0..len)
            .map(|i| QueueEntry::new(i, Track::new(format!("t{}", i), "T", "A", 60)))
            .collect();

        let mut transport = TransportController::new();
        transport.handle(TransportEvent::QueueSynced(QueueSnapshot::new(entries, position)));
        let guards = transport.navigation_guards();

        prop_assert_eq!(guards.previous_disabled, position == 0);
        prop_assert_eq!(guards.next_disabled, position == len - 1);
    }
}
