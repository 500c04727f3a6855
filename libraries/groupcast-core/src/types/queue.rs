/// Queue types for playback sessions
use crate::types::{ContextId, Track};
use serde::{Deserialize, Serialize};

/// Kind of context a queued track came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    /// Bare track, never grouped with its neighbours
    Track,
    /// Playlist
    Playlist,
    /// Album
    Album,
}

impl ContextType {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Playlist => "playlist",
            Self::Album => "album",
        }
    }
}

impl std::fmt::Display for ContextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Context a queue entry belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueContext {
    /// Context identifier
    pub id: ContextId,

    /// Context kind
    pub context_type: ContextType,

    /// Display title (playlist or album name)
    pub title: String,

    /// Per-context shuffle flag, independent of the session shuffle mode
    pub shuffle_enabled: bool,
}

impl QueueContext {
    /// Create an unshuffled context
    pub fn new(id: impl Into<String>, context_type: ContextType, title: impl Into<String>) -> Self {
        Self {
            id: ContextId::new(id),
            context_type,
            title: title.into(),
            shuffle_enabled: false,
        }
    }

    /// Set the shuffle flag
    #[must_use]
    pub fn shuffled(mut self, shuffle_enabled: bool) -> Self {
        self.shuffle_enabled = shuffle_enabled;
        self
    }
}

/// One flat element of the server queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Zero-based position within the flat queue
    pub position: usize,

    /// The queued track
    pub track: Track,

    /// Originating context, `None` for a bare track
    pub context: Option<QueueContext>,
}

impl QueueEntry {
    /// Create an entry without a context
    pub fn new(position: usize, track: Track) -> Self {
        Self {
            position,
            track,
            context: None,
        }
    }

    /// Attach a context
    #[must_use]
    pub fn with_context(mut self, context: QueueContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Effective context type (`Track` for bare entries)
    pub fn context_type(&self) -> ContextType {
        self.context
            .as_ref()
            .map_or(ContextType::Track, |c| c.context_type)
    }
}

/// Authoritative queue as returned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Ordered entries
    pub entries: Vec<QueueEntry>,

    /// Index of the active entry; out of bounds when nothing is current
    pub queue_position: usize,
}

impl QueueSnapshot {
    /// Create a snapshot
    pub fn new(entries: Vec<QueueEntry>, queue_position: usize) -> Self {
        Self {
            entries,
            queue_position,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `queue_position`, if in bounds
    pub fn current(&self) -> Option<&QueueEntry> {
        self.entries.get(self.queue_position)
    }

    /// Whether `queue_position` points at the final entry
    pub fn is_at_last(&self) -> bool {
        !self.entries.is_empty() && self.queue_position + 1 >= self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(position: usize, id: &str) -> QueueEntry {
        QueueEntry::new(position, Track::new(id, id.to_uppercase(), "Artist", 60))
    }

    #[test]
    fn current_entry_out_of_bounds() {
        let snapshot = QueueSnapshot::new(vec![entry(0, "a")], 3);
        assert!(snapshot.current().is_none());

        let empty = QueueSnapshot::default();
        assert!(empty.current().is_none());
        assert!(!empty.is_at_last());
    }

    #[test]
    fn last_entry_detection() {
        let snapshot = QueueSnapshot::new(vec![entry(0, "a"), entry(1, "b")], 1);
        assert!(snapshot.is_at_last());
        assert_eq!(snapshot.current().unwrap().track.id.as_str(), "b");
    }

    #[test]
    fn bare_entry_is_track_context() {
        let bare = entry(0, "a");
        assert_eq!(bare.context_type(), ContextType::Track);

        let grouped = entry(1, "b").with_context(QueueContext::new("p1", ContextType::Playlist, "Mix"));
        assert_eq!(grouped.context_type(), ContextType::Playlist);
    }

    #[test]
    fn context_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ContextType::Album).unwrap(), "\"album\"");
    }
}
