/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Atomic playable unit.
///
/// Built once from server data and never mutated afterwards; a queue refetch
/// replaces every track wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Authoritative length in whole seconds
    pub duration_seconds: u32,

    /// Cover image URI (never empty, a generated placeholder when the server
    /// has none)
    pub cover_art: String,

    /// URL of the audio resource
    pub source_locator: String,
}

impl Track {
    /// Create a track with empty cover art and locator
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_seconds: u32,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            duration_seconds,
            cover_art: String::new(),
            source_locator: String::new(),
        }
    }

    /// Set the cover art URI
    #[must_use]
    pub fn with_cover_art(mut self, cover_art: impl Into<String>) -> Self {
        self.cover_art = cover_art.into();
        self
    }

    /// Set the audio resource URL
    #[must_use]
    pub fn with_source_locator(mut self, locator: impl Into<String>) -> Self {
        self.source_locator = locator.into();
        self
    }

    /// Track length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        u64::from(self.duration_seconds) * 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_in_milliseconds() {
        let track = Track::new("t1", "Song", "Artist", 215);
        assert_eq!(track.duration_ms(), 215_000);
    }

    #[test]
    fn builder_sets_locator_and_art() {
        let track = Track::new("t1", "Song", "Artist", 10)
            .with_cover_art("data:image/svg+xml;base64,AAAA")
            .with_source_locator("https://cdn.example.com/t1.mp3");

        assert_eq!(track.source_locator, "https://cdn.example.com/t1.mp3");
        assert!(!track.cover_art.is_empty());
    }
}
