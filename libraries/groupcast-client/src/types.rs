//! Types for Groupcast session API requests and responses.

use groupcast_artwork::PlaceholderArt;
use groupcast_core::types::{
    ContextType, PlaybackStatus, QueueContext, QueueEntry, QueueSnapshot, RepeatMode, SessionId,
    SessionSnapshot, ShuffleMode, Track,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Supplies the bearer token for each request.
///
/// Token storage lives outside this crate; the client only asks for the
/// current value when it builds a request.
pub trait TokenProvider: Send + Sync {
    /// Current access token, `None` to send requests unauthenticated
    fn access_token(&self) -> Option<String>;
}

/// Fixed token known at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Provider that always returns `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Provider that never authenticates
    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Configuration for connecting to a Groupcast server.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API server (e.g., "https://groupcast.example.com")
    pub url: String,
    /// Base URL audio storage keys are resolved against
    pub stream_base_url: String,
    /// Session the panel drives; `None` means no session was provided
    pub session_id: Option<SessionId>,
    /// Upper bound for a whole request
    pub request_timeout: Duration,
    /// Upper bound for establishing a connection
    pub connect_timeout: Duration,
    /// Bearer token source
    pub tokens: Arc<dyn TokenProvider>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    ///
    /// Streams resolve against `{url}/stream` until overridden.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let stream_base_url = format!("{}/stream", url.trim_end_matches('/'));
        Self {
            url,
            stream_base_url,
            session_id: None,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            tokens: Arc::new(StaticToken::none()),
        }
    }

    /// Set the session id
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(SessionId::new(session_id));
        self
    }

    /// Set the stream base URL
    #[must_use]
    pub fn with_stream_base(mut self, stream_base_url: impl Into<String>) -> Self {
        self.stream_base_url = stream_base_url.into();
        self
    }

    /// Set the token provider
    #[must_use]
    pub fn with_tokens(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("stream_base_url", &self.stream_base_url)
            .field("session_id", &self.session_id)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Body for play-track.
#[derive(Debug, Serialize)]
pub struct PlayTrackRequest {
    pub queue_position: usize,
}

/// Body for absolute seek.
#[derive(Debug, Serialize)]
pub struct SeekRequest {
    pub position_ms: u64,
}

/// Body for volume changes.
#[derive(Debug, Serialize)]
pub struct VolumeRequest {
    pub volume: u8,
}

/// Body for repeat mode changes.
#[derive(Debug, Serialize)]
pub struct RepeatRequest {
    pub repeat_mode: RepeatMode,
}

/// Body for shuffle mode changes.
#[derive(Debug, Serialize)]
pub struct ShuffleRequest {
    pub shuffle_mode: ShuffleMode,
}

/// Body for append-to-queue.
#[derive(Debug, Serialize)]
pub struct AppendRequest<'a> {
    pub music_ids: &'a [String],
}

// =============================================================================
// Response Types
// =============================================================================

/// Session state as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub playback_status: PlaybackStatus,
    #[serde(default)]
    pub position_ms: u64,
    pub volume: u8,
    #[serde(default)]
    pub repeat_mode: RepeatMode,
    #[serde(default)]
    pub shuffle_mode: ShuffleMode,
    #[serde(default)]
    pub queue_position: usize,
}

impl From<SessionResponse> for SessionSnapshot {
    fn from(response: SessionResponse) -> Self {
        Self {
            session_id: SessionId::new(response.session_id),
            playback_status: response.playback_status,
            position_ms: response.position_ms,
            volume: response.volume.min(100),
            repeat_mode: response.repeat_mode,
            shuffle_mode: response.shuffle_mode,
            queue_position: response.queue_position,
        }
    }
}

/// A track as embedded in a queue entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerMusic {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    #[serde(default)]
    pub duration_seconds: u32,
    pub cover_art: Option<String>,
    pub storage_key: String,
}

/// Context of a queue entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerContext {
    pub id: String,
    #[serde(rename = "type")]
    pub context_type: ContextType,
    pub title: Option<String>,
    #[serde(default)]
    pub shuffle_enabled: bool,
}

/// One flat queue entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerQueueEntry {
    pub position: usize,
    pub music: ServerMusic,
    pub context: Option<ServerContext>,
}

/// Full queue response.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueResponse {
    pub queue: Vec<ServerQueueEntry>,
    #[serde(default)]
    pub queue_position: usize,
}

impl QueueResponse {
    /// Convert into a core snapshot.
    ///
    /// Entries are ordered by their server position and renumbered densely.
    /// Missing cover art falls back to a placeholder generated from the title.
    pub fn into_snapshot(self, stream_base_url: &str, art: &PlaceholderArt) -> QueueSnapshot {
        let mut queue = self.queue;
        queue.sort_by_key(|entry| entry.position);

        let entries = queue
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                let track = build_track(entry.music, stream_base_url, art);
                let context = entry.context.map(|ctx| {
                    let title = ctx.title.unwrap_or_else(|| track.title.clone());
                    QueueContext::new(ctx.id, ctx.context_type, title).shuffled(ctx.shuffle_enabled)
                });
                QueueEntry {
                    position,
                    track,
                    context,
                }
            })
            .collect();

        QueueSnapshot::new(entries, self.queue_position)
    }
}

fn build_track(music: ServerMusic, stream_base_url: &str, art: &PlaceholderArt) -> Track {
    let cover_art = match music.cover_art {
        Some(cover) if !cover.trim().is_empty() => cover,
        _ => art.cover_for(&music.title),
    };
    let locator = stream_locator(stream_base_url, &music.storage_key);

    Track::new(
        music.id,
        music.title,
        music.artist.unwrap_or_else(|| "Unknown Artist".to_string()),
        music.duration_seconds,
    )
    .with_cover_art(cover_art)
    .with_source_locator(locator)
}

/// Join the stream base and a storage key with exactly one slash.
pub fn stream_locator(stream_base_url: &str, storage_key: &str) -> String {
    format!(
        "{}/{}",
        stream_base_url.trim_end_matches('/'),
        storage_key.trim_start_matches('/')
    )
}
