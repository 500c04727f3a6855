//! Session-scoped transport and queue operations.

use crate::error::{ClientError, Result};
use crate::types::{
    AppendRequest, PlayTrackRequest, QueueResponse, RepeatRequest, SeekRequest, SessionResponse,
    ShuffleRequest, TokenProvider, VolumeRequest,
};
use async_trait::async_trait;
use groupcast_artwork::PlaceholderArt;
use groupcast_core::types::{
    ContextId, QueueSnapshot, RepeatMode, SessionId, SessionSnapshot, ShuffleMode, TransportAck,
};
use groupcast_core::SessionApi;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Client bound to one playback session.
///
/// All paths are relative to `{server}/api/sessions/{session_id}`.
#[derive(Clone)]
pub struct SessionClient {
    http: Client,
    base_url: Url,
    session_id: SessionId,
    stream_base_url: String,
    tokens: Arc<dyn TokenProvider>,
    art: PlaceholderArt,
}

impl SessionClient {
    pub(crate) fn new(
        http: Client,
        server_url: &Url,
        session_id: SessionId,
        stream_base_url: String,
        tokens: Arc<dyn TokenProvider>,
        art: PlaceholderArt,
    ) -> Self {
        let mut base_url = server_url.clone();
        if let Ok(mut segments) = base_url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "sessions", session_id.as_str()]);
        }
        Self {
            http,
            base_url,
            session_id,
            stream_base_url,
            tokens,
            art,
        }
    }

    /// Session this client is bound to.
    pub fn id(&self) -> &SessionId {
        &self.session_id
    }

    /// Look up the session. A 404 means the session does not exist.
    pub async fn session(&self) -> Result<SessionSnapshot> {
        debug!(session_id = %self.session_id, "Fetching session");

        let response = self.send(self.request(Method::GET, &[])).await;
        let response = match response {
            Err(ClientError::ServerError { status: 404, .. }) => {
                return Err(ClientError::SessionMissing(self.session_id.to_string()))
            }
            other => other?,
        };

        let session: SessionResponse = parse_json(response, "session").await?;
        Ok(session.into())
    }

    /// Fetch the full queue.
    pub async fn queue(&self) -> Result<QueueSnapshot> {
        let response = self.send(self.request(Method::GET, &["queue"])).await?;
        let queue: QueueResponse = parse_json(response, "queue").await?;

        debug!(
            entries = queue.queue.len(),
            queue_position = queue.queue_position,
            "Fetched queue"
        );

        Ok(queue.into_snapshot(&self.stream_base_url, &self.art))
    }

    /// Issue a transport command with no body.
    pub async fn command(&self, name: &str) -> Result<TransportAck> {
        self.transport(&[name], None::<&()>).await
    }

    /// Jump to an absolute queue index.
    pub async fn play_at(&self, queue_position: usize) -> Result<TransportAck> {
        self.transport(&["play-track"], Some(&PlayTrackRequest { queue_position }))
            .await
    }

    /// Absolute seek.
    pub async fn seek_to(&self, position_ms: u64) -> Result<TransportAck> {
        self.transport(&["seek"], Some(&SeekRequest { position_ms }))
            .await
    }

    /// Set the volume (clamped to 100).
    pub async fn volume(&self, volume: u8) -> Result<TransportAck> {
        self.transport(
            &["volume"],
            Some(&VolumeRequest {
                volume: volume.min(100),
            }),
        )
        .await
    }

    /// Set the repeat mode.
    pub async fn repeat(&self, repeat_mode: RepeatMode) -> Result<TransportAck> {
        self.transport(&["repeat"], Some(&RepeatRequest { repeat_mode }))
            .await
    }

    /// Set the session-wide shuffle mode.
    pub async fn shuffle(&self, shuffle_mode: ShuffleMode) -> Result<TransportAck> {
        self.transport(&["shuffle"], Some(&ShuffleRequest { shuffle_mode }))
            .await
    }

    /// Append tracks or playlists.
    pub async fn append(&self, music_ids: &[String]) -> Result<()> {
        debug!(count = music_ids.len(), "Appending to queue");
        self.send(
            self.request(Method::POST, &["queue"])
                .json(&AppendRequest { music_ids }),
        )
        .await?;
        Ok(())
    }

    /// Remove one flat position (and its context).
    pub async fn remove(&self, position: usize) -> Result<()> {
        debug!(position, "Removing from queue");
        let position = position.to_string();
        self.send(self.request(Method::DELETE, &["queue", &position]))
            .await?;
        Ok(())
    }

    /// Empty the queue.
    pub async fn clear(&self) -> Result<()> {
        debug!("Clearing queue");
        self.send(self.request(Method::DELETE, &["queue"])).await?;
        Ok(())
    }

    /// Shuffle (`true`) or unshuffle (`false`) one context.
    pub async fn reorder_context(&self, context_id: &ContextId, shuffle: bool) -> Result<()> {
        let action = if shuffle { "shuffle" } else { "unshuffle" };
        debug!(context_id = %context_id, action, "Reordering context");

        self.send(self.request(
            Method::POST,
            &["queue", "context", context_id.as_str(), action],
        ))
        .await?;
        Ok(())
    }

    /// Request to `{base}/{segments...}`; each segment is percent-encoded
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        let builder = self.http.request(method, url);

        match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(ClientError::from_send)?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(ClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    async fn transport<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<TransportAck> {
        debug!(session_id = %self.session_id, command = ?segments, "Sending transport command");

        let mut builder = self.request(Method::POST, segments);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.send(builder).await?;
        let text = response.text().await.map_err(ClientError::from_send)?;

        // Servers may acknowledge with an empty body (e.g. 204)
        if text.trim().is_empty() {
            return Ok(TransportAck::default());
        }

        serde_json::from_str(&text).map_err(|e| {
            ClientError::ParseError(format!("Failed to parse transport response: {}", e))
        })
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {} response: {}", what, e)))
}

#[async_trait]
impl SessionApi for SessionClient {
    fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    async fn get_session(&self) -> groupcast_core::Result<SessionSnapshot> {
        Ok(self.session().await?)
    }

    async fn stop(&self) -> groupcast_core::Result<TransportAck> {
        Ok(self.command("stop").await?)
    }

    async fn play(&self) -> groupcast_core::Result<TransportAck> {
        Ok(self.command("play").await?)
    }

    async fn pause(&self) -> groupcast_core::Result<TransportAck> {
        Ok(self.command("pause").await?)
    }

    async fn next(&self) -> groupcast_core::Result<TransportAck> {
        Ok(self.command("next").await?)
    }

    async fn previous(&self) -> groupcast_core::Result<TransportAck> {
        Ok(self.command("previous").await?)
    }

    async fn play_track(&self, queue_position: usize) -> groupcast_core::Result<TransportAck> {
        Ok(self.play_at(queue_position).await?)
    }

    async fn seek(&self, position_ms: u64) -> groupcast_core::Result<TransportAck> {
        Ok(self.seek_to(position_ms).await?)
    }

    async fn set_volume(&self, volume: u8) -> groupcast_core::Result<TransportAck> {
        Ok(self.volume(volume).await?)
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) -> groupcast_core::Result<TransportAck> {
        Ok(self.repeat(mode).await?)
    }

    async fn set_shuffle_mode(&self, mode: ShuffleMode) -> groupcast_core::Result<TransportAck> {
        Ok(self.shuffle(mode).await?)
    }

    async fn get_queue(&self) -> groupcast_core::Result<QueueSnapshot> {
        Ok(self.queue().await?)
    }

    async fn append_to_queue(&self, music_ids: &[String]) -> groupcast_core::Result<()> {
        Ok(self.append(music_ids).await?)
    }

    async fn remove_from_queue(&self, position: usize) -> groupcast_core::Result<()> {
        Ok(self.remove(position).await?)
    }

    async fn clear_queue(&self) -> groupcast_core::Result<()> {
        Ok(self.clear().await?)
    }

    async fn shuffle_context(&self, context_id: &ContextId) -> groupcast_core::Result<()> {
        Ok(self.reorder_context(context_id, true).await?)
    }

    async fn unshuffle_context(&self, context_id: &ContextId) -> groupcast_core::Result<()> {
        Ok(self.reorder_context(context_id, false).await?)
    }
}

