//! Main Groupcast server client.

use crate::error::{ClientError, Result};
use crate::session::SessionClient;
use crate::types::ClientConfig;
use groupcast_artwork::PlaceholderArt;
use groupcast_core::types::SessionId;
use reqwest::Client;
use tracing::debug;

/// Entry point for talking to a Groupcast server.
///
/// Owns the HTTP connection pool and hands out [`SessionClient`]s bound to a
/// single playback session.
///
/// # Example
///
/// ```ignore
/// use groupcast_client::{ClientConfig, GroupcastClient};
///
/// let config = ClientConfig::new("https://groupcast.example.com").with_session("living-room");
/// let client = GroupcastClient::new(config)?;
///
/// let session = client.session()?;
/// let queue = session.queue().await?;
/// println!("{} entries queued", queue.len());
/// ```
pub struct GroupcastClient {
    http: Client,
    base_url: url::Url,
    config: ClientConfig,
    art: PlaceholderArt,
}

impl GroupcastClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let base_url =
            url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let normalized_config = ClientConfig { url, ..config };

        // Every request is bounded; a timeout surfaces as ClientError::Timeout
        let http = Client::builder()
            .timeout(normalized_config.request_timeout)
            .connect_timeout(normalized_config.connect_timeout)
            .user_agent(format!("Groupcast/{} (Panel)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            config: normalized_config,
            art: PlaceholderArt::default(),
        })
    }

    /// Share a placeholder art cache with the rest of the application.
    #[must_use]
    pub fn with_artwork(mut self, art: PlaceholderArt) -> Self {
        self.art = art;
        self
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Client for the configured session.
    ///
    /// Fails with [`ClientError::SessionMissing`] when no session id was
    /// configured.
    pub fn session(&self) -> Result<SessionClient> {
        let session_id = self
            .config
            .session_id
            .clone()
            .ok_or_else(|| ClientError::SessionMissing("no session configured".into()))?;

        Ok(self.session_with_id(session_id))
    }

    /// Client for an explicit session.
    pub fn session_with_id(&self, session_id: SessionId) -> SessionClient {
        debug!(session_id = %session_id, "Binding session client");

        SessionClient::new(
            self.http.clone(),
            &self.base_url,
            session_id,
            self.config.stream_base_url.clone(),
            self.config.tokens.clone(),
            self.art.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(GroupcastClient::new(ClientConfig::new("https://example.com")).is_ok());
        assert!(GroupcastClient::new(ClientConfig::new("http://localhost:8080")).is_ok());

        // Invalid URLs
        assert!(GroupcastClient::new(ClientConfig::new("")).is_err());
        assert!(GroupcastClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(GroupcastClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client =
            GroupcastClient::new(ClientConfig::new("https://example.com/")).expect("valid url");

        // URL should have trailing slash removed
        assert_eq!(client.url(), "https://example.com");
    }

    #[test]
    fn test_session_requires_id() {
        let client = GroupcastClient::new(ClientConfig::new("https://example.com")).unwrap();
        assert!(matches!(
            client.session(),
            Err(ClientError::SessionMissing(_))
        ));

        let client = GroupcastClient::new(
            ClientConfig::new("https://example.com").with_session("kitchen"),
        )
        .unwrap();
        assert_eq!(client.session().unwrap().id().as_str(), "kitchen");
    }
}
