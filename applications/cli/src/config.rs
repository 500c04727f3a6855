/// CLI configuration
use crate::error::{CliError, Result};
use groupcast_client::{ClientConfig, StaticToken};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub panel: PanelSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    /// Defaults to `{url}/stream`
    #[serde(default)]
    pub stream_base_url: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PanelSettings {
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: i64,

    #[serde(default = "default_artwork_cache_size")]
    pub artwork_cache_size: usize,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `groupcast.toml` in the working directory; a
    /// missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("groupcast.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (GROUPCAST_SERVER__URL, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("GROUPCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(CliError::Config(
                "Server URL is required (set GROUPCAST_SERVER_URL)".to_string(),
            ));
        }

        if self.session.id.trim().is_empty() {
            return Err(CliError::Config(
                "Session id is required (set GROUPCAST_SESSION_ID)".to_string(),
            ));
        }

        if self.server.request_timeout_secs == 0 || self.server.connect_timeout_secs == 0 {
            return Err(CliError::Config(
                "Timeouts must be at least one second".to_string(),
            ));
        }

        if self.panel.skip_seconds <= 0 {
            return Err(CliError::Config(format!(
                "panel.skip_seconds must be positive, got {}",
                self.panel.skip_seconds
            )));
        }

        Ok(())
    }

    /// Client settings for the configured server and session
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.server.url.clone())
            .with_session(self.session.id.clone())
            .with_request_timeout(Duration::from_secs(self.server.request_timeout_secs));
        config.connect_timeout = Duration::from_secs(self.server.connect_timeout_secs);

        if let Some(stream_base_url) = &self.server.stream_base_url {
            config = config.with_stream_base(stream_base_url.clone());
        }
        if let Some(token) = &self.auth.token {
            config = config.with_tokens(Arc::new(StaticToken::new(token.clone())));
        }

        config
    }
}

// Default values
fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_skip_seconds() -> i64 {
    groupcast_playback::DEFAULT_SKIP_SECONDS
}

fn default_artwork_cache_size() -> usize {
    256
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            stream_base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            skip_seconds: default_skip_seconds(),
            artwork_cache_size: default_artwork_cache_size(),
        }
    }
}
