/// Playback session types shared with the server
use crate::types::SessionId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Server-side transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
}

impl PlaybackStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repeat mode for playback
///
/// The cycle order is part of the server contract: clients only ever ask for
/// [`RepeatMode::next`] of the confirmed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    #[default]
    None,
    Context,
    AllQueue,
}

impl RepeatMode {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Context => "context",
            Self::AllQueue => "all_queue",
        }
    }

    /// Next value in the cycle none -> context -> all_queue -> none
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Context,
            Self::Context => Self::AllQueue,
            Self::AllQueue => Self::None,
        }
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "context" => Ok(Self::Context),
            "all_queue" => Ok(Self::AllQueue),
            other => Err(format!("unknown repeat mode: {other}")),
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session-wide shuffle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShuffleMode {
    #[default]
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "queue")]
    Queue,
    #[serde(rename = "context")]
    Context,
    #[serde(rename = "context+track")]
    ContextAndTrack,
}

impl ShuffleMode {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Queue => "queue",
            Self::Context => "context",
            Self::ContextAndTrack => "context+track",
        }
    }

    /// Next value in the cycle off -> queue -> context -> context+track -> off
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::Queue,
            Self::Queue => Self::Context,
            Self::Context => Self::ContextAndTrack,
            Self::ContextAndTrack => Self::Off,
        }
    }
}

impl FromStr for ShuffleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "queue" => Ok(Self::Queue),
            "context" => Ok(Self::Context),
            "context+track" => Ok(Self::ContextAndTrack),
            other => Err(format!("unknown shuffle mode: {other}")),
        }
    }
}

impl std::fmt::Display for ShuffleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transport fields of a server-owned playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session this state belongs to
    pub session_id: SessionId,

    /// Transport status
    pub playback_status: PlaybackStatus,

    /// Last known authoritative playhead in milliseconds
    pub position_ms: u64,

    /// Volume level (0-100)
    pub volume: u8,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Session-wide shuffle mode
    pub shuffle_mode: ShuffleMode,

    /// Index of the active queue entry
    pub queue_position: usize,
}

impl SessionSnapshot {
    /// A stopped session at position zero
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            playback_status: PlaybackStatus::Stopped,
            position_ms: 0,
            volume: 100,
            repeat_mode: RepeatMode::None,
            shuffle_mode: ShuffleMode::Off,
            queue_position: 0,
        }
    }
}

/// Server acknowledgement of a transport command
///
/// Every field is optional: a server only echoes what the command changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportAck {
    /// New active queue index (navigation commands)
    #[serde(default)]
    pub queue_position: Option<usize>,

    /// New transport status
    #[serde(default)]
    pub playback_status: Option<PlaybackStatus>,

    /// New playhead
    #[serde(default)]
    pub position_ms: Option<u64>,

    /// New volume
    #[serde(default)]
    pub volume: Option<u8>,

    /// New repeat mode
    #[serde(default)]
    pub repeat_mode: Option<RepeatMode>,

    /// New shuffle mode
    #[serde(default)]
    pub shuffle_mode: Option<ShuffleMode>,
}

impl TransportAck {
    /// Acknowledgement of a navigation command
    pub fn at_position(queue_position: usize) -> Self {
        Self {
            queue_position: Some(queue_position),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycle_visits_every_mode_in_order() {
        let mut mode = RepeatMode::None;
        let mut visited = Vec::new();
        for _ in 0..3 {
            mode = mode.next();
            visited.push(mode);
        }
        assert_eq!(
            visited,
            vec![RepeatMode::Context, RepeatMode::AllQueue, RepeatMode::None]
        );
    }

    #[test]
    fn shuffle_cycle_returns_to_off() {
        let mut mode = ShuffleMode::Off;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, ShuffleMode::Off);
        assert_eq!(ShuffleMode::Context.next(), ShuffleMode::ContextAndTrack);
    }

    #[test]
    fn wire_names_match_display() {
        for mode in [RepeatMode::None, RepeatMode::Context, RepeatMode::AllQueue] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode));
            assert_eq!(mode.as_str().parse::<RepeatMode>().unwrap(), mode);
        }
        for mode in [
            ShuffleMode::Off,
            ShuffleMode::Queue,
            ShuffleMode::Context,
            ShuffleMode::ContextAndTrack,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode));
            assert_eq!(mode.as_str().parse::<ShuffleMode>().unwrap(), mode);
        }
    }

    #[test]
    fn ack_fields_default_to_none() {
        let ack: TransportAck = serde_json::from_str(r#"{"queue_position": 4}"#).unwrap();
        assert_eq!(ack, TransportAck::at_position(4));
        assert!(ack.playback_status.is_none());
    }
}
