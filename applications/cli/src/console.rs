//! Interactive panel console
//!
//! Parses one line of input into a panel action and renders the panel as text.

use crate::error::{CliError, Result};
use groupcast_core::types::{PlaylistId, TrackId};
use groupcast_playback::{ContextGroup, PlayerPanel, VolumeChange};
use std::fmt::Write as _;
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  play | p              toggle play/pause
  next | n              next track
  prev | b              previous track
  ff / rw               skip forward / backward
  seek <0-100>          seek to a percentage of the track
  vol <0-100>           set volume
  repeat                cycle repeat mode
  shuffle               cycle session shuffle mode
  shuffle <group>       toggle shuffle for one queue group
  track <position>      play the entry at a queue position
  add <id>...           append tracks
  addpl <id>...         append playlists
  rm <group>            remove a queue group
  clear                 clear the queue
  queue | q             show the queue
  status | s            show the transport
  help | ?              this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    PlayPause,
    Next,
    Previous,
    SkipForward,
    SkipBackward,
    Seek(u8),
    Volume(u8),
    CycleRepeat,
    CycleShuffle,
    ToggleGroupShuffle(usize),
    PlayPosition(usize),
    AddTracks(Vec<TrackId>),
    AddPlaylists(Vec<PlaylistId>),
    RemoveGroup(usize),
    Clear,
    ShowQueue,
    ShowStatus,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::ShowStatus);
        };
        let rest: Vec<&str> = words.collect();

        let command = match (head, rest.as_slice()) {
            ("play" | "p", []) => Self::PlayPause,
            ("next" | "n", []) => Self::Next,
            ("prev" | "b", []) => Self::Previous,
            ("ff", []) => Self::SkipForward,
            ("rw", []) => Self::SkipBackward,
            ("seek", [percent]) => Self::Seek(parse_percent(percent)?),
            ("vol", [level]) => Self::Volume(parse_percent(level)?),
            ("repeat", []) => Self::CycleRepeat,
            ("shuffle", []) => Self::CycleShuffle,
            ("shuffle", [group]) => Self::ToggleGroupShuffle(parse_index(group)?),
            ("track", [position]) => Self::PlayPosition(parse_index(position)?),
            ("add", ids) if !ids.is_empty() => {
                Self::AddTracks(ids.iter().map(|id| TrackId::from(*id)).collect())
            }
            ("addpl", ids) if !ids.is_empty() => {
                Self::AddPlaylists(ids.iter().map(|id| PlaylistId::from(*id)).collect())
            }
            ("rm", [group]) => Self::RemoveGroup(parse_index(group)?),
            ("clear", []) => Self::Clear,
            ("queue" | "q", []) => Self::ShowQueue,
            ("status" | "s", []) => Self::ShowStatus,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            _ => return Err(CliError::UnknownCommand(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn parse_percent(word: &str) -> Result<u8> {
    match word.parse::<u8>() {
        Ok(value) if value <= 100 => Ok(value),
        _ => Err(CliError::InvalidArgument(format!(
            "expected 0-100, got {}",
            word
        ))),
    }
}

fn parse_index(word: &str) -> Result<usize> {
    word.parse()
        .map_err(|_| CliError::InvalidArgument(format!("expected an index, got {}", word)))
}

/// Apply a command to the panel
///
/// Returns `false` when the console should exit.
pub fn apply(panel: &mut PlayerPanel, command: ConsoleCommand) -> Result<bool> {
    match command {
        ConsoleCommand::PlayPause => panel.play_pause(),
        ConsoleCommand::Next => panel.next(),
        ConsoleCommand::Previous => panel.previous(),
        ConsoleCommand::SkipForward => panel.skip_forward(),
        ConsoleCommand::SkipBackward => panel.skip_backward(),
        ConsoleCommand::Seek(percent) => panel.seek_to_ratio(f64::from(percent) / 100.0),
        ConsoleCommand::Volume(level) => panel.set_volume(VolumeChange::Commit(level)),
        ConsoleCommand::CycleRepeat => panel.set_repeat_mode(),
        ConsoleCommand::CycleShuffle => panel.cycle_shuffle_mode(),
        ConsoleCommand::ToggleGroupShuffle(group) => {
            if !panel.toggle_shuffle(group) {
                return Err(CliError::InvalidArgument(format!(
                    "group {} cannot be shuffled right now",
                    group
                )));
            }
        }
        ConsoleCommand::PlayPosition(position) => {
            let entry = panel
                .queue_groups()
                .iter()
                .flat_map(|group| group.entries.iter())
                .find(|entry| entry.position == position)
                .cloned()
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!("no queue entry at {}", position))
                })?;
            panel.play_track(&entry);
        }
        ConsoleCommand::AddTracks(ids) => {
            panel.add_tracks(ids);
        }
        ConsoleCommand::AddPlaylists(ids) => {
            panel.add_playlists(ids);
        }
        ConsoleCommand::RemoveGroup(group) => {
            if !panel.remove_context(group) {
                return Err(CliError::InvalidArgument(format!(
                    "group {} cannot be removed right now",
                    group
                )));
            }
        }
        ConsoleCommand::Clear => {
            panel.clear_queue();
        }
        ConsoleCommand::ShowQueue => println!("{}", render_queue(panel)),
        ConsoleCommand::ShowStatus => println!("{}", render_status(panel)),
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Quit => return Ok(false),
    }

    Ok(true)
}

/// `m:ss`
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn render_status(panel: &PlayerPanel) -> String {
    let mut out = String::new();

    match panel.current_track() {
        Some(track) => {
            let _ = write!(
                out,
                "{} {} - {} [{} / {}]",
                if panel.is_playing() { ">" } else { "||" },
                track.artist,
                track.title,
                format_clock(panel.current_time_seconds()),
                format_clock(u64::from(track.duration_seconds)),
            );
        }
        None => out.push_str("-- nothing loaded"),
    }

    let guards = panel.navigation_guards();
    let _ = write!(
        out,
        "  vol {}  repeat {}  shuffle {}  prev {}  next {}",
        panel.volume(),
        panel.repeat_mode(),
        panel.shuffle_mode(),
        if guards.previous_disabled { "off" } else { "on" },
        if guards.next_disabled { "off" } else { "on" },
    );

    if let Some(error) = panel.audio_error() {
        let _ = write!(out, "\n  audio: {}", error);
    }
    if let Some(error) = panel.last_error() {
        let _ = write!(out, "\n  error: {}", error);
    }

    out
}

pub fn render_queue(panel: &PlayerPanel) -> String {
    let groups = panel.queue_groups();
    if groups.is_empty() {
        return "queue is empty".to_string();
    }

    let current = panel.current_group_index();
    let mut out = String::new();
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let marker = if current == Some(index) { "*" } else { " " };
        let _ = write!(out, "{} {:>2}  {}", marker, index, describe_group(group));
        if panel.is_removing(index) {
            out.push_str("  (removing)");
        }
    }
    if panel.is_clearing() {
        out.push_str("\n  (clearing)");
    }

    out
}

fn describe_group(group: &ContextGroup) -> String {
    let seconds = group.total_duration_ms / 1000;
    format!(
        "{} [{}] {} track{} {}{}",
        group.title,
        group.context_type.as_str(),
        group.track_count,
        if group.track_count == 1 { "" } else { "s" },
        format_clock(seconds),
        if group.shuffle_enabled { " shuffled" } else { "" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transport_words() {
        assert_eq!("p".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::PlayPause);
        assert_eq!("next".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Next);
        assert_eq!("seek 50".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Seek(50));
        assert_eq!(
            "shuffle 2".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::ToggleGroupShuffle(2)
        );
        assert_eq!("shuffle".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::CycleShuffle);
    }

    #[test]
    fn blank_line_shows_status() {
        assert_eq!("   ".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::ShowStatus);
    }

    #[test]
    fn parses_id_lists() {
        let command: ConsoleCommand = "addpl pl1 pl2".parse().unwrap();
        assert_eq!(
            command,
            ConsoleCommand::AddPlaylists(vec![PlaylistId::from("pl1"), PlaylistId::from("pl2")])
        );
        assert!("add".parse::<ConsoleCommand>().is_err());
    }

    #[test]
    fn rejects_out_of_range_levels() {
        assert!(matches!(
            "vol 101".parse::<ConsoleCommand>(),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            "dance".parse::<ConsoleCommand>(),
            Err(CliError::UnknownCommand(_))
        ));
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(3600), "60:00");
    }
}
