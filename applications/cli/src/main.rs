//! Groupcast - terminal front-end for a shared playback session
mod config;
mod console;
mod error;
mod simulated;

use crate::config::AppConfig;
use crate::console::ConsoleCommand;
use crate::simulated::SimulatedBackend;
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use groupcast_artwork::PlaceholderArt;
use groupcast_client::{GroupcastClient, SessionClient};
use groupcast_core::types::{PlaylistId, TrackId};
use groupcast_core::SessionApi;
use groupcast_playback::{
    build_groups_or_singletons, editor, PanelConfig, PlayerPanel, QueueMutation,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groupcast")]
#[command(about = "Drive a Groupcast playback session from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./groupcast.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API server URL
    #[arg(long, global = true, env = "GROUPCAST_SERVER_URL")]
    server: Option<String>,

    /// Session to drive
    #[arg(long, global = true, env = "GROUPCAST_SESSION_ID")]
    session: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "GROUPCAST_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the session transport
    Status,
    /// Show the grouped queue
    Queue,
    /// Append tracks (or playlists) to the queue
    Add {
        /// Track or playlist ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Treat ids as playlists
        #[arg(short, long)]
        playlist: bool,
    },
    /// Remove the queue context at a flat position
    Remove {
        /// Flat queue position
        position: usize,
    },
    /// Clear the queue and stop playback
    Clear,
    /// Open the interactive player panel
    Panel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "groupcast=info,groupcast_playback=info,groupcast_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let client = GroupcastClient::new(config.client_config())
        .context("failed to build HTTP client")?
        .with_artwork(PlaceholderArt::new(config.panel.artwork_cache_size));
    let session = client.session()?;

    match cli.command {
        Commands::Status => status(&session).await?,
        Commands::Queue => queue(&session).await?,
        Commands::Add { ids, playlist } => {
            let mutation = if playlist {
                QueueMutation::AppendPlaylists(ids.into_iter().map(PlaylistId::new).collect())
            } else {
                QueueMutation::AppendTracks(ids.into_iter().map(TrackId::new).collect())
            };
            mutate(&session, mutation).await?;
        }
        Commands::Remove { position } => mutate(&session, QueueMutation::Remove(position)).await?,
        Commands::Clear => mutate(&session, QueueMutation::Clear).await?,
        Commands::Panel => panel(session, &config).await?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    if let Some(server) = &cli.server {
        config.server.url.clone_from(server);
    }
    if let Some(session) = &cli.session {
        config.session.id.clone_from(session);
    }
    if cli.token.is_some() {
        config.auth.token.clone_from(&cli.token);
    }

    config.validate()?;
    tracing::debug!(server = %config.server.url, session = %config.session.id, "configuration loaded");
    Ok(config)
}

async fn status(session: &SessionClient) -> anyhow::Result<()> {
    let snapshot = session.get_session().await?;

    println!("session   {}", snapshot.session_id);
    println!("status    {}", snapshot.playback_status);
    println!(
        "position  {} (entry {})",
        console::format_clock(snapshot.position_ms / 1000),
        snapshot.queue_position
    );
    println!("volume    {}", snapshot.volume);
    println!("repeat    {}", snapshot.repeat_mode);
    println!("shuffle   {}", snapshot.shuffle_mode);

    Ok(())
}

async fn queue(session: &SessionClient) -> anyhow::Result<()> {
    let snapshot = session.get_queue().await?;
    let (groups, warning) = build_groups_or_singletons(&snapshot.entries);

    if let Some(warning) = warning {
        eprintln!("warning: {}", warning);
    }
    if groups.is_empty() {
        println!("queue is empty");
        return Ok(());
    }

    for group in &groups {
        let current = group.contains_position(snapshot.queue_position);
        println!(
            "{} [{}] {} ({} tracks)",
            if current { "*" } else { " " },
            group.context_type.as_str(),
            group.title,
            group.track_count
        );
        for entry in &group.entries {
            println!(
                "    {:>3}  {} - {}",
                entry.position, entry.track.artist, entry.track.title
            );
        }
    }

    Ok(())
}

async fn mutate(session: &SessionClient, mutation: QueueMutation) -> anyhow::Result<()> {
    let outcome = editor::apply(session, mutation).await;

    let mutation_succeeded = outcome.mutation_succeeded();
    if let Some(error) = outcome.error {
        if mutation_succeeded {
            tracing::warn!("{}", error);
        } else {
            return Err(error.into());
        }
    }
    if let Some(snapshot) = outcome.queue {
        println!("queue now holds {} entries", snapshot.len());
    }

    Ok(())
}

async fn panel(session: SessionClient, config: &AppConfig) -> anyhow::Result<()> {
    let api: Arc<dyn SessionApi> = Arc::new(session);
    let panel_config = PanelConfig {
        skip_seconds: config.panel.skip_seconds,
    };

    let mut panel = PlayerPanel::mount(api, Arc::new(SimulatedBackend), panel_config)
        .await
        .context("failed to open the player panel")?;
    tracing::info!(session = %config.session.id, "Player panel mounted");

    println!("{}", console::render_queue(&panel));
    println!("{}", console::render_status(&panel));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.parse::<ConsoleCommand>() {
                    Ok(command) => match console::apply(&mut panel, command) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => eprintln!("{}", e),
                    },
                    Err(e) => eprintln!("{}", e),
                }
            }
            processed = panel.process_next() => {
                if !processed {
                    break;
                }
            }
        }
    }

    panel.unmount();
    tracing::info!("Player panel closed");
    Ok(())
}
