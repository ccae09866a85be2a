mod library;
mod playback;
mod surface;
mod ticker;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use court::catalog::{Catalog, Drill};
use court::error::{CatalogError, ErrorCode, SessionError, SurfaceError};
use court::player::Player;
use court::rally::compile;
use court::render::render_frame;
use court::session::Session;
use court::surface::SurfaceId;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::library::LibraryError;
use crate::playback::Playback;
use crate::surface::LogSurface;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Library(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
            Self::Surface(e) => e.error_code(),
            Self::Encode(_) => "E_ENCODE",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "courtside", about = "Tennis drill timelines and playback")]
struct Cli {
    /// Drill library JSON file.
    #[arg(long, env = "COURTSIDE_LIBRARY", default_value = "library.json")]
    library: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a drill's compiled rally timeline as JSON.
    Timeline { drill_id: i64 },
    /// Print the draw commands for one instant of a drill as JSON.
    Frame {
        drill_id: i64,
        #[arg(long, default_value_t = 0.0)]
        at: f64,
    },
    /// Animate a drill on the log surface.
    Play {
        drill_id: i64,
        #[arg(long, env = "COURTSIDE_LOOPS", default_value_t = 1)]
        loops: u32,
        /// Start playback from this offset in milliseconds.
        #[arg(long, default_value_t = 0.0)]
        from: f64,
    },
    /// Play every drill of a routine once, in order.
    Session { routine_id: Option<i64> },
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), %err, "courtside failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let catalog = library::load(&cli.library).await?;
    match cli.command {
        Command::Timeline { drill_id } => {
            let drill = find_drill(&catalog, drill_id)?;
            let timeline = compile(&drill.court_elements);
            info!(drill_id, events = timeline.len(), "timeline compiled");
            println!("{}", serde_json::to_string_pretty(&timeline)?);
        }
        Command::Frame { drill_id, at } => {
            let drill = find_drill(&catalog, drill_id)?;
            let timeline = compile(&drill.court_elements);
            let at = if at.is_nan() { 0.0 } else { at.clamp(0.0, timeline.total_duration_ms()) };
            let frame = render_frame(at, &timeline, &drill.court_elements);
            let out = json!({
                "elapsedMs": at,
                "totalMs": timeline.total_duration_ms(),
                "commands": frame.commands(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Play { drill_id, loops, from } => {
            let drill = find_drill(&catalog, drill_id)?;
            play_drill(drill, SurfaceId::Preview, loops.max(1), from).await?;
        }
        Command::Session { routine_id } => {
            let mut session = Session::start(&catalog, routine_id)?;
            info!(routine = %session.routine().name, drills = session.len(), "practice session");
            loop {
                if let Some(drill) = session.current() {
                    info!(step = session.index() + 1, of = session.len(), drill = %drill.name, "drill");
                    play_drill(drill, SurfaceId::Session, 1, 0.0).await?;
                }
                if !session.next() {
                    break;
                }
            }
            info!("session complete");
        }
    }
    Ok(())
}

fn find_drill(catalog: &Catalog, id: i64) -> Result<&Drill, CatalogError> {
    catalog.drill(id).ok_or(CatalogError::DrillNotFound(id))
}

async fn play_drill(drill: &Drill, surface: SurfaceId, loops: u32, from_ms: f64) -> Result<(), CliError> {
    let elements = Arc::new(drill.court_elements.clone());
    let mut playback = Playback::new(Player::new(LogSurface::new(surface), elements));
    playback.reset().await?;
    if !drill.has_animatable() {
        info!(drill_id = drill.id, "nothing to animate");
        return Ok(());
    }

    if from_ms > 0.0 {
        playback.seek(from_ms).await?;
    }
    playback.play().await;
    let mut completed = 0;
    while let Some(tick) = playback.next_tick().await {
        if tick.looped {
            completed += 1;
            info!(drill_id = drill.id, loop_no = completed, "loop finished");
            if completed >= loops {
                break;
            }
        }
    }
    playback.pause().await;
    let state = playback.state().await;
    let (frames, at_ms) = playback.inspect(|p| (p.surface().court_draws(), p.surface().timeline().0)).await;
    info!(drill_id = drill.id, frames, at_ms, ?state, "playback stopped");
    playback.reset().await?;
    let overlay = playback.inspect(|p| p.surface().last_commands().len()).await;
    info!(drill_id = drill.id, overlay, "static court restored");
    Ok(())
}
