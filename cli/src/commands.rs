use std::sync::Arc;

use clap::{Parser, Subcommand};
use spellwatch_core::context::AppConfig;
use spellwatch_core::game_data::AbilityCatalog;
use spellwatch_core::patch_data::PatchDataClient;
use spellwatch_core::signal_processor::{MatchSignal, SignalHandler};
use spellwatch_core::state::SnapshotCache;
use spellwatch_core::timers::{MatchBoard, StartOutcome};
use spellwatch_types::{AbilitySlot, MatchPhase};

use crate::{background, render};

/// Everything the REPL commands act on.
pub struct Session {
    pub config: AppConfig,
    pub catalog: Arc<AbilityCatalog>,
    pub cache: SnapshotCache,
    pub patch: PatchDataClient,
    pub board: MatchBoard,
    pub phase: MatchPhase,
    /// Print running countdowns every second
    pub watch: bool,
}

impl Session {
    /// Feed a poller signal to the board and return what to print.
    pub fn apply_signal(&mut self, signal: &MatchSignal) -> String {
        self.board.handle_signal(signal);
        let at = signal.timestamp().format("%H:%M:%S");
        match signal {
            MatchSignal::MatchStarted { .. } => {
                self.phase = MatchPhase::InMatch;
                format!("Match found at {at}\n{}", render::format_rows(&self.board))
            }
            MatchSignal::MatchEnded { .. } => {
                self.phase = MatchPhase::NotInMatch;
                format!("Match ended at {at}")
            }
        }
    }
}

#[derive(Parser)]
#[command(about = "spellwatch console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List opponents and their timers
    Rows,
    /// Start a cooldown (row and slot are 1-based)
    Start {
        row: usize,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
        slot: u8,
    },
    /// Stop a running cooldown
    Cancel {
        row: usize,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
        slot: u8,
    },
    /// Match phase and data source summary
    Status,
    /// Re-fetch base cooldowns from patch data
    Refresh,
    /// Re-run the asset sync
    Sync,
    /// Toggle the once-per-second countdown line
    Watch,
    Exit,
}

/// `slot` is already range-checked to 1..=2 by clap.
fn to_slot(slot: u8) -> AbilitySlot {
    AbilitySlot::from_index(usize::from(slot.saturating_sub(1))).unwrap_or(AbilitySlot::Second)
}

fn to_row(row: usize) -> Result<usize, String> {
    row.checked_sub(1).ok_or_else(|| "error: rows start at 1".to_string())
}

/// Run one REPL line. `Ok(true)` means quit.
pub fn respond(line: &str, session: &mut Session) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "spellwatch".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Rows) => println!("{}", render::format_rows(&session.board)),
        Some(Commands::Start { row, slot }) => {
            let slot = to_slot(slot);
            match session
                .board
                .start_timer(to_row(row)?, slot)
                .map_err(|e| e.to_string())?
            {
                StartOutcome::Started {
                    ability,
                    duration_secs,
                } => println!("{ability}: {duration_secs}s"),
                StartOutcome::AlreadyRunning => println!("Already running"),
                StartOutcome::ZeroDuration => println!("No cooldown to track"),
            }
        }
        Some(Commands::Cancel { row, slot }) => {
            let cancelled = session
                .board
                .cancel_timer(to_row(row)?, to_slot(slot))
                .map_err(|e| e.to_string())?;
            if !cancelled {
                println!("Not running");
            }
        }
        Some(Commands::Status) => {
            let version = session.catalog.version();
            println!(
                "{}",
                render::format_status(
                    session.phase,
                    version.as_deref(),
                    session.cache.current().len(),
                    &session.board,
                )
            );
        }
        Some(Commands::Refresh) => {
            background::spawn_catalog_refresh(Arc::clone(&session.catalog), session.patch.clone());
            println!("Refreshing cooldowns in the background");
        }
        Some(Commands::Sync) => {
            background::spawn_asset_sync(
                session.patch.clone(),
                session.config.asset_directory.clone(),
                session.config.state_path(),
            );
            println!("Syncing assets in the background");
        }
        Some(Commands::Watch) => {
            session.watch = !session.watch;
            println!("Watch {}", if session.watch { "on" } else { "off" });
        }
        Some(Commands::Exit) => return Ok(true),
        None => {}
    }
    Ok(false)
}
