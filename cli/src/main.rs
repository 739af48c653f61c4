mod background;
mod commands;
mod logging;
mod render;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use spellwatch_core::context::AppConfig;
use spellwatch_core::game_data::AbilityCatalog;
use spellwatch_core::patch_data::PatchDataClient;
use spellwatch_core::signal_processor::MatchPoller;
use spellwatch_core::state::SnapshotCache;
use spellwatch_core::telemetry::{LiveClient, sample_opponents};
use spellwatch_core::timers::{MatchBoard, TimerEvent};
use spellwatch_types::MatchPhase;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

use commands::Session;

const SIGNAL_BUFFER: usize = 16;
const RENDER_PERIOD: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(version, about = "Summoner spell cooldown tracker")]
struct Args {
    /// Load the sample roster instead of waiting for a match
    #[arg(long)]
    demo: bool,

    /// Skip the startup asset sync
    #[arg(long)]
    no_sync: bool,
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = logging::init_logging();

    let config = AppConfig::load();
    info!(
        poll_ms = config.poll_interval_ms,
        assets = %config.asset_directory.display(),
        "Starting spellwatch"
    );

    let catalog = Arc::new(AbilityCatalog::builtin());
    let cache = SnapshotCache::new();
    let patch = PatchDataClient::new(&config).map_err(|e| e.to_string())?;

    background::spawn_catalog_refresh(Arc::clone(&catalog), patch.clone());
    if config.sync_assets_on_startup && !args.no_sync {
        background::spawn_asset_sync(
            patch.clone(),
            config.asset_directory.clone(),
            config.state_path(),
        );
    }

    let live = LiveClient::new(&config).map_err(|e| e.to_string())?;
    let poller = MatchPoller::new(
        live,
        config.item_haste_table(),
        cache.clone(),
        config.poll_interval(),
    );
    let (signal_tx, mut signal_rx) = mpsc::channel(SIGNAL_BUFFER);
    let poller_task = poller.spawn(signal_tx);

    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<TimerEvent>();
    let board = MatchBoard::new(Arc::clone(&catalog), Arc::new(cache.clone()), timer_tx);

    let mut session = Session {
        config,
        catalog,
        cache,
        patch,
        board,
        phase: MatchPhase::NotInMatch,
        watch: true,
    };

    if args.demo {
        session.board.build_rows(&sample_opponents());
        println!("{}", render::format_rows(&session.board));
    } else {
        println!("Waiting for a match. Type `help` for commands.");
    }
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut render_tick = tokio::time::interval(RENDER_PERIOD);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if !line.is_empty() {
                            match commands::respond(line, &mut session) {
                                Ok(true) => break,
                                Ok(false) => {}
                                Err(err) => println!("{err}"),
                            }
                        }
                        prompt();
                    }
                    // stdin closed
                    Ok(None) => break,
                    Err(e) => {
                        error!(error = %e, "Failed to read stdin");
                        break;
                    }
                }
            }
            Some(signal) = signal_rx.recv() => {
                println!("\n{}", session.apply_signal(&signal));
                prompt();
            }
            Some(TimerEvent::Expired { identity, ability, .. }) = timer_rx.recv() => {
                println!("\n{identity} {ability} is up");
                prompt();
            }
            _ = render_tick.tick() => {
                if session.watch {
                    if let Some(line) = render::format_running(&session.board) {
                        println!("\r{line}");
                        prompt();
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // Timers stop when their slots drop; nothing is persisted
    poller_task.abort();
    session.board.teardown();
    info!("Shutting down");
    Ok(())
}
