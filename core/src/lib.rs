pub mod context;
pub mod game_data;
pub mod patch_data;
pub mod signal_processor;
pub mod state;
pub mod telemetry;
pub mod timers;

// Re-exports for convenience
pub use context::{AppConfig, LocalState};
pub use game_data::{AbilityCatalog, ItemHasteTable, cooldown_after_haste, resolve_spell};
pub use patch_data::{PatchDataClient, PatchSource, SyncReport, sync_assets};
pub use signal_processor::{MatchPoller, MatchSignal, SignalHandler};
pub use state::{MatchSnapshot, ParticipantLookup, SnapshotCache};
pub use telemetry::{LiveClient, TelemetrySource, parse_opponents};
pub use timers::{CooldownTimer, MatchBoard, StartOutcome, TimerEvent, TimerSlot};
