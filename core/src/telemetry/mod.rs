//! Live-match telemetry: the local endpoint client, its document model, and
//! the opponent parser.

mod client;
mod parser;
mod types;

pub use client::{LiveClient, TelemetryError, TelemetrySource};
pub use parser::{DEFAULT_TEAM, display_identity, parse_opponents, sample_opponents};
pub use types::{ActivePlayer, AllGameData, ItemEntry, PlayerEntry, SpellSlot, SummonerSpells};
