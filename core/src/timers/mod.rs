//! Cooldown timers: the pure countdown machine, its tokio driver, and the
//! per-match board of opponent rows.

mod board;
mod cooldown;
mod slot;


pub use board::{BoardError, BoardRow, MatchBoard, StartOutcome};
pub use cooldown::{CooldownTimer, TickOutcome, TimerState};
pub use slot::{TimerEvent, TimerKey, TimerSlot};
