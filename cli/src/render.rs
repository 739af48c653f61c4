//! Plain-text views of the board for the console.

use std::fmt::Write;

use spellwatch_core::timers::{BoardRow, MatchBoard, TimerSlot};
use spellwatch_types::MatchPhase;

const READY: &str = "ready";

fn slot_text(slot: &TimerSlot) -> String {
    let timer = slot.display().unwrap_or_else(|| READY.to_string());
    format!("{} {}", slot.ability().display_name(), timer)
}

fn row_line(index: usize, row: &BoardRow) -> String {
    let [first, second] = row.slots();
    format!(
        "{:>2}  {:<14} [1] {:<16} [2] {}",
        index + 1,
        row.participant.identity,
        slot_text(first),
        slot_text(second)
    )
}

/// Every row with both slots.
pub fn format_rows(board: &MatchBoard) -> String {
    if board.is_empty() {
        return "No opponents yet; waiting for a match".to_string();
    }
    board
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| row_line(i, row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line with only the running countdowns, or `None` if nothing runs.
pub fn format_running(board: &MatchBoard) -> Option<String> {
    let mut out = String::new();
    for row in board.rows() {
        for slot in row.slots().iter().filter(|s| s.is_running()) {
            if !out.is_empty() {
                out.push_str(" | ");
            }
            let _ = write!(out, "{} {}", row.participant.identity, slot_text(slot));
        }
    }
    (!out.is_empty()).then_some(out)
}

pub fn format_status(
    phase: MatchPhase,
    catalog_version: Option<&str>,
    snapshot_len: usize,
    board: &MatchBoard,
) -> String {
    let phase = match phase {
        MatchPhase::InMatch => "in match",
        MatchPhase::NotInMatch => "not in match",
    };
    format!(
        "Phase: {phase}\nCooldown data: {}\nOpponents in snapshot: {snapshot_len}\nRows: {}",
        catalog_version.unwrap_or("built-in"),
        board.rows().len()
    )
}
