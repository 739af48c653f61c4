//! Row model behind the timer widgets: one row per opponent, two slots each.

use std::sync::Arc;

use spellwatch_types::{AbilityId, AbilitySlot, Participant};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::slot::{TimerEvent, TimerKey, TimerSlot};
use crate::game_data::{AbilityCatalog, cooldown_after_haste};
use crate::signal_processor::{MatchSignal, SignalHandler};
use crate::state::ParticipantLookup;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("no row {row} (board has {len})")]
    NoSuchRow { row: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { ability: AbilityId, duration_secs: u32 },
    AlreadyRunning,
    /// Computed duration was zero; the timer stays idle
    ZeroDuration,
}

#[derive(Debug)]
pub struct BoardRow {
    pub participant: Participant,
    slots: [TimerSlot; 2],
}

impl BoardRow {
    pub fn slot(&self, slot: AbilitySlot) -> &TimerSlot {
        &self.slots[slot.index()]
    }

    pub fn slots(&self) -> &[TimerSlot; 2] {
        &self.slots
    }

    fn slot_mut(&mut self, slot: AbilitySlot) -> &mut TimerSlot {
        &mut self.slots[slot.index()]
    }
}

/// Opponent rows for the current match.
///
/// Durations are computed when a timer starts: base cooldown from the
/// catalog, haste from the latest snapshot. A row's own participant (from
/// match start) is only the haste fallback when the snapshot no longer
/// has that identity.
pub struct MatchBoard {
    catalog: Arc<AbilityCatalog>,
    lookup: Arc<dyn ParticipantLookup>,
    events: mpsc::UnboundedSender<TimerEvent>,
    rows: Vec<BoardRow>,
}

impl MatchBoard {
    pub fn new(
        catalog: Arc<AbilityCatalog>,
        lookup: Arc<dyn ParticipantLookup>,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            catalog,
            lookup,
            events,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn any_running(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|row| row.slots.iter())
            .any(TimerSlot::is_running)
    }

    /// Replace all rows. Existing timers are dropped (and stopped) first.
    pub fn build_rows(&mut self, participants: &[Participant]) {
        self.teardown();
        self.rows = participants
            .iter()
            .enumerate()
            .map(|(row, participant)| BoardRow {
                participant: participant.clone(),
                slots: AbilitySlot::BOTH.map(|slot| {
                    TimerSlot::new(
                        TimerKey { row, slot },
                        participant.identity.clone(),
                        participant.ability(slot),
                        self.events.clone(),
                    )
                }),
            })
            .collect();
        info!(rows = self.rows.len(), "Built opponent rows");
    }

    /// Drop every row and its timers.
    pub fn teardown(&mut self) {
        if !self.rows.is_empty() {
            debug!(rows = self.rows.len(), "Tearing down opponent rows");
        }
        self.rows.clear();
    }

    /// Haste-adjusted cooldown the slot would start with right now.
    pub fn duration_for(&self, row: usize, slot: AbilitySlot) -> Result<u32, BoardError> {
        let board_row = self.row(row)?;
        Ok(self.compute_duration(board_row, slot))
    }

    fn compute_duration(&self, row: &BoardRow, slot: AbilitySlot) -> u32 {
        let ability = row.slot(slot).ability();
        let base = self.catalog.get(ability);
        let haste = self
            .lookup
            .lookup_participant(&row.participant.identity)
            .map_or(row.participant.haste, |p| p.haste);
        cooldown_after_haste(base, haste)
    }

    pub fn start_timer(&mut self, row: usize, slot: AbilitySlot) -> Result<StartOutcome, BoardError> {
        let board_row = self.row(row)?;
        if board_row.slot(slot).is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let duration_secs = self.compute_duration(board_row, slot);
        let ability = board_row.slot(slot).ability();
        if duration_secs == 0 {
            return Ok(StartOutcome::ZeroDuration);
        }

        let started = self.rows[row].slot_mut(slot).start(duration_secs);
        if !started {
            return Ok(StartOutcome::AlreadyRunning);
        }
        debug!(row, ?slot, %ability, duration_secs, "Timer started");
        Ok(StartOutcome::Started {
            ability,
            duration_secs,
        })
    }

    /// Returns whether a running timer was stopped.
    pub fn cancel_timer(&mut self, row: usize, slot: AbilitySlot) -> Result<bool, BoardError> {
        self.row(row)?;
        Ok(self.rows[row].slot_mut(slot).cancel())
    }

    fn row(&self, row: usize) -> Result<&BoardRow, BoardError> {
        self.rows.get(row).ok_or(BoardError::NoSuchRow {
            row,
            len: self.rows.len(),
        })
    }
}

impl SignalHandler for MatchBoard {
    fn handle_signal(&mut self, signal: &MatchSignal) {
        match signal {
            MatchSignal::MatchStarted { participants, .. } => self.build_rows(participants),
            MatchSignal::MatchEnded { .. } => self.teardown(),
        }
    }
}
