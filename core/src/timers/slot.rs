use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use spellwatch_types::{AbilityId, AbilitySlot};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use super::cooldown::{CooldownTimer, TickOutcome, TimerState};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Position of a timer on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub row: usize,
    pub slot: AbilitySlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown reached zero. Cancels are silent. `identity` is the
    /// opponent the slot was built for, since the row may be reused by a
    /// later match before the event is read.
    Expired {
        key: TimerKey,
        identity: String,
        ability: AbilityId,
    },
}

/// A [`CooldownTimer`] driven by its own tokio task.
///
/// Dropping the slot aborts any running countdown.
#[derive(Debug)]
pub struct TimerSlot {
    key: TimerKey,
    identity: String,
    ability: AbilityId,
    timer: Arc<Mutex<CooldownTimer>>,
    task: Option<JoinHandle<()>>,
    events: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerSlot {
    pub fn new(
        key: TimerKey,
        identity: impl Into<String>,
        ability: AbilityId,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            key,
            identity: identity.into(),
            ability,
            timer: Arc::new(Mutex::new(CooldownTimer::new())),
            task: None,
            events,
        }
    }

    pub fn key(&self) -> TimerKey {
        self.key
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn ability(&self) -> AbilityId {
        self.ability
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CooldownTimer> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> TimerState {
        self.lock().state()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.lock().remaining()
    }

    pub fn display(&self) -> Option<String> {
        self.lock().display()
    }

    /// Start counting down from `duration_secs`. Must be called inside a
    /// tokio runtime. Returns `false` if already running or the duration is
    /// zero.
    pub fn start(&mut self, duration_secs: u32) -> bool {
        let generation = {
            let mut timer = self.lock();
            if !timer.start(duration_secs) {
                return false;
            }
            timer.generation()
        };

        if let Some(task) = self.task.take() {
            task.abort();
        }

        let timer = Arc::clone(&self.timer);
        let events = self.events.clone();
        let key = self.key;
        let identity = self.identity.clone();
        let ability = self.ability;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                ticker.tick().await;
                let outcome = timer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .tick(generation);

                match outcome {
                    TickOutcome::Counting(_) => {}
                    TickOutcome::Expired => {
                        debug!(row = key.row, slot = ?key.slot, %identity, %ability, "Cooldown expired");
                        let event = TimerEvent::Expired {
                            key,
                            identity,
                            ability,
                        };
                        if events.send(event).is_err() {
                            debug!("Timer event receiver dropped");
                        }
                        break;
                    }
                    TickOutcome::Ignored => break,
                }
            }
        }));
        true
    }

    /// Stop the countdown now. Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.lock().cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        cancelled
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
