//! Per-widget countdown state machine.
//!
//! The machine itself never schedules anything. A driver calls
//! [`CooldownTimer::tick`] once per second with the generation it was
//! started for; any tick carrying an older generation is ignored, which is
//! what makes cancel-then-restart safe against a late tick from the
//! previous run.

use spellwatch_types::formatting::format_cooldown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running { remaining: u32, total: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale generation or not running; nothing changed
    Ignored,
    /// Still running with this many seconds left
    Counting(u32),
    /// Reached zero and returned to Idle
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct CooldownTimer {
    state: TimerState,
    generation: u64,
}

impl CooldownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Token for the current run. Changes on every start, cancel and expiry.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Idle -> Running. No-op (returns `false`) while already running or
    /// for a zero duration.
    pub fn start(&mut self, duration_secs: u32) -> bool {
        if self.is_running() || duration_secs == 0 {
            return false;
        }
        self.generation += 1;
        self.state = TimerState::Running {
            remaining: duration_secs,
            total: duration_secs,
        };
        true
    }

    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Ignored;
        }
        let TimerState::Running { remaining, total } = self.state else {
            return TickOutcome::Ignored;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.reset();
            TickOutcome::Expired
        } else {
            self.state = TimerState::Running { remaining, total };
            TickOutcome::Counting(remaining)
        }
    }

    /// Running -> Idle. No-op (returns `false`) while idle.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.state = TimerState::Idle;
    }

    pub fn remaining(&self) -> Option<u32> {
        match self.state {
            TimerState::Running { remaining, .. } => Some(remaining),
            TimerState::Idle => None,
        }
    }

    /// Countdown text while running, `None` while idle.
    pub fn display(&self) -> Option<String> {
        self.remaining().map(format_cooldown)
    }
}
