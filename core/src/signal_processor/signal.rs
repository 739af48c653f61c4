use chrono::NaiveDateTime;
use spellwatch_types::Participant;

/// Match lifecycle transitions emitted by the poller.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchSignal {
    /// First poll with data after a stretch without any.
    MatchStarted {
        participants: Vec<Participant>,
        timestamp: NaiveDateTime,
    },
    /// First poll without data while a match was live.
    MatchEnded { timestamp: NaiveDateTime },
}

impl MatchSignal {
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            MatchSignal::MatchStarted { timestamp, .. } | MatchSignal::MatchEnded { timestamp } => {
                *timestamp
            }
        }
    }
}
