use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use spellwatch_types::{MatchPhase, Participant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::MatchSignal;
use crate::game_data::ItemHasteTable;
use crate::state::{MatchSnapshot, ParticipantLookup, SnapshotCache};
use crate::telemetry::{AllGameData, TelemetrySource, parse_opponents};

/// Polls the telemetry source and tracks whether a match is live.
///
/// The poller is the only writer of its [`SnapshotCache`]. Every poll with
/// data replaces the snapshot; only the first one after a gap is reported
/// as a match start.
pub struct MatchPoller<S> {
    source: S,
    haste: ItemHasteTable,
    cache: SnapshotCache,
    phase: MatchPhase,
    interval: Duration,
}

impl<S: TelemetrySource> MatchPoller<S> {
    pub fn new(source: S, haste: ItemHasteTable, cache: SnapshotCache, interval: Duration) -> Self {
        Self {
            source,
            haste,
            cache,
            phase: MatchPhase::NotInMatch,
            interval,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Participant from the latest poll, not the match-start roster.
    pub fn lookup_participant(&self, identity: &str) -> Option<Participant> {
        self.cache.lookup_participant(identity)
    }

    /// Apply one fetch result and return the resulting transitions.
    pub fn tick(&mut self, payload: Option<&AllGameData>) -> Vec<MatchSignal> {
        self.tick_at(payload, Local::now().naive_local())
    }

    fn tick_at(&mut self, payload: Option<&AllGameData>, timestamp: NaiveDateTime) -> Vec<MatchSignal> {
        let mut signals = Vec::new();

        match (payload, self.phase) {
            (Some(data), phase) => {
                let participants = parse_opponents(Some(data), &self.haste);
                self.cache.replace(MatchSnapshot::new(participants.clone()));

                if phase == MatchPhase::NotInMatch {
                    info!(opponents = participants.len(), "Match found");
                    self.phase = MatchPhase::InMatch;
                    signals.push(MatchSignal::MatchStarted {
                        participants,
                        timestamp,
                    });
                }
            }
            (None, MatchPhase::InMatch) => {
                info!("Match ended");
                self.cache.clear();
                self.phase = MatchPhase::NotInMatch;
                signals.push(MatchSignal::MatchEnded { timestamp });
            }
            (None, MatchPhase::NotInMatch) => {}
        }

        signals
    }

    /// One bounded fetch followed by [`tick`](Self::tick).
    pub async fn poll_once(&mut self) -> Vec<MatchSignal> {
        let payload = self.source.fetch().await;
        self.tick(payload.as_ref())
    }
}

impl<S: TelemetrySource + 'static> MatchPoller<S> {
    /// Run the poll loop on a tokio task, forwarding signals to `tx`.
    ///
    /// The first poll happens immediately. The task ends once the receiving
    /// side of `tx` is dropped.
    pub fn spawn(mut self, tx: mpsc::Sender<MatchSignal>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                for signal in self.poll_once().await {
                    if tx.send(signal).await.is_err() {
                        debug!("Signal receiver dropped");
                        return;
                    }
                }
            }
            debug!("Match poller stopped");
        })
    }
}
