//! Tests for the match poller
//!
//! Drives the poller with scripted fetch results and checks the emitted
//! lifecycle signals and the shared snapshot cache.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use spellwatch_types::{AbilityId, MatchPhase};
use tokio::sync::mpsc;

use super::{MatchPoller, MatchSignal};
use crate::game_data::ItemHasteTable;
use crate::state::{ParticipantLookup, SnapshotCache};
use crate::telemetry::{AllGameData, TelemetrySource};

/// Returns queued results in order, then `None` forever.
struct ScriptedSource {
    script: Mutex<VecDeque<Option<AllGameData>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Option<AllGameData>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

impl TelemetrySource for ScriptedSource {
    async fn fetch(&self) -> Option<AllGameData> {
        self.script.lock().unwrap().pop_front().flatten()
    }
}

fn game(opponents: &[(&str, &str, u32)]) -> AllGameData {
    let players: Vec<String> = opponents
        .iter()
        .map(|(name, spell, item)| {
            let items = if *item > 0 {
                format!(r#"[{{ "itemID": {item} }}]"#)
            } else {
                "[]".to_string()
            };
            format!(
                r#"{{
                    "championName": "{name}",
                    "team": "CHAOS",
                    "items": {items},
                    "summonerSpells": {{
                        "summonerSpellOne": {{ "rawDisplayName": "GeneratedTip_SummonerSpell_SummonerFlash_DisplayName" }},
                        "summonerSpellTwo": {{ "rawDisplayName": "{spell}" }}
                    }}
                }}"#
            )
        })
        .collect();
    let json = format!(
        r#"{{ "activePlayer": {{ "team": "ORDER" }}, "allPlayers": [{}] }}"#,
        players.join(",")
    );
    serde_json::from_str(&json).unwrap()
}

fn poller(script: Vec<Option<AllGameData>>) -> MatchPoller<ScriptedSource> {
    MatchPoller::new(
        ScriptedSource::new(script),
        ItemHasteTable::builtin(),
        SnapshotCache::new(),
        Duration::from_millis(3000),
    )
}

fn count_starts(signals: &[MatchSignal]) -> usize {
    signals
        .iter()
        .filter(|s| matches!(s, MatchSignal::MatchStarted { .. }))
        .count()
}

fn count_ends(signals: &[MatchSignal]) -> usize {
    signals
        .iter()
        .filter(|s| matches!(s, MatchSignal::MatchEnded { .. }))
        .count()
}

#[test]
fn in_match_then_no_data_emits_one_start_and_one_end() {
    let data = game(&[("Darius", "Teleport", 0)]);
    let mut poller = poller(Vec::new());

    let mut signals = Vec::new();
    signals.extend(poller.tick(Some(&data)));
    signals.extend(poller.tick(Some(&data)));
    signals.extend(poller.tick(Some(&data)));
    assert_eq!(count_starts(&signals), 1);
    assert_eq!(poller.phase(), MatchPhase::InMatch);

    signals.extend(poller.tick(None));
    signals.extend(poller.tick(None));
    assert_eq!(count_starts(&signals), 1);
    assert_eq!(count_ends(&signals), 1);
    assert!(matches!(signals.last(), Some(MatchSignal::MatchEnded { .. })));

    assert_eq!(poller.phase(), MatchPhase::NotInMatch);
    assert!(poller.cache().is_empty());
}

#[test]
fn no_data_while_idle_is_silent() {
    let mut poller = poller(Vec::new());
    assert!(poller.tick(None).is_empty());
    assert!(poller.tick(None).is_empty());
    assert_eq!(poller.phase(), MatchPhase::NotInMatch);
}

#[test]
fn start_signal_carries_the_opponents() {
    let mut poller = poller(Vec::new());
    let signals = poller.tick(Some(&game(&[("Darius", "Teleport", 0), ("LeeSin", "Smite", 0)])));

    let [MatchSignal::MatchStarted { participants, .. }] = signals.as_slice() else {
        panic!("expected a single start signal, got {signals:?}");
    };
    let names: Vec<_> = participants.iter().map(|p| p.identity.as_str()).collect();
    assert_eq!(names, vec!["Darius", "LeeSin"]);
    assert_eq!(participants[1].ability2, AbilityId::Smite);
}

#[test]
fn lookup_sees_the_latest_poll_not_the_start_roster() {
    let mut poller = poller(Vec::new());
    poller.tick(Some(&game(&[("Darius", "Teleport", 0)])));
    assert_eq!(poller.lookup_participant("Darius").map(|p| p.haste), Some(0));

    // Boots bought mid-match: silent update, new haste visible
    let signals = poller.tick(Some(&game(&[("Darius", "Teleport", 3158)])));
    assert!(signals.is_empty());
    assert_eq!(poller.lookup_participant("Darius").map(|p| p.haste), Some(10));
}

#[test]
fn shared_cache_follows_the_poller() {
    let cache = SnapshotCache::new();
    let mut poller = MatchPoller::new(
        ScriptedSource::new(Vec::new()),
        ItemHasteTable::builtin(),
        cache.clone(),
        Duration::from_secs(3),
    );

    poller.tick(Some(&game(&[("Ahri", "Ignite", 0)])));
    assert_eq!(
        cache.lookup_participant("Ahri").map(|p| p.ability2),
        Some(AbilityId::Ignite)
    );

    poller.tick(None);
    assert!(cache.lookup_participant("Ahri").is_none());
}

#[tokio::test]
async fn poll_once_fetches_then_ticks() {
    let mut poller = poller(vec![Some(game(&[("Zed", "Ignite", 0)])), None]);

    let first = poller.poll_once().await;
    assert_eq!(count_starts(&first), 1);

    let second = poller.poll_once().await;
    assert_eq!(count_ends(&second), 1);
}

#[tokio::test(start_paused = true)]
async fn spawned_loop_forwards_signals_and_stops_when_receiver_drops() {
    let data = game(&[("Darius", "Teleport", 0)]);
    let poller = poller(vec![Some(data.clone()), Some(data), None]);
    let (tx, mut rx) = mpsc::channel(8);
    let handle = poller.spawn(tx);

    let started = rx.recv().await.unwrap();
    assert!(matches!(started, MatchSignal::MatchStarted { .. }));
    let ended = rx.recv().await.unwrap();
    assert!(matches!(ended, MatchSignal::MatchEnded { .. }));

    drop(rx);
    tokio::time::timeout(Duration::from_secs(30), handle)
        .await
        .expect("poller should stop after the receiver is dropped")
        .unwrap();
}
