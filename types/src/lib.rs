//! Shared types for spellwatch.
//!
//! Plain data exchanged between the core (poller, timers, catalog) and any
//! front-end. Nothing in here performs I/O.

pub mod formatting;

use serde::{Deserialize, Serialize};

/// Prefix shared by every game-side summoner spell key.
pub const SPELL_KEY_PREFIX: &str = "Summoner";

/// Closed set of summoner spells the tracker knows how to time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AbilityId {
    Flash,
    Teleport,
    Heal,
    Barrier,
    Exhaust,
    /// Ghost. The game key is `SummonerHaste`.
    Ghost,
    /// Cleanse. The game key is `SummonerBoost`.
    Cleanse,
    /// Ignite. The game key is `SummonerDot`.
    Ignite,
    Smite,
    /// ARAM mark/dash.
    Snowball,
    Clarity,
    Mana,
    #[default]
    Unknown,
}

impl AbilityId {
    /// Every known spell, excluding `Unknown`.
    pub const ALL: [AbilityId; 12] = [
        AbilityId::Flash,
        AbilityId::Teleport,
        AbilityId::Heal,
        AbilityId::Barrier,
        AbilityId::Exhaust,
        AbilityId::Ghost,
        AbilityId::Cleanse,
        AbilityId::Ignite,
        AbilityId::Smite,
        AbilityId::Snowball,
        AbilityId::Clarity,
        AbilityId::Mana,
    ];

    /// Game data key, as used by the patch-data service and asset file names.
    pub fn data_key(self) -> &'static str {
        match self {
            AbilityId::Flash => "SummonerFlash",
            AbilityId::Teleport => "SummonerTeleport",
            AbilityId::Heal => "SummonerHeal",
            AbilityId::Barrier => "SummonerBarrier",
            AbilityId::Exhaust => "SummonerExhaust",
            AbilityId::Ghost => "SummonerHaste",
            AbilityId::Cleanse => "SummonerBoost",
            AbilityId::Ignite => "SummonerDot",
            AbilityId::Smite => "SummonerSmite",
            AbilityId::Snowball => "SummonerSnowball",
            AbilityId::Clarity => "SummonerClarity",
            AbilityId::Mana => "SummonerMana",
            AbilityId::Unknown => "Unknown",
        }
    }

    /// Case-insensitive inverse of [`AbilityId::data_key`].
    ///
    /// Returns `None` for anything outside the closed set, including the
    /// literal `"Unknown"`.
    pub fn from_data_key(key: &str) -> Option<AbilityId> {
        Self::ALL
            .into_iter()
            .find(|id| id.data_key().eq_ignore_ascii_case(key))
    }

    /// Short human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            AbilityId::Flash => "Flash",
            AbilityId::Teleport => "Teleport",
            AbilityId::Heal => "Heal",
            AbilityId::Barrier => "Barrier",
            AbilityId::Exhaust => "Exhaust",
            AbilityId::Ghost => "Ghost",
            AbilityId::Cleanse => "Cleanse",
            AbilityId::Ignite => "Ignite",
            AbilityId::Smite => "Smite",
            AbilityId::Snowball => "Mark",
            AbilityId::Clarity => "Clarity",
            AbilityId::Mana => "Mana",
            AbilityId::Unknown => "?",
        }
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One opposing player as seen in a single telemetry poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Displayable champion name (e.g. `"Darius"`).
    pub identity: String,
    pub ability1: AbilityId,
    pub ability2: AbilityId,
    /// Summed summoner spell haste from owned items.
    pub haste: u32,
}

impl Participant {
    pub fn new(identity: impl Into<String>, ability1: AbilityId, ability2: AbilityId) -> Self {
        Self {
            identity: identity.into(),
            ability1,
            ability2,
            haste: 0,
        }
    }

    pub fn with_haste(mut self, haste: u32) -> Self {
        self.haste = haste;
        self
    }

    /// Ability in the given slot.
    pub fn ability(&self, slot: AbilitySlot) -> AbilityId {
        match slot {
            AbilitySlot::First => self.ability1,
            AbilitySlot::Second => self.ability2,
        }
    }
}

/// Which of the two summoner spell slots a widget belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilitySlot {
    First,
    Second,
}

impl AbilitySlot {
    pub const BOTH: [AbilitySlot; 2] = [AbilitySlot::First, AbilitySlot::Second];

    pub fn index(self) -> usize {
        match self {
            AbilitySlot::First => 0,
            AbilitySlot::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(AbilitySlot::First),
            1 => Some(AbilitySlot::Second),
            _ => None,
        }
    }
}

/// Whether a live match is currently detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    NotInMatch,
    InMatch,
}
