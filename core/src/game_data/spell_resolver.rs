//! Classify free-form summoner spell display names.
//!
//! The telemetry endpoint reports spells by `rawDisplayName`, a
//! localization key such as `GeneratedTip_SummonerSpell_SummonerFlash_DisplayName`
//! rather than a stable id. Keyword matching handles the common spells;
//! token scanning catches the rest.

use spellwatch_types::{AbilityId, SPELL_KEY_PREFIX};

/// Keyword groups checked in order against the lower-cased name.
/// The first group with any hit wins, so the order is load-bearing.
const KEYWORD_PRIORITY: &[(&[&str], AbilityId)] = &[
    (&["teleport"], AbilityId::Teleport),
    (&["smite"], AbilityId::Smite),
    (&["flash"], AbilityId::Flash),
    (&["ignite", "dot"], AbilityId::Ignite),
    (&["barrier"], AbilityId::Barrier),
    (&["heal"], AbilityId::Heal),
    (&["exhaust"], AbilityId::Exhaust),
    (&["cleanse", "boost"], AbilityId::Cleanse),
    (&["ghost", "haste"], AbilityId::Ghost),
];

const TOKEN_SEPARATOR: char = '_';

/// Generic placeholder token that never names a concrete spell.
const PLACEHOLDER_TOKEN: &str = "SummonerSpell";

/// Resolve a raw spell display name to a known [`AbilityId`].
pub fn resolve_spell(raw: Option<&str>) -> AbilityId {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return AbilityId::Unknown;
    };

    let lowered = raw.to_lowercase();
    for (keywords, id) in KEYWORD_PRIORITY {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return *id;
        }
    }

    resolve_by_token(raw)
}

/// Scan `_`-separated tokens from the end for the first `Summoner*` token.
/// Only that first candidate is considered.
fn resolve_by_token(raw: &str) -> AbilityId {
    raw.split(TOKEN_SEPARATOR)
        .rev()
        .find(|token| token.starts_with(SPELL_KEY_PREFIX) && *token != PLACEHOLDER_TOKEN)
        .and_then(AbilityId::from_data_key)
        .unwrap_or(AbilityId::Unknown)
}
