//! Turn one telemetry document into the list of opposing participants.

use spellwatch_types::{AbilityId, Participant};

use super::types::{AllGameData, PlayerEntry, SpellSlot};
use crate::game_data::{ItemHasteTable, resolve_spell};

/// Team assumed for the local player when the document does not say.
pub const DEFAULT_TEAM: &str = "ORDER";

const IDENTITY_SEPARATOR: char = '_';

/// Normalize every opposing player in `payload`.
///
/// `None` yields [`sample_opponents`] so a front-end has something to show
/// outside a live match. Players on the local team are skipped; every other
/// entry produces a participant, even one with no usable fields.
pub fn parse_opponents(payload: Option<&AllGameData>, haste: &ItemHasteTable) -> Vec<Participant> {
    let Some(data) = payload else {
        return sample_opponents();
    };

    let my_team = data
        .active_player
        .as_ref()
        .and_then(|p| p.team.as_deref())
        .unwrap_or(DEFAULT_TEAM);

    data.players()
        .iter()
        .filter(|p| p.team.as_deref() != Some(my_team))
        .map(|p| normalize_player(p, haste))
        .collect()
}

fn normalize_player(player: &PlayerEntry, haste: &ItemHasteTable) -> Participant {
    let raw_name = player
        .raw_champion_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(player.champion_name.as_deref())
        .unwrap_or_default();

    let spells = player.summoner_spells.as_ref();
    let ability1 = spell_id(spells.and_then(|s| s.summoner_spell_one.as_ref()));
    let ability2 = spell_id(spells.and_then(|s| s.summoner_spell_two.as_ref()));

    Participant::new(display_identity(raw_name), ability1, ability2)
        .with_haste(haste.compute_haste(player.item_ids()))
}

fn spell_id(slot: Option<&SpellSlot>) -> AbilityId {
    resolve_spell(slot.and_then(|s| s.raw_display_name.as_deref()))
}

/// Strip localization prefixes: `game_character_displayname_LeeSin` ->
/// `LeeSin`. Names without `_` are returned unchanged.
pub fn display_identity(raw: &str) -> &str {
    match raw.rfind(IDENTITY_SEPARATOR) {
        Some(idx) => &raw[idx + IDENTITY_SEPARATOR.len_utf8()..],
        None => raw,
    }
}

/// Fixed placeholder roster.
pub fn sample_opponents() -> Vec<Participant> {
    vec![
        Participant::new("Darius", AbilityId::Flash, AbilityId::Teleport),
        Participant::new("LeeSin", AbilityId::Flash, AbilityId::Smite),
    ]
}
