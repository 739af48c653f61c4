//! Serde model of the live client's `allgamedata` document.
//!
//! Only the fields the tracker reads are modeled. Every field is optional
//! and tolerant of the wrong JSON type: a malformed value becomes the
//! field's default instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize `T`, or `T::default()` if the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllGameData {
    #[serde(default, deserialize_with = "lenient")]
    pub active_player: Option<ActivePlayer>,
    #[serde(default, deserialize_with = "lenient")]
    pub all_players: Option<Vec<PlayerEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePlayer {
    #[serde(default, deserialize_with = "lenient")]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub champion_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub raw_champion_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub summoner_spells: Option<SummonerSpells>,
    #[serde(default, deserialize_with = "lenient")]
    pub items: Option<Vec<ItemEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerSpells {
    #[serde(default, deserialize_with = "lenient")]
    pub summoner_spell_one: Option<SpellSlot>,
    #[serde(default, deserialize_with = "lenient")]
    pub summoner_spell_two: Option<SpellSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellSlot {
    #[serde(default, deserialize_with = "lenient")]
    pub raw_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemEntry {
    #[serde(rename = "itemID", default, deserialize_with = "lenient")]
    pub item_id: Option<i64>,
}

impl AllGameData {
    pub fn players(&self) -> &[PlayerEntry] {
        self.all_players.as_deref().unwrap_or_default()
    }
}

impl PlayerEntry {
    /// Owned item ids, skipping entries without one.
    pub fn item_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.items
            .iter()
            .flatten()
            .filter_map(|item| item.item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_live_client_shape() {
        let json = r#"{
            "activePlayer": { "summonerName": "me", "team": "ORDER", "level": 6 },
            "allPlayers": [{
                "championName": "Lee Sin",
                "rawChampionName": "game_character_displayname_LeeSin",
                "team": "CHAOS",
                "items": [{ "itemID": 3158, "count": 1 }, { "itemID": 1001 }],
                "summonerSpells": {
                    "summonerSpellOne": {
                        "displayName": "Flash",
                        "rawDisplayName": "GeneratedTip_SummonerSpell_SummonerFlash_DisplayName"
                    },
                    "summonerSpellTwo": { "displayName": "Smite" }
                }
            }],
            "events": { "Events": [] }
        }"#;
        let data: AllGameData = serde_json::from_str(json).unwrap();
        assert_eq!(data.active_player.unwrap().team.as_deref(), Some("ORDER"));

        let player = &data.all_players.as_ref().unwrap()[0];
        assert_eq!(player.team.as_deref(), Some("CHAOS"));
        assert_eq!(player.item_ids().collect::<Vec<_>>(), vec![3158, 1001]);
        let spells = player.summoner_spells.as_ref().unwrap();
        assert_eq!(
            spells.summoner_spell_two.as_ref().unwrap().raw_display_name,
            None
        );
    }

    #[test]
    fn wrong_types_degrade_to_defaults() {
        let json = r#"{
            "activePlayer": "not an object",
            "allPlayers": [{
                "team": 7,
                "rawChampionName": null,
                "items": {"itemID": 3158},
                "summonerSpells": "oops"
            }, {
                "items": [{ "itemID": "3158" }, { "itemID": 3171 }]
            }]
        }"#;
        let data: AllGameData = serde_json::from_str(json).unwrap();
        assert!(data.active_player.is_none());

        let players = data.players();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].team, None);
        assert_eq!(players[0].raw_champion_name, None);
        assert!(players[0].items.is_none());
        assert!(players[0].summoner_spells.is_none());
        assert_eq!(players[1].item_ids().collect::<Vec<_>>(), vec![3171]);
    }

    #[test]
    fn null_or_missing_player_list_is_empty() {
        let data: AllGameData = serde_json::from_str(r#"{"allPlayers": null}"#).unwrap();
        assert!(data.players().is_empty());
        let data: AllGameData = serde_json::from_str("{}").unwrap();
        assert!(data.players().is_empty());
    }
}
