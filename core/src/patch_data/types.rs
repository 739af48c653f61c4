use std::collections::HashMap;

use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::game_data::DEFAULT_COOLDOWN_SECS;

/// `summoner.json` for one patch version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellDataDocument {
    /// Raw spell key (e.g. `"SummonerFlash"`) -> metadata
    #[serde(default)]
    pub data: HashMap<String, SpellEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpellEntry {
    /// Cooldown per rank; summoner spells only use the first
    #[serde(default)]
    pub cooldown: Vec<f64>,
}

impl SpellEntry {
    /// Rank-1 cooldown in whole seconds.
    pub fn rank_one_cooldown(&self) -> u32 {
        match self.cooldown.first() {
            Some(secs) if secs.is_finite() && *secs >= 0.0 => secs.trunc() as u32,
            _ => DEFAULT_COOLDOWN_SECS,
        }
    }
}

/// `champion.json` for one patch version. Only the keys are used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChampionListDocument {
    #[serde(default)]
    pub data: HashMap<String, IgnoredAny>,
}

impl ChampionListDocument {
    /// Champion ids, sorted for stable download order.
    pub fn champion_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.data.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

/// Category of downloadable art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Champion,
    Spell,
}

impl AssetKind {
    /// Local sub-directory under the asset root.
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetKind::Champion => "champions",
            AssetKind::Spell => "spells",
        }
    }

    /// Path segment under `/cdn/{version}/img/`.
    pub fn cdn_segment(self) -> &'static str {
        match self {
            AssetKind::Champion => "champion",
            AssetKind::Spell => "spell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_summoner_json_shape() {
        let json = r#"{
            "type": "summoner",
            "version": "14.2.1",
            "data": {
                "SummonerFlash": { "id": "SummonerFlash", "cooldown": [300], "key": "4" },
                "SummonerSmite": { "id": "SummonerSmite", "cooldown": [15.0] },
                "SummonerOdd": { "id": "SummonerOdd" }
            }
        }"#;
        let doc: SpellDataDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.data.len(), 3);
        assert_eq!(doc.data["SummonerFlash"].rank_one_cooldown(), 300);
        assert_eq!(doc.data["SummonerSmite"].rank_one_cooldown(), 15);
        assert_eq!(doc.data["SummonerOdd"].rank_one_cooldown(), DEFAULT_COOLDOWN_SECS);
    }

    #[test]
    fn champion_ids_are_sorted_keys() {
        let json = r#"{ "data": { "Zed": {"key": "238"}, "Ahri": {"key": "103"}, "LeeSin": {} } }"#;
        let doc: ChampionListDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.champion_ids(), vec!["Ahri", "LeeSin", "Zed"]);
    }

    #[test]
    fn negative_cooldown_falls_back_to_default() {
        let entry = SpellEntry {
            cooldown: vec![-5.0],
        };
        assert_eq!(entry.rank_one_cooldown(), DEFAULT_COOLDOWN_SECS);
    }
}
