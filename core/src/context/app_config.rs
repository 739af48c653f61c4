//! User-editable settings, stored by `confy` in the platform config dir.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::local_state::{ConfigError, STATE_FILE_NAME};
use crate::game_data::ItemHasteTable;

pub const APP_NAME: &str = "spellwatch";
const CONFIG_NAME: &str = "config";

/// Extra or replacement haste value for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemHasteOverride {
    pub item_id: i64,
    pub haste: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Delay between telemetry polls
    pub poll_interval_ms: u64,
    pub telemetry_url: String,
    pub telemetry_timeout_ms: u64,

    pub versions_url: String,
    pub cdn_base_url: String,
    /// Locale segment of the data URLs
    pub locale: String,
    pub version_timeout_secs: u64,
    pub spell_data_timeout_secs: u64,
    pub asset_timeout_secs: u64,

    /// Root of the synced art; also holds `state.toml`
    pub asset_directory: PathBuf,
    pub sync_assets_on_startup: bool,

    /// Overlaid on the built-in item haste table
    pub item_haste: Vec<ItemHasteOverride>,
}

impl ::std::default::Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000,
            telemetry_url: "https://127.0.0.1:2999/liveclientdata/allgamedata".to_string(),
            telemetry_timeout_ms: 500,
            versions_url: "https://ddragon.leagueoflegends.com/api/versions.json".to_string(),
            cdn_base_url: "https://ddragon.leagueoflegends.com/cdn".to_string(),
            locale: "en_US".to_string(),
            version_timeout_secs: 2,
            spell_data_timeout_secs: 3,
            asset_timeout_secs: 10,
            asset_directory: default_asset_directory(),
            sync_assets_on_startup: true,
            item_haste: Vec::new(),
        }
    }
}

/// `<data dir>/spellwatch/assets`, or `./assets` when the platform has no
/// data dir.
pub fn default_asset_directory() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME).join("assets"))
        .unwrap_or_else(|| PathBuf::from("assets"))
}

impl AppConfig {
    /// Load from the platform config location. Any failure falls back to
    /// defaults with a warning.
    pub fn load() -> Self {
        match confy::load(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(|e| ConfigError::Write {
            path: Self::config_path().unwrap_or_default(),
            source: e,
        })?;
        info!("Config saved");
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).ok()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_millis(self.telemetry_timeout_ms)
    }

    pub fn version_timeout(&self) -> Duration {
        Duration::from_secs(self.version_timeout_secs)
    }

    pub fn spell_data_timeout(&self) -> Duration {
        Duration::from_secs(self.spell_data_timeout_secs)
    }

    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_timeout_secs)
    }

    pub fn state_path(&self) -> PathBuf {
        self.asset_directory.join(STATE_FILE_NAME)
    }

    /// Built-in haste table with the configured overrides applied.
    pub fn item_haste_table(&self) -> ItemHasteTable {
        ItemHasteTable::builtin()
            .with_overrides(self.item_haste.iter().map(|o| (o.item_id, o.haste)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(3000));
        assert_eq!(config.telemetry_timeout(), Duration::from_millis(500));
        assert_eq!(config.version_timeout(), Duration::from_secs(2));
        assert_eq!(config.spell_data_timeout(), Duration::from_secs(3));
        assert_eq!(config.asset_timeout(), Duration::from_secs(10));
        assert!(config.sync_assets_on_startup);
        assert!(config.asset_directory.ends_with("assets"));
        assert!(config.state_path().ends_with("state.toml"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "poll_interval_ms = 1000\n\n[[item_haste]]\nitem_id = 9999\nhaste = 15\n",
        )
        .unwrap();

        let config: AppConfig = confy::load_path(&path).unwrap();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.telemetry_timeout_ms, 500);
        assert_eq!(
            config.item_haste,
            vec![ItemHasteOverride {
                item_id: 9999,
                haste: 15
            }]
        );
    }

    #[test]
    fn overrides_are_applied_on_top_of_builtins() {
        let config = AppConfig {
            item_haste: vec![
                ItemHasteOverride {
                    item_id: 9999,
                    haste: 15,
                },
                ItemHasteOverride {
                    item_id: 3158,
                    haste: 12,
                },
            ],
            ..AppConfig::default()
        };
        let table = config.item_haste_table();
        assert_eq!(table.haste_of(9999), 15);
        assert_eq!(table.haste_of(3158), 12);
        assert_eq!(table.haste_of(3171), 20);
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let config = AppConfig {
            poll_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
