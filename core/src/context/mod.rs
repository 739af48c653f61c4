mod app_config;
mod local_state;

pub use app_config::{APP_NAME, AppConfig, ItemHasteOverride, default_asset_directory};
pub use local_state::{ConfigError, LocalState, STATE_FILE_NAME, WindowPosition};
