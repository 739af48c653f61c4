//! Remote patch-data service: versions, spell cooldowns, champion list, and
//! art assets, plus the policy that keeps the local asset folder in sync.

mod asset_sync;
mod client;
mod types;

pub use asset_sync::{
    AssetEntry, AssetSyncError, SPELL_ASSET_IDS, SyncMode, SyncReport, build_manifest,
    decide_sync_mode, sync_assets,
};
pub use client::{PatchDataClient, PatchDataError, PatchSource};
pub use types::{AssetKind, ChampionListDocument, SpellDataDocument, SpellEntry};
