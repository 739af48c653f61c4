use std::path::PathBuf;
use std::sync::Arc;

use spellwatch_core::game_data::AbilityCatalog;
use spellwatch_core::patch_data::{PatchDataClient, sync_assets};
use tokio::task::JoinHandle;
use tracing::warn;

/// Refresh base cooldowns off the main loop.
pub fn spawn_catalog_refresh(catalog: Arc<AbilityCatalog>, patch: PatchDataClient) -> JoinHandle<()> {
    tokio::spawn(async move {
        catalog.refresh_from(&patch).await;
    })
}

/// Bring the local asset folder up to date off the main loop.
pub fn spawn_asset_sync(
    patch: PatchDataClient,
    asset_dir: PathBuf,
    state_path: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match sync_assets(&patch, &asset_dir, &state_path).await {
            Ok(report) => {
                if report.failed > 0 {
                    warn!(failed = report.failed, "Some assets could not be downloaded");
                }
            }
            Err(e) => warn!(error = %e, "Asset sync skipped"),
        }
    })
}
