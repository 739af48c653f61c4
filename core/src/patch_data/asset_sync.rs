//! Versioned asset sync.
//!
//! A run compares the remote data version against the one recorded in
//! [`LocalState`]. A changed (or missing) version re-downloads everything;
//! an unchanged one only fills in files that are not on disk yet.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::client::{PatchDataError, PatchSource};
use super::types::AssetKind;
use crate::context::{ConfigError, LocalState};

/// Spell art always synced, independent of the champion list.
pub const SPELL_ASSET_IDS: [&str; 11] = [
    "SummonerFlash",
    "SummonerDot",
    "SummonerHeal",
    "SummonerBarrier",
    "SummonerExhaust",
    "SummonerTeleport",
    "SummonerSmite",
    "SummonerBoost",
    "SummonerMana",
    "SummonerHaste",
    "SummonerSnowball",
];

const ASSET_EXTENSION: &str = "png";

#[derive(Error, Debug)]
pub enum AssetSyncError {
    #[error("failed to fetch latest version: {0}")]
    Version(#[source] PatchDataError),

    #[error("failed to fetch champion list for {version}: {source}")]
    ChampionList {
        version: String,
        #[source]
        source: PatchDataError,
    },

    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    State(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Fetch and overwrite every asset
    Full,
    /// Fetch only assets missing on disk
    MissingOnly,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Full => write!(f, "full"),
            SyncMode::MissingOnly => write!(f, "missing-only"),
        }
    }
}

/// Full resync unless the local record matches the remote version exactly.
pub fn decide_sync_mode(local: Option<&str>, remote: &str) -> SyncMode {
    match local {
        Some(local) if local == remote => SyncMode::MissingOnly,
        _ => SyncMode::Full,
    }
}

/// One file to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub kind: AssetKind,
    pub id: String,
    pub url: String,
    pub path: PathBuf,
}

/// Every champion followed by the fixed spell list.
pub fn build_manifest<S: PatchSource>(
    source: &S,
    version: &str,
    champion_ids: &[String],
    asset_dir: &Path,
) -> Vec<AssetEntry> {
    let champions = champion_ids
        .iter()
        .map(|id| (AssetKind::Champion, id.as_str()));
    let spells = SPELL_ASSET_IDS.iter().map(|id| (AssetKind::Spell, *id));

    champions
        .chain(spells)
        .map(|(kind, id)| AssetEntry {
            kind,
            id: id.to_string(),
            url: source.asset_url(version, kind, id),
            path: asset_dir
                .join(kind.dir_name())
                .join(format!("{id}.{ASSET_EXTENSION}")),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub version: String,
    pub mode: SyncMode,
    pub downloaded: usize,
    /// Already on disk in missing-only mode
    pub skipped: usize,
    pub failed: usize,
}

/// Bring `asset_dir` in line with the latest remote version.
///
/// Per-file failures are logged and counted, never fatal. The new version
/// is recorded in `state_path` once every entry has been attempted.
pub async fn sync_assets<S: PatchSource>(
    source: &S,
    asset_dir: &Path,
    state_path: &Path,
) -> Result<SyncReport, AssetSyncError> {
    let version = source
        .latest_version()
        .await
        .map_err(AssetSyncError::Version)?;

    // An unreadable record is treated like a missing one; the save below
    // rewrites it
    let mut state = LocalState::load(state_path).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable asset state");
        LocalState::default()
    });
    let mode = decide_sync_mode(state.asset_version.as_deref(), &version);
    info!(
        local = state.asset_version.as_deref().unwrap_or("none"),
        remote = %version,
        %mode,
        "Starting asset sync"
    );

    let champion_ids = source
        .champion_ids(&version)
        .await
        .map_err(|e| AssetSyncError::ChampionList {
            version: version.clone(),
            source: e,
        })?;

    for kind in [AssetKind::Champion, AssetKind::Spell] {
        let dir = asset_dir.join(kind.dir_name());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| AssetSyncError::Io { path: dir, source })?;
    }

    let manifest = build_manifest(source, &version, &champion_ids, asset_dir);
    let mut report = SyncReport {
        version: version.clone(),
        mode,
        downloaded: 0,
        skipped: 0,
        failed: 0,
    };

    for entry in &manifest {
        if mode == SyncMode::MissingOnly
            && tokio::fs::try_exists(&entry.path).await.unwrap_or(false)
        {
            report.skipped += 1;
            continue;
        }

        match fetch_entry(source, entry).await {
            Ok(()) => report.downloaded += 1,
            Err(e) => {
                warn!(id = %entry.id, kind = entry.kind.dir_name(), error = %e, "Asset download failed");
                report.failed += 1;
            }
        }
    }

    state.asset_version = Some(version);
    state.save(state_path)?;

    info!(
        version = %report.version,
        downloaded = report.downloaded,
        skipped = report.skipped,
        failed = report.failed,
        "Asset sync complete"
    );
    Ok(report)
}

#[derive(Debug, Error)]
enum FetchError {
    #[error(transparent)]
    Remote(#[from] PatchDataError),
    #[error(transparent)]
    Write(#[from] std::io::Error),
}

async fn fetch_entry<S: PatchSource>(source: &S, entry: &AssetEntry) -> Result<(), FetchError> {
    let bytes = source.fetch_asset(&entry.url).await?;
    tokio::fs::write(&entry.path, &bytes).await?;
    debug!(path = %entry.path.display(), size = bytes.len(), "Saved asset");
    Ok(())
}
