//! Base cooldown catalog for summoner spells.
//!
//! Readers grab the current `Arc<HashMap>` under a short read lock and work
//! off that; a refresh builds a complete replacement map and swaps it in, so
//! a reader never sees a half-applied patch.

use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;
use spellwatch_types::AbilityId;
use tracing::{debug, info, warn};

use crate::patch_data::{PatchDataError, PatchSource, SpellDataDocument};

/// Cooldown used for any spell missing from the catalog.
pub const DEFAULT_COOLDOWN_SECS: u32 = 300;

/// Fallback cooldowns used until a patch-data refresh succeeds.
const BUILTIN_COOLDOWNS: &[(AbilityId, u32)] = &[
    (AbilityId::Flash, 300),
    (AbilityId::Teleport, 360),
    (AbilityId::Heal, 240),
    (AbilityId::Cleanse, 210),
    (AbilityId::Exhaust, 210),
    (AbilityId::Ghost, 210),
    (AbilityId::Barrier, 180),
    (AbilityId::Ignite, 180),
    (AbilityId::Smite, 15),
    (AbilityId::Snowball, 80),
    (AbilityId::Clarity, 240),
    (AbilityId::Mana, 240),
];

type CooldownMap = HashMap<String, u32>;

/// Shared, swap-on-refresh map of lower-cased spell key -> base cooldown.
#[derive(Debug)]
pub struct AbilityCatalog {
    entries: RwLock<Arc<CooldownMap>>,
    /// Patch version of the last successful refresh
    version: RwLock<Option<String>>,
}

impl Default for AbilityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AbilityCatalog {
    /// Catalog seeded with the built-in fallback table.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_COOLDOWNS
                .iter()
                .map(|(id, secs)| (id.data_key().to_string(), *secs)),
        )
    }

    /// Catalog from raw `(key, seconds)` pairs. Keys are lower-cased.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(key, secs)| (key.to_lowercase(), secs))
            .collect();
        Self {
            entries: RwLock::new(Arc::new(map)),
            version: RwLock::new(None),
        }
    }

    /// Base cooldown for a spell, or [`DEFAULT_COOLDOWN_SECS`].
    pub fn get(&self, id: AbilityId) -> u32 {
        self.get_key(id.data_key())
    }

    /// Base cooldown by raw data key (case-insensitive).
    pub fn get_key(&self, key: &str) -> u32 {
        self.current()
            .get(&key.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_COOLDOWN_SECS)
    }

    /// The current immutable map. Cheap: clones an `Arc`.
    pub fn current(&self) -> Arc<CooldownMap> {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Patch version of the last successful refresh, if any.
    pub fn version(&self) -> Option<String> {
        self.version
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overlay spell data onto the catalog and swap it in.
    ///
    /// Each entry contributes its rank-1 cooldown (first array element,
    /// 300 when absent), truncated to whole seconds. Returns how many
    /// entries were written.
    pub fn apply_spell_data(&self, doc: &SpellDataDocument) -> usize {
        let mut next: CooldownMap = (*self.current()).clone();
        let mut count = 0;
        for (raw_name, entry) in &doc.data {
            next.insert(raw_name.to_lowercase(), entry.rank_one_cooldown());
            count += 1;
        }

        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(next);
        count
    }

    /// Refresh from the patch-data service.
    ///
    /// Never fails: on any error the previous catalog is kept and the error
    /// is logged. Returns the number of updated entries on success.
    pub async fn refresh_from<S: PatchSource>(&self, source: &S) -> Option<usize> {
        info!("Checking patch data for cooldown updates");
        match self.try_refresh(source).await {
            Ok((version, count)) => {
                info!(count, %version, "Updated spell cooldowns");
                *self.version.write().unwrap_or_else(PoisonError::into_inner) = Some(version);
                Some(count)
            }
            Err(e) => {
                warn!(error = %e, "Cooldown update failed, keeping previous values");
                None
            }
        }
    }

    async fn try_refresh<S: PatchSource>(
        &self,
        source: &S,
    ) -> Result<(String, usize), PatchDataError> {
        let version = source.latest_version().await?;
        debug!(%version, "Fetching spell data");
        let doc = source.spell_data(&version).await?;
        let count = self.apply_spell_data(&doc);
        Ok((version, count))
    }
}
