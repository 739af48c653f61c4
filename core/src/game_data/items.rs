use hashbrown::HashMap;

/// Item id -> summoner spell haste granted by owning it.
///
/// Built once at startup (built-ins plus config overrides) and shared
/// read-only for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct ItemHasteTable {
    table: HashMap<i64, u32>,
}

/// Items known to grant summoner spell haste.
const BUILTIN_ITEM_HASTE: &[(i64, u32)] = &[
    (3158, 10), // Ionian Boots of Lucidity
    (3171, 20), // Crimson Lucidity
];

impl ItemHasteTable {
    /// Table seeded with the built-in boot entries.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ITEM_HASTE.iter().copied())
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (i64, u32)>) -> Self {
        Self {
            table: entries.into_iter().collect(),
        }
    }

    /// Overlay entries on top of the current table (later entries win).
    pub fn with_overrides(mut self, entries: impl IntoIterator<Item = (i64, u32)>) -> Self {
        self.table.extend(entries);
        self
    }

    pub fn haste_of(&self, item_id: i64) -> u32 {
        self.table.get(&item_id).copied().unwrap_or(0)
    }

    /// Sum of haste over every owned item. Unknown items count as zero,
    /// duplicates count once per copy, and no cap is applied.
    pub fn compute_haste(&self, item_ids: impl IntoIterator<Item = i64>) -> u32 {
        item_ids
            .into_iter()
            .map(|id| self.haste_of(id))
            .fold(0u32, u32::saturating_add)
    }
}

/// Apply haste to a base cooldown: `floor(base * 100 / (100 + haste))`.
///
/// Integer arithmetic throughout, so `haste == 0` returns `base` exactly.
pub fn cooldown_after_haste(base_secs: u32, haste: u32) -> u32 {
    let scaled = u64::from(base_secs) * 100 / (100 + u64::from(haste));
    // scaled <= base_secs, so this never truncates
    scaled as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_item_list_has_no_haste() {
        let table = ItemHasteTable::builtin();
        assert_eq!(table.compute_haste(Vec::<i64>::new()), 0);
    }

    #[test]
    fn unknown_items_contribute_zero() {
        let table = ItemHasteTable::builtin();
        assert_eq!(table.compute_haste([1001, 6672, 3031]), 0);
        assert_eq!(table.compute_haste([1001, 3158]), 10);
    }

    #[test]
    fn haste_sum_is_order_independent_and_counts_duplicates() {
        let table = ItemHasteTable::from_entries([(1, 5), (2, 7), (3, 11)]);
        let forward = table.compute_haste([1, 2, 3, 2]);
        let backward = table.compute_haste([2, 3, 2, 1]);
        assert_eq!(forward, 30);
        assert_eq!(forward, backward);
    }

    #[test]
    fn overrides_replace_builtins() {
        let table = ItemHasteTable::builtin().with_overrides([(3158, 12), (9999, 3)]);
        assert_eq!(table.haste_of(3158), 12);
        assert_eq!(table.haste_of(9999), 3);
        assert_eq!(table.haste_of(3171), 20);
    }

    #[test]
    fn cooldown_formula_matches_known_values() {
        assert_eq!(cooldown_after_haste(300, 0), 300);
        assert_eq!(cooldown_after_haste(300, 20), 250);
        assert_eq!(cooldown_after_haste(180, 10), 163);
        assert_eq!(cooldown_after_haste(15, 0), 15);
    }

    #[test]
    fn large_haste_never_overflows() {
        assert_eq!(cooldown_after_haste(u32::MAX, 0), u32::MAX);
        assert_eq!(cooldown_after_haste(300, u32::MAX), 0);
    }
}
