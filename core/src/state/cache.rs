//! Shared holder for the latest match snapshot.
//!
//! One writer (the poller) swaps in a whole new snapshot per poll; readers
//! clone the `Arc` and never observe a partially written roster.

use std::sync::{Arc, PoisonError, RwLock};

use spellwatch_types::Participant;

use super::snapshot::MatchSnapshot;

/// Read-only view of the current roster, for code that only needs to look
/// participants up at the moment a timer starts.
pub trait ParticipantLookup: Send + Sync {
    fn lookup_participant(&self, identity: &str) -> Option<Participant>;
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    inner: Arc<RwLock<Arc<MatchSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Arc<MatchSnapshot> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn replace(&self, snapshot: MatchSnapshot) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
    }

    pub fn clear(&self) {
        self.replace(MatchSnapshot::default());
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}

impl ParticipantLookup for SnapshotCache {
    fn lookup_participant(&self, identity: &str) -> Option<Participant> {
        self.current().get(identity).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellwatch_types::AbilityId;

    #[test]
    fn clones_share_the_same_snapshot() {
        let writer = SnapshotCache::new();
        let reader = writer.clone();
        assert!(reader.is_empty());

        writer.replace(MatchSnapshot::new(vec![Participant::new(
            "Darius",
            AbilityId::Flash,
            AbilityId::Ghost,
        )]));
        assert_eq!(
            reader.lookup_participant("Darius").map(|p| p.ability2),
            Some(AbilityId::Ghost)
        );

        writer.clear();
        assert!(reader.is_empty());
        assert!(reader.lookup_participant("Darius").is_none());
    }

    #[test]
    fn held_snapshot_survives_replacement() {
        let cache = SnapshotCache::new();
        cache.replace(MatchSnapshot::new(vec![Participant::new(
            "Ahri",
            AbilityId::Flash,
            AbilityId::Ignite,
        )]));
        let held = cache.current();
        cache.clear();
        assert_eq!(held.len(), 1);
        assert!(cache.current().is_empty());
    }
}
