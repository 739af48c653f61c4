use hashbrown::HashMap;
use spellwatch_types::Participant;

/// All opposing participants from one poll, in payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSnapshot {
    participants: Vec<Participant>,
    /// identity -> index into `participants`
    by_identity: HashMap<String, usize>,
}

impl MatchSnapshot {
    pub fn new(participants: Vec<Participant>) -> Self {
        let mut by_identity = HashMap::with_capacity(participants.len());
        for (idx, p) in participants.iter().enumerate() {
            // Duplicate identities resolve to the first entry
            by_identity.entry(p.identity.clone()).or_insert(idx);
        }
        Self {
            participants,
            by_identity,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn get(&self, identity: &str) -> Option<&Participant> {
        self.by_identity
            .get(identity)
            .map(|&idx| &self.participants[idx])
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
