pub mod cache;
pub mod snapshot;

pub use cache::{ParticipantLookup, SnapshotCache};
pub use snapshot::MatchSnapshot;
