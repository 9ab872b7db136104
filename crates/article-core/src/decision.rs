//! Sync decision engine
//!
//! Classifies one content item against the state store as create,
//! update, or skip. Pure: the store is only read here; recording the
//! outcome of a publish is the runner's job.

use crate::item::ContentItem;
use crate::state::StateStore;

/// The action a downstream publish should take for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No record exists; first sync
    Create,
    /// The item changed since its last sync; carries the remote identity
    Update { remote_id: String },
    /// Unchanged, older, or undecidable; publish nothing
    Skip,
}

/// Decide what to do with an item.
///
/// An item with no record is a `create`. An item with a record is an
/// `update` only when both its effective timestamp and the recorded
/// source timestamp are present and the effective timestamp is strictly
/// later; everything else (equal, older, or either side missing) is a
/// `skip`. An item with no timestamps at all can therefore still be
/// created once but never updates.
pub fn decide(item: &ContentItem, store: &StateStore) -> Decision {
    let Some(record) = store.record(&item.id) else {
        return Decision::Create;
    };

    if let (Some(effective), Some(recorded)) =
        (item.effective_timestamp(), record.source_updated_at)
        && effective > recorded
    {
        return Decision::Update {
            remote_id: record.remote_id.clone(),
        };
    }

    Decision::Skip
}
