//! Collapses conflict records that describe the same physical event.

use chrono::{DateTime, Utc};
use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::models::Conflict;

/// Canonical identity of a conflict: drone, rounded location, whole second.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    drone: String,
    location_bits: [u64; 3],
    second: i64,
}

impl DedupKey {
    pub fn of(conflict: &Conflict) -> Self {
        // + 0.0 folds -0.0 into 0.0 so both hash alike
        let location_bits = conflict.location.map(|v| (v + 0.0).to_bits());
        Self {
            drone: conflict.conflicting_drone.clone(),
            location_bits,
            second: whole_seconds(conflict.timestamp),
        }
    }
}

/// Unix seconds truncated toward zero.
fn whole_seconds(ts: DateTime<Utc>) -> i64 {
    let secs = ts.timestamp();
    if secs < 0 && ts.timestamp_subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Keep the first conflict seen for each [`DedupKey`], preserving encounter order.
pub fn deduplicate(conflicts: Vec<Conflict>) -> Vec<Conflict> {
    let total = conflicts.len();
    let mut unique: IndexMap<DedupKey, Conflict> = IndexMap::with_capacity(total);

    for conflict in conflicts {
        if let Entry::Vacant(slot) = unique.entry(DedupKey::of(&conflict)) {
            slot.insert(conflict);
        }
    }

    let dropped = total - unique.len();
    if dropped > 0 {
        tracing::debug!(total, dropped, "dropped duplicate conflicts");
    }

    unique.into_values().collect()
}
