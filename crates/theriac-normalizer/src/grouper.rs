//! Grouping of resolved records by drug pair

use std::collections::BTreeMap;

use theriac_domain::{EvidenceRecord, PairKey};
use tracing::debug;

/// Group records by their order-independent pair identity
///
/// `(A, B)` and `(B, A)` land in the same group because [`PairKey`] sorts
/// its components. Records without two resolved identifiers have no pair
/// identity and are silently excluded; the validator upstream already
/// rejected them with a reason, so nothing dropped here goes unaccounted.
pub fn group_by_pair(records: Vec<EvidenceRecord>) -> BTreeMap<PairKey, Vec<EvidenceRecord>> {
    let mut groups: BTreeMap<PairKey, Vec<EvidenceRecord>> = BTreeMap::new();

    for record in records {
        match record.pair_key() {
            Some(key) => groups.entry(key).or_default().push(record),
            None => {
                debug!("Excluding record {} from grouping: unresolved pair", record.id);
            }
        }
    }

    groups
}
