use std::collections::HashSet;

use sdc_types::{Snapshot, SnapshotId};

/// Shared-history discovery between two newest-first snapshot histories.
pub struct HistoryComparator;

impl HistoryComparator {
    /// The replication target: the newest source snapshot.
    pub fn target(source: &[Snapshot]) -> Option<&Snapshot> {
        source.first()
    }

    /// The most recent snapshot present in both histories.
    ///
    /// Both inputs must be newest-first with unique ids. Walking the source in
    /// order and stopping at the first id the destination also holds yields
    /// the newest shared snapshot.
    pub fn shared_anchor<'a>(source: &'a [Snapshot], destination: &[Snapshot]) -> Option<&'a Snapshot> {
        let held: HashSet<SnapshotId> = destination.iter().map(|s| s.id).collect();
        source.iter().find(|s| held.contains(&s.id))
    }
}
