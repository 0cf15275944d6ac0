//! Retention pruning of destination history.
//!
//! Deletion stops at the first failure. A partially pruned destination is
//! consistent, just larger than intended, and the error lists what is left.

use sdc_directory::{DirectoryError, VolumeDirectory};
use sdc_types::{Snapshot, SnapshotId, Volume, VolumeId};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PruneError {
    #[error("snapshot {snapshot} to keep is not on volume {volume}; nothing deleted")]
    KeepAbsent {
        volume: VolumeId,
        snapshot: SnapshotId,
    },

    #[error("deleting snapshot {snapshot} from {volume} failed ({} deleted, still present: {}): {source}", .deleted.len(), ids(.remaining))]
    DeleteFailed {
        volume: VolumeId,
        snapshot: SnapshotId,
        deleted: Vec<Snapshot>,
        remaining: Vec<Snapshot>,
        #[source]
        source: DirectoryError,
    },

    #[error("cannot list history of {volume}: {source}")]
    Listing {
        volume: VolumeId,
        #[source]
        source: DirectoryError,
    },
}

impl PruneError {
    /// Snapshots other than the kept one still on the destination.
    pub fn remaining(&self) -> &[Snapshot] {
        match self {
            Self::DeleteFailed { remaining, .. } => remaining.as_slice(),
            _ => &[],
        }
    }
}

fn ids(snapshots: &[Snapshot]) -> String {
    snapshots
        .iter()
        .map(|s| s.id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type PruneResult<T> = Result<T, PruneError>;

/// What a completed prune did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    pub kept: Snapshot,
    pub deleted: Vec<Snapshot>,
}

/// Deletes every destination snapshot except the one just replicated.
pub struct RetentionPruner;

impl RetentionPruner {
    /// Delete all snapshots of `volume` other than `keep`.
    ///
    /// Refuses to delete anything unless `keep` is in the current listing.
    pub fn prune<D>(directory: &D, volume: &Volume, keep: &Snapshot) -> PruneResult<PruneReport>
    where
        D: VolumeDirectory + ?Sized,
    {
        let history = directory
            .history(volume)
            .map_err(|source| PruneError::Listing {
                volume: volume.id,
                source,
            })?;
        let Some(kept) = history.iter().find(|s| s.id == keep.id).cloned() else {
            warn!(volume = %volume.id, keep = %keep.id, "snapshot to keep is missing; prune skipped");
            return Err(PruneError::KeepAbsent {
                volume: volume.id,
                snapshot: keep.id,
            });
        };

        let doomed: Vec<Snapshot> = history.into_iter().filter(|s| s.id != keep.id).collect();
        let mut deleted = Vec::with_capacity(doomed.len());
        for (i, snapshot) in doomed.iter().enumerate() {
            debug!(volume = %volume.id, snapshot = %snapshot.id, name = %snapshot.name, "deleting snapshot");
            if let Err(source) = directory.delete_snapshot(volume, snapshot) {
                let remaining = doomed[i..].to_vec();
                warn!(
                    volume = %volume.id,
                    snapshot = %snapshot.id,
                    deleted = deleted.len(),
                    remaining = remaining.len(),
                    error = %source,
                    "prune aborted"
                );
                return Err(PruneError::DeleteFailed {
                    volume: volume.id,
                    snapshot: snapshot.id,
                    deleted,
                    remaining,
                    source,
                });
            }
            deleted.push(snapshot.clone());
        }

        info!(volume = %volume.id, kept = %kept.id, deleted = deleted.len(), "pruned destination history");
        Ok(PruneReport { kept, deleted })
    }
}
