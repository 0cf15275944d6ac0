//! The [`VolumeDirectory`] trait defining the volume directory interface.
//!
//! Any backend (in-memory, command-backed, ...) implements this trait to
//! expose volumes and their snapshot histories to the cloning engine.

use sdc_types::{Snapshot, SnapshotId, Volume};

use crate::error::DirectoryResult;

/// Read access to volumes and snapshot histories, plus the two mutations the
/// engine may request after a replication.
///
/// Implementations must be thread-safe (`Send + Sync`). The engine passes a
/// directory explicitly into every entry point, so independent destinations
/// can be served concurrently by one directory.
pub trait VolumeDirectory: Send + Sync {
    /// Resolve an id, name, mount point or device path to exactly one volume.
    ///
    /// Fails with `NotFound` when nothing matches and `Ambiguous` when more
    /// than one volume does.
    fn resolve(&self, identifier: &str) -> DirectoryResult<Volume>;

    /// The volume's snapshot history, newest first.
    ///
    /// Implementations promise time order; callers re-check it anyway.
    fn history(&self, volume: &Volume) -> DirectoryResult<Vec<Snapshot>>;

    /// Permanently delete one snapshot from the volume.
    fn delete_snapshot(&self, volume: &Volume, snapshot: &Snapshot) -> DirectoryResult<()>;

    /// Rename the volume.
    fn rename(&self, volume: &Volume, name: &str) -> DirectoryResult<()>;

    /// Look up one snapshot in the volume's history.
    ///
    /// Returns `Ok(None)` if the volume has no snapshot with this id.
    fn snapshot(&self, volume: &Volume, id: &SnapshotId) -> DirectoryResult<Option<Snapshot>> {
        Ok(self.history(volume)?.into_iter().find(|s| s.id == *id))
    }
}
