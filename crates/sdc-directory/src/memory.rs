//! In-memory volume directory for testing and dry runs.
//!
//! [`InMemoryDirectory`] keeps volumes and histories in maps behind a
//! `RwLock`. Histories are returned exactly as stored, so tests can hand the
//! engine a mis-ordered listing on purpose.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use sdc_types::{Snapshot, SnapshotId, Volume, VolumeId};
use tracing::debug;

use crate::alias::AliasIndex;
use crate::error::{DirectoryError, DirectoryResult};
use crate::traits::VolumeDirectory;

#[derive(Debug, Default)]
struct DirectoryState {
    volumes: BTreeMap<VolumeId, Volume>,
    histories: HashMap<VolumeId, Vec<Snapshot>>,
}

/// An in-memory implementation of [`VolumeDirectory`].
///
/// Besides the trait, it exposes the mutations a replication backend needs
/// (adding snapshots, erasing a volume) so an in-memory executor can drive it.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryResult<RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|e| DirectoryError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> DirectoryResult<RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|e| DirectoryError::LockPoisoned(e.to_string()))
    }

    /// Register a volume with its history (newest first, stored verbatim).
    pub fn add_volume(&self, volume: Volume, history: Vec<Snapshot>) -> DirectoryResult<()> {
        let mut state = self.write()?;
        if state.volumes.contains_key(&volume.id) {
            return Err(DirectoryError::VolumeExists(volume.id));
        }
        state.histories.insert(volume.id, history);
        state.volumes.insert(volume.id, volume);
        Ok(())
    }

    /// Remove a volume, returning its metadata and history.
    pub fn remove_volume(&self, id: &VolumeId) -> DirectoryResult<(Volume, Vec<Snapshot>)> {
        let mut state = self.write()?;
        let volume = state.volumes.remove(id).ok_or_else(|| DirectoryError::NotFound {
            identifier: id.to_string(),
        })?;
        let history = state.histories.remove(id).unwrap_or_default();
        Ok((volume, history))
    }

    /// Replace a volume's metadata, keeping its history.
    pub fn update_volume(&self, volume: Volume) -> DirectoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .volumes
            .get_mut(&volume.id)
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: volume.id.to_string(),
            })?;
        *slot = volume;
        Ok(())
    }

    /// Current metadata of a volume by id.
    pub fn volume(&self, id: &VolumeId) -> DirectoryResult<Volume> {
        self.read()?
            .volumes
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: id.to_string(),
            })
    }

    /// A volume's stored history.
    pub fn snapshots(&self, id: &VolumeId) -> DirectoryResult<Vec<Snapshot>> {
        self.read()?
            .histories
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: id.to_string(),
            })
    }

    /// Insert a snapshot, keeping the history newest first.
    pub fn add_snapshot(&self, id: &VolumeId, snapshot: Snapshot) -> DirectoryResult<()> {
        let mut state = self.write()?;
        let history = state
            .histories
            .get_mut(id)
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: id.to_string(),
            })?;
        if history.iter().any(|s| s.id == snapshot.id) {
            return Err(DirectoryError::SnapshotExists {
                volume: *id,
                snapshot: snapshot.id,
            });
        }
        let position = history
            .iter()
            .position(|s| s.created < snapshot.created)
            .unwrap_or(history.len());
        history.insert(position, snapshot);
        Ok(())
    }

    /// Discard a volume's history and replace it wholesale.
    pub fn replace_history(&self, id: &VolumeId, history: Vec<Snapshot>) -> DirectoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .histories
            .get_mut(id)
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: id.to_string(),
            })?;
        *slot = history;
        Ok(())
    }

    /// Remove one snapshot by id.
    pub fn remove_snapshot(&self, id: &VolumeId, snapshot: &SnapshotId) -> DirectoryResult<Snapshot> {
        let mut state = self.write()?;
        let history = state
            .histories
            .get_mut(id)
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: id.to_string(),
            })?;
        let index = history
            .iter()
            .position(|s| s.id == *snapshot)
            .ok_or(DirectoryError::SnapshotNotFound {
                volume: *id,
                snapshot: *snapshot,
            })?;
        Ok(history.remove(index))
    }

    /// Rename a volume by id.
    pub fn set_name(&self, id: &VolumeId, name: &str) -> DirectoryResult<()> {
        let mut state = self.write()?;
        let volume = state
            .volumes
            .get_mut(id)
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: id.to_string(),
            })?;
        volume.name = name.to_string();
        Ok(())
    }
}

impl VolumeDirectory for InMemoryDirectory {
    fn resolve(&self, identifier: &str) -> DirectoryResult<Volume> {
        let state = self.read()?;
        let index = AliasIndex::from_volumes(state.volumes.values());
        let id = index.resolve(identifier)?;
        debug!(identifier, volume = %id, "resolved volume");
        state
            .volumes
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                identifier: identifier.to_string(),
            })
    }

    fn history(&self, volume: &Volume) -> DirectoryResult<Vec<Snapshot>> {
        self.snapshots(&volume.id)
    }

    fn delete_snapshot(&self, volume: &Volume, snapshot: &Snapshot) -> DirectoryResult<()> {
        self.remove_snapshot(&volume.id, &snapshot.id)?;
        debug!(volume = %volume.id, snapshot = %snapshot.id, "deleted snapshot");
        Ok(())
    }

    fn rename(&self, volume: &Volume, name: &str) -> DirectoryResult<()> {
        self.set_name(&volume.id, name)
    }
}
