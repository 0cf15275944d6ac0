//! Multi-key volume lookup.
//!
//! A volume can be named by its id, its name, its mount point, or its device
//! node. [`AliasIndex`] maps every alias to the set of volumes carrying it and
//! resolves an identifier only when exactly one volume matches across all
//! alias kinds.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use sdc_types::{Volume, VolumeId};

use crate::error::{DirectoryError, DirectoryResult};

const DEVICE_ROOT: &str = "/dev";

/// One way of naming a volume.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Alias {
    Id(VolumeId),
    Name(String),
    MountPoint(PathBuf),
    Device(PathBuf),
}

impl Alias {
    /// Every alias the volume can be addressed by.
    pub fn of(volume: &Volume) -> Vec<Alias> {
        let mut aliases = vec![Alias::Id(volume.id), Alias::Name(volume.name.clone())];
        if let Some(mount_point) = &volume.mount_point {
            aliases.push(Alias::MountPoint(normalize(mount_point)));
        }
        if let Some(device) = &volume.device {
            aliases.push(Alias::Device(normalize(device)));
        }
        aliases
    }

    /// The aliases a user-supplied identifier could stand for.
    ///
    /// A bare device name such as `disk3s1` is also tried under `/dev`.
    pub fn candidates(identifier: &str) -> Vec<Alias> {
        let identifier = identifier.trim();
        let mut candidates = Vec::with_capacity(4);
        if let Ok(id) = identifier.parse::<VolumeId>() {
            candidates.push(Alias::Id(id));
        }
        candidates.push(Alias::Name(identifier.to_string()));

        let path = Path::new(identifier);
        if path.is_absolute() {
            candidates.push(Alias::MountPoint(normalize(path)));
            candidates.push(Alias::Device(normalize(path)));
        } else if !identifier.is_empty() && !identifier.contains('/') {
            candidates.push(Alias::Device(Path::new(DEVICE_ROOT).join(identifier)));
        }
        candidates
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

/// Index from alias to the volumes carrying it.
#[derive(Debug, Default)]
pub struct AliasIndex {
    entries: HashMap<Alias, BTreeSet<VolumeId>>,
}

impl AliasIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a set of volumes.
    pub fn from_volumes<'a>(volumes: impl IntoIterator<Item = &'a Volume>) -> Self {
        let mut index = Self::new();
        for volume in volumes {
            index.insert(volume);
        }
        index
    }

    /// Register all aliases of `volume`.
    pub fn insert(&mut self, volume: &Volume) {
        for alias in Alias::of(volume) {
            self.entries.entry(alias).or_default().insert(volume.id);
        }
    }

    /// Drop every alias pointing at `id`.
    pub fn remove(&mut self, id: &VolumeId) {
        self.entries.retain(|_, ids| {
            ids.remove(id);
            !ids.is_empty()
        });
    }

    /// Number of distinct aliases indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an identifier to exactly one volume id.
    ///
    /// Matches from every alias kind are pooled; an identifier that is the
    /// name of one volume and the mount point of another is ambiguous.
    pub fn resolve(&self, identifier: &str) -> DirectoryResult<VolumeId> {
        let matches: BTreeSet<VolumeId> = Alias::candidates(identifier)
            .iter()
            .filter_map(|alias| self.entries.get(alias))
            .flatten()
            .copied()
            .collect();

        let mut iter = matches.iter();
        match (iter.next(), iter.next()) {
            (Some(id), None) => Ok(*id),
            (None, _) => Err(DirectoryError::NotFound {
                identifier: identifier.to_string(),
            }),
            (Some(_), Some(_)) => Err(DirectoryError::Ambiguous {
                identifier: identifier.to_string(),
                candidates: matches.iter().map(ToString::to_string).collect(),
            }),
        }
    }
}
