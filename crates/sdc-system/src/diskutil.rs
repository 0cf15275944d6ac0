//! [`VolumeDirectory`] backed by `diskutil`.

use std::str::FromStr;

use sdc_directory::{DirectoryError, DirectoryResult, VolumeDirectory};
use sdc_types::{FilesystemKind, Snapshot, SnapshotId, Volume, VolumeId};
use serde::Deserialize;
use tracing::debug;

use crate::error::SystemError;
use crate::plist::decode_plist;
use crate::runner::{CommandRunner, SystemRunner};

/// The subset of `diskutil info -plist` output the directory uses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VolumeInfo {
    #[serde(rename = "VolumeUUID", default)]
    pub uuid: Option<String>,
    #[serde(rename = "VolumeName", default)]
    pub name: Option<String>,
    #[serde(rename = "MountPoint", default)]
    pub mount_point: Option<String>,
    #[serde(rename = "DeviceNode", default)]
    pub device_node: Option<String>,
    #[serde(rename = "WritableVolume", default)]
    pub writable: bool,
    #[serde(rename = "FilesystemType", default)]
    pub filesystem_type: Option<String>,
    #[serde(rename = "FilesystemUserVisibleName", default)]
    pub filesystem_name: Option<String>,
}

impl VolumeInfo {
    fn into_volume(self, identifier: &str) -> DirectoryResult<Volume> {
        let not_found = || DirectoryError::NotFound {
            identifier: identifier.to_string(),
        };
        let id = self
            .uuid
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(not_found)
            .and_then(|u| VolumeId::from_str(u).map_err(|_| not_found()))?;

        let filesystem = self
            .filesystem_type
            .as_deref()
            .map(FilesystemKind::from_type_name)
            .unwrap_or_else(|| FilesystemKind::Other(String::new()));
        let case_sensitive = self
            .filesystem_name
            .as_deref()
            .is_some_and(|n| n.contains("Case-sensitive"));

        let mut volume = Volume::new(id, self.name.unwrap_or_default())
            .with_filesystem(filesystem)
            .with_writable(self.writable)
            .with_case_sensitive(case_sensitive);
        if let Some(mount) = self.mount_point.filter(|m| !m.is_empty()) {
            volume = volume.with_mount_point(mount);
        }
        if let Some(device) = self.device_node.filter(|d| !d.is_empty()) {
            volume = volume.with_device(device);
        }
        Ok(volume)
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    #[serde(rename = "SnapshotName")]
    name: String,
    #[serde(rename = "SnapshotUUID")]
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct SnapshotList {
    #[serde(rename = "Snapshots", default)]
    snapshots: Vec<SnapshotEntry>,
}

/// Volume directory over the `diskutil` command.
#[derive(Clone, Debug, Default)]
pub struct DiskUtil<R = SystemRunner> {
    runner: R,
}

impl DiskUtil<SystemRunner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: CommandRunner> DiskUtil<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Raw `diskutil info` for an identifier.
    pub fn info(&self, identifier: &str) -> DirectoryResult<VolumeInfo> {
        let plist = self
            .runner
            .run("diskutil", &["info", "-plist", identifier], None)
            .map_err(|e| match e {
                // diskutil exits non-zero for identifiers it cannot find.
                SystemError::Failed { .. } => DirectoryError::NotFound {
                    identifier: identifier.to_string(),
                },
                other => other.into(),
            })?;
        Ok(decode_plist(&self.runner, "diskutil info", &plist)?)
    }

    /// Snapshots of a volume as listed by diskutil, oldest first.
    fn list_snapshots(&self, volume: &Volume) -> DirectoryResult<Vec<Snapshot>> {
        let uuid = volume.id.to_string();
        let plist = self
            .runner
            .run("diskutil", &["apfs", "listsnapshots", "-plist", uuid.as_str()], None)?;
        let list: SnapshotList = decode_plist(&self.runner, "diskutil apfs listsnapshots", &plist)?;

        let invalid = |reason: String| DirectoryError::InvalidListing {
            volume: volume.to_string(),
            reason,
        };
        list.snapshots
            .into_iter()
            .map(|entry| {
                let id = SnapshotId::from_str(&entry.uuid).map_err(|e| invalid(e.to_string()))?;
                Snapshot::from_timestamped_name(id, entry.name).map_err(|e| invalid(e.to_string()))
            })
            .collect()
    }
}

impl<R: CommandRunner> VolumeDirectory for DiskUtil<R> {
    fn resolve(&self, identifier: &str) -> DirectoryResult<Volume> {
        let volume = self.info(identifier)?.into_volume(identifier)?;
        debug!(identifier, volume = %volume.id, name = %volume.name, "resolved volume");
        Ok(volume)
    }

    // diskutil lists oldest first. Ordering is not checked here; the
    // planner verifies every history it reads.
    fn history(&self, volume: &Volume) -> DirectoryResult<Vec<Snapshot>> {
        let mut snapshots = self.list_snapshots(volume)?;
        snapshots.reverse();
        Ok(snapshots)
    }

    fn delete_snapshot(&self, volume: &Volume, snapshot: &Snapshot) -> DirectoryResult<()> {
        let uuid = volume.id.to_string();
        let snap = snapshot.id.to_string();
        self.runner.run(
            "diskutil",
            &["apfs", "deletesnapshot", uuid.as_str(), "-uuid", snap.as_str()],
            None,
        )?;
        Ok(())
    }

    fn rename(&self, volume: &Volume, name: &str) -> DirectoryResult<()> {
        let uuid = volume.id.to_string();
        self.runner.run("diskutil", &["rename", uuid.as_str(), name], None)?;
        Ok(())
    }
}
