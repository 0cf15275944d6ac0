use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ids::VolumeId;

/// Filesystem a volume is formatted with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilesystemKind {
    Apfs,
    Hfs,
    Other(String),
}

impl FilesystemKind {
    /// Map a filesystem type name (e.g. `"apfs"`, `"hfs"`) to a kind.
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "apfs" => Self::Apfs,
            "hfs" | "hfs+" => Self::Hfs,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether volumes of this kind keep a versioned snapshot history.
    pub fn supports_snapshots(&self) -> bool {
        matches!(self, Self::Apfs)
    }
}

impl fmt::Display for FilesystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apfs => f.write_str("apfs"),
            Self::Hfs => f.write_str("hfs"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Metadata of an addressable storage volume.
///
/// Volumes are owned by the volume directory; everything here is a read-only
/// view captured at resolution time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Stable unique identifier.
    pub id: VolumeId,
    /// Human-readable volume name.
    pub name: String,
    /// Where the volume is mounted, if it is mounted.
    pub mount_point: Option<PathBuf>,
    /// Device node backing the volume (e.g. `/dev/disk3s1`).
    pub device: Option<PathBuf>,
    /// Filesystem the volume is formatted with.
    pub filesystem: FilesystemKind,
    /// Whether the volume is mounted read-write.
    pub writable: bool,
    /// Whether file names on this volume are compared case-sensitively.
    pub case_sensitive: bool,
}

impl Volume {
    /// An unmounted, case-insensitive APFS volume.
    pub fn new(id: VolumeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mount_point: None,
            device: None,
            filesystem: FilesystemKind::Apfs,
            writable: false,
            case_sensitive: false,
        }
    }

    pub fn with_mount_point(mut self, mount_point: impl Into<PathBuf>) -> Self {
        self.mount_point = Some(mount_point.into());
        self
    }

    pub fn with_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn with_filesystem(mut self, filesystem: FilesystemKind) -> Self {
        self.filesystem = filesystem;
        self
    }

    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Returns `true` if the volume is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.mount_point.is_some()
    }

    /// Whether the volume can hold a versioned snapshot history.
    pub fn supports_snapshots(&self) -> bool {
        self.filesystem.supports_snapshots()
    }

    /// The path external tools should address this volume by: the device
    /// node if known, otherwise the mount point.
    pub fn address(&self) -> Option<&Path> {
        self.device.as_deref().or(self.mount_point.as_deref())
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
