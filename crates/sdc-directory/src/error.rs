//! Error types for volume directory operations.

use sdc_types::{SnapshotId, VolumeId};
use thiserror::Error;

/// Errors that can occur while querying or mutating the volume directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No volume matches the identifier.
    #[error("volume not found: {identifier}")]
    NotFound { identifier: String },

    /// More than one volume matches the identifier.
    #[error("volume identifier {identifier:?} is ambiguous, matches: {}", .candidates.join(", "))]
    Ambiguous {
        identifier: String,
        candidates: Vec<String>,
    },

    /// The snapshot does not exist on the volume.
    #[error("snapshot {snapshot} not found on volume {volume}")]
    SnapshotNotFound {
        volume: VolumeId,
        snapshot: SnapshotId,
    },

    /// A volume with this id is already registered.
    #[error("volume already exists: {0}")]
    VolumeExists(VolumeId),

    /// The snapshot is already part of the volume's history.
    #[error("snapshot {snapshot} already exists on volume {volume}")]
    SnapshotExists {
        volume: VolumeId,
        snapshot: SnapshotId,
    },

    /// The backend returned a listing that could not be interpreted.
    #[error("invalid snapshot listing for volume {volume}: {reason}")]
    InvalidListing { volume: String, reason: String },

    /// The backing service failed.
    #[error("{operation} failed: {message}")]
    Backend { operation: String, message: String },

    /// Internal lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl DirectoryError {
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for errors meaning "the identifier does not name
    /// exactly one volume".
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}

/// Convenience type alias for directory operations.
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
