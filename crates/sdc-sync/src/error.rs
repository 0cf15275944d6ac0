use sdc_directory::DirectoryError;
use sdc_gate::EligibilityError;
use sdc_types::{SnapshotId, VolumeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("not cloneable: {0}")]
    Ineligible(#[from] EligibilityError),

    #[error("source {name} ({volume}) has no snapshots to replicate")]
    NoSourceHistory { volume: VolumeId, name: String },

    #[error("history of {name} ({volume}) is not strictly newest-first at position {position}: {reason}")]
    HistoryOrderingViolation {
        volume: VolumeId,
        name: String,
        position: usize,
        reason: String,
    },

    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}

pub type PlanResult<T> = Result<T, PlanError>;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("{operation} failed: {message}")]
    Backend { operation: String, message: String },

    #[error("snapshot {snapshot} not found on volume {volume}")]
    MissingSnapshot {
        volume: VolumeId,
        snapshot: SnapshotId,
    },

    #[error("replication rejected: {0}")]
    Rejected(String),

    #[error("volume {0} has neither a device node nor a mount point")]
    Unaddressable(VolumeId),

    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl ExecutorError {
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;
