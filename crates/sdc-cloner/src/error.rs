use std::fmt;
use std::path::PathBuf;

use sdc_directory::DirectoryError;
use sdc_gate::EligibilityError;
use sdc_sync::{ExecutorError, PlanError};
use sdc_types::{SnapshotId, VolumeId};
use serde::Serialize;
use thiserror::Error;

use crate::pruner::PruneError;

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("not cloneable: {0}")]
    Ineligible(#[from] EligibilityError),

    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),

    #[error("replication of snapshot {snapshot} onto {destination} failed: {source}")]
    ExecutionFailed {
        destination: VolumeId,
        snapshot: SnapshotId,
        #[source]
        source: ExecutorError,
    },

    #[error("replication onto {destination} reported success but snapshot {snapshot} is not in its history")]
    Unverified {
        destination: VolumeId,
        snapshot: SnapshotId,
    },

    #[error("replicated onto {destination} but could not restore its name to {name:?}: {source}")]
    RenameFailed {
        destination: VolumeId,
        name: String,
        #[source]
        source: DirectoryError,
    },

    #[error("replicated onto {destination} but pruning failed: {source}")]
    PruneFailed {
        destination: VolumeId,
        #[source]
        source: PruneError,
    },

    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl CloneError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ineligible(e) => ErrorKind::from_eligibility(e),
            Self::Plan(e) => match e {
                PlanError::Ineligible(e) => ErrorKind::from_eligibility(e),
                PlanError::NoSourceHistory { .. } => ErrorKind::NoSourceHistory,
                PlanError::HistoryOrderingViolation { .. } => ErrorKind::HistoryOrderingViolation,
                PlanError::Directory(_) => ErrorKind::Directory,
            },
            Self::ExecutionFailed { .. } | Self::Unverified { .. } => ErrorKind::ExecutionFailed,
            Self::RenameFailed { .. } => ErrorKind::RenameFailed,
            Self::PruneFailed { .. } => ErrorKind::PruneFailed,
            Self::Directory(_) => ErrorKind::Directory,
        }
    }

    /// Returns `true` if the destination was replicated before the failure.
    pub fn replication_succeeded(&self) -> bool {
        matches!(self, Self::RenameFailed { .. } | Self::PruneFailed { .. })
    }
}

pub type CloneResult<T> = Result<T, CloneError>;

/// Flat classification of every way a clone can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    VolumeNotFound,
    DuplicateDestination,
    SourceEqualsDestination,
    DestinationNotWritable,
    UnsupportedFilesystem,
    CaseSensitivityMismatch,
    NoSourceHistory,
    HistoryOrderingViolation,
    ExecutionFailed,
    RenameFailed,
    PruneFailed,
    Directory,
}

impl ErrorKind {
    fn from_eligibility(e: &EligibilityError) -> Self {
        match e {
            EligibilityError::VolumeNotFound { .. } => Self::VolumeNotFound,
            EligibilityError::DuplicateDestination { .. } => Self::DuplicateDestination,
            EligibilityError::SourceEqualsDestination { .. } => Self::SourceEqualsDestination,
            EligibilityError::DestinationNotWritable { .. } => Self::DestinationNotWritable,
            EligibilityError::UnsupportedFilesystem { .. } => Self::UnsupportedFilesystem,
            EligibilityError::CaseSensitivityMismatch { .. } => Self::CaseSensitivityMismatch,
            EligibilityError::Directory(_) => Self::Directory,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sdc_gate::VolumeRole;

    #[test]
    fn eligibility_kinds_survive_planning_wrapper() {
        let inner = EligibilityError::DestinationNotWritable {
            volume: VolumeId::from_u128(2),
            name: "target".into(),
        };
        let err = CloneError::Plan(PlanError::Ineligible(inner));
        assert_eq!(err.kind(), ErrorKind::DestinationNotWritable);
        assert!(!err.replication_succeeded());
    }

    #[test]
    fn unresolved_volume_is_volume_not_found() {
        let err = CloneError::Ineligible(EligibilityError::VolumeNotFound {
            role: VolumeRole::Source,
            identifier: "nope".into(),
            source: DirectoryError::NotFound {
                identifier: "nope".into(),
            },
        });
        assert_eq!(err.kind(), ErrorKind::VolumeNotFound);
    }

    #[test]
    fn unverified_counts_as_execution_failure() {
        let err = CloneError::Unverified {
            destination: VolumeId::from_u128(2),
            snapshot: SnapshotId::from_u128(0xb),
        };
        assert_eq!(err.kind(), ErrorKind::ExecutionFailed);
        assert!(err.to_string().contains("not in its history"));
    }

    #[test]
    fn prune_failure_reports_successful_replication() {
        let err = CloneError::PruneFailed {
            destination: VolumeId::from_u128(2),
            source: PruneError::KeepAbsent {
                volume: VolumeId::from_u128(2),
                snapshot: SnapshotId::from_u128(0xb),
            },
        };
        assert_eq!(err.kind(), ErrorKind::PruneFailed);
        assert!(err.replication_succeeded());
    }

    #[test]
    fn kind_display_is_variant_name() {
        assert_eq!(ErrorKind::CaseSensitivityMismatch.to_string(), "CaseSensitivityMismatch");
    }
}
