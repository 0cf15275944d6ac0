use std::fmt;

use sdc_directory::DirectoryError;
use sdc_types::{FilesystemKind, VolumeId};

/// Which side of a clone an identifier was given for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeRole {
    Source,
    Destination,
}

impl fmt::Display for VolumeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// A violated eligibility rule. Each variant names the rule and the volume
/// that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    /// The identifier does not resolve to exactly one volume.
    #[error("{role} {identifier:?} does not resolve to exactly one volume: {source}")]
    VolumeNotFound {
        role: VolumeRole,
        identifier: String,
        source: DirectoryError,
    },

    /// Two destination identifiers name the same volume.
    #[error("destination {identifier:?} repeats volume {name} ({volume})")]
    DuplicateDestination {
        identifier: String,
        volume: VolumeId,
        name: String,
    },

    /// A destination is the source volume itself.
    #[error("destination {identifier:?} is the source volume {name} ({volume})")]
    SourceEqualsDestination {
        identifier: String,
        volume: VolumeId,
        name: String,
    },

    /// The destination is unmounted or mounted read-only.
    #[error("destination {name} ({volume}) is not writable")]
    DestinationNotWritable { volume: VolumeId, name: String },

    /// The destination cannot hold a snapshot history.
    #[error("destination {name} ({volume}) is {filesystem}, which does not support snapshots")]
    UnsupportedFilesystem {
        volume: VolumeId,
        name: String,
        filesystem: FilesystemKind,
    },

    /// File-name collation differs between source and destination.
    #[error(
        "case sensitivity of destination {name} ({volume}) is {}, source is {}",
        sensitivity(.destination_case_sensitive),
        sensitivity(.source_case_sensitive)
    )]
    CaseSensitivityMismatch {
        volume: VolumeId,
        name: String,
        source_case_sensitive: bool,
        destination_case_sensitive: bool,
    },

    /// The directory failed for a reason other than resolution.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl EligibilityError {
    /// Short name of the rule that was violated.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::VolumeNotFound { .. } => "volume-exists",
            Self::DuplicateDestination { .. } => "unique-destinations",
            Self::SourceEqualsDestination { .. } => "distinct-volumes",
            Self::DestinationNotWritable { .. } => "writable",
            Self::UnsupportedFilesystem { .. } => "snapshot-capable",
            Self::CaseSensitivityMismatch { .. } => "case-sensitivity",
            Self::Directory(_) => "directory",
        }
    }
}

fn sensitivity(case_sensitive: &bool) -> &'static str {
    if *case_sensitive {
        "case-sensitive"
    } else {
        "case-insensitive"
    }
}

pub type GateResult<T> = Result<T, EligibilityError>;
