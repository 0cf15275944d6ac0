//! Foundation types for snapshot diff cloning.
//!
//! This crate provides the data model shared by every other `sdc` crate:
//! stable identities for volumes and snapshots, volume metadata as reported
//! by the volume directory, and point-in-time snapshots.
//!
//! # Key Types
//!
//! - [`VolumeId`] / [`SnapshotId`]: UUID-backed stable identifiers
//! - [`Volume`]: Volume metadata: name, mount state, filesystem capabilities
//! - [`Snapshot`]: An immutable, timestamped capture of a volume
//! - [`FilesystemKind`]: Filesystem type and whether it supports snapshots

pub mod error;
pub mod ids;
pub mod snapshot;
pub mod volume;

pub use error::TypeError;
pub use ids::{SnapshotId, VolumeId};
pub use snapshot::{parse_created_from_name, Snapshot};
pub use volume::{FilesystemKind, Volume};
