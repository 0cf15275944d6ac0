//! Clone orchestration for snapshot diff cloning.
//!
//! [`Cloner`] is the main entry point for applications: it validates a
//! source/destination pair, plans the replication, hands the plan to a
//! [`ReplicationExecutor`], restores the destination's name, verifies the
//! result and optionally prunes the destination down to the replicated
//! snapshot. Collaborators are passed explicitly on every call.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chrono::{TimeZone, Utc};
//! use sdc_cloner::{CloneOptions, Cloner};
//! use sdc_directory::InMemoryDirectory;
//! use sdc_sync::InMemoryExecutor;
//! use sdc_types::{Snapshot, SnapshotId, Volume, VolumeId};
//!
//! let a = Snapshot::new(SnapshotId::from_u128(0xa), "a", Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap());
//! let b = Snapshot::new(SnapshotId::from_u128(0xb), "b", Utc.with_ymd_and_hms(2021, 3, 2, 0, 0, 0).unwrap());
//! let target = Volume::new(VolumeId::from_u128(2), "target").with_writable(true);
//!
//! let dir = Arc::new(InMemoryDirectory::new());
//! dir.add_volume(Volume::new(VolumeId::from_u128(1), "source"), vec![b.clone(), a.clone()]).unwrap();
//! dir.add_volume(target.clone(), vec![a.clone()]).unwrap();
//! let executor = InMemoryExecutor::new(Arc::clone(&dir));
//!
//! let options = CloneOptions::new().with_prune(true);
//! Cloner::default()
//!     .clone_volume(dir.as_ref(), &executor, "source", "target", &options)
//!     .unwrap();
//! assert_eq!(dir.snapshots(&target.id).unwrap(), vec![b]);
//! ```

pub mod cloner;
pub mod config;
pub mod error;
pub mod options;
pub mod pruner;

pub use cloner::{CloneOutcome, Cloner};
pub use config::ClonerConfig;
pub use error::{CloneError, CloneResult, ConfigError, ConfigResult, ErrorKind};
pub use options::CloneOptions;
pub use pruner::{PruneError, PruneReport, PruneResult, RetentionPruner};

// Re-export the types callers need alongside the cloner.
pub use sdc_directory::{InMemoryDirectory, VolumeDirectory};
pub use sdc_gate::{Eligible, EligibilityValidator};
pub use sdc_sync::{InMemoryExecutor, ReplicationExecutor, ReplicationPlan, Strategy};
pub use sdc_types::{Snapshot, SnapshotId, Volume, VolumeId};
