//! Replication planning for snapshot diff cloning.
//!
//! Given an eligible source/destination pair, the planner lists both
//! snapshot histories, checks they are strictly newest-first, and finds the
//! newest snapshot the two share. That anchor decides the strategy:
//!
//! - anchor is the newest source snapshot: the destination is current
//! - anchor is older: incremental replication from the anchor
//! - no anchor: full replication, erasing the destination
//!
//! Executing a plan is the job of a [`ReplicationExecutor`];
//! [`InMemoryExecutor`] is the reference backend used in tests.
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use sdc_directory::InMemoryDirectory;
//! use sdc_sync::{ReplicationPlanner, Strategy};
//! use sdc_types::{Snapshot, SnapshotId, Volume, VolumeId};
//!
//! let a = Snapshot::new(SnapshotId::from_u128(0xa), "a", Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap());
//! let b = Snapshot::new(SnapshotId::from_u128(0xb), "b", Utc.with_ymd_and_hms(2021, 3, 2, 0, 0, 0).unwrap());
//!
//! let dir = InMemoryDirectory::new();
//! dir.add_volume(Volume::new(VolumeId::from_u128(1), "source"), vec![b.clone(), a.clone()]).unwrap();
//! dir.add_volume(
//!     Volume::new(VolumeId::from_u128(2), "target").with_writable(true),
//!     vec![a.clone()],
//! ).unwrap();
//!
//! let plan = ReplicationPlanner::default().plan(&dir, "source", "target").unwrap();
//! assert_eq!(plan.strategy, Strategy::Incremental { from: a, to: b });
//! ```

pub mod comparator;
pub mod error;
pub mod executor;
pub mod memory;
pub mod plan;
pub mod planner;
pub mod verifier;

pub use comparator::HistoryComparator;
pub use error::{ExecutorError, ExecutorResult, PlanError, PlanResult};
pub use executor::ReplicationExecutor;
pub use memory::InMemoryExecutor;
pub use plan::{ReplicationPlan, Strategy};
pub use planner::ReplicationPlanner;
pub use verifier::HistoryVerifier;
