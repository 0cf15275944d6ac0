//! Eligibility gate for snapshot diff cloning.
//!
//! Before any replication is planned, a source/destination pair must pass
//! the gate: both sides resolve to exactly one volume, destinations are
//! distinct from each other and from the source, and each destination is
//! writable, snapshot-capable, and collates file names like the source.
//!
//! # Quick Start
//!
//! ```rust
//! use sdc_directory::InMemoryDirectory;
//! use sdc_gate::EligibilityValidator;
//! use sdc_types::{Volume, VolumeId};
//!
//! let dir = InMemoryDirectory::new();
//! dir.add_volume(Volume::new(VolumeId::from_u128(1), "source"), vec![]).unwrap();
//! dir.add_volume(
//!     Volume::new(VolumeId::from_u128(2), "target").with_writable(true),
//!     vec![],
//! ).unwrap();
//!
//! let gate = EligibilityValidator::with_default_rules();
//! let eligible = gate.cloneable(&dir, "source", &["target"]).unwrap();
//! assert_eq!(eligible.destinations.len(), 1);
//! ```

pub mod error;
pub mod rule;
pub mod rules;
pub mod validator;

pub use error::{EligibilityError, GateResult, VolumeRole};
pub use rule::{Destination, PairRule};
pub use rules::{CaseSensitivityRule, DistinctVolumeRule, SnapshotCapableRule, WritableRule};
pub use validator::{Eligible, EligibilityValidator};
