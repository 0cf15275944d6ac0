//! Volume directory for snapshot diff cloning.
//!
//! The directory is the narrow interface through which the cloning engine
//! sees storage: it resolves a volume identifier to volume metadata and
//! lists a volume's snapshot history. The engine never mutates volumes
//! itself; the few mutating calls here (`delete_snapshot`, `rename`) are
//! requests the backing implementation applies.
//!
//! # Modules
//!
//! - [`error`]: Error types for directory operations
//! - [`alias`]: [`AliasIndex`]: multi-key volume lookup with uniqueness checks
//! - [`traits`]: The [`VolumeDirectory`] trait
//! - [`memory`]: In-memory [`InMemoryDirectory`] for tests

pub mod alias;
pub mod error;
pub mod memory;
pub mod traits;

pub use alias::{Alias, AliasIndex};
pub use error::{DirectoryError, DirectoryResult};
pub use memory::InMemoryDirectory;
pub use traits::VolumeDirectory;
