//! Built-in pair rules.

pub mod case;
pub mod distinct;
pub mod filesystem;
pub mod writable;

pub use case::CaseSensitivityRule;
pub use distinct::DistinctVolumeRule;
pub use filesystem::SnapshotCapableRule;
pub use writable::WritableRule;
