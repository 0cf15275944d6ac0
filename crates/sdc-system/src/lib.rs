//! Command-backed collaborators for snapshot diff cloning on macOS.
//!
//! - [`DiskUtil`]: volume directory over `diskutil info`,
//!   `diskutil apfs listsnapshots`, `diskutil apfs deletesnapshot` and
//!   `diskutil rename`
//! - [`Asr`]: replication executor over `asr restore`
//! - [`decode_plist`]: property list decoding via `plutil`
//!
//! All commands go through a [`CommandRunner`], so the adapters can be
//! exercised without the real tools.

pub mod asr;
pub mod diskutil;
pub mod error;
pub mod plist;
pub mod runner;

pub use asr::Asr;
pub use diskutil::{DiskUtil, VolumeInfo};
pub use error::{SystemError, SystemResult};
pub use plist::decode_plist;
pub use runner::{command_line, CommandRunner, SystemRunner};
