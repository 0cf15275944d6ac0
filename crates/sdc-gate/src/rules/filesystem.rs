use sdc_types::Volume;

use crate::error::{EligibilityError, GateResult};
use crate::rule::{Destination, PairRule};

/// The destination filesystem must keep a snapshot history.
pub struct SnapshotCapableRule;

impl PairRule for SnapshotCapableRule {
    fn name(&self) -> &str {
        "snapshot-capable"
    }

    fn check(&self, _source: &Volume, destination: &Destination<'_>) -> GateResult<()> {
        let volume = destination.volume;
        if !volume.supports_snapshots() {
            return Err(EligibilityError::UnsupportedFilesystem {
                volume: volume.id,
                name: volume.name.clone(),
                filesystem: volume.filesystem.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdc_types::{FilesystemKind, VolumeId};

    #[test]
    fn hfs_destination_fails() {
        let source = Volume::new(VolumeId::from_u128(1), "source");
        let target = Volume::new(VolumeId::from_u128(2), "hfs").with_filesystem(FilesystemKind::Hfs);
        let dest = Destination { identifier: "hfs", volume: &target };
        match SnapshotCapableRule.check(&source, &dest).unwrap_err() {
            EligibilityError::UnsupportedFilesystem { filesystem, .. } => {
                assert_eq!(filesystem, FilesystemKind::Hfs)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn apfs_destination_passes() {
        let source = Volume::new(VolumeId::from_u128(1), "source");
        let target = Volume::new(VolumeId::from_u128(2), "target");
        let dest = Destination { identifier: "target", volume: &target };
        assert!(SnapshotCapableRule.check(&source, &dest).is_ok());
    }
}
