//! In-memory replication backend.
//!
//! [`InMemoryExecutor`] applies replications directly to an
//! [`InMemoryDirectory`], behaving the way a block-level restore tool does:
//! an incremental transfer adds the new snapshot to the destination, a full
//! transfer erases it first, and either way the destination comes out
//! carrying the source's name.

use std::sync::Arc;

use sdc_directory::InMemoryDirectory;
use sdc_types::{Snapshot, Volume};
use tracing::debug;

use crate::error::{ExecutorError, ExecutorResult};
use crate::executor::ReplicationExecutor;

/// A [`ReplicationExecutor`] over a shared [`InMemoryDirectory`].
#[derive(Clone, Debug)]
pub struct InMemoryExecutor {
    directory: Arc<InMemoryDirectory>,
}

impl InMemoryExecutor {
    pub fn new(directory: Arc<InMemoryDirectory>) -> Self {
        Self { directory }
    }

    /// Checks common to both transfer kinds. Returns the source history.
    fn precheck(&self, source: &Volume, destination: &Volume, to: &Snapshot) -> ExecutorResult<Vec<Snapshot>> {
        if source.id == destination.id {
            return Err(ExecutorError::Rejected(format!(
                "source and target are the same volume {}",
                source.id
            )));
        }
        let source_history = self.directory.snapshots(&source.id)?;
        let current = self.directory.volume(&destination.id)?;
        if !current.writable {
            return Err(ExecutorError::Rejected(format!(
                "target {} is not writable",
                destination.id
            )));
        }
        if !source_history.iter().any(|s| s.id == to.id) {
            return Err(ExecutorError::MissingSnapshot {
                volume: source.id,
                snapshot: to.id,
            });
        }
        Ok(source_history)
    }

    fn take_source_name(&self, source: &Volume, destination: &Volume) -> ExecutorResult<()> {
        let name = self.directory.volume(&source.id)?.name;
        self.directory.set_name(&destination.id, &name)?;
        Ok(())
    }
}

impl ReplicationExecutor for InMemoryExecutor {
    fn replicate(
        &self,
        source: &Volume,
        destination: &Volume,
        to: &Snapshot,
        from: &Snapshot,
    ) -> ExecutorResult<()> {
        if to.id == from.id {
            return Err(ExecutorError::Rejected(format!(
                "to and from are the same snapshot {}",
                to.id
            )));
        }
        let source_history = self.precheck(source, destination, to)?;
        if !source_history.iter().any(|s| s.id == from.id) {
            return Err(ExecutorError::MissingSnapshot {
                volume: source.id,
                snapshot: from.id,
            });
        }
        let destination_history = self.directory.snapshots(&destination.id)?;
        if !destination_history.iter().any(|s| s.id == from.id) {
            return Err(ExecutorError::MissingSnapshot {
                volume: destination.id,
                snapshot: from.id,
            });
        }

        self.directory.add_snapshot(&destination.id, to.clone())?;
        self.take_source_name(source, destination)?;
        debug!(source = %source.id, destination = %destination.id, from = %from.id, to = %to.id, "incremental restore applied");
        Ok(())
    }

    fn replicate_full(&self, source: &Volume, destination: &Volume, to: &Snapshot) -> ExecutorResult<()> {
        self.precheck(source, destination, to)?;
        self.directory.replace_history(&destination.id, vec![to.clone()])?;
        self.take_source_name(source, destination)?;
        debug!(source = %source.id, destination = %destination.id, to = %to.id, "full restore applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sdc_types::{SnapshotId, VolumeId};

    fn snap(n: u128, secs: u32) -> Snapshot {
        Snapshot::new(
            SnapshotId::from_u128(n),
            format!("snap-{n}"),
            Utc.with_ymd_and_hms(2021, 3, 1, 20, 0, secs).unwrap(),
        )
    }

    fn a() -> Snapshot {
        snap(0xa, 1)
    }

    fn b() -> Snapshot {
        snap(0xb, 2)
    }

    fn source() -> Volume {
        Volume::new(VolumeId::from_u128(1), "source")
    }

    fn target() -> Volume {
        Volume::new(VolumeId::from_u128(2), "target").with_writable(true)
    }

    fn setup(target_history: Vec<Snapshot>) -> (Arc<InMemoryDirectory>, InMemoryExecutor) {
        let dir = Arc::new(InMemoryDirectory::new());
        dir.add_volume(source(), vec![b(), a()]).unwrap();
        dir.add_volume(target(), target_history).unwrap();
        let exec = InMemoryExecutor::new(Arc::clone(&dir));
        (dir, exec)
    }

    #[test]
    fn incremental_adds_snapshot_and_takes_source_name() {
        let (dir, exec) = setup(vec![a()]);
        exec.replicate(&source(), &target(), &b(), &a()).unwrap();
        assert_eq!(dir.snapshots(&target().id).unwrap(), vec![b(), a()]);
        assert_eq!(dir.volume(&target().id).unwrap().name, "source");
    }

    #[test]
    fn full_replaces_history() {
        let (dir, exec) = setup(vec![snap(0xc, 0)]);
        exec.replicate_full(&source(), &target(), &b()).unwrap();
        assert_eq!(dir.snapshots(&target().id).unwrap(), vec![b()]);
        assert_eq!(dir.volume(&target().id).unwrap().name, "source");
    }

    #[test]
    fn same_to_and_from_rejected() {
        let (_, exec) = setup(vec![a()]);
        let err = exec.replicate(&source(), &target(), &a(), &a()).unwrap_err();
        assert!(matches!(err, ExecutorError::Rejected(_)));
    }

    #[test]
    fn same_volume_rejected() {
        let (_, exec) = setup(vec![a()]);
        let err = exec.replicate_full(&source(), &source(), &b()).unwrap_err();
        assert!(matches!(err, ExecutorError::Rejected(_)));
    }

    #[test]
    fn read_only_target_rejected() {
        let (dir, exec) = setup(vec![a()]);
        dir.update_volume(target().with_writable(false)).unwrap();
        let err = exec.replicate(&source(), &target(), &b(), &a()).unwrap_err();
        assert!(matches!(err, ExecutorError::Rejected(_)));
        assert_eq!(dir.snapshots(&target().id).unwrap(), vec![a()]);
    }

    #[test]
    fn from_missing_on_destination_rejected() {
        let (dir, exec) = setup(vec![]);
        let err = exec.replicate(&source(), &target(), &b(), &a()).unwrap_err();
        match err {
            ExecutorError::MissingSnapshot { volume, snapshot } => {
                assert_eq!(volume, target().id);
                assert_eq!(snapshot, a().id);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(dir.snapshots(&target().id).unwrap().is_empty());
    }

    #[test]
    fn to_missing_on_source_rejected() {
        let (_, exec) = setup(vec![a()]);
        let err = exec
            .replicate_full(&source(), &target(), &snap(0xd, 9))
            .unwrap_err();
        assert!(matches!(err, ExecutorError::MissingSnapshot { .. }));
    }

    #[test]
    fn apply_current_plan_is_noop() {
        use crate::plan::{ReplicationPlan, Strategy};

        let (dir, exec) = setup(vec![a()]);
        let plan = ReplicationPlan {
            source: source(),
            destination: target(),
            strategy: Strategy::Current { snapshot: a() },
        };
        exec.apply(&plan).unwrap();
        assert_eq!(dir.snapshots(&target().id).unwrap(), vec![a()]);
        assert_eq!(dir.volume(&target().id).unwrap().name, "target");
    }

    #[test]
    fn apply_dispatches_incremental() {
        use crate::plan::{ReplicationPlan, Strategy};

        let (dir, exec) = setup(vec![a()]);
        let plan = ReplicationPlan {
            source: source(),
            destination: target(),
            strategy: Strategy::Incremental { from: a(), to: b() },
        };
        exec.apply(&plan).unwrap();
        assert_eq!(dir.snapshots(&target().id).unwrap(), vec![b(), a()]);
    }
}
