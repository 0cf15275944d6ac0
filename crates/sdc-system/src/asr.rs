//! [`ReplicationExecutor`] backed by Apple Software Restore.

use sdc_sync::{ExecutorError, ExecutorResult, ReplicationExecutor};
use sdc_types::{Snapshot, Volume};
use tracing::debug;

use crate::runner::{CommandRunner, SystemRunner};

/// Replicates volumes with `asr restore`.
///
/// `asr` renames the target to the source's name; restoring the name is
/// left to the caller.
#[derive(Clone, Debug, Default)]
pub struct Asr<R = SystemRunner> {
    runner: R,
}

impl Asr<SystemRunner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: CommandRunner> Asr<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn restore(&self, source: &Volume, destination: &Volume, to: &Snapshot, from: Option<&Snapshot>) -> ExecutorResult<()> {
        let source_addr = address(source)?;
        let target_addr = address(destination)?;
        let to_id = to.id.to_string();
        let from_id = from.map(|s| s.id.to_string());

        let mut args = vec![
            "restore",
            "--source",
            source_addr.as_str(),
            "--target",
            target_addr.as_str(),
            "--toSnapshot",
            to_id.as_str(),
        ];
        if let Some(from_id) = &from_id {
            args.extend(["--fromSnapshot", from_id.as_str()]);
        }
        args.extend(["--erase", "--noprompt"]);

        debug!(source = %source.id, destination = %destination.id, to = %to.id, incremental = from.is_some(), "starting asr restore");
        self.runner.run("asr", &args, None)?;
        Ok(())
    }
}

/// Device node, falling back to mount point.
fn address(volume: &Volume) -> ExecutorResult<String> {
    volume
        .address()
        .map(|p| p.to_string_lossy().into_owned())
        .ok_or(ExecutorError::Unaddressable(volume.id))
}

impl<R: CommandRunner> ReplicationExecutor for Asr<R> {
    fn replicate(
        &self,
        source: &Volume,
        destination: &Volume,
        to: &Snapshot,
        from: &Snapshot,
    ) -> ExecutorResult<()> {
        if to.id == from.id {
            return Err(ExecutorError::Rejected(format!(
                "to and from are the same snapshot {to}"
            )));
        }
        self.restore(source, destination, to, Some(from))
    }

    fn replicate_full(&self, source: &Volume, destination: &Volume, to: &Snapshot) -> ExecutorResult<()> {
        self.restore(source, destination, to, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::fake::FakeRunner;
    use sdc_types::{SnapshotId, VolumeId};

    fn snapshot(n: u128, name: &str) -> Snapshot {
        Snapshot::from_timestamped_name(SnapshotId::from_u128(n), name).unwrap()
    }

    fn source() -> Volume {
        Volume::new(VolumeId::from_u128(1), "source")
            .with_mount_point("/Volumes/source")
            .with_device("/dev/disk3s1")
    }

    fn target() -> Volume {
        Volume::new(VolumeId::from_u128(2), "target")
            .with_mount_point("/Volumes/target")
            .with_writable(true)
    }

    #[test]
    fn incremental_restore_command() {
        let asr = Asr::with_runner(FakeRunner::new());
        let to = snapshot(0xb, "b.2021-03-02-081500");
        let from = snapshot(0xa, "a.2021-03-01-203509");
        asr.replicate(&source(), &target(), &to, &from).unwrap();
        assert_eq!(
            asr.runner().calls(),
            vec![format!(
                "asr restore --source /dev/disk3s1 --target /Volumes/target --toSnapshot {} --fromSnapshot {} --erase --noprompt",
                to.id, from.id
            )]
        );
    }

    #[test]
    fn full_restore_command() {
        let asr = Asr::with_runner(FakeRunner::new());
        let to = snapshot(0xb, "b.2021-03-02-081500");
        asr.replicate_full(&source(), &target(), &to).unwrap();
        assert_eq!(
            asr.runner().calls(),
            vec![format!(
                "asr restore --source /dev/disk3s1 --target /Volumes/target --toSnapshot {} --erase --noprompt",
                to.id
            )]
        );
    }

    #[test]
    fn same_snapshot_rejected_without_running() {
        let asr = Asr::with_runner(FakeRunner::new());
        let a = snapshot(0xa, "a.2021-03-01-203509");
        let err = asr.replicate(&source(), &target(), &a, &a).unwrap_err();
        assert!(matches!(err, ExecutorError::Rejected(_)));
        assert!(asr.runner().calls().is_empty());
    }

    #[test]
    fn unaddressable_volume_rejected() {
        let asr = Asr::with_runner(FakeRunner::new());
        let unmounted = Volume::new(VolumeId::from_u128(2), "target").with_writable(true);
        let to = snapshot(0xb, "b.2021-03-02-081500");
        let err = asr.replicate_full(&source(), &unmounted, &to).unwrap_err();
        assert!(matches!(err, ExecutorError::Unaddressable(_)));
    }

    #[test]
    fn asr_failure_is_backend_error() {
        let to = snapshot(0xb, "b.2021-03-02-081500");
        let command = format!(
            "asr restore --source /dev/disk3s1 --target /Volumes/target --toSnapshot {} --erase --noprompt",
            to.id
        );
        let asr = Asr::with_runner(FakeRunner::new().fail(&command, "Could not validate source"));
        let err = asr.replicate_full(&source(), &target(), &to).unwrap_err();
        match err {
            ExecutorError::Backend { message, .. } => assert!(message.contains("Could not validate source")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
