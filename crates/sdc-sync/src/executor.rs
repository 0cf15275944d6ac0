use sdc_types::{Snapshot, Volume};

use crate::error::ExecutorResult;
use crate::plan::{ReplicationPlan, Strategy};

/// Interface to the component that moves data between volumes.
///
/// Calls block until the transfer finishes, which may take as long as the
/// data transfer itself. Callers needing timeouts or cancellation must
/// enforce them in their implementation of this trait.
pub trait ReplicationExecutor: Send + Sync {
    /// Bring `destination` to the state of `source` as of `to`, treating
    /// `from` as a baseline both already hold. Existing destination history
    /// is kept and `to` is added.
    fn replicate(
        &self,
        source: &Volume,
        destination: &Volume,
        to: &Snapshot,
        from: &Snapshot,
    ) -> ExecutorResult<()>;

    /// Erase `destination` and replace it with a copy of `source` at `to`.
    fn replicate_full(&self, source: &Volume, destination: &Volume, to: &Snapshot) -> ExecutorResult<()>;

    /// Carry out a plan. Current plans need no transfer and return at once.
    fn apply(&self, plan: &ReplicationPlan) -> ExecutorResult<()> {
        match &plan.strategy {
            Strategy::Current { .. } => Ok(()),
            Strategy::Incremental { from, to } => {
                self.replicate(&plan.source, &plan.destination, to, from)
            }
            Strategy::Full { to } => self.replicate_full(&plan.source, &plan.destination, to),
        }
    }
}
