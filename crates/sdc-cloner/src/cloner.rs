use sdc_directory::VolumeDirectory;
use sdc_gate::{Eligible, EligibilityValidator};
use sdc_sync::{ReplicationExecutor, ReplicationPlan, ReplicationPlanner};
use sdc_types::Volume;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CloneError, CloneResult};
use crate::options::CloneOptions;
use crate::pruner::{PruneReport, RetentionPruner};

/// Result of a successful clone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CloneOutcome {
    pub plan: ReplicationPlan,
    /// Name the destination was restored to after replication, if any.
    pub restored_name: Option<String>,
    pub pruned: Option<PruneReport>,
}

impl CloneOutcome {
    /// Returns `true` if the destination was already current.
    pub fn is_current(&self) -> bool {
        self.plan.is_current()
    }
}

/// Entry point for validating, planning and running clones.
///
/// Holds no collaborator state: the directory and executor are passed to each
/// call, so one `Cloner` can serve independent destinations.
#[derive(Default)]
pub struct Cloner {
    planner: ReplicationPlanner,
}

impl Cloner {
    pub fn new(validator: EligibilityValidator) -> Self {
        Self {
            planner: ReplicationPlanner::new(validator),
        }
    }

    /// Check whether `source` can be cloned onto every destination.
    pub fn cloneable<D, S>(&self, directory: &D, source: &str, destinations: &[S]) -> CloneResult<Eligible>
    where
        D: VolumeDirectory + ?Sized,
        S: AsRef<str>,
    {
        Ok(self.planner.validator().cloneable(directory, source, destinations)?)
    }

    /// Plan replication without executing it.
    pub fn plan<D>(&self, directory: &D, source: &str, destination: &str) -> CloneResult<ReplicationPlan>
    where
        D: VolumeDirectory + ?Sized,
    {
        Ok(self.planner.plan(directory, source, destination)?)
    }

    /// Bring `destination` up to date with the newest snapshot of `source`.
    ///
    /// Runs plan, replicate, name restore, verification and (if requested)
    /// pruning in that order; any failure stops the sequence. A destination
    /// that is already current is left untouched.
    pub fn clone_volume<D, E>(
        &self,
        directory: &D,
        executor: &E,
        source: &str,
        destination: &str,
        options: &CloneOptions,
    ) -> CloneResult<CloneOutcome>
    where
        D: VolumeDirectory + ?Sized,
        E: ReplicationExecutor + ?Sized,
    {
        let plan = self.planner.plan(directory, source, destination)?;
        if plan.is_current() {
            info!(destination = %plan.destination.id, snapshot = %plan.to().id, "destination already current");
            return Ok(CloneOutcome {
                plan,
                restored_name: None,
                pruned: None,
            });
        }

        info!(%plan, "replicating");
        executor
            .apply(&plan)
            .map_err(|source| CloneError::ExecutionFailed {
                destination: plan.destination.id,
                snapshot: plan.to().id,
                source,
            })?;
        info!(destination = %plan.destination.id, snapshot = %plan.to().id, "replication finished");

        let restored_name = if options.restore_destination_name {
            restore_name(directory, &plan.destination)?
        } else {
            None
        };

        if options.verify_destination || options.prune {
            verify(directory, &plan)?;
        }

        let pruned = if options.prune {
            let report = RetentionPruner::prune(directory, &plan.destination, plan.to()).map_err(|source| {
                CloneError::PruneFailed {
                    destination: plan.destination.id,
                    source,
                }
            })?;
            Some(report)
        } else {
            None
        };

        Ok(CloneOutcome {
            plan,
            restored_name,
            pruned,
        })
    }
}

/// Rename `destination` back to its pre-replication name if it changed.
fn restore_name<D>(directory: &D, destination: &Volume) -> CloneResult<Option<String>>
where
    D: VolumeDirectory + ?Sized,
{
    let rename_failed = |source| CloneError::RenameFailed {
        destination: destination.id,
        name: destination.name.clone(),
        source,
    };
    let current = directory
        .resolve(&destination.id.to_string())
        .map_err(rename_failed)?;
    if current.name == destination.name {
        return Ok(None);
    }
    debug!(volume = %destination.id, from = %current.name, to = %destination.name, "restoring destination name");
    directory
        .rename(&current, &destination.name)
        .map_err(rename_failed)?;
    Ok(Some(destination.name.clone()))
}

fn verify<D>(directory: &D, plan: &ReplicationPlan) -> CloneResult<()>
where
    D: VolumeDirectory + ?Sized,
{
    let history = directory.history(&plan.destination)?;
    if history.iter().any(|s| s.id == plan.to().id) {
        Ok(())
    } else {
        Err(CloneError::Unverified {
            destination: plan.destination.id,
            snapshot: plan.to().id,
        })
    }
}
