use sdc_directory::{DirectoryError, VolumeDirectory};
use sdc_gate::{Eligible, EligibilityValidator};
use tracing::{debug, info};

use crate::comparator::HistoryComparator;
use crate::error::{PlanError, PlanResult};
use crate::plan::{ReplicationPlan, Strategy};
use crate::verifier::HistoryVerifier;

/// Chooses between incremental and full replication for one pair.
///
/// Planning is read-only: it resolves, validates, lists and compares, and
/// never asks the directory to change anything.
pub struct ReplicationPlanner {
    validator: EligibilityValidator,
}

impl ReplicationPlanner {
    pub fn new(validator: EligibilityValidator) -> Self {
        Self { validator }
    }

    /// The eligibility gate every plan is re-validated against.
    pub fn validator(&self) -> &EligibilityValidator {
        &self.validator
    }

    /// Plan replication of `source` onto `destination`.
    ///
    /// Eligibility is checked again here, independently of any earlier
    /// `cloneable` call: volumes may have been unmounted in between.
    pub fn plan<D>(&self, directory: &D, source: &str, destination: &str) -> PlanResult<ReplicationPlan>
    where
        D: VolumeDirectory + ?Sized,
    {
        let Eligible {
            source,
            destinations,
        } = self.validator.cloneable(directory, source, &[destination])?;
        let destination = destinations.into_iter().next().ok_or_else(|| {
            PlanError::Directory(DirectoryError::NotFound {
                identifier: destination.to_string(),
            })
        })?;

        let source_history = directory.history(&source)?;
        HistoryVerifier::verify_newest_first(&source, &source_history)?;
        let destination_history = directory.history(&destination)?;
        HistoryVerifier::verify_newest_first(&destination, &destination_history)?;
        debug!(
            source = %source.id,
            source_snapshots = source_history.len(),
            destination = %destination.id,
            destination_snapshots = destination_history.len(),
            "listed histories"
        );

        let to = HistoryComparator::target(&source_history).ok_or_else(|| {
            PlanError::NoSourceHistory {
                volume: source.id,
                name: source.name.clone(),
            }
        })?;

        let strategy = match HistoryComparator::shared_anchor(&source_history, &destination_history) {
            Some(anchor) if anchor.id == to.id => Strategy::Current {
                snapshot: to.clone(),
            },
            Some(anchor) => Strategy::Incremental {
                from: anchor.clone(),
                to: to.clone(),
            },
            None => Strategy::Full { to: to.clone() },
        };

        let plan = ReplicationPlan {
            source,
            destination,
            strategy,
        };
        info!(
            source = %plan.source.id,
            destination = %plan.destination.id,
            to = %plan.to().id,
            from = ?plan.from().map(|s| s.id),
            current = plan.is_current(),
            destructive = plan.is_destructive(),
            "planned replication"
        );
        Ok(plan)
    }
}

impl Default for ReplicationPlanner {
    fn default() -> Self {
        Self::new(EligibilityValidator::with_default_rules())
    }
}
