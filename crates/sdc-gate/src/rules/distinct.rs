use sdc_types::Volume;

use crate::error::{EligibilityError, GateResult};
use crate::rule::{Destination, PairRule};

/// A volume cannot be cloned onto itself, whatever alias names it.
pub struct DistinctVolumeRule;

impl PairRule for DistinctVolumeRule {
    fn name(&self) -> &str {
        "distinct-volumes"
    }

    fn check(&self, source: &Volume, destination: &Destination<'_>) -> GateResult<()> {
        if destination.volume.id == source.id {
            return Err(EligibilityError::SourceEqualsDestination {
                identifier: destination.identifier.to_string(),
                volume: source.id,
                name: source.name.clone(),
            });
        }
        Ok(())
    }
}
