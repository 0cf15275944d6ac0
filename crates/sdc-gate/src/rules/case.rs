use sdc_types::Volume;

use crate::error::{EligibilityError, GateResult};
use crate::rule::{Destination, PairRule};

/// Source and destination must collate file names the same way.
pub struct CaseSensitivityRule;

impl PairRule for CaseSensitivityRule {
    fn name(&self) -> &str {
        "case-sensitivity"
    }

    fn check(&self, source: &Volume, destination: &Destination<'_>) -> GateResult<()> {
        let volume = destination.volume;
        if volume.case_sensitive != source.case_sensitive {
            return Err(EligibilityError::CaseSensitivityMismatch {
                volume: volume.id,
                name: volume.name.clone(),
                source_case_sensitive: source.case_sensitive,
                destination_case_sensitive: volume.case_sensitive,
            });
        }
        Ok(())
    }
}
