use sdc_types::Volume;

use crate::error::{EligibilityError, GateResult};
use crate::rule::{Destination, PairRule};

/// The destination must be mounted read-write.
pub struct WritableRule;

impl PairRule for WritableRule {
    fn name(&self) -> &str {
        "writable"
    }

    fn check(&self, _source: &Volume, destination: &Destination<'_>) -> GateResult<()> {
        let volume = destination.volume;
        if !volume.writable {
            return Err(EligibilityError::DestinationNotWritable {
                volume: volume.id,
                name: volume.name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdc_types::VolumeId;

    #[test]
    fn read_only_destination_fails() {
        let source = Volume::new(VolumeId::from_u128(1), "source");
        let target = Volume::new(VolumeId::from_u128(2), "target").with_writable(false);
        let dest = Destination { identifier: "target", volume: &target };
        let err = WritableRule.check(&source, &dest).unwrap_err();
        assert!(err.to_string().contains("not writable"));
    }

    #[test]
    fn source_writability_is_irrelevant() {
        let source = Volume::new(VolumeId::from_u128(1), "source").with_writable(false);
        let target = Volume::new(VolumeId::from_u128(2), "target").with_writable(true);
        let dest = Destination { identifier: "target", volume: &target };
        assert!(WritableRule.check(&source, &dest).is_ok());
    }
}
