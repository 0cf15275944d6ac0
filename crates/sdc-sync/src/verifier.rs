use std::collections::HashSet;

use sdc_types::{Snapshot, Volume};

use crate::error::{PlanError, PlanResult};

/// Re-checks the ordering guarantee the volume directory makes about
/// snapshot histories.
pub struct HistoryVerifier;

impl HistoryVerifier {
    /// Require `history` to be strictly newest-first by creation time with
    /// no repeated snapshot ids.
    pub fn verify_newest_first(volume: &Volume, history: &[Snapshot]) -> PlanResult<()> {
        let mut seen = HashSet::with_capacity(history.len());
        for (position, snapshot) in history.iter().enumerate() {
            if !seen.insert(snapshot.id) {
                return Err(violation(
                    volume,
                    position,
                    format!("snapshot {snapshot} appears more than once"),
                ));
            }
        }

        for (index, pair) in history.windows(2).enumerate() {
            let (newer, older) = (&pair[0], &pair[1]);
            if newer.created <= older.created {
                return Err(violation(
                    volume,
                    index + 1,
                    format!(
                        "{older} created {} is not older than {newer} created {}",
                        older.created.to_rfc3339(),
                        newer.created.to_rfc3339()
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn violation(volume: &Volume, position: usize, reason: String) -> PlanError {
    PlanError::HistoryOrderingViolation {
        volume: volume.id,
        name: volume.name.clone(),
        position,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sdc_types::{SnapshotId, VolumeId};

    fn vol() -> Volume {
        Volume::new(VolumeId::from_u128(1), "target")
    }

    fn snap(n: u128, secs: u32) -> Snapshot {
        Snapshot::new(
            SnapshotId::from_u128(n),
            format!("snap-{n}"),
            Utc.with_ymd_and_hms(2021, 3, 1, 20, 34, secs).unwrap(),
        )
    }

    #[test]
    fn newest_first_passes() {
        let history = vec![snap(3, 30), snap(2, 20), snap(1, 10)];
        assert!(HistoryVerifier::verify_newest_first(&vol(), &history).is_ok());
    }

    #[test]
    fn empty_and_single_pass() {
        assert!(HistoryVerifier::verify_newest_first(&vol(), &[]).is_ok());
        assert!(HistoryVerifier::verify_newest_first(&vol(), &[snap(1, 1)]).is_ok());
    }

    #[test]
    fn oldest_first_is_violation() {
        let history = vec![snap(1, 10), snap(2, 20)];
        let err = HistoryVerifier::verify_newest_first(&vol(), &history).unwrap_err();
        match err {
            PlanError::HistoryOrderingViolation { position, .. } => assert_eq!(position, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn out_of_order_tail_is_violation() {
        let history = vec![snap(4, 40), snap(3, 30), snap(1, 10), snap(2, 20)];
        let err = HistoryVerifier::verify_newest_first(&vol(), &history).unwrap_err();
        assert!(matches!(
            err,
            PlanError::HistoryOrderingViolation { position: 3, .. }
        ));
    }

    #[test]
    fn equal_timestamps_are_violation() {
        let history = vec![snap(2, 10), snap(1, 10)];
        assert!(HistoryVerifier::verify_newest_first(&vol(), &history).is_err());
    }

    #[test]
    fn repeated_id_is_violation() {
        let mut again = snap(1, 5);
        again.name = "renamed".into();
        let history = vec![snap(1, 10), again];
        let err = HistoryVerifier::verify_newest_first(&vol(), &history).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
