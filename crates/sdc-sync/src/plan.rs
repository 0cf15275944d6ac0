use std::fmt;

use sdc_types::{Snapshot, Volume};
use serde::Serialize;

/// How the destination will be brought up to date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// The newest source snapshot is already the newest shared one.
    Current { snapshot: Snapshot },
    /// Carry the destination forward from a shared snapshot; existing
    /// destination history is kept.
    Incremental { from: Snapshot, to: Snapshot },
    /// No shared history: erase the destination and copy `to` wholesale.
    Full { to: Snapshot },
}

/// A replication decision for one source/destination pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplicationPlan {
    pub source: Volume,
    pub destination: Volume,
    #[serde(flatten)]
    pub strategy: Strategy,
}

impl ReplicationPlan {
    /// The snapshot the destination will hold as newest after execution.
    pub fn to(&self) -> &Snapshot {
        match &self.strategy {
            Strategy::Current { snapshot } => snapshot,
            Strategy::Incremental { to, .. } | Strategy::Full { to } => to,
        }
    }

    /// The shared baseline, for incremental plans.
    pub fn from(&self) -> Option<&Snapshot> {
        match &self.strategy {
            Strategy::Incremental { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Returns `true` if nothing needs to be transferred.
    pub fn is_current(&self) -> bool {
        matches!(self.strategy, Strategy::Current { .. })
    }

    /// Returns `true` if executing the plan discards destination history.
    pub fn is_destructive(&self) -> bool {
        matches!(self.strategy, Strategy::Full { .. })
    }
}

impl fmt::Display for ReplicationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.strategy {
            Strategy::Current { snapshot } => write!(
                f,
                "{} is current with {} at {}",
                self.destination, self.source, snapshot
            ),
            Strategy::Incremental { from, to } => write!(
                f,
                "incremental {} -> {}: from {} to {}",
                self.source, self.destination, from, to
            ),
            Strategy::Full { to } => write!(
                f,
                "full replacement {} -> {}: erase destination, copy {}",
                self.source, self.destination, to
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sdc_types::{SnapshotId, VolumeId};

    fn snap(n: u128) -> Snapshot {
        Snapshot::new(
            SnapshotId::from_u128(n),
            format!("snap-{n}"),
            Utc.timestamp_opt(1_600_000_000 + n as i64, 0).unwrap(),
        )
    }

    fn plan(strategy: Strategy) -> ReplicationPlan {
        ReplicationPlan {
            source: Volume::new(VolumeId::from_u128(1), "source"),
            destination: Volume::new(VolumeId::from_u128(2), "target"),
            strategy,
        }
    }

    #[test]
    fn accessors_per_strategy() {
        let p = plan(Strategy::Incremental { from: snap(1), to: snap(2) });
        assert_eq!(p.to(), &snap(2));
        assert_eq!(p.from(), Some(&snap(1)));
        assert!(!p.is_current());
        assert!(!p.is_destructive());

        let p = plan(Strategy::Full { to: snap(2) });
        assert_eq!(p.to(), &snap(2));
        assert!(p.from().is_none());
        assert!(p.is_destructive());

        let p = plan(Strategy::Current { snapshot: snap(2) });
        assert_eq!(p.to(), &snap(2));
        assert!(p.is_current());
    }

    #[test]
    fn display_names_strategy() {
        let p = plan(Strategy::Full { to: snap(2) });
        assert!(p.to_string().starts_with("full replacement source"));
    }

    #[test]
    fn serializes_with_strategy_tag() {
        let p = plan(Strategy::Incremental { from: snap(1), to: snap(2) });
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["strategy"], "incremental");
        assert_eq!(json["destination"]["name"], "target");
        assert_eq!(json["from"]["name"], "snap-1");
    }
}
