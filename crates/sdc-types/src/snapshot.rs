use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ids::SnapshotId;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// `yyyy-mm-dd-hhmmss`, ASCII digits only.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{6}").expect("timestamp pattern compiles")
});

/// An immutable point-in-time capture of a volume.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    /// Stable unique identifier, shared by every volume holding a copy.
    pub id: SnapshotId,
    /// Display name.
    pub name: String,
    /// Creation time; snapshots of one volume are totally ordered by it.
    pub created: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(id: SnapshotId, name: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created,
        }
    }

    /// Build a snapshot whose creation time is embedded in its name.
    pub fn from_timestamped_name(id: SnapshotId, name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        let created = parse_created_from_name(&name)?;
        Ok(Self { id, name, created })
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Extract the creation time from a snapshot name containing a
/// `yyyy-mm-dd-hhmmss` substring (interpreted as UTC).
///
/// ```
/// use sdc_types::parse_created_from_name;
///
/// let created = parse_created_from_name("com.bombich.ccc.6AE4.2021-03-01-203509").unwrap();
/// assert_eq!(created.to_rfc3339(), "2021-03-01T20:35:09+00:00");
/// assert!(parse_created_from_name("manual-snapshot").is_err());
/// ```
pub fn parse_created_from_name(name: &str) -> Result<DateTime<Utc>, TypeError> {
    let timestamp = TIMESTAMP
        .find(name)
        .ok_or_else(|| TypeError::MissingTimestamp {
            name: name.to_string(),
        })?
        .as_str();
    let naive = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|_| {
        TypeError::InvalidTimestamp {
            name: name.to_string(),
            timestamp: timestamp.to_string(),
        }
    })?;
    Ok(Utc.from_utc_datetime(&naive))
}
