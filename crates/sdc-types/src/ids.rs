use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier (UUID v4).
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from a raw 128-bit value. Handy for fixtures.
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Short representation (first 8 characters, uppercase).
            pub fn short_id(&self) -> String {
                self.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.short_id())
            }
        }

        // Uppercase hyphenated, matching what the storage tools print.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:X}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|e| TypeError::InvalidId {
                        value: s.to_string(),
                        reason: e.to_string(),
                    })
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id!(
    /// Stable unique identifier of a volume.
    VolumeId
);

uuid_id!(
    /// Stable unique identifier of a snapshot within its volume.
    SnapshotId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_uppercase_hyphenated() {
        let id: VolumeId = "ca79ddfa-d75d-43f3-8099-3bea2f7c1f33".parse().unwrap();
        assert_eq!(id.to_string(), "CA79DDFA-D75D-43F3-8099-3BEA2F7C1F33");
    }

    #[test]
    fn parse_is_case_insensitive() {
        let upper: SnapshotId = "D1ABE254-5B1B-4FDF-8DB3-1B4B4B825E39".parse().unwrap();
        let lower: SnapshotId = "d1abe254-5b1b-4fdf-8db3-1b4b4b825e39".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<VolumeId>().unwrap_err();
        assert!(matches!(err, TypeError::InvalidId { .. }));
    }

    #[test]
    fn short_id_is_eight_chars() {
        let id = VolumeId::from_u128(0xabcdef01_0000_0000_0000_000000000000);
        assert_eq!(id.short_id(), "ABCDEF01");
        assert_eq!(format!("{id:?}"), "VolumeId(ABCDEF01)");
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(SnapshotId::new(), SnapshotId::new());
    }

    #[test]
    fn serde_roundtrip() {
        let id = VolumeId::from_u128(42);
        let json = serde_json::to_string(&id).unwrap();
        let parsed: VolumeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
