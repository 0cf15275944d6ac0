use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid identifier {value:?}: {reason}")]
    InvalidId { value: String, reason: String },

    #[error("snapshot name {name:?} does not contain a timestamp of the form yyyy-mm-dd-hhmmss")]
    MissingTimestamp { name: String },

    #[error("snapshot name {name:?} contains an invalid timestamp {timestamp:?}")]
    InvalidTimestamp { name: String, timestamp: String },
}
