use serde::de::DeserializeOwned;

use crate::error::{SystemError, SystemResult};
use crate::runner::CommandRunner;

/// Decode a property list by converting it to JSON with `plutil`.
pub fn decode_plist<T, R>(runner: &R, what: &str, plist: &[u8]) -> SystemResult<T>
where
    T: DeserializeOwned,
    R: CommandRunner + ?Sized,
{
    // Read from stdin, write to stdout.
    let json = runner.run("plutil", &["-convert", "json", "-", "-o", "-"], Some(plist))?;
    serde_json::from_slice(&json).map_err(|source| SystemError::Decode {
        what: what.to_string(),
        source,
    })
}
