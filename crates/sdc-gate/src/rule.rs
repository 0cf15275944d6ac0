use sdc_types::Volume;

use crate::error::GateResult;

/// A single check applied to a resolved source/destination pair.
///
/// Rules are evaluated in order and must be side-effect free: they only look
/// at the volume metadata captured at resolution time.
///
/// The trait is object-safe and `Send + Sync` so rules can be stored in a
/// `Vec<Box<dyn PairRule>>`.
pub trait PairRule: Send + Sync {
    /// Human-readable name of this rule (e.g. "writable").
    fn name(&self) -> &str;

    /// `Ok(())` if the pair satisfies the rule.
    fn check(&self, source: &Volume, destination: &Destination<'_>) -> GateResult<()>;
}

/// A resolved destination together with the identifier the caller used.
#[derive(Clone, Copy, Debug)]
pub struct Destination<'a> {
    pub identifier: &'a str,
    pub volume: &'a Volume,
}
