use crate::config::ClonerConfig;

/// Per-call options for [`Cloner::clone_volume`](crate::Cloner::clone_volume).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloneOptions {
    /// Delete every destination snapshot except the replicated one.
    pub prune: bool,
    /// Rename the destination back after the executor renamed it.
    pub restore_destination_name: bool,
    /// Require the replicated snapshot in the destination listing afterwards.
    pub verify_destination: bool,
}

impl CloneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn with_restore_destination_name(mut self, restore: bool) -> Self {
        self.restore_destination_name = restore;
        self
    }

    pub fn with_verify_destination(mut self, verify: bool) -> Self {
        self.verify_destination = verify;
        self
    }
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            prune: false,
            restore_destination_name: true,
            verify_destination: true,
        }
    }
}

impl From<&ClonerConfig> for CloneOptions {
    fn from(config: &ClonerConfig) -> Self {
        Self {
            prune: config.prune,
            restore_destination_name: config.restore_destination_name,
            verify_destination: config.verify_destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = CloneOptions::new();
        assert!(!o.prune);
        assert!(o.restore_destination_name);
        assert!(o.verify_destination);
    }

    #[test]
    fn builders() {
        let o = CloneOptions::new()
            .with_prune(true)
            .with_restore_destination_name(false)
            .with_verify_destination(false);
        assert!(o.prune);
        assert!(!o.restore_destination_name);
        assert!(!o.verify_destination);
    }
}
