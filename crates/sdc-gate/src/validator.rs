use std::collections::HashMap;

use sdc_directory::VolumeDirectory;
use sdc_types::{Volume, VolumeId};
use tracing::debug;

use crate::error::{EligibilityError, GateResult, VolumeRole};
use crate::rule::{Destination, PairRule};
use crate::rules::{CaseSensitivityRule, DistinctVolumeRule, SnapshotCapableRule, WritableRule};

/// Volumes that passed every eligibility rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eligible {
    pub source: Volume,
    /// Resolved destinations, in the order they were given.
    pub destinations: Vec<Volume>,
}

/// The eligibility gate: resolves the source and destinations, then runs a
/// configurable pipeline of pair rules over every destination.
///
/// Evaluation is **fail-fast** and read-only. Running it twice against an
/// unchanged directory gives the same answer.
pub struct EligibilityValidator {
    rules: Vec<Box<dyn PairRule>>,
}

impl EligibilityValidator {
    /// A validator that only resolves volumes and rejects duplicates.
    /// Use [`Self::add_rule`] to add pair rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard pipeline:
    /// distinct-volumes -> writable -> snapshot-capable -> case-sensitivity
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(DistinctVolumeRule));
        validator.add_rule(Box::new(WritableRule));
        validator.add_rule(Box::new(SnapshotCapableRule));
        validator.add_rule(Box::new(CaseSensitivityRule));
        validator
    }

    /// Append a rule to the end of the pipeline.
    pub fn add_rule(&mut self, rule: Box<dyn PairRule>) {
        self.rules.push(rule);
    }

    /// Number of pair rules in the pipeline.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the pair rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Check whether `source` may be cloned onto every one of `destinations`.
    ///
    /// Order of checks: the source resolves; every destination resolves; no
    /// destination volume repeats; then the pair rules for each destination
    /// in turn. The first violation is returned.
    pub fn cloneable<D, S>(
        &self,
        directory: &D,
        source: &str,
        destinations: &[S],
    ) -> GateResult<Eligible>
    where
        D: VolumeDirectory + ?Sized,
        S: AsRef<str>,
    {
        let source_volume = resolve(directory, VolumeRole::Source, source)?;

        let mut resolved = Vec::with_capacity(destinations.len());
        for identifier in destinations {
            let identifier = identifier.as_ref();
            let volume = resolve(directory, VolumeRole::Destination, identifier)?;
            resolved.push((identifier, volume));
        }

        let mut seen: HashMap<VolumeId, &str> = HashMap::new();
        for (identifier, volume) in &resolved {
            if let Some(first) = seen.insert(volume.id, *identifier) {
                debug!(first, repeated = %identifier, volume = %volume.id, "duplicate destination");
                return Err(EligibilityError::DuplicateDestination {
                    identifier: identifier.to_string(),
                    volume: volume.id,
                    name: volume.name.clone(),
                });
            }
        }

        for (identifier, volume) in &resolved {
            self.check_pair(
                &source_volume,
                &Destination {
                    identifier: *identifier,
                    volume,
                },
            )?;
        }

        Ok(Eligible {
            source: source_volume,
            destinations: resolved.into_iter().map(|(_, v)| v).collect(),
        })
    }

    /// Run the pair rules for one already-resolved destination.
    pub fn check_pair(&self, source: &Volume, destination: &Destination<'_>) -> GateResult<()> {
        for rule in &self.rules {
            rule.check(source, destination)?;
            debug!(
                rule = rule.name(),
                source = %source.id,
                destination = %destination.volume.id,
                "eligibility rule passed"
            );
        }
        Ok(())
    }
}

impl Default for EligibilityValidator {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

fn resolve<D>(directory: &D, role: VolumeRole, identifier: &str) -> GateResult<Volume>
where
    D: VolumeDirectory + ?Sized,
{
    directory.resolve(identifier).map_err(|e| {
        if e.is_resolution_failure() {
            EligibilityError::VolumeNotFound {
                role,
                identifier: identifier.to_string(),
                source: e,
            }
        } else {
            EligibilityError::Directory(e)
        }
    })
}
