use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::options::CloneOptions;

/// File-backed defaults for cloning.
///
/// ```toml
/// prune = true
/// restore_destination_name = true
/// verify_destination = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClonerConfig {
    pub prune: bool,
    pub restore_destination_name: bool,
    pub verify_destination: bool,
}

impl Default for ClonerConfig {
    fn default() -> Self {
        Self {
            prune: false,
            restore_destination_name: true,
            verify_destination: true,
        }
    }
}

impl ClonerConfig {
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn options(&self) -> CloneOptions {
        CloneOptions::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ClonerConfig::default();
        assert!(!c.prune);
        assert!(c.restore_destination_name);
        assert!(c.verify_destination);
        assert_eq!(c.options(), CloneOptions::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ClonerConfig::from_toml_str("").unwrap(), ClonerConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let c = ClonerConfig::from_toml_str("prune = true\n").unwrap();
        assert!(c.prune);
        assert!(c.restore_destination_name);
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = ClonerConfig::from_toml_str("purge = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prune = true").unwrap();
        writeln!(file, "verify_destination = false").unwrap();
        let c = ClonerConfig::load(file.path()).unwrap();
        assert!(c.prune);
        assert!(!c.verify_destination);
        assert!(c.options().prune);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClonerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
