use sdc_directory::DirectoryError;
use sdc_sync::ExecutorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("`{command}` failed to start: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}) with stderr: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` i/o error: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SystemError {
    /// The command line this error came from, if it came from one.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } | Self::Io { command, .. } => {
                Some(command.as_str())
            }
            Self::Decode { .. } => None,
        }
    }
}

pub type SystemResult<T> = Result<T, SystemError>;

impl From<SystemError> for DirectoryError {
    fn from(e: SystemError) -> Self {
        let operation = e.command().unwrap_or("decode").to_string();
        DirectoryError::Backend {
            operation,
            message: e.to_string(),
        }
    }
}

impl From<SystemError> for ExecutorError {
    fn from(e: SystemError) -> Self {
        let operation = e.command().unwrap_or("decode").to_string();
        ExecutorError::Backend {
            operation,
            message: e.to_string(),
        }
    }
}
