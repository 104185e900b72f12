//! CLI-level errors (wraps core and config errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{}: {source}", .path.display())]
    Tree {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    crate::exitcode::NOINPUT
                }
                _ => crate::exitcode::IOERR,
            },
            CliError::Tree { source, .. } => match source {
                TreeError::MalformedInput { .. } => crate::exitcode::DATAERR,
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}
