//! Error types for the deployer.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for deployer operations
pub type DeployerResult<T> = Result<T, DeployerError>;

/// Faults that abort an operation.
///
/// A non-zero exit of an external tool is not an error; it is reported
/// inside the operation's result. Only failures to run the tool at all,
/// or to read the environment at startup, end up here.
#[derive(Error, Debug)]
pub enum DeployerError {
    /// External tool could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Credential file exists but could not be read
    #[error("failed to read namespace from {path}: {source}")]
    Environment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
