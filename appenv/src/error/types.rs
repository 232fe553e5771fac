//! Primary error enum for bootstrap and configuration loading flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing an application environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppEnvError {
    /// Invalid caller input: an empty source list, missing or unknown option
    /// keys, or a malformed option value.
    #[error("{message}")]
    InvalidArgument {
        /// Human-readable description of the failure.
        message: String,
        /// Every option key that triggered the failure, if any.
        keys: Vec<String>,
    },

    /// A path specifier referenced an alias that is not registered.
    #[error("Unknown alias '{alias}'")]
    UnknownAlias {
        /// Alias name including the leading `@`.
        alias: String,
    },

    /// Alias resolution returned to an alias already being resolved.
    #[error("cyclic alias detected: {cycle}")]
    CyclicAlias {
        /// Chain of aliases participating in the cycle.
        cycle: String,
    },

    /// A required configuration file does not exist.
    #[error("Could not read configuration file '{path}': file does not exist")]
    ConfigFileMissing {
        /// Path of the absent file.
        path: Utf8PathBuf,
    },

    /// Creating a missing configuration file failed.
    #[error("Could not create configuration file '{path}': {source}")]
    ConfigFileCreate {
        /// Path of the file that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error, carrying the OS error code when available.
        #[source]
        source: std::io::Error,
    },

    /// An existing file could not be read or parsed.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported by the reader or parser.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A host-framework hook reported a failure.
    #[error("Host framework error: {source}")]
    Host {
        /// Error raised by the host implementation.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
