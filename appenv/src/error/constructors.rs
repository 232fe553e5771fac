//! Constructors and classification helpers for `AppEnvError`.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use super::AppEnvError;

impl AppEnvError {
    /// Construct an [`AppEnvError::InvalidArgument`] that is not tied to
    /// specific option keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use appenv::AppEnvError;
    /// let e = AppEnvError::invalid_argument("at least one source is required");
    /// assert!(e.is_invalid_argument());
    /// ```
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            keys: Vec::new(),
        }
    }

    /// Construct an [`AppEnvError::InvalidArgument`] naming the offending keys.
    #[must_use]
    pub fn invalid_keys(message: impl Into<String>, keys: Vec<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            keys,
        }
    }

    /// Wrap an error raised by a host-framework hook.
    #[must_use]
    pub fn host(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Host {
            source: source.into(),
        }
    }

    /// Returns `true` for [`AppEnvError::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` for [`AppEnvError::UnknownAlias`] and
    /// [`AppEnvError::CyclicAlias`].
    #[must_use]
    pub const fn is_unknown_alias(&self) -> bool {
        matches!(self, Self::UnknownAlias { .. } | Self::CyclicAlias { .. })
    }

    /// Returns `true` for [`AppEnvError::ConfigFileMissing`].
    #[must_use]
    pub const fn is_missing_file(&self) -> bool {
        matches!(self, Self::ConfigFileMissing { .. })
    }

    /// Offending option keys carried by an [`AppEnvError::InvalidArgument`].
    #[must_use]
    pub fn keys(&self) -> &[String] {
        match self {
            Self::InvalidArgument { keys, .. } => keys,
            _ => &[],
        }
    }

    /// OS error code preserved by a failed file creation.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::ConfigFileCreate { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Construct an [`AppEnvError::File`] for a configuration path.
pub(crate) fn file_error(
    path: &Utf8Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<AppEnvError> {
    Arc::new(AppEnvError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

pub(crate) fn invalid_data(path: &Utf8Path, msg: impl Into<String>) -> Arc<AppEnvError> {
    file_error(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
    )
}

pub(crate) fn create_error(path: &Utf8Path, source: std::io::Error) -> Arc<AppEnvError> {
    Arc::new(AppEnvError::ConfigFileCreate {
        path: path.to_path_buf(),
        source,
    })
}
