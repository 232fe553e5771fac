//! Configuration source descriptors and the file loader.

mod format;
mod loader;

pub use format::{ConfigCodec, ConfigFormat};
pub use loader::{ConfigSourceLoader, DEFAULT_FILE_COMMENT};

use crate::ConfigMap;

/// One entry of the ordered source list handed to [`crate::prepare`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// A file specifier, loaded with an empty default structure.
    Path(String),
    /// A file specifier whose default structure is used, or written, when
    /// the file is absent.
    Optional {
        /// File specifier, possibly alias-prefixed or relative.
        path: String,
        /// Structure underlying the file content.
        defaults: ConfigMap,
    },
    /// A structure used as-is without touching the filesystem.
    Literal(ConfigMap),
}

impl ConfigSource {
    /// A required file source.
    #[must_use]
    pub fn path(spec: impl Into<String>) -> Self {
        Self::Path(spec.into())
    }

    /// A file source backed by `defaults`.
    #[must_use]
    pub fn optional(spec: impl Into<String>, defaults: ConfigMap) -> Self {
        Self::Optional {
            path: spec.into(),
            defaults,
        }
    }

    /// A literal structure.
    #[must_use]
    pub const fn literal(map: ConfigMap) -> Self {
        Self::Literal(map)
    }

    /// File specifier, if this source reads a file.
    #[must_use]
    pub fn specifier(&self) -> Option<&str> {
        match self {
            Self::Path(path) | Self::Optional { path, .. } => Some(path),
            Self::Literal(_) => None,
        }
    }
}

impl From<ConfigMap> for ConfigSource {
    fn from(map: ConfigMap) -> Self {
        Self::Literal(map)
    }
}

impl From<&str> for ConfigSource {
    fn from(spec: &str) -> Self {
        Self::path(spec)
    }
}
