//! Behaviour applied when a configuration source file does not exist.

use serde::{Deserialize, Serialize};

/// Policy applied by [`crate::ConfigSourceLoader`] when a source file is
/// absent.
///
/// # Examples
///
/// ```
/// use appenv::MissingFilePolicy;
///
/// let policy: MissingFilePolicy = serde_json::from_str("\"autocreate\"")?;
/// assert_eq!(policy, MissingFilePolicy::AutoCreate);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingFilePolicy {
    /// Return the default structure without touching the filesystem.
    #[serde(alias = "default")]
    UseDefault,
    /// Create the file containing the default structure, then return it.
    #[default]
    #[serde(alias = "autocreate")]
    AutoCreate,
    /// Fail with [`crate::AppEnvError::ConfigFileMissing`].
    Error,
}
