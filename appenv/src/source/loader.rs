//! Loading configuration files under a missing-file policy.

use std::io::Write as _;

use camino::Utf8Path;
use cap_std::fs::OpenOptions;

use crate::error::{create_error, file_error};
use crate::merge::merge_maps;
use crate::path::open_parent_dir_and_name;
use crate::{AppEnvError, AppEnvResult, ConfigMap, MissingFilePolicy};

use super::{ConfigCodec, ConfigFormat};

/// Header written at the top of auto-created configuration files.
pub const DEFAULT_FILE_COMMENT: &str = "Configuration File\n\nAdd your local configuration according to the documentation of the application here";

/// Reads configuration files, applying a [`MissingFilePolicy`] when the
/// file does not exist.
///
/// Absent, malformed and present files are kept apart: only a file that does
/// not exist triggers the policy; a file that exists but cannot be parsed is
/// reported as [`AppEnvError::File`] and is never overwritten.
#[derive(Debug)]
pub struct ConfigSourceLoader {
    codec: Option<Box<dyn ConfigCodec>>,
    comment: String,
}

impl Default for ConfigSourceLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSourceLoader {
    /// Creates a loader selecting the format from each file's extension.
    #[must_use]
    pub fn new() -> Self {
        Self {
            codec: None,
            comment: DEFAULT_FILE_COMMENT.to_owned(),
        }
    }

    /// Uses `codec` for every file regardless of extension.
    #[must_use]
    pub fn with_codec(mut self, codec: impl ConfigCodec + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Overrides the header comment written into auto-created files.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Loads `path`, deep-merging its content over `defaults`.
    ///
    /// When the file does not exist the policy decides: `UseDefault` returns
    /// `defaults`, `AutoCreate` writes `defaults` to a new file first, and
    /// `Error` fails.
    ///
    /// # Errors
    ///
    /// Returns [`AppEnvError::ConfigFileMissing`] under `Error`,
    /// [`AppEnvError::ConfigFileCreate`] when auto-creation fails, and
    /// [`AppEnvError::File`] when an existing file cannot be read or parsed.
    pub fn load(
        &self,
        path: &Utf8Path,
        policy: MissingFilePolicy,
        defaults: &ConfigMap,
    ) -> AppEnvResult<ConfigMap> {
        if let Some(data) = read_existing(path)? {
            let parsed = self.with_codec_for(path, |codec| codec.parse(path, &data))?;
            tracing::debug!(path = %path, "loaded configuration file");
            let mut merged = defaults.clone();
            merge_maps(&mut merged, parsed);
            return Ok(merged);
        }

        match policy {
            MissingFilePolicy::UseDefault => {
                tracing::warn!(path = %path, "configuration file missing; using defaults");
                Ok(defaults.clone())
            }
            MissingFilePolicy::AutoCreate => {
                self.create(path, defaults)?;
                Ok(defaults.clone())
            }
            MissingFilePolicy::Error => Err(std::sync::Arc::new(
                AppEnvError::ConfigFileMissing {
                    path: path.to_path_buf(),
                },
            )),
        }
    }

    fn with_codec_for<R>(&self, path: &Utf8Path, f: impl FnOnce(&dyn ConfigCodec) -> R) -> R {
        match &self.codec {
            Some(codec) => f(codec.as_ref()),
            None => f(&ConfigFormat::from_path(path)),
        }
    }

    /// Creates `path` exclusively and writes `defaults` into it.
    fn create(&self, path: &Utf8Path, defaults: &ConfigMap) -> AppEnvResult<()> {
        // Render and re-read before opening so an unreadable body leaves no file.
        let body = self.with_codec_for(path, |codec| {
            let body = codec.render(&self.comment, defaults)?;
            Self::check_round_trip(codec, path, &body, defaults)?;
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(body)
        });
        let body = body.map_err(|e| {
            create_error(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        let (dir, name) = open_parent_dir_and_name(path).map_err(|e| create_error(path, e))?;
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = dir
            .open_with(&name, &options)
            .map_err(|e| create_error(path, e))?;
        file.write_all(body.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| create_error(path, e))?;
        tracing::info!(path = %path, "created configuration file from defaults");
        Ok(())
    }

    /// Parses `body` back and checks that loading it over `defaults` yields
    /// `defaults` unchanged.
    fn check_round_trip(
        codec: &dyn ConfigCodec,
        path: &Utf8Path,
        body: &str,
        defaults: &ConfigMap,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let parsed = codec
            .parse(path, body)
            .map_err(|e| format!("rendered defaults cannot be read back: {e}"))?;
        let mut reloaded = defaults.clone();
        merge_maps(&mut reloaded, parsed);
        if reloaded == *defaults {
            Ok(())
        } else {
            Err("rendered defaults do not read back unchanged".into())
        }
    }
}

/// Reads `path`, returning `Ok(None)` only when it does not exist.
fn read_existing(path: &Utf8Path) -> AppEnvResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(file_error(path, e)),
    }
}
