//! Structured-data formats accepted for configuration files.

use std::error::Error;
use std::fmt;

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Format, Json, Toml},
};
#[cfg(feature = "json5")]
use figment_json5::Json5;
use serde_json::Value;

use crate::error::{file_error, invalid_data};
use crate::{AppEnvResult, ConfigMap};

/// Parser and serialiser pair used to read and auto-create configuration
/// files.
///
/// Implement this trait to plug a custom format into
/// [`crate::ConfigSourceLoader::with_codec`].
pub trait ConfigCodec: fmt::Debug + Send + Sync {
    /// Parses `data`, read from `path`, into a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppEnvError::File`] when the data is malformed or
    /// its top level is not a mapping.
    fn parse(&self, path: &Utf8Path, data: &str) -> AppEnvResult<ConfigMap>;

    /// Renders `value` as file contents headed by `comment`.
    ///
    /// # Errors
    ///
    /// Returns the serialiser's error when `value` cannot be represented.
    fn render(&self, comment: &str, value: &ConfigMap)
    -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Built-in formats, selected by file extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ConfigFormat {
    /// TOML; also used for unrecognised extensions.
    Toml,
    /// Plain JSON.
    Json,
    /// JSON5; requires the `json5` feature.
    Json5,
}

impl ConfigFormat {
    /// Selects a format from the extension of `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use appenv::ConfigFormat;
    /// use camino::Utf8Path;
    ///
    /// assert_eq!(ConfigFormat::from_path(Utf8Path::new("app.JSON")), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path(Utf8Path::new("app.conf")), ConfigFormat::Toml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            Some("json5") => Self::Json5,
            _ => Self::Toml,
        }
    }

    const fn comment_prefix(self) -> Option<&'static str> {
        match self {
            Self::Toml => Some("#"),
            Self::Json5 => Some("//"),
            Self::Json => None,
        }
    }

    fn figment(self, path: &Utf8Path, data: &str) -> AppEnvResult<Figment> {
        match self {
            Self::Toml => {
                // Validate first so parse failures carry this file's path.
                toml::from_str::<toml::Table>(data).map_err(|e| file_error(path, e))?;
                Ok(Figment::from(Toml::string(data)))
            }
            Self::Json => Ok(Figment::from(Json::string(data))),
            Self::Json5 => {
                #[cfg(feature = "json5")]
                {
                    Ok(Figment::from(Json5::string(data)))
                }
                #[cfg(not(feature = "json5"))]
                {
                    Err(json5_disabled(path))
                }
            }
        }
    }
}

#[cfg(not(feature = "json5"))]
fn json5_disabled(path: &Utf8Path) -> std::sync::Arc<crate::AppEnvError> {
    file_error(
        path,
        std::io::Error::other(
            "json5 feature disabled: enable the 'json5' feature to support this file format",
        ),
    )
}

impl ConfigCodec for ConfigFormat {
    fn parse(&self, path: &Utf8Path, data: &str) -> AppEnvResult<ConfigMap> {
        let value: Value = self
            .figment(path, data)?
            .extract()
            .map_err(|e| file_error(path, e))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(invalid_data(
                path,
                "configuration file must contain a mapping at the top level",
            )),
        }
    }

    fn render(
        &self,
        comment: &str,
        value: &ConfigMap,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let body = match self {
            Self::Toml => toml::to_string(&without_nulls(value))?,
            Self::Json => {
                let mut text = serde_json::to_string_pretty(value)?;
                text.push('\n');
                text
            }
            Self::Json5 => {
                #[cfg(feature = "json5")]
                {
                    let mut text = json5::to_string(value)?;
                    text.push('\n');
                    text
                }
                #[cfg(not(feature = "json5"))]
                {
                    return Err("json5 feature disabled".into());
                }
            }
        };
        Ok(match self.comment_prefix() {
            Some(prefix) => format!("{}{body}", comment_block(prefix, comment)),
            None => body,
        })
    }
}

/// Drops `null` entries from mappings at every depth.
///
/// TOML has no null; an omitted key loads back as the default it came from.
/// Nulls inside arrays are kept and fail to render.
fn without_nulls(map: &ConfigMap) -> ConfigMap {
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::Object(inner) => Value::Object(without_nulls(inner)),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Wraps each line of `comment` in line comments, followed by a blank line.
fn comment_block(prefix: &str, comment: &str) -> String {
    let trimmed = comment.trim_matches('\n');
    if trimmed.trim().is_empty() {
        return String::new();
    }
    let mut block = String::new();
    for line in trimmed.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            block.push_str(prefix);
        } else {
            block.push_str(prefix);
            block.push(' ');
            block.push_str(line);
        }
        block.push('\n');
    }
    block.push('\n');
    block
}
