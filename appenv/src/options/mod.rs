//! Bootstrap options: validation, defaults and the one-shot preparation pass.
//!
//! Options can be assembled programmatically or decoded from an untyped
//! mapping using the camel-cased keys accepted by [`Options::from_map`].
//! Preparation canonicalises the base directory and resolves every custom
//! alias; it runs at most once per value.

mod policy;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::Value;

pub use policy::MissingFilePolicy;

use crate::alias::{AliasResolver, is_builtin_alias};
use crate::environment::ConstantMap;
use crate::path::canonicalise;
use crate::{AppEnvError, AppEnvResult, AppEnvResultExt, ConfigMap};

const REQUIRED_KEYS: &[&str] = &["basePath"];

const KNOWN_KEYS: &[&str] = &[
    "basePath",
    "vendorPath",
    "frameworkPath",
    "frameworkEntryFile",
    "missingFilePolicy",
    "applicationClass",
    "constants",
    "requireFiles",
    "aliases",
    "extras",
];

fn default_vendor_path() -> String {
    String::from("./vendor")
}

fn default_framework_path() -> String {
    String::from("@vendor/framework")
}

fn default_framework_entry_file() -> String {
    String::from("@framework/bootstrap.toml")
}

fn default_application_class() -> String {
    String::from("console")
}

/// Options driving alias resolution and configuration loading.
///
/// # Examples
///
/// ```rust,no_run
/// use appenv::{MissingFilePolicy, Options};
///
/// # fn run() -> appenv::AppEnvResult<()> {
/// let options = Options::new("/srv/app")
///     .with_alias("@cfg", "./config")
///     .with_missing_file_policy(MissingFilePolicy::Error)
///     .prepare()?;
/// assert_eq!(options.resolve("@cfg/app.toml")?, "/srv/app/./config/app.toml");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    base_path: Utf8PathBuf,
    #[serde(default = "default_vendor_path")]
    vendor_path: String,
    #[serde(default = "default_framework_path")]
    framework_path: String,
    #[serde(default = "default_framework_entry_file")]
    framework_entry_file: String,
    #[serde(default)]
    missing_file_policy: MissingFilePolicy,
    #[serde(default = "default_application_class")]
    application_class: String,
    #[serde(default)]
    constants: ConstantMap,
    #[serde(default)]
    require_files: Vec<String>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    #[serde(default)]
    extras: ConfigMap,
    #[serde(skip)]
    prepared: bool,
}

impl Options {
    /// Creates options for `base_path` with every other field defaulted.
    #[must_use]
    pub fn new(base_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            vendor_path: default_vendor_path(),
            framework_path: default_framework_path(),
            framework_entry_file: default_framework_entry_file(),
            missing_file_policy: MissingFilePolicy::default(),
            application_class: default_application_class(),
            constants: ConstantMap::new(),
            require_files: Vec::new(),
            aliases: BTreeMap::new(),
            extras: ConfigMap::new(),
            prepared: false,
        }
    }

    /// Decodes options from an untyped mapping.
    ///
    /// Every missing required key and every unrecognised key is reported in
    /// a single [`AppEnvError::InvalidArgument`].
    ///
    /// # Errors
    ///
    /// Returns [`AppEnvError::InvalidArgument`] when keys are missing or
    /// unknown, or when a value has the wrong shape.
    pub fn from_map(map: ConfigMap) -> AppEnvResult<Self> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| !map.contains_key(**key))
            .map(|key| (*key).to_owned())
            .collect();
        let mut unknown: Vec<String> = map
            .keys()
            .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        unknown.sort();

        if !missing.is_empty() || !unknown.is_empty() {
            let mut parts = Vec::new();
            if !missing.is_empty() {
                parts.push(format!(
                    "the following item(s) are required options, but missing: {}",
                    missing.join(", ")
                ));
            }
            if !unknown.is_empty() {
                parts.push(format!("invalid option item(s): {}", unknown.join(", ")));
            }
            let keys = missing.into_iter().chain(unknown).collect();
            return Err(Arc::new(AppEnvError::invalid_keys(parts.join("; "), keys)));
        }

        serde_json::from_value(Value::Object(map)).into_app_env()
    }

    /// Overrides the vendor directory specifier.
    #[must_use]
    pub fn with_vendor_path(mut self, path: impl Into<String>) -> Self {
        self.vendor_path = path.into();
        self.prepared = false;
        self
    }

    /// Overrides the framework directory specifier.
    #[must_use]
    pub fn with_framework_path(mut self, path: impl Into<String>) -> Self {
        self.framework_path = path.into();
        self.prepared = false;
        self
    }

    /// Overrides the framework entry file handed to the runtime hook.
    #[must_use]
    pub fn with_framework_entry_file(mut self, path: impl Into<String>) -> Self {
        self.framework_entry_file = path.into();
        self.prepared = false;
        self
    }

    /// Sets the policy applied to missing configuration files.
    #[must_use]
    pub const fn with_missing_file_policy(mut self, policy: MissingFilePolicy) -> Self {
        self.missing_file_policy = policy;
        self
    }

    /// Sets the application type identifier passed to the host factory.
    #[must_use]
    pub fn with_application_class(mut self, class: impl Into<String>) -> Self {
        self.application_class = class.into();
        self
    }

    /// Adds a named constant applied before sources are read.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }

    /// Appends a file loaded for its side effects before sources are read.
    #[must_use]
    pub fn with_require_file(mut self, path: impl Into<String>) -> Self {
        self.require_files.push(path.into());
        self
    }

    /// Registers an alias such as `@cfg`.
    #[must_use]
    pub fn with_alias(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), path.into());
        self.prepared = false;
        self
    }

    /// Attaches an opaque user value that the loader never interprets.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Runs the preparation pass.
    ///
    /// Canonicalises the base path, validates alias names and resolves every
    /// alias value. Already prepared options are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the base path is not an existing directory, an
    /// alias name is invalid or shadows a built-in alias, or an alias value
    /// cannot be resolved.
    pub fn prepare(mut self) -> AppEnvResult<Self> {
        if self.prepared {
            return Ok(self);
        }

        let base = canonicalise(&self.base_path).map_err(|e| {
            Arc::new(AppEnvError::invalid_keys(
                format!("basePath '{}' cannot be resolved: {e}", self.base_path),
                vec![String::from("basePath")],
            ))
        })?;
        if !base.is_dir() {
            return Err(Arc::new(AppEnvError::invalid_keys(
                format!("basePath '{base}' is not a directory"),
                vec![String::from("basePath")],
            )));
        }
        self.base_path = base;

        let invalid: Vec<String> = self
            .aliases
            .keys()
            .filter(|name| !is_valid_alias_name(name) || is_builtin_alias(name))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(Arc::new(AppEnvError::invalid_keys(
                format!(
                    "invalid alias name(s): {} (aliases start with '@', contain no path \
                     separator and must not redefine @app, @vendor or @framework)",
                    invalid.join(", ")
                ),
                invalid,
            )));
        }

        // Flag first: resolution below must not re-enter preparation.
        self.prepared = true;
        let resolved = {
            let resolver = AliasResolver::from_prepared(&self);
            self.aliases
                .iter()
                .map(|(name, spec)| {
                    resolver
                        .resolve(spec)
                        .map(|path| (name.clone(), path.into_string()))
                })
                .collect::<AppEnvResult<BTreeMap<_, _>>>()?
        };
        self.aliases = resolved;
        Ok(self)
    }

    /// Borrows `self` when already prepared, otherwise prepares a copy.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`Options::prepare`].
    pub fn ensure_prepared(&self) -> AppEnvResult<Cow<'_, Self>> {
        if self.prepared {
            Ok(Cow::Borrowed(self))
        } else {
            self.clone().prepare().map(Cow::Owned)
        }
    }

    /// Resolves a path specifier against these options.
    ///
    /// # Errors
    ///
    /// Returns [`AppEnvError::UnknownAlias`] or [`AppEnvError::CyclicAlias`]
    /// for unresolvable aliases, or any preparation failure.
    pub fn resolve(&self, spec: &str) -> AppEnvResult<Utf8PathBuf> {
        crate::alias::resolve(spec, self)
    }

    /// Base directory; canonical once prepared.
    #[must_use]
    pub fn base_path(&self) -> &Utf8Path {
        &self.base_path
    }

    /// Vendor directory specifier.
    #[must_use]
    pub fn vendor_path(&self) -> &str {
        &self.vendor_path
    }

    /// Framework directory specifier.
    #[must_use]
    pub fn framework_path(&self) -> &str {
        &self.framework_path
    }

    /// Framework entry file specifier.
    #[must_use]
    pub fn framework_entry_file(&self) -> &str {
        &self.framework_entry_file
    }

    /// Policy applied to missing configuration files.
    #[must_use]
    pub const fn missing_file_policy(&self) -> MissingFilePolicy {
        self.missing_file_policy
    }

    /// Application type identifier passed through to the host factory.
    #[must_use]
    pub fn application_class(&self) -> &str {
        &self.application_class
    }

    /// Constants applied before configuration sources are read.
    #[must_use]
    pub const fn constants(&self) -> &ConstantMap {
        &self.constants
    }

    /// Files loaded for their side effects, in order.
    #[must_use]
    pub fn require_files(&self) -> &[String] {
        &self.require_files
    }

    /// Custom aliases; values are resolved paths once prepared.
    #[must_use]
    pub const fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Opaque user values.
    #[must_use]
    pub const fn extras(&self) -> &ConfigMap {
        &self.extras
    }

    /// Whether the preparation pass has run.
    #[must_use]
    pub const fn is_prepared(&self) -> bool {
        self.prepared
    }
}

fn is_valid_alias_name(name: &str) -> bool {
    name.strip_prefix('@')
        .is_some_and(|rest| !rest.is_empty() && !rest.contains(['/', '\\']))
}

#[cfg(test)]
mod tests;
