//! Resolution of `@alias` and relative path specifiers.
//!
//! A specifier starting with `.` is joined onto the base path, one starting
//! with `@` is split at the first path separator into an alias name and a
//! remainder, and anything else is returned verbatim. Alias targets are
//! themselves specifiers and resolve recursively; a chain that revisits an
//! alias fails with [`AppEnvError::CyclicAlias`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use camino::Utf8PathBuf;

use crate::{AppEnvError, AppEnvResult, Options};

/// Alias for the application base directory.
pub(crate) const APP_ALIAS: &str = "@app";
/// Alias for the vendor directory.
pub(crate) const VENDOR_ALIAS: &str = "@vendor";
/// Alias for the framework directory.
pub(crate) const FRAMEWORK_ALIAS: &str = "@framework";

/// Alias names mapped to resolved absolute paths.
pub type AliasTable = BTreeMap<String, Utf8PathBuf>;

pub(crate) fn is_builtin_alias(name: &str) -> bool {
    matches!(name, APP_ALIAS | VENDOR_ALIAS | FRAMEWORK_ALIAS)
}

/// Resolves path specifiers against a prepared set of [`Options`].
///
/// # Examples
///
/// ```rust,no_run
/// use appenv::{AliasResolver, Options};
///
/// # fn run() -> appenv::AppEnvResult<()> {
/// let options = Options::new("/srv/app").with_alias("@runtime", "@app/runtime");
/// let resolver = AliasResolver::new(&options)?;
/// assert_eq!(resolver.resolve("@runtime/cache")?, "/srv/app/runtime/cache");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AliasResolver<'a> {
    options: Cow<'a, Options>,
}

impl<'a> AliasResolver<'a> {
    /// Builds a resolver, preparing `options` first when necessary.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`Options::prepare`].
    pub fn new(options: &'a Options) -> AppEnvResult<Self> {
        Ok(Self {
            options: options.ensure_prepared()?,
        })
    }

    /// Builds a resolver over options whose preparation flag is already set.
    pub(crate) const fn from_prepared(options: &'a Options) -> Self {
        Self {
            options: Cow::Borrowed(options),
        }
    }

    /// The prepared options backing this resolver.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Resolves `spec` to a concrete path.
    ///
    /// # Errors
    ///
    /// Returns [`AppEnvError::UnknownAlias`] when the alias is not
    /// registered and [`AppEnvError::CyclicAlias`] when alias targets form a
    /// loop.
    pub fn resolve(&self, spec: &str) -> AppEnvResult<Utf8PathBuf> {
        let mut stack = Vec::new();
        self.resolve_inner(spec, &mut stack)
    }

    /// Resolves every built-in and custom alias.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure encountered.
    pub fn table(&self) -> AppEnvResult<AliasTable> {
        [APP_ALIAS, VENDOR_ALIAS, FRAMEWORK_ALIAS]
            .into_iter()
            .chain(self.options.aliases().keys().map(String::as_str))
            .map(|name| self.resolve(name).map(|path| (name.to_owned(), path)))
            .collect()
    }

    fn resolve_inner(&self, spec: &str, stack: &mut Vec<String>) -> AppEnvResult<Utf8PathBuf> {
        if spec.starts_with('.') {
            return Ok(self.options.base_path().join(spec));
        }
        if !spec.starts_with('@') {
            return Ok(Utf8PathBuf::from(spec));
        }
        let (alias, rest) = split_alias(spec);
        let target = self.alias_target(alias, stack)?;
        Ok(match rest {
            Some(rest) => target.join(rest),
            None => target,
        })
    }

    fn alias_target(&self, alias: &str, stack: &mut Vec<String>) -> AppEnvResult<Utf8PathBuf> {
        let spec = match alias {
            APP_ALIAS => return Ok(self.options.base_path().to_path_buf()),
            VENDOR_ALIAS => self.options.vendor_path(),
            FRAMEWORK_ALIAS => self.options.framework_path(),
            _ => self
                .options
                .aliases()
                .get(alias)
                .map(String::as_str)
                .ok_or_else(|| {
                    Arc::new(AppEnvError::UnknownAlias {
                        alias: alias.to_owned(),
                    })
                })?,
        };
        if stack.iter().any(|seen| seen == alias) {
            let mut cycle = stack.clone();
            cycle.push(alias.to_owned());
            return Err(Arc::new(AppEnvError::CyclicAlias {
                cycle: cycle.join(" -> "),
            }));
        }
        stack.push(alias.to_owned());
        let result = self.resolve_inner(spec, stack);
        stack.pop();
        result
    }
}

/// Splits `@name/rest` at the first `/`, or the first `\` when no `/` is
/// present.
fn split_alias(spec: &str) -> (&str, Option<&str>) {
    let split = spec.split_once('/').or_else(|| spec.split_once('\\'));
    match split {
        Some((alias, rest)) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            (alias, (!rest.is_empty()).then_some(rest))
        }
        None => (spec, None),
    }
}

/// Resolves `spec` against `options`, preparing them first when necessary.
///
/// # Errors
///
/// Returns [`AppEnvError::UnknownAlias`] or [`AppEnvError::CyclicAlias`]
/// for unresolvable aliases, or any preparation failure.
pub fn resolve(spec: &str, options: &Options) -> AppEnvResult<Utf8PathBuf> {
    AliasResolver::new(options)?.resolve(spec)
}
