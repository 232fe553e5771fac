//! Orchestration of option preparation, constants, runtime initialisation,
//! source loading and merging.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    AliasResolver, AppEnvError, AppEnvResult, ConfigMap, ConfigMerger, ConfigSource,
    ConfigSourceLoader, Context, EnvironmentBootstrapper, Host, Options,
};

/// Key seeded into every merged configuration with the canonical base path.
pub(crate) const BASE_PATH_KEY: &str = "basePath";

/// Prepares the environment and returns the merged configuration.
///
/// Runs, in order: option preparation, constant definition, side-effecting
/// `requireFiles` loads, one-time runtime initialisation, then loads every
/// source and deep-merges the results over `{basePath: <base>}`. Later
/// sources win.
///
/// # Errors
///
/// Returns [`AppEnvError::InvalidArgument`] when `sources` is empty or the
/// options are invalid, and propagates the first alias, load or host
/// failure. Files auto-created before a failure remain on disk.
pub fn prepare<H: Host>(
    sources: &[ConfigSource],
    options: &Options,
    ctx: &mut Context<H>,
) -> AppEnvResult<ConfigMap> {
    prepare_with_loader(sources, options, ctx, &ConfigSourceLoader::new())
}

/// Variant of [`prepare`] using a caller-configured loader.
///
/// # Errors
///
/// See [`prepare`].
pub fn prepare_with_loader<H: Host>(
    sources: &[ConfigSource],
    options: &Options,
    ctx: &mut Context<H>,
    loader: &ConfigSourceLoader,
) -> AppEnvResult<ConfigMap> {
    if sources.is_empty() {
        return Err(Arc::new(AppEnvError::invalid_argument(
            "prepare() requires at least one configuration file or configuration structure",
        )));
    }

    let resolver = AliasResolver::new(options)?;
    let options = resolver.options();

    let defined = EnvironmentBootstrapper::apply(options.constants(), ctx.constants_mut());
    tracing::debug!(defined, "applied constants");

    for spec in options.require_files() {
        let path = resolver.resolve(spec)?;
        tracing::debug!(path = %path, "requiring file");
        ctx.host_mut().require_file(&path)?;
    }

    if !ctx.is_initialized() {
        let entry_file = resolver.resolve(options.framework_entry_file())?;
        let aliases = resolver.table()?;
        ctx.initialize_once(&entry_file, aliases)?;
    }

    let mut parts = Vec::with_capacity(sources.len() + 1);
    parts.push(ConfigMap::from_iter([(
        BASE_PATH_KEY.to_owned(),
        Value::String(options.base_path().to_string()),
    )]));
    for source in sources {
        let part = match source {
            ConfigSource::Literal(map) => map.clone(),
            ConfigSource::Path(spec) => {
                let path = resolver.resolve(spec)?;
                loader.load(&path, options.missing_file_policy(), &ConfigMap::new())?
            }
            ConfigSource::Optional { path: spec, defaults } => {
                let path = resolver.resolve(spec)?;
                loader.load(&path, options.missing_file_policy(), defaults)?
            }
        };
        parts.push(part);
    }

    Ok(ConfigMerger::merge(parts))
}

/// Prepares the environment, then builds and activates the application.
///
/// The merged configuration and [`Options::application_class`] are handed
/// to [`Host::create_application`]; the result becomes the context's active
/// application.
///
/// # Errors
///
/// Propagates every failure from [`prepare`] and from the host factory.
pub fn prepare_app<'c, H: Host>(
    sources: &[ConfigSource],
    options: &Options,
    ctx: &'c mut Context<H>,
) -> AppEnvResult<&'c mut H::Application> {
    let prepared = options.ensure_prepared()?;
    let config = prepare(sources, &prepared, ctx)?;
    let app = ctx
        .host_mut()
        .create_application(prepared.application_class(), config)?;
    tracing::debug!(class = prepared.application_class(), "created application");
    Ok(ctx.set_application(app))
}
