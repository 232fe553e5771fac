//! Application environment bootstrap helpers.
//!
//! `appenv` resolves `@alias` path specifiers against a base directory,
//! loads an ordered list of configuration sources (files with missing-file
//! policies, or literal mappings) and deep-merges them into a single
//! configuration tree before a host framework builds its application.
//!
//! ```rust,no_run
//! use appenv::{ConfigSource, Context, MissingFilePolicy, Options, prepare};
//! # use appenv::{AppEnvResult, Host};
//! # use camino::Utf8Path;
//! # struct MyHost;
//! # impl Host for MyHost {
//! #     type Application = serde_json::Value;
//! #     fn initialize(&mut self, _: &Utf8Path, _: &appenv::AliasTable) -> AppEnvResult<()> { Ok(()) }
//! #     fn create_application(&mut self, _: &str, c: appenv::ConfigMap) -> AppEnvResult<Self::Application> {
//! #         Ok(serde_json::Value::Object(c))
//! #     }
//! # }
//! # fn run() -> AppEnvResult<()> {
//! let options = Options::new("/srv/app")
//!     .with_alias("@cfg", "./config")
//!     .with_missing_file_policy(MissingFilePolicy::UseDefault);
//! let mut ctx = Context::new(MyHost);
//! let config = prepare(
//!     &[
//!         ConfigSource::path("@cfg/app.toml"),
//!         ConfigSource::optional("@cfg/local.toml", serde_json::Map::new()),
//!     ],
//!     &options,
//!     &mut ctx,
//! )?;
//! assert!(config.contains_key("basePath"));
//! # Ok(())
//! # }
//! ```

mod alias;
mod environment;
mod error;
mod host;
mod merge;
mod options;
mod path;
mod pipeline;
mod result_ext;
mod source;

pub use alias::{AliasResolver, AliasTable, resolve};
pub use environment::{
    APP_DEBUG, APP_ENV, ConstantMap, ConstantTable, DEFAULT_ENVIRONMENT, EnvironmentBootstrapper,
};
pub use error::AppEnvError;
pub use host::{Context, Host, TeardownFlags};
pub use merge::{ConfigMerger, merge_maps, merge_value};
pub use options::{MissingFilePolicy, Options};
pub use pipeline::{prepare, prepare_app, prepare_with_loader};
pub use result_ext::AppEnvResultExt;
pub use source::{
    ConfigCodec, ConfigFormat, ConfigSource, ConfigSourceLoader, DEFAULT_FILE_COMMENT,
};

/// Nested configuration structure produced by loading and merging sources.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Shared-ownership result alias used across the crate.
pub type AppEnvResult<T> = Result<T, std::sync::Arc<AppEnvError>>;
