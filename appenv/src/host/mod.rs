//! Boundary to the host application framework.
//!
//! The bootstrap core never builds applications itself. It calls a [`Host`]
//! for runtime initialisation, side-effecting file loads, the application
//! factory and teardown, and keeps what would otherwise be process globals in
//! a caller-owned [`Context`].

mod teardown;

use std::fmt;

use camino::Utf8Path;

pub use teardown::TeardownFlags;

use crate::error::file_error;
use crate::{AliasTable, AppEnvResult, ConfigMap, ConstantTable};

/// Hooks implemented by the host framework.
pub trait Host {
    /// Application object produced by [`Host::create_application`].
    type Application;

    /// Loads the framework runtime. Called at most once per [`Context`].
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`crate::AppEnvError::Host`].
    fn initialize(&mut self, entry_file: &Utf8Path, aliases: &AliasTable) -> AppEnvResult<()>;

    /// Loads `path` for its side effects.
    ///
    /// The default implementation only checks that `path` is a readable
    /// regular file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppEnvError::File`] when the file cannot be read.
    fn require_file(&mut self, path: &Utf8Path) -> AppEnvResult<()> {
        let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;
        if metadata.is_file() {
            Ok(())
        } else {
            Err(file_error(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ))
        }
    }

    /// Builds an application of type `class` from the merged configuration.
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`crate::AppEnvError::Host`].
    fn create_application(
        &mut self,
        class: &str,
        config: ConfigMap,
    ) -> AppEnvResult<Self::Application>;

    /// Closes the application's session, if it has one.
    fn close_session(&mut self, _app: &mut Self::Application) {}

    /// Flushes pending log messages.
    fn flush_log(&mut self, _app: &mut Self::Application) {}

    /// Whether a dependency-injection container currently exists.
    fn has_container(&self) -> bool {
        false
    }

    /// Clears every definition from the container.
    fn clear_container(&mut self) {}

    /// Discards the container.
    fn drop_container(&mut self) {}
}

/// Caller-owned bootstrap state: defined constants, the runtime
/// initialisation flag, the global alias table and the active application.
///
/// Hold one long-lived context to get single-process semantics.
pub struct Context<H: Host> {
    host: H,
    constants: ConstantTable,
    aliases: AliasTable,
    initialized: bool,
    application: Option<H::Application>,
}

impl<H: Host + fmt::Debug> fmt::Debug for Context<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("host", &self.host)
            .field("constants", &self.constants)
            .field("aliases", &self.aliases)
            .field("initialized", &self.initialized)
            .field("has_application", &self.application.is_some())
            .finish()
    }
}

impl<H: Host> Context<H> {
    /// Creates a fresh context around `host`.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            constants: ConstantTable::new(),
            aliases: AliasTable::new(),
            initialized: false,
            application: None,
        }
    }

    /// The host framework.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host framework.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Constants defined so far.
    #[must_use]
    pub const fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub(crate) const fn constants_mut(&mut self) -> &mut ConstantTable {
        &mut self.constants
    }

    /// Global alias table populated when the runtime is initialised.
    #[must_use]
    pub const fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Whether the runtime initialisation hook has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The active application, if one has been created.
    #[must_use]
    pub const fn application(&self) -> Option<&H::Application> {
        self.application.as_ref()
    }

    /// Mutable access to the active application.
    pub const fn application_mut(&mut self) -> Option<&mut H::Application> {
        self.application.as_mut()
    }

    /// Runs the runtime hook unless it already ran for this context, then
    /// merges `aliases` into the global table.
    pub(crate) fn initialize_once(
        &mut self,
        entry_file: &Utf8Path,
        aliases: AliasTable,
    ) -> AppEnvResult<()> {
        if self.initialized {
            tracing::debug!("host runtime already initialised; skipping");
            return Ok(());
        }
        self.host.initialize(entry_file, &aliases)?;
        self.aliases.extend(aliases);
        self.initialized = true;
        tracing::info!(entry_file = %entry_file, "initialised host runtime");
        Ok(())
    }

    pub(crate) fn set_application(&mut self, app: H::Application) -> &mut H::Application {
        self.application.insert(app)
    }

    /// Releases global state selected by `flags`.
    ///
    /// Steps run in order: close session, flush log, drop the active
    /// application, clear the container, drop the container. Session, log
    /// and application steps do nothing without an active application; the
    /// container is only cleared when the host reports one.
    ///
    /// Returns `false` when `flags` selects nothing.
    pub fn teardown(&mut self, flags: TeardownFlags) -> bool {
        if flags.is_empty() {
            return false;
        }
        if let Some(app) = self.application.as_mut() {
            if flags.close_session {
                self.host.close_session(app);
            }
            if flags.flush_log {
                self.host.flush_log(app);
            }
        }
        if flags.null_app && self.application.take().is_some() {
            tracing::debug!("released active application");
        }
        if flags.clear_container && self.host.has_container() {
            self.host.clear_container();
        }
        if flags.null_container {
            self.host.drop_container();
        }
        true
    }
}

#[cfg(test)]
mod tests;
