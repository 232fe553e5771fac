//! In-memory host framework recording every hook invocation.

use appenv::{AliasTable, AppEnvError, AppEnvResult, ConfigMap, Host};
use camino::{Utf8Path, Utf8PathBuf};

/// Application object produced by [`FakeHost`].
#[derive(Debug)]
pub struct FakeApp {
    pub class: String,
    pub config: ConfigMap,
    pub session_open: bool,
    pub log_flushed: bool,
}

/// Host that records hook calls instead of loading a framework.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub initialized_with: Vec<(Utf8PathBuf, AliasTable)>,
    pub required: Vec<Utf8PathBuf>,
    pub container: Option<Vec<String>>,
    pub events: Vec<&'static str>,
    pub reject_class: Option<String>,
}

impl FakeHost {
    /// Host with a populated container.
    pub fn with_container() -> Self {
        Self {
            container: Some(vec!["db".to_owned(), "cache".to_owned()]),
            ..Self::default()
        }
    }
}

impl Host for FakeHost {
    type Application = FakeApp;

    fn initialize(&mut self, entry_file: &Utf8Path, aliases: &AliasTable) -> AppEnvResult<()> {
        self.events.push("initialize");
        self.initialized_with
            .push((entry_file.to_path_buf(), aliases.clone()));
        Ok(())
    }

    fn require_file(&mut self, path: &Utf8Path) -> AppEnvResult<()> {
        self.events.push("require_file");
        if !path.is_file() {
            return Err(AppEnvError::host(std::io::Error::other(format!(
                "cannot require {path}"
            )))
            .into());
        }
        self.required.push(path.to_path_buf());
        Ok(())
    }

    fn create_application(&mut self, class: &str, config: ConfigMap) -> AppEnvResult<FakeApp> {
        self.events.push("create_application");
        if self.reject_class.as_deref() == Some(class) {
            return Err(AppEnvError::host(std::io::Error::other(format!(
                "unknown application class {class}"
            )))
            .into());
        }
        Ok(FakeApp {
            class: class.to_owned(),
            config,
            session_open: true,
            log_flushed: false,
        })
    }

    fn close_session(&mut self, app: &mut FakeApp) {
        self.events.push("close_session");
        app.session_open = false;
    }

    fn flush_log(&mut self, app: &mut FakeApp) {
        self.events.push("flush_log");
        app.log_flushed = true;
    }

    fn has_container(&self) -> bool {
        self.container.is_some()
    }

    fn clear_container(&mut self) {
        self.events.push("clear_container");
        if let Some(definitions) = self.container.as_mut() {
            definitions.clear();
        }
    }

    fn drop_container(&mut self) {
        self.events.push("drop_container");
        self.container = None;
    }
}
