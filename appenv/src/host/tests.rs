//! Unit tests for the host context and teardown ordering.

use camino::Utf8Path;
use rstest::rstest;

use super::{Context, Host, TeardownFlags};
use crate::{AliasTable, AppEnvResult, ConfigMap};

#[derive(Debug, Default)]
struct RecordingHost {
    calls: Vec<&'static str>,
    container: bool,
}

impl Host for RecordingHost {
    type Application = String;

    fn initialize(&mut self, _entry_file: &Utf8Path, _aliases: &AliasTable) -> AppEnvResult<()> {
        self.calls.push("initialize");
        self.container = true;
        Ok(())
    }

    fn create_application(&mut self, class: &str, _config: ConfigMap) -> AppEnvResult<String> {
        Ok(class.to_owned())
    }

    fn close_session(&mut self, _app: &mut String) {
        self.calls.push("close_session");
    }

    fn flush_log(&mut self, _app: &mut String) {
        self.calls.push("flush_log");
    }

    fn has_container(&self) -> bool {
        self.container
    }

    fn clear_container(&mut self) {
        self.calls.push("clear_container");
    }

    fn drop_container(&mut self) {
        self.calls.push("drop_container");
        self.container = false;
    }
}

fn initialised_context() -> Context<RecordingHost> {
    let mut ctx = Context::new(RecordingHost::default());
    ctx.initialize_once(Utf8Path::new("/fw/bootstrap.toml"), AliasTable::new())
        .expect("initialise host");
    ctx.set_application(String::from("console"));
    ctx.host_mut().calls.clear();
    ctx
}

#[rstest]
fn initialisation_runs_once_and_merges_aliases() {
    let mut ctx = Context::new(RecordingHost::default());
    let first = AliasTable::from([(String::from("@cfg"), "/app/cfg".into())]);
    let second = AliasTable::from([(String::from("@other"), "/app/other".into())]);
    ctx.initialize_once(Utf8Path::new("/fw/bootstrap.toml"), first)
        .expect("first initialisation");
    ctx.initialize_once(Utf8Path::new("/fw/bootstrap.toml"), second)
        .expect("second initialisation");
    assert!(ctx.is_initialized());
    assert_eq!(ctx.host().calls, ["initialize"]);
    assert!(ctx.aliases().contains_key("@cfg"));
    assert!(!ctx.aliases().contains_key("@other"));
}

#[rstest]
fn default_teardown_runs_steps_in_order_and_keeps_container() {
    let mut ctx = initialised_context();
    assert!(ctx.teardown(TeardownFlags::DEFAULT));
    assert_eq!(
        ctx.host().calls,
        ["close_session", "flush_log", "clear_container"]
    );
    assert!(ctx.application().is_none());
    assert!(ctx.host().has_container());
}

#[rstest]
fn default_flags_match_the_default_preset() {
    assert_eq!(TeardownFlags::default(), TeardownFlags::DEFAULT);
    let mut ctx = initialised_context();
    assert!(ctx.teardown(TeardownFlags::default()));
    assert!(ctx.application().is_none());
}

#[rstest]
fn everything_also_drops_container() {
    let mut ctx = initialised_context();
    assert!(ctx.teardown(TeardownFlags::EVERYTHING));
    assert_eq!(
        ctx.host().calls,
        ["close_session", "flush_log", "clear_container", "drop_container"]
    );
    assert!(!ctx.host().has_container());
}

#[rstest]
fn nothing_is_a_no_op() {
    let mut ctx = initialised_context();
    assert!(!ctx.teardown(TeardownFlags::NOTHING));
    assert!(ctx.host().calls.is_empty());
    assert!(ctx.application().is_some());
}

#[rstest]
fn application_steps_are_skipped_without_application() {
    let mut ctx = initialised_context();
    ctx.teardown(TeardownFlags {
        null_app: true,
        ..TeardownFlags::NOTHING
    });
    ctx.host_mut().calls.clear();
    ctx.teardown(TeardownFlags::DEFAULT);
    assert_eq!(ctx.host().calls, ["clear_container"]);
}

#[rstest]
fn container_clear_requires_container() {
    let mut ctx = Context::new(RecordingHost::default());
    ctx.teardown(TeardownFlags {
        clear_container: true,
        ..TeardownFlags::NOTHING
    });
    assert!(ctx.host().calls.is_empty());
}

#[rstest]
fn default_require_file_accepts_only_regular_files() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let root = Utf8Path::from_path(dir.path()).expect("utf-8 temp dir");
    let file = root.join("init.toml");
    std::fs::write(&file, "").expect("write file");
    let mut host = RecordingHost::default();
    assert!(host.require_file(&file).is_ok());
    assert!(host.require_file(root).is_err());
    assert!(host.require_file(&root.join("absent.toml")).is_err());
}
