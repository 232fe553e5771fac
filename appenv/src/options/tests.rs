//! Unit tests for option decoding and preparation.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::{AppTree, cwd};

use super::{MissingFilePolicy, Options};
use crate::ConfigMap;

#[fixture]
fn tree() -> AppTree {
    AppTree::new().expect("create application tree")
}

fn map(value: serde_json::Value) -> ConfigMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[rstest]
fn from_map_applies_defaults(tree: AppTree) -> Result<()> {
    let options =
        Options::from_map(map(json!({ "basePath": tree.root() }))).map_err(|e| anyhow!("{e}"))?;
    ensure!(options.vendor_path() == "./vendor", "vendor default");
    ensure!(options.framework_path() == "@vendor/framework", "framework default");
    ensure!(
        options.framework_entry_file() == "@framework/bootstrap.toml",
        "entry file default"
    );
    ensure!(
        options.missing_file_policy() == MissingFilePolicy::AutoCreate,
        "policy default"
    );
    ensure!(options.application_class() == "console", "class default");
    ensure!(!options.is_prepared(), "decoded options start unprepared");
    Ok(())
}

#[rstest]
fn from_map_decodes_every_key(tree: AppTree) -> Result<()> {
    let options = Options::from_map(map(json!({
        "basePath": tree.root(),
        "vendorPath": "./deps",
        "frameworkPath": "@vendor/acme",
        "frameworkEntryFile": "@framework/boot.toml",
        "missingFilePolicy": "default",
        "applicationClass": "web",
        "constants": { "APP_ENV": "dev" },
        "requireFiles": ["./bootstrap.toml"],
        "aliases": { "@cfg": "./configuration" },
        "extras": { "anything": [1, 2, 3] },
    })))
    .map_err(|e| anyhow!("{e}"))?;
    ensure!(
        options.missing_file_policy() == MissingFilePolicy::UseDefault,
        "policy alias"
    );
    ensure!(options.application_class() == "web", "class");
    ensure!(options.constants().get("APP_ENV") == Some(&json!("dev")), "constants");
    ensure!(options.require_files() == ["./bootstrap.toml"], "require files");
    ensure!(
        options.aliases().get("@cfg").map(String::as_str) == Some("./configuration"),
        "aliases"
    );
    ensure!(options.extras().get("anything") == Some(&json!([1, 2, 3])), "extras");
    Ok(())
}

#[rstest]
fn from_map_reports_missing_and_unknown_keys_together() -> Result<()> {
    let err = Options::from_map(map(json!({ "zeta": 1, "alpha": true })))
        .err()
        .ok_or_else(|| anyhow!("expected invalid options"))?;
    ensure!(err.is_invalid_argument(), "unexpected error {err}");
    ensure!(
        err.keys() == ["basePath", "alpha", "zeta"],
        "unexpected keys {:?}",
        err.keys()
    );
    let message = err.to_string();
    ensure!(message.contains("missing: basePath"), "message: {message}");
    ensure!(message.contains("invalid option item(s): alpha, zeta"), "message: {message}");
    Ok(())
}

#[rstest]
fn from_map_rejects_malformed_values(tree: AppTree) -> Result<()> {
    let err = Options::from_map(map(json!({
        "basePath": tree.root(),
        "missingFilePolicy": "sometimes",
    })))
    .err()
    .ok_or_else(|| anyhow!("expected decode failure"))?;
    ensure!(err.is_invalid_argument(), "unexpected error {err}");
    Ok(())
}

#[rstest]
fn prepare_canonicalises_base_and_resolves_aliases(tree: AppTree) -> Result<()> {
    tree.mkdir("configuration")?;
    let options = Options::new(tree.path("configuration/.."))
        .with_alias("@cfg", "./configuration")
        .with_alias("@local", "@cfg/local")
        .prepare()
        .map_err(|e| anyhow!("{e}"))?;
    ensure!(options.is_prepared(), "flag set");
    ensure!(options.base_path() == tree.root(), "base {}", options.base_path());
    let expected_cfg = tree.root().join("./configuration");
    ensure!(
        options.aliases().get("@cfg").map(String::as_str) == Some(expected_cfg.as_str()),
        "@cfg resolved"
    );
    let expected_local = expected_cfg.join("local");
    ensure!(
        options.aliases().get("@local").map(String::as_str) == Some(expected_local.as_str()),
        "@local resolved through @cfg"
    );
    Ok(())
}

#[rstest]
fn prepare_is_idempotent(tree: AppTree) -> Result<()> {
    let once = Options::new(tree.root())
        .with_alias("@cfg", "./configuration")
        .prepare()
        .map_err(|e| anyhow!("{e}"))?;
    let twice = once.clone().prepare().map_err(|e| anyhow!("{e}"))?;
    ensure!(once == twice, "second preparation changed options");
    Ok(())
}

#[rstest]
fn setters_reset_preparation(tree: AppTree) -> Result<()> {
    let prepared = Options::new(tree.root())
        .prepare()
        .map_err(|e| anyhow!("{e}"))?;
    let changed = prepared.with_alias("@cfg", "./configuration");
    ensure!(!changed.is_prepared(), "new alias requires preparation");
    Ok(())
}

#[rstest]
fn relative_base_path_uses_working_directory(tree: AppTree) -> Result<()> {
    let _guard = cwd::set_dir(tree.root())?;
    let options = Options::new(".").prepare().map_err(|e| anyhow!("{e}"))?;
    ensure!(options.base_path() == tree.root(), "base {}", options.base_path());
    Ok(())
}

#[rstest]
fn prepare_rejects_missing_base_directory(tree: AppTree) -> Result<()> {
    let err = Options::new(tree.path("absent"))
        .prepare()
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(err.is_invalid_argument(), "unexpected error {err}");
    ensure!(err.keys() == ["basePath"], "unexpected error {err}");
    Ok(())
}

#[rstest]
fn prepare_rejects_file_as_base(tree: AppTree) -> Result<()> {
    let file = tree.write("not-a-dir.txt", "")?;
    let err = Options::new(file)
        .prepare()
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(err.keys() == ["basePath"], "unexpected error {err}");
    Ok(())
}

#[rstest]
#[case("cfg")]
#[case("@")]
#[case("@a/b")]
#[case("@app")]
#[case("@vendor")]
#[case("@framework")]
fn prepare_rejects_invalid_alias_names(tree: AppTree, #[case] name: &str) -> Result<()> {
    let err = Options::new(tree.root())
        .with_alias(name, "./x")
        .prepare()
        .err()
        .ok_or_else(|| anyhow!("expected invalid alias name"))?;
    ensure!(err.is_invalid_argument(), "unexpected error {err}");
    ensure!(err.keys() == [name], "unexpected keys {:?}", err.keys());
    Ok(())
}

#[rstest]
fn prepare_reports_unknown_alias_in_alias_value(tree: AppTree) -> Result<()> {
    let err = Options::new(tree.root())
        .with_alias("@cfg", "@nowhere/config")
        .prepare()
        .err()
        .ok_or_else(|| anyhow!("expected unknown alias"))?;
    ensure!(err.is_unknown_alias(), "unexpected error {err}");
    Ok(())
}

#[rstest]
fn prepare_detects_custom_alias_cycles(tree: AppTree) -> Result<()> {
    let err = Options::new(tree.root())
        .with_alias("@a", "@b/x")
        .with_alias("@b", "@a/y")
        .prepare()
        .err()
        .ok_or_else(|| anyhow!("expected cycle"))?;
    ensure!(
        matches!(*err, crate::AppEnvError::CyclicAlias { .. }),
        "unexpected error {err}"
    );
    Ok(())
}
