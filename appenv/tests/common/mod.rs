//! Shared fixtures for the bootstrap integration tests.
//!
//! Provides an in-memory host framework and a temporary application tree
//! laid out like a small project with a `configuration/` directory.

pub mod host;

use anyhow::Result;
use test_helpers::AppTree;

pub use host::{FakeApp, FakeHost};

/// Contents of `configuration/config-basic.toml`.
pub const CONFIG_BASIC: &str = concat!(
    "id = \"config-basic\"\n",
    "name = \"Basic\"\n",
    "\n",
    "[components.cache]\n",
    "class = \"FileCache\"\n",
    "ttl = 60\n",
);

/// Contents of `configuration/config-extended.json`.
pub const CONFIG_EXTENDED: &str = r#"{
  "id": "config-extended",
  "components": { "cache": { "ttl": 300 }, "db": { "dsn": "sqlite::memory:" } }
}
"#;

/// Builds an application tree holding the two configuration files, an empty
/// `runtime/` directory and a framework entry file under `vendor/`.
pub fn configuration_tree() -> Result<AppTree> {
    let tree = AppTree::new()?;
    tree.write("configuration/config-basic.toml", CONFIG_BASIC)?;
    tree.write("configuration/config-extended.json", CONFIG_EXTENDED)?;
    tree.write("vendor/framework/bootstrap.toml", "")?;
    tree.mkdir("runtime")?;
    Ok(tree)
}
