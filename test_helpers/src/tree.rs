//! Temporary application directory trees.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory standing in for an application base path.
///
/// The root is canonicalised so paths built from it compare equal to the
/// canonical base path produced by option preparation.
///
/// # Examples
///
/// ```
/// use test_helpers::AppTree;
///
/// # fn main() -> anyhow::Result<()> {
/// let tree = AppTree::new()?;
/// let file = tree.write("configuration/app.toml", "id = \"demo\"\n")?;
/// assert!(file.starts_with(tree.root()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AppTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl AppTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its
    /// canonical path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create application directory")?;
        let canonical =
            std::fs::canonicalize(dir.path()).context("canonicalise application directory")?;
        let root = Utf8PathBuf::from_path_buf(canonical)
            .map_err(|p| anyhow!("temporary directory is not valid UTF-8: {}", p.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Canonical root of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Joins `relative` onto the root without touching the filesystem.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Creates `relative` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn mkdir(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.path(relative);
        std::fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(path)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Reads `relative` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.path(relative);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }

    /// Whether `relative` exists.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Number of entries directly inside `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be listed.
    pub fn entry_count(&self, relative: &str) -> Result<usize> {
        let path = self.path(relative);
        Ok(std::fs::read_dir(&path)
            .with_context(|| format!("list {path}"))?
            .count())
    }
}
