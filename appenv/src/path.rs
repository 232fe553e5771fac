//! Filesystem path helpers shared by option preparation and file loading.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::AppEnvResult;
use crate::error::file_error;

/// Canonicalise `p` using platform-specific rules.
///
/// Returns an absolute, normalised path with symlinks resolved. On Windows
/// the `dunce` crate is used to avoid introducing UNC prefixes in
/// diagnostic messages.
///
/// # Errors
///
/// Returns an [`crate::AppEnvError::File`] if canonicalisation fails or the
/// result is not valid UTF-8.
pub(crate) fn canonicalise(p: &Utf8Path) -> AppEnvResult<Utf8PathBuf> {
    #[cfg(windows)]
    let canonical = dunce::canonicalize(p).map_err(|e| file_error(p, e))?;
    #[cfg(not(windows))]
    let canonical = std::fs::canonicalize(p).map_err(|e| file_error(p, e))?;
    Utf8PathBuf::from_path_buf(canonical).map_err(|non_utf8| {
        file_error(
            p,
            format!("canonical path is not valid UTF-8: {}", non_utf8.display()),
        )
    })
}

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
pub(crate) fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Open the parent directory of `path` via `cap-std` and extract the file name.
///
/// # Errors
///
/// Returns an [`std::io::Error`] if the file name cannot be determined or the
/// parent directory cannot be opened.
pub(crate) fn open_parent_dir_and_name(path: &Utf8Path) -> std::io::Result<(Dir, String)> {
    let parent = parent_or_dot(path);
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "cannot determine file name for configuration file path",
        )
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name.to_owned()))
}
