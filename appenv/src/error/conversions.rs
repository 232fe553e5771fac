//! Trait-based conversions between external error types and `AppEnvError`.

use figment::Error as FigmentError;

use super::AppEnvError;

/// Option values that fail to decode are caller input errors.
impl From<serde_json::Error> for AppEnvError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_argument(format!("invalid option value: {e}"))
    }
}

impl From<FigmentError> for AppEnvError {
    fn from(e: FigmentError) -> Self {
        let path = e
            .metadata
            .as_ref()
            .and_then(|meta| meta.source.as_ref())
            .and_then(|source| source.file_path())
            .and_then(|p| camino::Utf8Path::from_path(p).map(camino::Utf8Path::to_path_buf))
            .unwrap_or_default();
        Self::File {
            path,
            source: Box::new(e),
        }
    }
}
