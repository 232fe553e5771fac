//! Extensions for mapping errors to `AppEnvResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `AppEnvResult<T>` alias (`Result<T, Arc<AppEnvError>>`).
//!
//! # Examples
//!
//! ```
//! use appenv::{AppEnvResult, AppEnvResultExt};
//!
//! fn decode() -> AppEnvResult<u16> {
//!     // serde_json::Error implements Into<AppEnvError>
//!     serde_json::from_str("8080").into_app_env()
//! }
//! # assert_eq!(decode().ok(), Some(8080));
//! ```

use std::sync::Arc;

use crate::{AppEnvError, AppEnvResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<AppEnvError>` into an `AppEnvResult<T>`.
pub trait AppEnvResultExt<T, E> {
    /// Convert `Result<T, E>` into `AppEnvResult<T>` using `Into<AppEnvError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<AppEnvError>`.
    fn into_app_env(self) -> AppEnvResult<T>;
}

impl<T, E> AppEnvResultExt<T, E> for Result<T, E>
where
    E: Into<AppEnvError>,
{
    fn into_app_env(self) -> AppEnvResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
