//! Error types produced while resolving aliases and loading configuration.

mod constructors;
mod conversions;
mod types;

pub use types::AppEnvError;

pub(crate) use constructors::{create_error, file_error, invalid_data};
