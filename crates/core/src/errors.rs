//! Core error types for the wallet view layer.
//!
//! Parse failures on user text never reach these types: they are recovered
//! locally and surfaced as flags on the view props. What remains here are
//! invalid or malformed settings, lookups against unknown assets or
//! addresses, and failures reported by asset providers.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the wallet views.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Asset '{0}' is not supported")]
    UnsupportedAsset(String),

    #[error("Address '{0}' does not belong to this asset")]
    UnknownAddress(String),

    #[error("Asset provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("View has been unmounted")]
    ViewClosed,

    #[error("No async runtime available: {0}")]
    Runtime(String),
}

/// Errors reported by an asset provider while talking to its backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Recommended fee unavailable: {0}")]
    FeeUnavailable(String),

    #[error("Balance unavailable: {0}")]
    BalanceUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Validation errors for caller-supplied values such as settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
