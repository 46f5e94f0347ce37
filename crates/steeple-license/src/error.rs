//! Error types for license operations

use thiserror::Error;

/// Result type alias for license operations
pub type Result<T> = std::result::Result<T, LicenseError>;

/// License operation errors
#[derive(Error, Debug)]
pub enum LicenseError {
    /// No license key saved; no request was made
    #[error("No license key has been saved")]
    NoKey,

    /// The store could not be reached or answered with an error status
    #[error("License server unreachable: {0}")]
    Unreachable(String),

    /// The store's answer was not the expected JSON document
    #[error("Could not parse license server response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The store answered an activation with a status other than valid
    #[error("License activation rejected (status: {status})")]
    ActivationRejected { status: String },

    /// The integration is missing something the request needs
    #[error("License integration misconfigured: {0}")]
    Config(String),

    /// Local settings could not be read or written
    #[error(transparent)]
    Store(#[from] steeple_core::Error),
}

impl LicenseError {
    /// Whether this failure only means "try again on the next sync"
    ///
    /// Missing keys and transport or parse failures leave local state alone
    /// and are never shown to the user.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::NoKey | Self::Unreachable(_) | Self::ParseError(_)
        )
    }
}

impl From<reqwest::Error> for LicenseError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable(err.to_string())
    }
}
