//! Errors raised while configuring the command line driver.

use thiserror::Error;

/// Errors that can occur before a command runs.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A preferences file could not be decoded.
    #[error("invalid preferences in {path}: {message}")]
    Preferences {
        /// File that failed to decode.
        path: String,
        /// Decoder message.
        message: String,
    },
}
