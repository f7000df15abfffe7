//! Error types for the Emoteport domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Only [`Error::UserNotFound`] is ever shown to API clients; upstream
//! failures are absorbed at the adapter boundary.

use thiserror::Error;

/// The top-level error type for Emoteport operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The username does not resolve to a channel. The display string is
    /// part of the HTTP wire contract.
    #[error("User \"{0}\" not found")]
    UserNotFound(String),

    // --- Upstream errors ---
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// A failure talking to one third-party API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("Request to {provider} failed with status {status_code}: {message}")]
    Status {
        provider: String,
        status_code: u16,
        message: String,
    },

    #[error("Authentication with {0} failed")]
    Unauthorized(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl UpstreamError {
    /// Whether the upstream rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
