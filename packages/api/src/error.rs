//! Error taxonomy for the remote client.

use store::StoreError;
use thiserror::Error;

/// Message shown when the generation service cannot be reached at all.
pub const GENERATION_UNREACHABLE: &str = "could not reach generation server";

/// Errors returned by [`crate::ApiClient`] and the service traits.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad credentials or duplicate registration; carries the server's text verbatim
    #[error("{0}")]
    Auth(String),

    /// Non-success HTTP status on a data or generation call
    #[error("{message}")]
    Request { status: u16, message: String },

    /// Transport failure (unreachable host, timeout, broken connection)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Operation requires a stored credential and none is present
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Response body was not the JSON shape we expected
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input rejected before any request was made
    #[error("{0}")]
    InvalidInput(String),

    /// Credential could not be persisted
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// HTTP status of a rejected request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show next to the generate control.
    ///
    /// Server-provided messages are shown as-is; transport failures collapse
    /// into [`GENERATION_UNREACHABLE`].
    pub fn generation_message(&self) -> String {
        match self {
            ApiError::Network(_) => GENERATION_UNREACHABLE.to_string(),
            other => other.to_string(),
        }
    }
}
