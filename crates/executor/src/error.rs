//! Executor error type.
//!
//! Everything that can go wrong between receiving a decoded request and
//! producing its output. The `Display` text is what clients see in the
//! `message` field of an error response.

use domainkv_core::StoreError;
use domainkv_wire::DecodeError;
use thiserror::Error;

/// Errors returned by [`Executor::execute`](crate::Executor::execute).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A storage-layer failure (key/domain not found, not an integer, ...)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Action name not in the command table
    #[error("unknown action: {action}")]
    UnknownAction {
        /// The unrecognized action
        action: String,
    },

    /// A field required by the action was absent
    #[error("missing field '{field}' for action '{action}'")]
    MissingField {
        /// The action being decoded
        action: String,
        /// The absent field
        field: &'static str,
    },

    /// Payload could not be decoded into a request
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Decoder message
        reason: String,
    },

    /// Output did not match the command (bug)
    #[error("internal error: {reason}")]
    Internal {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Check if this is a key or domain not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_not_found())
    }

    /// Check if the request itself was malformed
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownAction { .. } | Error::MissingField { .. } | Error::InvalidRequest { .. }
        )
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::InvalidRequest {
            reason: e.to_string(),
        }
    }
}

/// Result type for executor operations.
pub type Result<T> = std::result::Result<T, Error>;
