//! Store-level error taxonomy
//!
//! `StoreError` covers every failure the storage layer can produce. The
//! `Display` text of each variant is the human-readable message that ends
//! up in the `message` field of an error response, so it must stay stable.
//!
//! ## Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | KeyNotFound | Key absent from a string table or skip list |
//! | DomainNotFound | Domain was never created |
//! | DomainAlreadyExists | `create_domain` on an existing name |
//! | NotAnInteger | Increment/decrement target is not a base-10 integer |
//! | Overflow | Increment/decrement would leave the `i64` range |

use thiserror::Error;

/// Errors produced by the string table, skip list, domain and store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Point lookup, delete, rank, increment or decrement on an absent key
    #[error("key not found")]
    KeyNotFound {
        /// The key that was looked up
        key: String,
    },

    /// Operation referenced a domain that was never created
    #[error("domain not found")]
    DomainNotFound {
        /// The requested domain name
        domain: String,
    },

    /// `create_domain` referenced an existing name
    #[error("domain already exists")]
    DomainAlreadyExists {
        /// The duplicate domain name
        domain: String,
    },

    /// Stored value cannot be parsed as a signed 64-bit integer
    #[error("value is not an integer")]
    NotAnInteger {
        /// The key holding the value
        key: String,
        /// The value that failed to parse
        value: String,
    },

    /// Increment/decrement would overflow
    #[error("integer overflow")]
    Overflow {
        /// The key holding the counter
        key: String,
    },
}

impl StoreError {
    /// Shorthand for [`StoreError::KeyNotFound`]
    pub fn key_not_found(key: impl Into<String>) -> Self {
        StoreError::KeyNotFound { key: key.into() }
    }

    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::KeyNotFound { .. } => "KeyNotFound",
            StoreError::DomainNotFound { .. } => "DomainNotFound",
            StoreError::DomainAlreadyExists { .. } => "DomainAlreadyExists",
            StoreError::NotAnInteger { .. } => "NotAnInteger",
            StoreError::Overflow { .. } => "Overflow",
        }
    }

    /// Check if this is a not-found error (key or domain)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::KeyNotFound { .. } | StoreError::DomainNotFound { .. }
        )
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
