//! String table operations.

use super::Kvs;
use crate::{Command, Error, Output, Result};

impl Kvs {
    // =========================================================================
    // String Operations
    // =========================================================================

    /// Set a string value, creating or overwriting the key.
    pub fn set_string(&self, domain: &str, key: &str, value: &str) -> Result<()> {
        match self.executor.execute(Command::SetString {
            domain: domain.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for SetString".into(),
            }),
        }
    }

    /// Get a string value.
    pub fn get_string(&self, domain: &str, key: &str) -> Result<String> {
        match self.executor.execute(Command::GetString {
            domain: domain.to_string(),
            key: key.to_string(),
        })? {
            Output::Value(v) => Ok(v),
            _ => Err(Error::Internal {
                reason: "Unexpected output for GetString".into(),
            }),
        }
    }

    /// Add one to an integer value and return the result.
    ///
    /// Fails if the key is absent or its value does not parse as an `i64`.
    pub fn increment(&self, domain: &str, key: &str) -> Result<i64> {
        match self.executor.execute(Command::Increment {
            domain: domain.to_string(),
            key: key.to_string(),
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Increment".into(),
            }),
        }
    }

    /// Subtract one from an integer value and return the result.
    pub fn decrement(&self, domain: &str, key: &str) -> Result<i64> {
        match self.executor.execute(Command::Decrement {
            domain: domain.to_string(),
            key: key.to_string(),
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Decrement".into(),
            }),
        }
    }
}
