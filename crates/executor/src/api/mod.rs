//! High-level typed wrapper for the Executor.
//!
//! The [`Kvs`] struct wraps the [`Executor`] and the [`Command`]/[`Output`]
//! enums with typed method calls, for embedding the store in-process
//! without going through the wire format.
//!
//! # Example
//!
//! ```
//! use domainkv_executor::Kvs;
//!
//! let kvs = Kvs::in_memory();
//! kvs.create_domain("d").unwrap();
//! kvs.insert_skiplist("d", "sl", "1", "value1").unwrap();
//! assert_eq!(kvs.search_skiplist("d", "sl", "1").unwrap(), "value1");
//! assert_eq!(kvs.rank_skiplist("d", "sl", "1").unwrap(), 0);
//! ```

mod skiplist;
mod string;

use std::sync::Arc;

use domainkv_storage::Store;

use crate::{Command, Error, Executor, Output, Result};

/// High-level typed wrapper over an [`Executor`].
///
/// Each method builds the matching [`Command`], executes it, and extracts
/// the typed result.
#[derive(Debug, Clone)]
pub struct Kvs {
    executor: Executor,
}

impl Kvs {
    /// Wrap an existing store.
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            executor: Executor::new(store),
        }
    }

    /// Wrap a fresh, empty store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(Store::new()))
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    // =========================================================================
    // Domain Operations
    // =========================================================================

    /// Create an empty domain.
    pub fn create_domain(&self, domain: &str) -> Result<()> {
        match self.executor.execute(Command::CreateDomain {
            domain: domain.to_string(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for CreateDomain".into(),
            }),
        }
    }
}
