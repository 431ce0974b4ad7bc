//! Per-domain string table
//!
//! Plain key → string mapping with integer counters layered on top: a value
//! that parses as a base-10 `i64` can be incremented or decremented in place.

use domainkv_core::{Result, StoreError};
use rustc_hash::FxHashMap;

/// String values scoped to one domain
#[derive(Debug, Default)]
pub struct StringTable {
    entries: FxHashMap<String, String>,
}

impl StringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| StoreError::key_not_found(key))
    }

    /// Unconditional upsert
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Add one to an integer value, returning the new value
    pub fn increment(&mut self, key: &str) -> Result<i64> {
        self.add(key, 1)
    }

    /// Subtract one from an integer value, returning the new value
    pub fn decrement(&mut self, key: &str) -> Result<i64> {
        self.add(key, -1)
    }

    fn add(&mut self, key: &str, delta: i64) -> Result<i64> {
        let slot = self
            .entries
            .get_mut(key)
            .ok_or_else(|| StoreError::key_not_found(key))?;

        let current: i64 = slot.parse().map_err(|_| StoreError::NotAnInteger {
            key: key.to_string(),
            value: slot.clone(),
        })?;
        let next = current
            .checked_add(delta)
            .ok_or_else(|| StoreError::Overflow {
                key: key.to_string(),
            })?;

        *slot = next.to_string();
        Ok(next)
    }
}
