//! Skip-list operations.

use super::Kvs;
use crate::{Command, Error, Output, Result};

impl Kvs {
    // =========================================================================
    // Skip-list Operations
    // =========================================================================

    /// Insert or overwrite an entry in the named skip list.
    pub fn insert_skiplist(&self, domain: &str, slkey: &str, key: &str, value: &str) -> Result<()> {
        match self.executor.execute(Command::InsertSkipList {
            domain: domain.to_string(),
            slkey: slkey.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for InsertSkipList".into(),
            }),
        }
    }

    /// Look up an entry.
    pub fn search_skiplist(&self, domain: &str, slkey: &str, key: &str) -> Result<String> {
        match self.executor.execute(Command::SearchSkipList {
            domain: domain.to_string(),
            slkey: slkey.to_string(),
            key: key.to_string(),
        })? {
            Output::Value(v) => Ok(v),
            _ => Err(Error::Internal {
                reason: "Unexpected output for SearchSkipList".into(),
            }),
        }
    }

    /// Remove an entry, returning its value.
    pub fn delete_skiplist(&self, domain: &str, slkey: &str, key: &str) -> Result<String> {
        match self.executor.execute(Command::DeleteSkipList {
            domain: domain.to_string(),
            slkey: slkey.to_string(),
            key: key.to_string(),
        })? {
            Output::Value(v) => Ok(v),
            _ => Err(Error::Internal {
                reason: "Unexpected output for DeleteSkipList".into(),
            }),
        }
    }

    /// Remove every entry with `min_key <= key <= max_key`, returning how
    /// many were removed.
    pub fn delete_range_skiplist(
        &self,
        domain: &str,
        slkey: &str,
        min_key: &str,
        max_key: &str,
    ) -> Result<usize> {
        match self.executor.execute(Command::DeleteRangeSkipList {
            domain: domain.to_string(),
            slkey: slkey.to_string(),
            min_key: min_key.to_string(),
            max_key: max_key.to_string(),
        })? {
            Output::Removed(n) => Ok(n),
            _ => Err(Error::Internal {
                reason: "Unexpected output for DeleteRangeSkipList".into(),
            }),
        }
    }

    /// Zero-based rank of a present key.
    pub fn rank_skiplist(&self, domain: &str, slkey: &str, key: &str) -> Result<usize> {
        match self.executor.execute(Command::RankSkipList {
            domain: domain.to_string(),
            slkey: slkey.to_string(),
            key: key.to_string(),
        })? {
            Output::Rank(n) => Ok(n),
            _ => Err(Error::Internal {
                reason: "Unexpected output for RankSkipList".into(),
            }),
        }
    }
}
