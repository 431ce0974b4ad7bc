//! Skip-list handlers.
//!
//! A skip list that has never been written is created empty on first use,
//! so reads against it report "key not found" rather than a missing list.

use std::sync::Arc;

use domainkv_storage::Store;

use crate::{Output, Result};

// =============================================================================
// Point operations
// =============================================================================

/// Handle InsertSkipList command.
pub fn insert(
    store: &Arc<Store>,
    domain: &str,
    slkey: &str,
    key: String,
    value: String,
) -> Result<Output> {
    store.domain(domain)?.insert(slkey, key, value);
    Ok(Output::Unit)
}

/// Handle SearchSkipList command.
pub fn search(store: &Arc<Store>, domain: &str, slkey: &str, key: &str) -> Result<Output> {
    let value = store.domain(domain)?.search(slkey, key)?;
    Ok(Output::Value(value))
}

/// Handle DeleteSkipList command. Echoes the removed value.
pub fn delete(store: &Arc<Store>, domain: &str, slkey: &str, key: &str) -> Result<Output> {
    let value = store.domain(domain)?.delete(slkey, key)?;
    Ok(Output::Value(value))
}

/// Handle RankSkipList command.
pub fn rank(store: &Arc<Store>, domain: &str, slkey: &str, key: &str) -> Result<Output> {
    let rank = store.domain(domain)?.rank(slkey, key)?;
    Ok(Output::Rank(rank))
}

// =============================================================================
// Range operations
// =============================================================================

/// Handle DeleteRangeSkipList command.
pub fn delete_range(
    store: &Arc<Store>,
    domain: &str,
    slkey: &str,
    min_key: &str,
    max_key: &str,
) -> Result<Output> {
    let removed = store.domain(domain)?.delete_range(slkey, min_key, max_key);
    Ok(Output::Removed(removed))
}
