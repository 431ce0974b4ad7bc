//! String table handlers.

use std::sync::Arc;

use domainkv_storage::Store;

use crate::{Output, Result};

/// Handle SetString command.
pub fn set_string(store: &Arc<Store>, domain: &str, key: String, value: String) -> Result<Output> {
    store.domain(domain)?.set_string(key, value);
    Ok(Output::Unit)
}

/// Handle GetString command.
pub fn get_string(store: &Arc<Store>, domain: &str, key: &str) -> Result<Output> {
    let value = store.domain(domain)?.get_string(key)?;
    Ok(Output::Value(value))
}

/// Handle Increment command.
pub fn increment(store: &Arc<Store>, domain: &str, key: &str) -> Result<Output> {
    let n = store.domain(domain)?.increment(key)?;
    Ok(Output::Int(n))
}

/// Handle Decrement command.
pub fn decrement(store: &Arc<Store>, domain: &str, key: &str) -> Result<Output> {
    let n = store.domain(domain)?.decrement(key)?;
    Ok(Output::Int(n))
}
