//! Domain lifecycle handlers.

use std::sync::Arc;

use domainkv_storage::Store;

use crate::{Output, Result};

/// Handle CreateDomain command.
pub fn create_domain(store: &Arc<Store>, domain: &str) -> Result<Output> {
    store.create_domain(domain)?;
    Ok(Output::Unit)
}
