//! Shared test utilities for integration tests.
//!
//! Each suite includes this via `#[path = "../common/mod.rs"] mod common;`
//! and only uses part of it.

#![allow(dead_code)]

use std::sync::Arc;

pub use domainkv::prelude::*;
pub use domainkv::Domain;

/// Deterministic seed so skip-list shapes are reproducible across runs.
pub const TEST_SEED: u64 = 0x5eed;

/// Fresh store with deterministic skip-list levels.
pub fn create_store() -> Arc<Store> {
    Arc::new(Store::with_config(StoreConfig {
        skiplist_seed: Some(TEST_SEED),
    }))
}

/// Store with one domain already created.
pub fn store_with_domain(name: &str) -> (Arc<Store>, Arc<Domain>) {
    let store = create_store();
    let domain = store.create_domain(name).unwrap();
    (store, domain)
}

/// Executor over a fresh store.
pub fn create_executor() -> Executor {
    Executor::new(create_store())
}

/// Zero-padded numeric key so lexicographic order matches numeric order.
pub fn key(i: usize) -> String {
    format!("k{:06}", i)
}

/// Insert `key(0..n)` with values `v{i}` into the named skip list.
pub fn fill_skiplist(domain: &Domain, skiplist: &str, n: usize) {
    for i in 0..n {
        domain.insert(skiplist, key(i), format!("v{}", i));
    }
}
