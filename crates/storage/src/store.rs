//! Domain registry
//!
//! The store maps domain names to [`Domain`]s. The map has its own lock,
//! held only while a domain is looked up or created; the returned
//! `Arc<Domain>` is used after that lock is released, so work inside one
//! domain never blocks lookups of another.
//!
//! # Thread Safety
//!
//! - `domain()`: shared read lock on the registry, then an `Arc` clone
//! - `create_domain()`: exclusive lock on the registry only
//! - Different domains never contend on their data locks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use domainkv_core::{Result, StoreError};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::skiplist::SkipList;

/// Store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base seed for skip-list level generation. `None` seeds from entropy.
    pub skiplist_seed: Option<u64>,
}

/// Hands out skip lists, seeded deterministically when configured.
///
/// The n-th list created in the store gets seed `base + n`.
#[derive(Debug)]
pub struct SkipListSeeder {
    base: Option<u64>,
    created: AtomicU64,
}

impl SkipListSeeder {
    /// Create a seeder from an optional base seed
    pub fn new(base: Option<u64>) -> Self {
        Self {
            base,
            created: AtomicU64::new(0),
        }
    }

    /// Create a new empty skip list
    pub fn create(&self) -> SkipList {
        let ordinal = self.created.fetch_add(1, Ordering::Relaxed);
        match self.base {
            Some(base) => SkipList::with_seed(base.wrapping_add(ordinal)),
            None => SkipList::new(),
        }
    }

    /// Number of skip lists created so far
    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }
}

/// Process-wide collection of domains
pub struct Store {
    domains: RwLock<FxHashMap<String, Arc<Domain>>>,
    seeder: Arc<SkipListSeeder>,
}

impl Store {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            domains: RwLock::new(FxHashMap::default()),
            seeder: Arc::new(SkipListSeeder::new(config.skiplist_seed)),
        }
    }

    /// Create a new, empty domain.
    ///
    /// Fails with `DomainAlreadyExists` if the name is taken.
    pub fn create_domain(&self, name: &str) -> Result<Arc<Domain>> {
        let mut domains = self.domains.write();
        if domains.contains_key(name) {
            return Err(StoreError::DomainAlreadyExists {
                domain: name.to_string(),
            });
        }

        let domain = Arc::new(Domain::new(name, Arc::clone(&self.seeder)));
        domains.insert(name.to_string(), Arc::clone(&domain));
        tracing::info!(domain = name, "created domain");
        Ok(domain)
    }

    /// Resolve a domain by name.
    ///
    /// Fails with `DomainNotFound` if it was never created.
    pub fn domain(&self, name: &str) -> Result<Arc<Domain>> {
        self.domains
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::DomainNotFound {
                domain: name.to_string(),
            })
    }

    /// Check if a domain exists
    pub fn has_domain(&self, name: &str) -> bool {
        self.domains.read().contains_key(name)
    }

    /// Number of domains
    pub fn domain_count(&self) -> usize {
        self.domains.read().len()
    }

    /// All domain names, sorted
    pub fn domain_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.domains.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of skip lists created across all domains
    pub fn skiplists_created(&self) -> u64 {
        self.seeder.created()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("domain_count", &self.domain_count())
            .field("skiplists_created", &self.skiplists_created())
            .finish()
    }
}
