//! Domain: one isolated namespace
//!
//! A domain owns one [`StringTable`] and any number of named [`SkipList`]s.
//! Everything inside it sits behind a single per-domain mutex, so operations
//! within a domain are totally ordered while different domains never share a
//! lock. Each public method holds the lock for exactly one operation.
//!
//! Only inserts create a skip list. Reads and deletes against a name that was
//! never inserted into answer as if the list were empty.

use std::sync::Arc;

use domainkv_core::{Result, StoreError};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::skiplist::SkipList;
use crate::store::SkipListSeeder;
use crate::strings::StringTable;

#[derive(Debug, Default)]
struct DomainState {
    strings: StringTable,
    skiplists: FxHashMap<String, SkipList>,
}

/// A named namespace holding a string table and named skip lists
pub struct Domain {
    name: String,
    state: Mutex<DomainState>,
    seeder: Arc<SkipListSeeder>,
}

impl Domain {
    pub(crate) fn new(name: impl Into<String>, seeder: Arc<SkipListSeeder>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(DomainState::default()),
            seeder,
        }
    }

    /// Domain name
    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // String Table
    // ========================================================================

    /// Get a string value
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.state.lock().strings.get(key).map(str::to_string)
    }

    /// Set a string value
    pub fn set_string(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state.lock().strings.set(key, value);
    }

    /// Increment an integer string value, returning the new value
    pub fn increment(&self, key: &str) -> Result<i64> {
        self.state.lock().strings.increment(key)
    }

    /// Decrement an integer string value, returning the new value
    pub fn decrement(&self, key: &str) -> Result<i64> {
        self.state.lock().strings.decrement(key)
    }

    /// Number of keys in the string table
    pub fn string_count(&self) -> usize {
        self.state.lock().strings.len()
    }

    // ========================================================================
    // Skip Lists
    // ========================================================================

    /// Run `f` against the named skip list, creating it empty if needed.
    ///
    /// Lookup, lazy creation and `f` all happen under the domain lock, so two
    /// concurrent first inserts always land in the same list.
    pub fn with_skiplist<R>(&self, name: &str, f: impl FnOnce(&mut SkipList) -> R) -> R {
        let mut state = self.state.lock();
        if let Some(list) = state.skiplists.get_mut(name) {
            return f(list);
        }
        tracing::debug!(domain = %self.name, skiplist = name, "creating skip list");
        let list = state
            .skiplists
            .entry(name.to_string())
            .or_insert_with(|| self.seeder.create());
        f(list)
    }

    /// Run `f` against the named skip list only if it already exists.
    fn with_existing_skiplist<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut SkipList) -> R,
    ) -> Option<R> {
        self.state.lock().skiplists.get_mut(name).map(f)
    }

    /// Insert or overwrite `key` in the named skip list
    pub fn insert(&self, skiplist: &str, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.with_skiplist(skiplist, |list| list.insert(key, value))
    }

    /// Look up `key` in the named skip list
    pub fn search(&self, skiplist: &str, key: &str) -> Result<String> {
        self.with_existing_skiplist(skiplist, |list| list.search(key).map(str::to_string))
            .unwrap_or_else(|| Err(StoreError::key_not_found(key)))
    }

    /// Remove `key` from the named skip list, returning its value
    pub fn delete(&self, skiplist: &str, key: &str) -> Result<String> {
        self.with_existing_skiplist(skiplist, |list| list.delete(key))
            .unwrap_or_else(|| Err(StoreError::key_not_found(key)))
    }

    /// Remove every key in `[min, max]`, returning how many were removed
    pub fn delete_range(&self, skiplist: &str, min: &str, max: &str) -> usize {
        self.with_existing_skiplist(skiplist, |list| list.delete_range(min, max))
            .unwrap_or(0)
    }

    /// Zero-based rank of a present key
    pub fn rank(&self, skiplist: &str, key: &str) -> Result<usize> {
        self.with_existing_skiplist(skiplist, |list| list.rank(key))
            .unwrap_or_else(|| Err(StoreError::key_not_found(key)))
    }

    /// Length of the named skip list (0 if it was never created)
    pub fn skiplist_len(&self, skiplist: &str) -> usize {
        self.state
            .lock()
            .skiplists
            .get(skiplist)
            .map(SkipList::len)
            .unwrap_or(0)
    }

    /// Names of all skip lists created in this domain, sorted
    pub fn skiplist_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().skiplists.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("strings", &state.strings.len())
            .field("skiplists", &state.skiplists.len())
            .finish()
    }
}
