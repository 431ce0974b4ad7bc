//! Storage layer for domainkv
//!
//! This crate implements the in-memory data structures:
//! - SkipList: order-statistics skip list (search, rank, range delete)
//! - StringTable: per-domain strings with integer counters
//! - Domain: string table + named skip lists behind one mutex
//! - Store: domain registry behind its own lock

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod skiplist;
pub mod store;
pub mod strings;

pub use domain::Domain;
pub use skiplist::{SkipList, MAX_LEVEL};
pub use store::{SkipListSeeder, Store, StoreConfig};
pub use strings::StringTable;
