//! # domainkv
//!
//! In-memory, multi-tenant key-value store served over websockets.
//!
//! Data is partitioned into *domains*. Each domain owns a string table with
//! integer counters and any number of named order-statistics skip lists
//! supporting point lookup, range delete, and rank queries.
//!
//! ## Quick Start
//!
//! In-process, through the typed wrapper:
//!
//! ```
//! use domainkv::prelude::*;
//!
//! let kvs = Kvs::in_memory();
//! kvs.create_domain("d")?;
//! kvs.set_string("d", "visits", "0")?;
//! assert_eq!(kvs.increment("d", "visits")?, 1);
//!
//! for (k, v) in [("1", "value1"), ("2", "value2"), ("3", "value3")] {
//!     kvs.insert_skiplist("d", "sl", k, v)?;
//! }
//! assert_eq!(kvs.delete_range_skiplist("d", "sl", "1", "2")?, 2);
//! assert_eq!(kvs.rank_skiplist("d", "sl", "3")?, 0);
//! # Ok::<(), domainkv::ExecError>(())
//! ```
//!
//! Over the network, with [`KvsServer`] and [`KvsClient`].
//!
//! ## Crates
//!
//! - [`domainkv_core`]: error type shared by every layer
//! - [`domainkv_storage`]: skip list, string table, domains, store
//! - [`domainkv_wire`]: JSON request/response envelopes
//! - [`domainkv_executor`]: command dispatch and the typed [`Kvs`] wrapper
//! - [`domainkv_server`]: websocket server and client

#![warn(missing_docs)]

pub mod prelude;

pub use domainkv_core::{Result, StoreError};
pub use domainkv_executor::{Command, Error as ExecError, Executor, Kvs, Output};
pub use domainkv_server::{
    ClientError, KvsClient, KvsServer, ServerConfig, ServerError, ServerHandle, ServerStats,
};
pub use domainkv_storage::{Domain, SkipList, Store, StoreConfig};
pub use domainkv_wire::{Request, Response};

pub use domainkv_core;
pub use domainkv_executor;
pub use domainkv_server;
pub use domainkv_storage;
pub use domainkv_wire;
