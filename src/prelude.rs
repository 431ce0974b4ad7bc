//! Convenient imports for domainkv.
//!
//! ```
//! use domainkv::prelude::*;
//!
//! let kvs = Kvs::in_memory();
//! kvs.create_domain("d").unwrap();
//! ```

// In-process entry points
pub use crate::{Executor, Kvs, Store, StoreConfig};

// Network entry points
pub use crate::{KvsClient, KvsServer, ServerConfig, ServerHandle};

// Error handling
pub use crate::{ClientError, ExecError, ServerError, StoreError};

// Wire types
pub use crate::{Command, Output, Request, Response};
