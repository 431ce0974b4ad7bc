//! Command executor for domainkv
//!
//! Every client request is turned into a [`Command`], executed against a
//! shared [`Store`](domainkv_storage::Store), and answered with an
//! [`Output`]. The [`Executor`] is the single dispatch point used by the
//! network server; [`Kvs`] wraps it with typed methods for in-process use.
//!
//! ```text
//! Request --try_from--> Command --execute--> Output --into_response--> Response
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
mod command;
mod error;
mod executor;
mod handlers;
mod output;

pub use api::Kvs;
pub use command::Command;
pub use error::{Error, Result};
pub use executor::Executor;
pub use output::Output;
