//! Network surface for domainkv
//!
//! - [`KvsServer`]: accepts websocket connections and answers JSON requests
//!   through a shared [`Executor`](domainkv_executor::Executor)
//! - [`KvsClient`]: request/response client, one method per action
//! - [`ServerConfig`]: bind address and store settings, loadable from TOML
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use domainkv_server::{KvsClient, KvsServer, ServerConfig};
//!
//! let handle = KvsServer::bind(ServerConfig::default()).await?.spawn();
//! let mut client = KvsClient::connect("ws://localhost:9000/ws").await?;
//! client.create_domain("d").await?;
//! client.close().await?;
//! handle.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;
mod error;
mod server;

pub use client::KvsClient;
pub use config::{ServerConfig, DEFAULT_BIND_ADDR};
pub use error::{ClientError, Result, ServerError};
pub use server::{KvsServer, ServerHandle, ServerStats};
