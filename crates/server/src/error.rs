//! Server and client error types.

use domainkv_wire::DecodeError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors raised while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket bind/accept or file read failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`ServerConfig`](crate::ServerConfig)
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Websocket handshake or framing failure on one connection
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

/// Errors returned by [`KvsClient`](crate::KvsClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with `status = "error"`
    #[error("{message}")]
    Server {
        /// Message from the server, e.g. `"key not found"`
        message: String,
    },

    /// Connect or send/receive failure
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Reply was not a valid response envelope
    #[error("invalid response: {0}")]
    Decode(#[from] DecodeError),

    /// Reply decoded but lacked the expected payload
    #[error("unexpected response: {reason}")]
    UnexpectedResponse {
        /// What was wrong with it
        reason: String,
    },

    /// The server closed the connection before replying
    #[error("connection closed")]
    ConnectionClosed,
}

impl ClientError {
    /// Check if the server reported a missing key
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, ClientError::Server { message } if message == "key not found")
    }
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
