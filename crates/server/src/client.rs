//! WebSocket client.
//!
//! A thin request/response wrapper: one method per action, each sending
//! one JSON request and awaiting exactly one reply on the same connection.

use domainkv_wire::{decode_response, encode_request, Request, Response};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::ClientError;

type Result<T> = std::result::Result<T, ClientError>;

/// Connection to a domainkv server.
pub struct KvsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl KvsClient {
    /// Connect to `url`, e.g. `ws://localhost:9000/ws`.
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = tokio_tungstenite::connect_async(url).await?;
        tracing::debug!(url, "connected");
        Ok(Self { stream })
    }

    /// Close the connection.
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Send a request and wait for its response, whatever its status.
    pub async fn send(&mut self, request: &Request) -> Result<Response> {
        self.stream
            .send(Message::text(encode_request(request)))
            .await?;

        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(decode_response(text.as_str())?),
                Some(Ok(Message::Close(_))) | None => return Err(ClientError::ConnectionClosed),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Send a request; an error response becomes [`ClientError::Server`].
    async fn call(&mut self, request: Request) -> Result<Response> {
        let response = self.send(&request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Server {
                message: response.message.unwrap_or_default(),
            })
        }
    }

    async fn call_value(&mut self, request: Request) -> Result<String> {
        let action = request.action.clone();
        self.call(request)
            .await?
            .value
            .ok_or_else(|| ClientError::UnexpectedResponse {
                reason: format!("{} response has no value", action),
            })
    }

    async fn call_parsed<T: std::str::FromStr>(&mut self, request: Request) -> Result<T> {
        let value = self.call_value(request).await?;
        value
            .parse()
            .map_err(|_| ClientError::UnexpectedResponse {
                reason: format!("not a number: {}", value),
            })
    }

    // =========================================================================
    // Domains
    // =========================================================================

    /// Create an empty domain.
    pub async fn create_domain(&mut self, domain: &str) -> Result<()> {
        self.call(Request::new("create_domain").domain(domain))
            .await
            .map(drop)
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Set a string value.
    pub async fn set_string(&mut self, domain: &str, key: &str, value: &str) -> Result<()> {
        self.call(Request::new("set_string").domain(domain).key(key).value(value))
            .await
            .map(drop)
    }

    /// Get a string value.
    pub async fn get_string(&mut self, domain: &str, key: &str) -> Result<String> {
        self.call_value(Request::new("get_string").domain(domain).key(key))
            .await
    }

    /// Increment an integer value, returning the new value.
    pub async fn increment(&mut self, domain: &str, key: &str) -> Result<i64> {
        self.call_parsed(Request::new("increment").domain(domain).key(key))
            .await
    }

    /// Decrement an integer value, returning the new value.
    pub async fn decrement(&mut self, domain: &str, key: &str) -> Result<i64> {
        self.call_parsed(Request::new("decrement").domain(domain).key(key))
            .await
    }

    // =========================================================================
    // Skip lists
    // =========================================================================

    /// Insert or overwrite a skip-list entry.
    pub async fn insert_skiplist(
        &mut self,
        domain: &str,
        slkey: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let request = Request::new("insert_skiplist")
            .domain(domain)
            .slkey(slkey)
            .key(key)
            .value(value);
        self.call(request).await.map(drop)
    }

    /// Look up a skip-list entry.
    pub async fn search_skiplist(&mut self, domain: &str, slkey: &str, key: &str) -> Result<String> {
        let request = Request::new("search_skiplist")
            .domain(domain)
            .slkey(slkey)
            .key(key);
        self.call_value(request).await
    }

    /// Remove a skip-list entry.
    pub async fn delete_skiplist(&mut self, domain: &str, slkey: &str, key: &str) -> Result<()> {
        let request = Request::new("delete_skiplist")
            .domain(domain)
            .slkey(slkey)
            .key(key);
        self.call(request).await.map(drop)
    }

    /// Remove every entry in `[min_key, max_key]`, returning how many were
    /// removed.
    pub async fn delete_range_skiplist(
        &mut self,
        domain: &str,
        slkey: &str,
        min_key: &str,
        max_key: &str,
    ) -> Result<usize> {
        let request = Request::new("delete_range_skiplist")
            .domain(domain)
            .slkey(slkey)
            .range(min_key, max_key);
        self.call_parsed(request).await
    }

    /// Zero-based rank of a present key.
    pub async fn rank_skiplist(&mut self, domain: &str, slkey: &str, key: &str) -> Result<usize> {
        let request = Request::new("rank_skiplist")
            .domain(domain)
            .slkey(slkey)
            .key(key);
        self.call_parsed(request).await
    }
}

impl std::fmt::Debug for KvsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvsClient").finish_non_exhaustive()
    }
}
