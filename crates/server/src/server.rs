//! WebSocket request/response server.
//!
//! Architecture:
//! ```text
//! Client A ──ws──┐
//!                ├── connection task ── Executor ── Store ── Domain (own lock)
//! Client B ──ws──┘                                     └─── Domain (own lock)
//! ```
//!
//! Each accepted TCP connection gets its own task. Every text frame is one
//! JSON request and gets exactly one text reply, in order. Store locks are
//! taken and released inside `Executor::handle_json`, which never awaits,
//! so no lock is ever held across a suspension point.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use domainkv_executor::{Error as ExecError, Executor};
use domainkv_storage::Store;
use domainkv_wire::{encode_response, Response};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::Result;

/// How long a new TCP connection may take to complete the websocket upgrade.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// How long shutdown waits for open connections before aborting them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Server statistics snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerStats {
    /// Websocket connections accepted since start
    pub total_connections: u64,
    /// Websocket connections currently open
    pub active_connections: u64,
    /// Frames handled as requests
    pub total_requests: u64,
    /// Requests answered with `status = "error"`
    pub error_responses: u64,
}

#[derive(Debug, Default)]
struct StatsCounters {
    total_connections: AtomicU64,
    active_connections: AtomicU64,
    total_requests: AtomicU64,
    error_responses: AtomicU64,
}

impl StatsCounters {
    fn snapshot(&self) -> ServerStats {
        ServerStats {
            total_connections: self.total_connections.load(Ordering::Relaxed),
            active_connections: self.active_connections.load(Ordering::Relaxed),
            total_requests: self.total_requests.load(Ordering::Relaxed),
            error_responses: self.error_responses.load(Ordering::Relaxed),
        }
    }

    fn record_response(&self, response: &Response) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if !response.is_success() {
            self.error_responses.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Decrements the active connection count when the connection task ends,
/// however it ends.
struct ConnectionGuard {
    stats: Arc<StatsCounters>,
}

impl ConnectionGuard {
    fn open(stats: Arc<StatsCounters>) -> Self {
        stats.total_connections.fetch_add(1, Ordering::Relaxed);
        stats.active_connections.fetch_add(1, Ordering::Relaxed);
        Self { stats }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.stats.active_connections.fetch_sub(1, Ordering::Relaxed);
    }
}

/// A bound, not yet running, server.
pub struct KvsServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    executor: Executor,
    stats: Arc<StatsCounters>,
}

impl KvsServer {
    /// Bind the listener and create an empty store.
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        let store = Arc::new(Store::with_config(config.store.clone()));
        Self::bind_with_store(&config.bind_addr, store).await
    }

    /// Bind the listener over an existing store.
    pub async fn bind_with_store(bind_addr: &str, store: Arc<Store>) -> Result<Self> {
        let listener = TcpListener::bind(bind_addr).await?;
        let local_addr = listener.local_addr()?;
        info!(%local_addr, "domainkv server listening");
        Ok(Self {
            listener,
            local_addr,
            executor: Executor::new(store),
            stats: Arc::new(StatsCounters::default()),
        })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The store served by this server.
    pub fn store(&self) -> &Arc<Store> {
        self.executor.store()
    }

    /// Current statistics.
    pub fn stats(&self) -> ServerStats {
        self.stats.snapshot()
    }

    /// Run the accept loop on a background task.
    ///
    /// The server lives as long as the returned handle: dropping the handle
    /// stops it exactly like [`ServerHandle::shutdown`], without waiting.
    pub fn spawn(self) -> ServerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let local_addr = self.local_addr;
        let stats = self.stats.clone();
        let task = tokio::spawn(self.serve(shutdown_rx));
        ServerHandle {
            local_addr,
            stats,
            shutdown_tx,
            task,
        }
    }

    /// Run the accept loop on the current task until the process exits.
    pub async fn run(self) -> Result<()> {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.serve(shutdown_rx).await;
        Ok(())
    }

    async fn serve(self, mut shutdown: watch::Receiver<bool>) {
        let mut connections = JoinSet::new();

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, addr)) => {
                            debug!(%addr, "new TCP connection");
                            let executor = self.executor.clone();
                            let stats = self.stats.clone();
                            let shutdown = shutdown.clone();
                            connections.spawn(async move {
                                if let Err(e) =
                                    handle_connection(stream, addr, executor, stats, shutdown).await
                                {
                                    warn!(%addr, error = %e, "connection error");
                                }
                            });
                        }
                        Err(e) => warn!(error = %e, "accept failed"),
                    }
                }

                // Reap finished connection tasks so the set does not grow unbounded.
                Some(_) = connections.join_next(), if !connections.is_empty() => {}

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(
            open = connections.len(),
            "shutting down, waiting for connections to close"
        );
        let drain = async { while connections.join_next().await.is_some() {} };
        if tokio::time::timeout(SHUTDOWN_GRACE, drain).await.is_err() {
            warn!(
                open = connections.len(),
                "connections did not close in time, aborting"
            );
            connections.abort_all();
            while connections.join_next().await.is_some() {}
        }
        info!("domainkv server stopped");
    }
}

impl std::fmt::Debug for KvsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvsServer")
            .field("local_addr", &self.local_addr)
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

/// Handle to a server running on a background task.
///
/// Dropping the handle closes the shutdown channel, which stops the accept
/// loop and closes every connection. Keep it alive for as long as the server
/// should run; call [`shutdown`](Self::shutdown) to also wait for the drain.
#[must_use = "dropping the handle stops the server"]
pub struct ServerHandle {
    local_addr: SocketAddr,
    stats: Arc<StatsCounters>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `ws://` URL for clients.
    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.local_addr)
    }

    /// Current statistics.
    pub fn stats(&self) -> ServerStats {
        self.stats.snapshot()
    }

    /// Stop accepting, close every open connection, and wait for the
    /// accept loop to finish. Connections still open after a short grace
    /// period are aborted.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "server task failed");
        }
    }
}

impl std::fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerHandle")
            .field("local_addr", &self.local_addr)
            .finish()
    }
}

/// Handle a single websocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    executor: Executor,
    stats: Arc<StatsCounters>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let handshake =
        tokio::time::timeout(HANDSHAKE_TIMEOUT, tokio_tungstenite::accept_async(stream));
    let ws_stream = tokio::select! {
        result = handshake => match result {
            Ok(ws_stream) => ws_stream?,
            Err(_) => {
                debug!(%addr, "websocket handshake timed out");
                return Ok(());
            }
        },
        _ = shutdown.changed() => {
            debug!(%addr, "dropping connection mid-handshake for shutdown");
            return Ok(());
        }
    };
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let _guard = ConnectionGuard::open(stats.clone());

    debug!(%addr, "websocket connection established");

    loop {
        tokio::select! {
            msg = ws_receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = executor.handle_json(text.as_str());
                        stats.record_response(&response);
                        ws_sender.send(Message::text(encode_response(&response))).await?;
                    }

                    Some(Ok(Message::Binary(_))) => {
                        let response = Response::error(
                            ExecError::InvalidRequest {
                                reason: "binary frames are not supported".into(),
                            }
                            .to_string(),
                        );
                        stats.record_response(&response);
                        ws_sender.send(Message::text(encode_response(&response))).await?;
                    }

                    Some(Ok(Message::Ping(data))) => {
                        ws_sender.send(Message::Pong(data)).await?;
                    }

                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%addr, "connection closed by peer");
                        break;
                    }

                    Some(Err(e)) => {
                        warn!(%addr, error = %e, "websocket error");
                        break;
                    }

                    _ => {}
                }
            }

            _ = shutdown.changed() => {
                debug!(%addr, "closing connection for shutdown");
                let _ = ws_sender.send(Message::Close(None)).await;
                break;
            }
        }
    }

    Ok(())
}
