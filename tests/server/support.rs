//! Helpers for running a server inside a test.

use crate::common::*;

/// Start a server on an ephemeral loopback port.
pub async fn start_test_server() -> ServerHandle {
    let config = ServerConfig::default().with_bind_addr("127.0.0.1:0");
    KvsServer::bind(config).await.unwrap().spawn()
}

/// Start a server and connect one client to it.
pub async fn start_with_client() -> (ServerHandle, KvsClient) {
    let handle = start_test_server().await;
    let client = KvsClient::connect(&handle.url()).await.unwrap();
    (handle, client)
}
