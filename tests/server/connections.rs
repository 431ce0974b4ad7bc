//! Connection Handling Tests
//!
//! Multiple clients, raw frames, and shutdown behavior.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use crate::common::*;
use crate::support::*;

#[tokio::test]
async fn clients_share_one_store() {
    let handle = start_test_server().await;
    let mut writer = KvsClient::connect(&handle.url()).await.unwrap();
    let mut reader = KvsClient::connect(&handle.url()).await.unwrap();

    writer.create_domain("shared").await.unwrap();
    writer.set_string("shared", "k", "v").await.unwrap();
    assert_eq!(reader.get_string("shared", "k").await.unwrap(), "v");

    assert_eq!(handle.stats().active_connections, 2);
    handle.shutdown().await;
}

#[tokio::test]
async fn concurrent_clients_increment_one_counter() {
    let handle = start_test_server().await;
    let url = handle.url();

    let mut setup = KvsClient::connect(&url).await.unwrap();
    setup.create_domain("d").await.unwrap();
    setup.set_string("d", "n", "0").await.unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let url = url.clone();
            tokio::spawn(async move {
                let mut client = KvsClient::connect(&url).await.unwrap();
                for _ in 0..50 {
                    client.increment("d", "n").await.unwrap();
                }
                client.close().await.unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(setup.get_string("d", "n").await.unwrap(), "400");
    handle.shutdown().await;
}

#[tokio::test]
async fn raw_json_round_trip() {
    let handle = start_test_server().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(handle.url()).await.unwrap();

    ws.send(Message::text(r#"{"action":"create_domain","domain":"d"}"#))
        .await
        .unwrap();
    match ws.next().await {
        Some(Ok(Message::Text(text))) => assert_eq!(text.as_str(), r#"{"status":"success"}"#),
        other => panic!("unexpected frame: {:?}", other),
    }

    ws.send(Message::text("not json")).await.unwrap();
    match ws.next().await {
        Some(Ok(Message::Text(text))) => {
            let resp: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
            assert_eq!(resp["status"], "error");
            assert!(resp["message"].as_str().unwrap().starts_with("invalid request"));
        }
        other => panic!("unexpected frame: {:?}", other),
    }

    handle.shutdown().await;
}

#[tokio::test]
async fn binary_frames_are_rejected() {
    let handle = start_test_server().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(handle.url()).await.unwrap();

    ws.send(Message::binary(vec![1u8, 2, 3])).await.unwrap();
    match ws.next().await {
        Some(Ok(Message::Text(text))) => {
            let resp = domainkv::domainkv_wire::decode_response(text.as_str()).unwrap();
            assert!(!resp.is_success());
            assert_eq!(
                resp.message.as_deref(),
                Some("invalid request: binary frames are not supported")
            );
        }
        other => panic!("unexpected frame: {:?}", other),
    }

    handle.shutdown().await;
}

#[tokio::test]
async fn shutdown_closes_open_connections() {
    let handle = start_test_server().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(handle.url()).await.unwrap();

    handle.shutdown().await;

    // The server sent a close frame; the stream ends after it.
    loop {
        match ws.next().await {
            Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
            Some(Ok(_)) => continue,
        }
    }
}

#[tokio::test]
async fn shutdown_does_not_wait_on_a_stalled_handshake() {
    let handle = start_test_server().await;

    // TCP is open but the websocket upgrade request never arrives.
    let _stalled = tokio::net::TcpStream::connect(handle.local_addr())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    tokio::time::timeout(Duration::from_secs(3), handle.shutdown())
        .await
        .expect("shutdown waited on an unfinished handshake");
}

#[tokio::test]
async fn dropping_the_handle_stops_the_server() {
    let handle = start_test_server().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(handle.url()).await.unwrap();

    drop(handle);

    let closed = tokio::time::timeout(Duration::from_secs(3), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await;
    assert!(closed.is_ok(), "connection stayed open after the handle was dropped");
}

#[tokio::test]
async fn client_reports_server_errors() {
    let handle = start_test_server().await;
    let mut client = KvsClient::connect(&handle.url()).await.unwrap();
    match client.search_skiplist("nope", "sl", "k").await {
        Err(ClientError::Server { message }) => assert_eq!(message, "domain not found"),
        other => panic!("expected server error, got {:?}", other),
    }
    handle.shutdown().await;
}

#[tokio::test]
async fn stats_track_connections() {
    let handle = start_test_server().await;
    {
        let mut client = KvsClient::connect(&handle.url()).await.unwrap();
        client.create_domain("d").await.unwrap();
        client.close().await.unwrap();
    }
    let stats = handle.stats();
    assert_eq!(stats.total_connections, 1);
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.error_responses, 0);
    handle.shutdown().await;
}
