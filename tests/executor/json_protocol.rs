//! JSON Protocol Tests
//!
//! Raw JSON in, raw JSON out, through `Executor::handle_text`.

use domainkv::domainkv_wire::decode_response;
use serde_json::{json, Value};

use crate::common::*;

fn call(executor: &Executor, request: Value) -> Value {
    let reply = executor.handle_text(&request.to_string());
    serde_json::from_str(&reply).unwrap()
}

#[test]
fn success_without_payload_has_only_status() {
    let executor = create_executor();
    let reply = call(&executor, json!({"action": "create_domain", "domain": "d"}));
    assert_eq!(reply, json!({"status": "success"}));
}

#[test]
fn read_returns_value_field() {
    let executor = create_executor();
    call(&executor, json!({"action": "create_domain", "domain": "d"}));
    call(
        &executor,
        json!({"action": "set_string", "domain": "d", "key": "k", "value": "v"}),
    );
    let reply = call(&executor, json!({"action": "get_string", "domain": "d", "key": "k"}));
    assert_eq!(reply, json!({"status": "success", "value": "v"}));
}

#[test]
fn numeric_results_are_strings() {
    let executor = create_executor();
    call(&executor, json!({"action": "create_domain", "domain": "d"}));
    call(
        &executor,
        json!({"action": "set_string", "domain": "d", "key": "n", "value": "9"}),
    );
    let reply = call(&executor, json!({"action": "increment", "domain": "d", "key": "n"}));
    assert_eq!(reply["value"], json!("10"));

    call(
        &executor,
        json!({"action": "insert_skiplist", "domain": "d", "slkey": "sl", "key": "a", "value": "1"}),
    );
    let reply = call(
        &executor,
        json!({"action": "rank_skiplist", "domain": "d", "slkey": "sl", "key": "a"}),
    );
    assert_eq!(reply["value"], json!("0"));
}

#[test]
fn error_response_carries_message() {
    let executor = create_executor();
    let reply = call(&executor, json!({"action": "get_string", "domain": "nope", "key": "k"}));
    assert_eq!(reply, json!({"status": "error", "message": "domain not found"}));
}

#[test]
fn unknown_action_is_rejected() {
    let executor = create_executor();
    let reply = call(&executor, json!({"action": "flush_all", "domain": "d"}));
    assert_eq!(reply["status"], json!("error"));
    assert_eq!(reply["message"], json!("unknown action: flush_all"));
}

#[test]
fn missing_field_is_rejected() {
    let executor = create_executor();
    call(&executor, json!({"action": "create_domain", "domain": "d"}));
    let reply = call(
        &executor,
        json!({"action": "delete_range_skiplist", "domain": "d", "min_key": "a", "max_key": "z"}),
    );
    assert_eq!(
        reply["message"],
        json!("missing field 'slkey' for action 'delete_range_skiplist'")
    );
}

#[test]
fn omitted_payload_fields_read_as_empty_strings() {
    let executor = create_executor();
    call(&executor, json!({"action": "create_domain", "domain": "d"}));

    let reply = call(&executor, json!({"action": "set_string", "domain": "d", "key": "k"}));
    assert_eq!(reply, json!({"status": "success"}));
    let reply = call(&executor, json!({"action": "get_string", "domain": "d", "key": "k"}));
    assert_eq!(reply, json!({"status": "success", "value": ""}));

    for key in ["", "a", "b"] {
        let reply = call(
            &executor,
            json!({"action": "insert_skiplist", "domain": "d", "slkey": "sl", "key": key}),
        );
        assert_eq!(reply["status"], json!("success"));
    }
    let reply = call(
        &executor,
        json!({"action": "search_skiplist", "domain": "d", "slkey": "sl"}),
    );
    assert_eq!(reply, json!({"status": "success", "value": ""}));

    let reply = call(
        &executor,
        json!({"action": "delete_range_skiplist", "domain": "d", "slkey": "sl", "max_key": "a"}),
    );
    assert_eq!(reply, json!({"status": "success", "value": "2"}));
    let reply = call(
        &executor,
        json!({"action": "rank_skiplist", "domain": "d", "slkey": "sl", "key": "b"}),
    );
    assert_eq!(reply, json!({"status": "success", "value": "0"}));
}

#[test]
fn malformed_json_is_an_error_response() {
    let executor = create_executor();
    for payload in ["", "{", "[1,2,3]", r#"{"domain":"d"}"#] {
        let resp = decode_response(&executor.handle_text(payload)).unwrap();
        assert!(!resp.is_success());
        assert!(
            resp.message.as_deref().unwrap().starts_with("invalid request"),
            "payload {:?}",
            payload
        );
    }
}

#[test]
fn failed_request_leaves_state_intact() {
    let executor = create_executor();
    call(&executor, json!({"action": "create_domain", "domain": "d"}));
    call(
        &executor,
        json!({"action": "set_string", "domain": "d", "key": "k", "value": "abc"}),
    );
    let reply = call(&executor, json!({"action": "increment", "domain": "d", "key": "k"}));
    assert_eq!(reply["message"], json!("value is not an integer"));
    let reply = call(&executor, json!({"action": "get_string", "domain": "d", "key": "k"}));
    assert_eq!(reply["value"], json!("abc"));
}
