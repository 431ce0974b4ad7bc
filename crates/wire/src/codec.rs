//! JSON encode/decode for envelopes

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::envelope::{Request, Response};

/// Decode error types
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload is not valid JSON or does not match the envelope shape
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Payload is empty or whitespace
    #[error("empty message")]
    Empty,
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, DecodeError> {
    if json.trim().is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(serde_json::from_str(json)?)
}

fn encode<T: Serialize>(value: &T) -> String {
    // Envelopes are plain string/option/vec structs; serialization cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}

/// Decode a request sent by a client
pub fn decode_request(json: &str) -> Result<Request, DecodeError> {
    decode(json)
}

/// Encode a request for sending to the server
pub fn encode_request(request: &Request) -> String {
    encode(request)
}

/// Decode a response received from the server
pub fn decode_response(json: &str) -> Result<Response, DecodeError> {
    decode(json)
}

/// Encode a response for sending to a client
pub fn encode_response(response: &Response) -> String {
    encode(response)
}
