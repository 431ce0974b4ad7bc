//! Wire encoding for domainkv
//!
//! Requests and responses travel as JSON text objects, one per websocket
//! message.
//!
//! ## Request fields
//!
//! | Field | Used by |
//! |-------|---------|
//! | `action` | every request |
//! | `domain` | every request |
//! | `key` | string and point skip-list operations |
//! | `value` | `set_string`, `insert_skiplist` |
//! | `slkey` | skip-list operations |
//! | `min_key`, `max_key` | `delete_range_skiplist` |
//!
//! ## Response fields
//!
//! `status` is always present. `message` accompanies errors, `value` carries
//! single-value results and `values` multi-value results. Absent fields are
//! omitted.
//!
//! ## Examples
//!
//! ```
//! use domainkv_wire::{decode_request, encode_response, Response};
//!
//! let req = decode_request(r#"{"action":"get_string","domain":"d","key":"k"}"#).unwrap();
//! assert_eq!(req.key.as_deref(), Some("k"));
//!
//! let json = encode_response(&Response::with_value("v"));
//! assert_eq!(json, r#"{"status":"success","value":"v"}"#);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod envelope;

pub use codec::{decode_request, decode_response, encode_request, encode_response, DecodeError};
pub use envelope::{Request, Response, STATUS_ERROR, STATUS_SUCCESS};
