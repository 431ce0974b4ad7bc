//! Request and response envelopes
//!
//! ```json
//! {"action":"insert_skiplist","domain":"d","slkey":"sl","key":"1","value":"value1"}
//! {"status":"success","value":"value1"}
//! {"status":"error","message":"key not found"}
//! ```

use serde::{Deserialize, Serialize};

/// Status string of a successful response
pub const STATUS_SUCCESS: &str = "success";
/// Status string of a failed response
pub const STATUS_ERROR: &str = "error";

/// One client request. Only `action` is mandatory on the wire; which other
/// fields are required depends on the action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Action name, e.g. `"set_string"`
    pub action: String,
    /// Target domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// String-table or skip-list key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Skip-list name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slkey: Option<String>,
    /// Value to store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Inclusive lower bound of a range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_key: Option<String>,
    /// Inclusive upper bound of a range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_key: Option<String>,
}

impl Request {
    /// Start a request for `action`
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the skip-list name
    pub fn slkey(mut self, slkey: impl Into<String>) -> Self {
        self.slkey = Some(slkey.into());
        self
    }

    /// Set the value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set both range bounds
    pub fn range(mut self, min_key: impl Into<String>, max_key: impl Into<String>) -> Self {
        self.min_key = Some(min_key.into());
        self.max_key = Some(max_key.into());
        self
    }
}

/// One server response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// `"success"` or `"error"`
    pub status: String,
    /// Human-readable error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Single-value result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Multi-value result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Response {
    /// Success with no payload
    pub fn success() -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: None,
            value: None,
            values: Vec::new(),
        }
    }

    /// Success carrying one value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::success()
        }
    }

    /// Success carrying several values
    pub fn with_values(values: Vec<String>) -> Self {
        Self {
            values,
            ..Self::success()
        }
    }

    /// Error with a message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: Some(message.into()),
            value: None,
            values: Vec::new(),
        }
    }

    /// Check if the status is `"success"`
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}
