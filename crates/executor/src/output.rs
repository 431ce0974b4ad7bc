//! Command results.

use domainkv_wire::Response;

/// The successful result of executing a [`Command`](crate::Command).
///
/// | Command | Output |
/// |---|---|
/// | CreateDomain, SetString, InsertSkipList | `Unit` |
/// | GetString, SearchSkipList, DeleteSkipList | `Value` |
/// | Increment, Decrement | `Int` |
/// | RankSkipList | `Rank` |
/// | DeleteRangeSkipList | `Removed` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// No payload
    Unit,
    /// A stored value
    Value(String),
    /// New value of a counter
    Int(i64),
    /// Zero-based rank
    Rank(usize),
    /// Number of entries removed by a range delete
    Removed(usize),
}

impl Output {
    /// Convert into a success response. Numeric outputs are carried as
    /// decimal strings in `value`.
    pub fn into_response(self) -> Response {
        match self {
            Output::Unit => Response::success(),
            Output::Value(v) => Response::with_value(v),
            Output::Int(n) => Response::with_value(n.to_string()),
            Output::Rank(n) | Output::Removed(n) => Response::with_value(n.to_string()),
        }
    }
}

impl From<Output> for Response {
    fn from(output: Output) -> Self {
        output.into_response()
    }
}
