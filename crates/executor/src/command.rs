//! The closed set of commands.
//!
//! A [`Request`] is decoded into a [`Command`] exactly once, at the
//! boundary. From there on dispatch is an exhaustive `match`.
//!
//! | action | required fields | defaulted to `""` |
//! |---|---|---|
//! | create_domain | domain | |
//! | set_string | domain | key, value |
//! | get_string | domain | key |
//! | increment | domain | key |
//! | decrement | domain | key |
//! | insert_skiplist | domain, slkey | key, value |
//! | search_skiplist | domain, slkey | key |
//! | delete_skiplist | domain, slkey | key |
//! | delete_range_skiplist | domain, slkey | min_key, max_key |
//! | rank_skiplist | domain, slkey | key |
//!
//! Clients drop empty strings from the JSON object, so an absent key, value
//! or range bound is the empty string. Domain and skip-list names are always
//! required.

use domainkv_wire::Request;

use crate::{Error, Result};

/// A decoded, validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an empty domain
    CreateDomain {
        /// Domain name
        domain: String,
    },
    /// Upsert a string value
    SetString {
        /// Domain name
        domain: String,
        /// String key
        key: String,
        /// New value
        value: String,
    },
    /// Read a string value
    GetString {
        /// Domain name
        domain: String,
        /// String key
        key: String,
    },
    /// Add one to an integer string
    Increment {
        /// Domain name
        domain: String,
        /// String key
        key: String,
    },
    /// Subtract one from an integer string
    Decrement {
        /// Domain name
        domain: String,
        /// String key
        key: String,
    },
    /// Insert or overwrite a skip-list entry
    InsertSkipList {
        /// Domain name
        domain: String,
        /// Skip-list name
        slkey: String,
        /// Entry key
        key: String,
        /// Entry value
        value: String,
    },
    /// Look up a skip-list entry
    SearchSkipList {
        /// Domain name
        domain: String,
        /// Skip-list name
        slkey: String,
        /// Entry key
        key: String,
    },
    /// Remove a skip-list entry
    DeleteSkipList {
        /// Domain name
        domain: String,
        /// Skip-list name
        slkey: String,
        /// Entry key
        key: String,
    },
    /// Remove every entry with `min_key <= key <= max_key`
    DeleteRangeSkipList {
        /// Domain name
        domain: String,
        /// Skip-list name
        slkey: String,
        /// Inclusive lower bound
        min_key: String,
        /// Inclusive upper bound
        max_key: String,
    },
    /// Zero-based rank of a present key
    RankSkipList {
        /// Domain name
        domain: String,
        /// Skip-list name
        slkey: String,
        /// Entry key
        key: String,
    },
}

impl Command {
    /// Wire name of this command
    pub fn action(&self) -> &'static str {
        match self {
            Command::CreateDomain { .. } => "create_domain",
            Command::SetString { .. } => "set_string",
            Command::GetString { .. } => "get_string",
            Command::Increment { .. } => "increment",
            Command::Decrement { .. } => "decrement",
            Command::InsertSkipList { .. } => "insert_skiplist",
            Command::SearchSkipList { .. } => "search_skiplist",
            Command::DeleteSkipList { .. } => "delete_skiplist",
            Command::DeleteRangeSkipList { .. } => "delete_range_skiplist",
            Command::RankSkipList { .. } => "rank_skiplist",
        }
    }

    /// Target domain
    pub fn domain(&self) -> &str {
        match self {
            Command::CreateDomain { domain }
            | Command::SetString { domain, .. }
            | Command::GetString { domain, .. }
            | Command::Increment { domain, .. }
            | Command::Decrement { domain, .. }
            | Command::InsertSkipList { domain, .. }
            | Command::SearchSkipList { domain, .. }
            | Command::DeleteSkipList { domain, .. }
            | Command::DeleteRangeSkipList { domain, .. }
            | Command::RankSkipList { domain, .. } => domain,
        }
    }

    /// Check if this command mutates the store
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            Command::GetString { .. } | Command::SearchSkipList { .. } | Command::RankSkipList { .. }
        )
    }
}

impl TryFrom<Request> for Command {
    type Error = Error;

    fn try_from(request: Request) -> Result<Self> {
        let Request {
            action,
            domain,
            key,
            slkey,
            value,
            min_key,
            max_key,
        } = request;

        let require = |field: Option<String>, name: &'static str| {
            field.ok_or_else(|| Error::MissingField {
                action: action.clone(),
                field: name,
            })
        };

        // Clients omit empty strings, so an absent payload field reads as "".
        let or_empty = |field: Option<String>| field.unwrap_or_default();

        let command = match action.as_str() {
            "create_domain" => Command::CreateDomain {
                domain: require(domain, "domain")?,
            },
            "set_string" => Command::SetString {
                domain: require(domain, "domain")?,
                key: or_empty(key),
                value: or_empty(value),
            },
            "get_string" => Command::GetString {
                domain: require(domain, "domain")?,
                key: or_empty(key),
            },
            "increment" => Command::Increment {
                domain: require(domain, "domain")?,
                key: or_empty(key),
            },
            "decrement" => Command::Decrement {
                domain: require(domain, "domain")?,
                key: or_empty(key),
            },
            "insert_skiplist" => Command::InsertSkipList {
                domain: require(domain, "domain")?,
                slkey: require(slkey, "slkey")?,
                key: or_empty(key),
                value: or_empty(value),
            },
            "search_skiplist" => Command::SearchSkipList {
                domain: require(domain, "domain")?,
                slkey: require(slkey, "slkey")?,
                key: or_empty(key),
            },
            "delete_skiplist" => Command::DeleteSkipList {
                domain: require(domain, "domain")?,
                slkey: require(slkey, "slkey")?,
                key: or_empty(key),
            },
            "delete_range_skiplist" => Command::DeleteRangeSkipList {
                domain: require(domain, "domain")?,
                slkey: require(slkey, "slkey")?,
                min_key: or_empty(min_key),
                max_key: or_empty(max_key),
            },
            "rank_skiplist" => Command::RankSkipList {
                domain: require(domain, "domain")?,
                slkey: require(slkey, "slkey")?,
                key: or_empty(key),
            },
            _ => {
                return Err(Error::UnknownAction {
                    action: action.clone(),
                })
            }
        };
        Ok(command)
    }
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        let request = Request::new(command.action());
        match command {
            Command::CreateDomain { domain } => request.domain(domain),
            Command::SetString { domain, key, value } => request.domain(domain).key(key).value(value),
            Command::GetString { domain, key }
            | Command::Increment { domain, key }
            | Command::Decrement { domain, key } => request.domain(domain).key(key),
            Command::InsertSkipList {
                domain,
                slkey,
                key,
                value,
            } => request.domain(domain).slkey(slkey).key(key).value(value),
            Command::SearchSkipList { domain, slkey, key }
            | Command::DeleteSkipList { domain, slkey, key }
            | Command::RankSkipList { domain, slkey, key } => {
                request.domain(domain).slkey(slkey).key(key)
            }
            Command::DeleteRangeSkipList {
                domain,
                slkey,
                min_key,
                max_key,
            } => request.domain(domain).slkey(slkey).range(min_key, max_key),
        }
    }
}
