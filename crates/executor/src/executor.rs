//! The command executor.

use std::sync::Arc;

use domainkv_storage::Store;
use domainkv_wire::{decode_request, encode_response, Request, Response};
use tracing::debug;

use crate::handlers::{self, skiplist, string};
use crate::{Command, Error, Output, Result};

/// Executes commands against a shared [`Store`].
///
/// The executor holds no locks of its own and is cheap to clone; every
/// connection can own one.
#[derive(Clone)]
pub struct Executor {
    store: Arc<Store>,
}

impl Executor {
    /// Create an executor over `store`.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Execute one command.
    pub fn execute(&self, command: Command) -> Result<Output> {
        let store = &self.store;
        match command {
            Command::CreateDomain { domain } => handlers::domain::create_domain(store, &domain),
            Command::SetString { domain, key, value } => {
                string::set_string(store, &domain, key, value)
            }
            Command::GetString { domain, key } => string::get_string(store, &domain, &key),
            Command::Increment { domain, key } => string::increment(store, &domain, &key),
            Command::Decrement { domain, key } => string::decrement(store, &domain, &key),
            Command::InsertSkipList {
                domain,
                slkey,
                key,
                value,
            } => skiplist::insert(store, &domain, &slkey, key, value),
            Command::SearchSkipList { domain, slkey, key } => {
                skiplist::search(store, &domain, &slkey, &key)
            }
            Command::DeleteSkipList { domain, slkey, key } => {
                skiplist::delete(store, &domain, &slkey, &key)
            }
            Command::DeleteRangeSkipList {
                domain,
                slkey,
                min_key,
                max_key,
            } => skiplist::delete_range(store, &domain, &slkey, &min_key, &max_key),
            Command::RankSkipList { domain, slkey, key } => {
                skiplist::rank(store, &domain, &slkey, &key)
            }
        }
    }

    /// Validate and execute a decoded request. Never fails: every error
    /// becomes an error response.
    pub fn handle(&self, request: Request) -> Response {
        debug!(
            action = %request.action,
            domain = request.domain.as_deref().unwrap_or(""),
            "handling request"
        );
        let result = Command::try_from(request).and_then(|command| self.execute(command));
        respond(result)
    }

    /// Decode a JSON request and handle it. A payload that does not decode
    /// yields an `invalid request` error response.
    pub fn handle_json(&self, text: &str) -> Response {
        match decode_request(text) {
            Ok(request) => self.handle(request),
            Err(e) => respond(Err(Error::from(e))),
        }
    }

    /// Decode a JSON request, handle it, and encode the JSON response.
    pub fn handle_text(&self, text: &str) -> String {
        encode_response(&self.handle_json(text))
    }
}

fn respond(result: Result<Output>) -> Response {
    match result {
        Ok(output) => output.into_response(),
        Err(e) => {
            debug!(error = %e, "request failed");
            Response::error(e.to_string())
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("domains", &self.store.domain_count())
            .finish()
    }
}
