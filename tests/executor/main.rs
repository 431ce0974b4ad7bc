//! Executor Crate Integration Tests
//!
//! Tests for domainkv-executor: command dispatch, JSON handling, and the
//! typed `Kvs` wrapper.

#[path = "../common/mod.rs"]
mod common;

mod json_protocol;
