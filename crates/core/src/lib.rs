//! Core types for domainkv
//!
//! This crate holds the error taxonomy shared by the storage, executor and
//! server layers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{Result, StoreError};
