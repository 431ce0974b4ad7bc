//! Command handlers.
//!
//! One free function per command. Each resolves the target domain through
//! the store's registry, then performs the operation under that domain's
//! own lock.

pub mod domain;
pub mod skiplist;
pub mod string;
