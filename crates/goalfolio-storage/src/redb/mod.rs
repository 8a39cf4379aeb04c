//! Redb storage backend.
//!
//! This module provides the [`RedbStore`] that uses [redb](https://crates.io/crates/redb),
//! a pure-Rust embedded database with ACID transactions.

mod store;

pub use store::RedbStore;
