//! Record repository abstractions and implementations.
//!
//! # Responsibility
//! - Define the key/value contract the local state store persists through.
//! - Isolate SQLite details from the store and session layers.
//!
//! # Invariants
//! - A write fully replaces the previous value for its key.
//! - Keys are non-blank strings.

pub mod record_repo;
