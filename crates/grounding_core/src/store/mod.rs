//! Local state store and the owning application session.
//!
//! # Responsibility
//! - Persist the whole `AppState` document under one record key.
//! - Own the canonical in-memory document and gate writes on hydration.
//!
//! # Invariants
//! - Load never fails: absent or corrupt records yield the fallback.
//! - Save is best-effort: storage failures are logged and swallowed.
//! - No write happens before the one-time hydrate.

pub mod local_store;
pub mod session;
