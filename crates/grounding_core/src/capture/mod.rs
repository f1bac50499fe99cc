//! Brain-dump capture and the clarify queue.
//!
//! # Responsibility
//! - Turn free-form multi-line input into clean capture lines.
//! - Maintain the newest-first queue of drafts awaiting human triage.
//!
//! # Invariants
//! - Splitting is pure and never yields empty lines or line breaks.
//! - Drafts are never promoted automatically.

pub mod queue;
pub mod split;

pub use queue::{
    clarify, dequeue, enqueue, enqueue_at, next_for_clarification, pending, set_status,
};
pub use split::{split_capture, split_lines};
