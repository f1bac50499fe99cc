//! Remote brain-dump submission.
//!
//! # Invariants
//! - Lines are sent one at a time, in input order.
//! - The first failure stops the batch; lines already sent stay sent.
//! - Callers see one generic message, never the per-line service error.

use super::RemoteError;
use crate::capture::split_lines;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const GENERIC_FAILURE_MESSAGE: &str = "Failed to save brain dump";

/// Adapter contract for the remote brain-dump endpoint.
pub trait BrainDumpSink {
    fn create_entry(&self, text: &str) -> Result<(), RemoteError>;
}

/// Batch failure after `sent` lines were accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrainDumpError {
    pub sent: usize,
    pub remaining: usize,
    pub cause: RemoteError,
}

impl Display for BrainDumpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(GENERIC_FAILURE_MESSAGE)
    }
}

impl Error for BrainDumpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Sends each non-empty trimmed line of `input` to `sink`.
///
/// Returns the number of lines sent; blank input sends nothing.
pub fn submit_brain_dump(sink: &dyn BrainDumpSink, input: &str) -> Result<usize, BrainDumpError> {
    let lines = split_lines(input);
    for (index, line) in lines.iter().enumerate() {
        if let Err(cause) = sink.create_entry(line) {
            warn!(
                "event=brain_dump_submit module=remote status=error sent={index} remaining={}",
                lines.len() - index
            );
            return Err(BrainDumpError {
                sent: index,
                remaining: lines.len() - index,
                cause,
            });
        }
    }

    info!(
        "event=brain_dump_submit module=remote status=ok sent={}",
        lines.len()
    );
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::{submit_brain_dump, BrainDumpSink};
    use crate::remote::RemoteError;
    use std::cell::RefCell;

    struct RecordingSink {
        fail_on: Option<&'static str>,
        received: RefCell<Vec<String>>,
    }

    impl RecordingSink {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                fail_on,
                received: RefCell::new(Vec::new()),
            }
        }
    }

    impl BrainDumpSink for RecordingSink {
        fn create_entry(&self, text: &str) -> Result<(), RemoteError> {
            if self.fail_on == Some(text) {
                return Err(RemoteError::new("permission denied for function"));
            }
            self.received.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn sends_each_line_in_order() {
        let sink = RecordingSink::new(None);
        let sent = submit_brain_dump(&sink, "  one\n\n - two \nthree  ").unwrap();
        assert_eq!(sent, 3);
        assert_eq!(*sink.received.borrow(), vec!["one", "- two", "three"]);
    }

    #[test]
    fn first_failure_aborts_remaining_lines() {
        let sink = RecordingSink::new(Some("two"));
        let err = submit_brain_dump(&sink, "one\ntwo\nthree").unwrap_err();

        assert_eq!(err.sent, 1);
        assert_eq!(err.remaining, 2);
        assert_eq!(err.to_string(), "Failed to save brain dump");
        assert_eq!(err.cause.message, "permission denied for function");
        assert_eq!(*sink.received.borrow(), vec!["one"]);
    }

    #[test]
    fn blank_input_sends_nothing() {
        let sink = RecordingSink::new(None);
        assert_eq!(submit_brain_dump(&sink, " \n\t").unwrap(), 0);
        assert!(sink.received.borrow().is_empty());
    }
}
