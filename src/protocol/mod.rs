//! Result protocol between an isolated test and its parent
//!
//! A child reports exactly one message over a unidirectional byte channel: a
//! 4-byte tag (`PASS` for a pass, `FAIL` for anything else) immediately
//! followed by the optional message bytes. The writer closes its end right
//! after writing so the reader observes EOF.
//!
//! The reader performs a single read of at most [`READ_BUFFER_LEN`] bytes,
//! tag included. Longer messages are silently truncated; callers that need
//! long diagnostics must keep failure messages under
//! `READ_BUFFER_LEN - TAG_LEN` bytes.

use std::io::{self, ErrorKind, Read, Write};
use thiserror::Error;

use crate::models::{Outcome, OutcomeRecord};

/// Length of the outcome tag
pub const TAG_LEN: usize = 4;

/// Upper bound on the bytes read back from a child, tag included
pub const READ_BUFFER_LEN: usize = 128;

/// Message recorded when the channel yields nothing
pub const SYSTEM_FAILURE: &str = "Test system failure";

const PASS_TAG: &[u8; TAG_LEN] = b"PASS";
const FAIL_TAG: &[u8; TAG_LEN] = b"FAIL";

/// Result protocol errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Failed to write result to channel: {0}")]
    Write(#[from] io::Error),
}

/// Encode an outcome and optional message into a single wire message
pub fn encode(outcome: Outcome, message: &str) -> Vec<u8> {
    let tag = match outcome {
        Outcome::Pass => PASS_TAG,
        _ => FAIL_TAG,
    };

    let mut bytes = Vec::with_capacity(TAG_LEN + message.len());
    bytes.extend_from_slice(tag);
    bytes.extend_from_slice(message.as_bytes());
    bytes
}

/// Write a result and close the channel
pub fn write_result<W: Write>(
    mut channel: W,
    outcome: Outcome,
    message: &str,
) -> Result<(), ProtocolError> {
    channel.write_all(&encode(outcome, message))?;
    channel.flush()?;
    Ok(())
}

/// Read a single result from the channel
///
/// Never fails: a channel that errors or yields no bytes produces a Fail
/// record carrying [`SYSTEM_FAILURE`].
pub fn read_result<R: Read>(mut channel: R) -> OutcomeRecord {
    let mut buffer = [0u8; READ_BUFFER_LEN];

    let len = loop {
        match channel.read(&mut buffer) {
            Ok(len) => break len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::error!("Failed to read result from channel: {e}");
                break 0;
            }
        }
    };

    decode(&buffer[..len])
}

/// Decode a wire message
pub fn decode(bytes: &[u8]) -> OutcomeRecord {
    if bytes.is_empty() {
        return OutcomeRecord::new(Outcome::Fail).with_message(SYSTEM_FAILURE);
    }

    let outcome = if bytes.starts_with(PASS_TAG) {
        Outcome::Pass
    } else {
        Outcome::Fail
    };

    let record = OutcomeRecord::new(outcome);
    match bytes.get(TAG_LEN..) {
        Some(message) if !message.is_empty() => {
            record.with_message(String::from_utf8_lossy(message))
        }
        _ => record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pass_without_message() {
        let record = read_result(Cursor::new(encode(Outcome::Pass, "")));
        assert_eq!(record.outcome(), Outcome::Pass);
        assert_eq!(record.message(), "");
    }

    #[test]
    fn test_fail_with_message() {
        let mut channel = Vec::new();
        write_result(&mut channel, Outcome::Fail, "boom").unwrap();
        assert_eq!(channel, b"FAILboom");

        let record = read_result(channel.as_slice());
        assert_eq!(record.outcome(), Outcome::Fail);
        assert_eq!(record.message(), "boom");
    }

    #[test]
    fn test_non_pass_outcomes_encode_as_fail() {
        assert_eq!(encode(Outcome::Crash, "x"), b"FAILx");
        assert_eq!(encode(Outcome::Skipped, ""), b"FAIL");
    }

    #[test]
    fn test_empty_channel_is_system_failure() {
        let record = read_result(io::empty());
        assert_eq!(record.outcome(), Outcome::Fail);
        assert_eq!(record.message(), SYSTEM_FAILURE);
    }

    #[test]
    fn test_unknown_tag_is_fail() {
        let record = decode(b"PAS");
        assert_eq!(record.outcome(), Outcome::Fail);
        assert_eq!(record.message(), "");

        let record = decode(b"OKAYdone");
        assert_eq!(record.outcome(), Outcome::Fail);
        assert_eq!(record.message(), "done");
    }

    #[test]
    fn test_long_message_truncated_at_buffer() {
        let message = "x".repeat(300);
        let record = read_result(Cursor::new(encode(Outcome::Fail, &message)));
        assert_eq!(record.message().len(), READ_BUFFER_LEN - TAG_LEN);
    }

    #[test]
    fn test_write_error_is_reported() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_result(Broken, Outcome::Pass, "").unwrap_err();
        assert!(err.to_string().contains("closed"));
    }
}
