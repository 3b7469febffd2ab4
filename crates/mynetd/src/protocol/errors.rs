//! Error types for line framing.

use std::io;

use thiserror::Error;

/// Failures while reading or writing protocol lines.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// No complete line arrived within the inactivity bound.
    #[error("connection idle beyond the inactivity timeout")]
    Timeout,
    /// The peer sent more than the line size limit without a terminator.
    #[error("line exceeds {max_bytes} byte limit")]
    LineTooLong { max_bytes: usize },
    /// Transport-level failure.
    #[error("connection I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl ProtocolError {
    /// Classifies a read error, separating stalls from hard failures.
    pub(crate) fn from_read(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Io(error),
        }
    }
}
