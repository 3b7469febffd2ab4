//! Buffered line reader and writer.

use std::io::{self, Read, Write};

use super::ProtocolError;

/// Longest line accepted from a client, terminator excluded.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

const READ_CHUNK: usize = 1024;

/// Result of waiting for the next client line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line with its terminator removed.
    Line(String),
    /// The peer closed the connection and no buffered data remains.
    EndOfStream,
}

/// Framed view over a bidirectional stream.
///
/// Reads are buffered so that several lines arriving in one segment are
/// handed out one at a time, in order.
#[derive(Debug)]
pub struct LineChannel<S> {
    stream: S,
    buffer: Vec<u8>,
    /// Second half of a two-byte terminator that may still arrive.
    pending_pair: Option<u8>,
    closed: bool,
}

impl<S> LineChannel<S> {
    /// Wraps a stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
            pending_pair: None,
            closed: false,
        }
    }

    /// Borrows the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Unwraps the channel, discarding buffered input.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> LineChannel<S> {
    /// Blocks until a full line, end of stream, or a read timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Timeout`] when the stream's read timeout
    /// elapses, [`ProtocolError::LineTooLong`] when the size limit is
    /// exceeded, and [`ProtocolError::Io`] for other transport failures.
    pub fn read_line(&mut self) -> Result<ReadOutcome, ProtocolError> {
        loop {
            self.skip_pending_pair();
            if let Some(line) = self.take_line() {
                return Ok(ReadOutcome::Line(line));
            }
            if self.buffer.len() > MAX_LINE_BYTES {
                self.buffer.clear();
                return Err(ProtocolError::LineTooLong {
                    max_bytes: MAX_LINE_BYTES,
                });
            }
            if self.closed {
                return Ok(self.drain_at_end());
            }
            self.fill()?;
        }
    }

    /// Writes `text` followed by `\n` and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Io`] if the peer cannot be written to.
    pub fn write_line(&mut self, text: &str) -> Result<(), ProtocolError> {
        self.stream.write_all(text.as_bytes())?;
        self.stream.write_all(b"\n")?;
        self.stream.flush()?;
        Ok(())
    }

    /// Writes `text` without a terminator and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Io`] if the peer cannot be written to.
    pub fn write_prompt(&mut self, text: &str) -> Result<(), ProtocolError> {
        self.stream.write_all(text.as_bytes())?;
        self.stream.flush()?;
        Ok(())
    }

    fn fill(&mut self) -> Result<(), ProtocolError> {
        let mut chunk = [0_u8; READ_CHUNK];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    self.closed = true;
                    return Ok(());
                }
                Ok(read) => {
                    self.buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
                    return Ok(());
                }
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(ProtocolError::from_read(error)),
            }
        }
    }

    fn drain_at_end(&mut self) -> ReadOutcome {
        if self.buffer.is_empty() {
            ReadOutcome::EndOfStream
        } else {
            let rest = std::mem::take(&mut self.buffer);
            ReadOutcome::Line(String::from_utf8_lossy(&rest).into_owned())
        }
    }
}

impl<S> LineChannel<S> {
    fn skip_pending_pair(&mut self) {
        let Some(pair) = self.pending_pair else {
            return;
        };
        if let Some(&first) = self.buffer.first() {
            if first == pair {
                self.buffer.remove(0);
            }
            self.pending_pair = None;
        }
    }

    fn take_line(&mut self) -> Option<String> {
        let position = self
            .buffer
            .iter()
            .position(|byte| matches!(byte, b'\n' | b'\r'))?;
        let mut rest = self.buffer.split_off(position);
        let terminator = rest.remove(0);
        let pair = complement(terminator);
        match rest.first() {
            Some(&next) if next == pair => {
                rest.remove(0);
            }
            Some(_) => {}
            None => self.pending_pair = Some(pair),
        }
        let line = std::mem::replace(&mut self.buffer, rest);
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

const fn complement(terminator: u8) -> u8 {
    if terminator == b'\n' { b'\r' } else { b'\n' }
}
