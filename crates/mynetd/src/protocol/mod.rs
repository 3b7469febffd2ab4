//! Line-oriented framing over a connection stream.
//!
//! Clients terminate lines with `\n`, `\r`, `\r\n` or `\n\r`; the server
//! answers with `\n`-terminated lines and sends prompts without a
//! terminator.

mod errors;
mod line;

pub use self::errors::ProtocolError;
pub use self::line::{LineChannel, MAX_LINE_BYTES, ReadOutcome};
