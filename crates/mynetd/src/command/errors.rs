//! Argument lexing failures.

use thiserror::Error;

/// Reasons an argument string could not be tokenized.
///
/// Offsets are byte positions within the argument text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A quote was opened and never closed.
    #[error("unterminated {quote} quote opened at byte {offset}")]
    UnterminatedQuote { quote: char, offset: usize },
    /// An opening bracket was never closed.
    #[error("unclosed '{open}' opened at byte {offset}")]
    UnclosedBracket { open: char, offset: usize },
    /// A closing bracket had no matching opener.
    #[error("unexpected '{close}' at byte {offset}")]
    UnexpectedClose { close: char, offset: usize },
    /// A closing bracket closed a different kind of opener.
    #[error("'{close}' at byte {offset} does not close '{open}'")]
    MismatchedBracket {
        open: char,
        close: char,
        offset: usize,
    },
    /// The text ended with an escape character.
    #[error("dangling escape at byte {offset}")]
    TrailingEscape { offset: usize },
}
