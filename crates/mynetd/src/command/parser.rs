//! Command line splitting.

/// A client line split at its first space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Requested command, lower-cased. Not yet validated.
    pub command: String,
    /// Unparsed argument text following the command; may be empty.
    pub remainder: &'a str,
}

/// Splits a trimmed line into its command token and argument text.
///
/// The command token is lower-cased so `HELP` and `help` resolve alike;
/// sanitisation happens later, in the dispatcher.
#[must_use]
pub fn parse_line(raw: &str) -> ParsedLine<'_> {
    let trimmed = raw.trim();
    let (command, remainder) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    ParsedLine {
        command: command.trim().to_lowercase(),
        remainder,
    }
}
