//! Shell-like lexer for command arguments.
//!
//! Whitespace separates tokens unless it is quoted, escaped, or inside a
//! bracket group. Tokens keep their source text, so joining them with single
//! spaces and lexing again yields the same tokens.

use super::{Arguments, ParseError};

const ESCAPE: char = '\\';

/// Splits argument text into ordered tokens.
///
/// Double quotes allow `\` escapes, single quotes are literal, and `()`,
/// `[]` and `{}` group nested content. An empty or blank input yields no
/// tokens.
///
/// # Errors
///
/// Returns a [`ParseError`] for unterminated quotes, unbalanced or mismatched
/// brackets, and a trailing escape.
pub fn tokenize(remainder: &str) -> Result<Arguments, ParseError> {
    let mut lexer = Lexer::default();
    for (offset, ch) in remainder.char_indices() {
        lexer.feed(offset, ch)?;
    }
    lexer.finish()
}

#[derive(Default)]
struct Lexer {
    tokens: Vec<String>,
    current: String,
    quote: Option<(char, usize)>,
    brackets: Vec<(char, usize)>,
    escape_at: Option<usize>,
}

impl Lexer {
    fn feed(&mut self, offset: usize, ch: char) -> Result<(), ParseError> {
        if self.escape_at.take().is_some() {
            self.current.push(ch);
            return Ok(());
        }

        match self.quote {
            Some((quote, _)) => self.feed_quoted(offset, ch, quote),
            None => self.feed_bare(offset, ch),
        }
    }

    fn feed_quoted(&mut self, offset: usize, ch: char, quote: char) -> Result<(), ParseError> {
        if ch == quote {
            self.quote = None;
        } else if ch == ESCAPE && quote == '"' {
            self.escape_at = Some(offset);
        }
        self.current.push(ch);
        Ok(())
    }

    fn feed_bare(&mut self, offset: usize, ch: char) -> Result<(), ParseError> {
        match ch {
            c if c.is_whitespace() && self.brackets.is_empty() => {
                self.flush();
                return Ok(());
            }
            ESCAPE => self.escape_at = Some(offset),
            '"' | '\'' => self.quote = Some((ch, offset)),
            '(' | '[' | '{' => self.brackets.push((ch, offset)),
            ')' | ']' | '}' => self.close_bracket(offset, ch)?,
            _ => {}
        }
        self.current.push(ch);
        Ok(())
    }

    fn close_bracket(&mut self, offset: usize, close: char) -> Result<(), ParseError> {
        match self.brackets.pop() {
            Some((open, _)) if closing_for(open) == close => Ok(()),
            Some((open, _)) => Err(ParseError::MismatchedBracket {
                open,
                close,
                offset,
            }),
            None => Err(ParseError::UnexpectedClose { close, offset }),
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Result<Arguments, ParseError> {
        if let Some(offset) = self.escape_at {
            return Err(ParseError::TrailingEscape { offset });
        }
        if let Some((quote, offset)) = self.quote {
            return Err(ParseError::UnterminatedQuote { quote, offset });
        }
        if let Some(&(open, offset)) = self.brackets.last() {
            return Err(ParseError::UnclosedBracket { open, offset });
        }
        self.flush();
        Ok(Arguments::new(self.tokens))
    }
}

const fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Removes one level of quoting and resolves escapes in a lexed token.
///
/// Brackets are content, not quoting, and are kept.
pub(crate) fn unquote(token: &str) -> String {
    let mut plain = String::with_capacity(token.len());
    let mut quote = None::<char>;
    let mut escaped = false;
    for ch in token.chars() {
        if escaped {
            plain.push(ch);
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some('"') | None, ESCAPE) => escaped = true,
            (None, '"' | '\'') => quote = Some(ch),
            _ => plain.push(ch),
        }
    }
    plain
}
