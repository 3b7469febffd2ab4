//! Splitting client lines into a command token and its arguments.

mod arguments;
mod errors;
mod parser;
mod tokenizer;

pub use self::arguments::Arguments;
pub use self::errors::ParseError;
pub use self::parser::{ParsedLine, parse_line};
pub use self::tokenizer::tokenize;
