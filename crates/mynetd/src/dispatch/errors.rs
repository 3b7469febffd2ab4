//! Dispatch failure taxonomy.
//!
//! Every variant carries operator detail in its `Display` form; what the
//! client sees comes from [`DispatchError::client_message`] and never
//! includes that detail.

use thiserror::Error;

use crate::command::ParseError;
use crate::protocol::ProtocolError;

/// Reply sent for argument lexing failures.
pub const SYNTAX_ERROR_MESSAGE: &str =
    "! There is a syntax error in your call. Check closing quotes, brackets and line breaks.";

/// Reply sent when a module fails at runtime.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal module error!";

/// Errors surfaced while resolving or running a command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Arguments could not be tokenized.
    #[error("syntax error in arguments: {0}")]
    Syntax(#[from] ParseError),
    /// The command token was not clean, or nothing is bound for it.
    #[error("no module '{command}' for group '{group}'")]
    CommandNotFound { command: String, group: String },
    /// The resolved module violates its contract.
    #[error("module '{command}' is broken: {reason}")]
    ModuleBroken { command: String, reason: String },
    /// The module failed or panicked while running.
    #[error("module '{command}' failed: {message}")]
    ModuleFailed { command: String, message: String },
    /// The client could not be written to.
    #[error("client I/O failed: {0}")]
    Io(#[from] ProtocolError),
}

impl DispatchError {
    /// Creates a command not found error.
    pub fn command_not_found(command: impl Into<String>, group: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
            group: group.into(),
        }
    }

    /// Creates a broken module error.
    pub fn module_broken(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModuleBroken {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Creates a module failure error.
    pub fn module_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModuleFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Short text for the network peer, or `None` when nothing should be
    /// sent because the connection itself failed.
    #[must_use]
    pub fn client_message(&self) -> Option<String> {
        match self {
            Self::Syntax(_) => Some(SYNTAX_ERROR_MESSAGE.to_owned()),
            Self::CommandNotFound { command, .. } => Some(format!("No such command: {command}")),
            Self::ModuleBroken { command, .. } => {
                Some(format!("Module {command} is broken and cannot run."))
            }
            Self::ModuleFailed { .. } => Some(INTERNAL_ERROR_MESSAGE.to_owned()),
            Self::Io(_) => None,
        }
    }

    /// True when the session cannot continue after this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
