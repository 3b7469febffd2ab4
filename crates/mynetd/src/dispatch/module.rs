//! The capability handler contract.

use std::sync::Arc;

use thiserror::Error;

use crate::command::Arguments;
use crate::protocol::ProtocolError;
use crate::session::SessionContext;

/// What the session loop does after a module returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// Close the connection.
    Close,
}

/// Failures reported by a module or its factory.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The module cannot honour its calling contract (misconfigured or
    /// incomplete implementation).
    #[error("module contract violated: {reason}")]
    Contract { reason: String },
    /// The module ran but could not complete.
    #[error("module failed: {message}")]
    Failed { message: String },
    /// Writing to the client failed while the module was running.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ModuleError {
    /// Builds a contract violation.
    pub fn contract(reason: impl Into<String>) -> Self {
        Self::Contract {
            reason: reason.into(),
        }
    }

    /// Builds a runtime failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// A group-scoped command implementation.
pub trait Module: Send + Sync {
    /// Runs the command for the session that issued it.
    ///
    /// # Errors
    ///
    /// Any [`ModuleError`]; the dispatcher turns it into a generic client
    /// message and logs the detail.
    fn call(&self, ctx: &mut SessionContext, args: &Arguments) -> Result<Flow, ModuleError>;
}

/// Builds a fresh module instance for each invocation.
pub type ModuleFactory = Arc<dyn Fn() -> Result<Box<dyn Module>, ModuleError> + Send + Sync>;

/// Factory producing a default-constructed `M` on every call.
#[must_use]
pub fn factory_for<M>() -> ModuleFactory
where
    M: Module + Default + 'static,
{
    Arc::new(|| Ok(Box::new(M::default()) as Box<dyn Module>))
}
