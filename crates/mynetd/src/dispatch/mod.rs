//! Command resolution and dispatch.
//!
//! Each command is looked up in a two-key table: the sanitised group of the
//! session's identity and the sanitised command token. A hit yields a
//! factory that builds a fresh [`Module`] for the call. Misses, unclean
//! tokens, broken modules and module failures are all answered with short
//! client messages; the detail goes to the operator log.

mod dispatcher;
mod errors;
mod module;
mod names;
mod registry;

pub use self::dispatcher::{dispatch, handle_line};
pub use self::errors::{DispatchError, INTERNAL_ERROR_MESSAGE, SYNTAX_ERROR_MESSAGE};
pub use self::module::{Flow, Module, ModuleError, ModuleFactory, factory_for};
pub use self::names::{DEFAULT_USER_GROUP, VISITOR_GROUP, is_clean_name, sanitize_name};
pub use self::registry::{ModuleRegistry, RegistryError};

pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
