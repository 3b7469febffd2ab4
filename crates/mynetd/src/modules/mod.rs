//! Built-in modules for the `visitor` and `basic` groups.

mod account;
mod help;
mod session;

use crate::dispatch::{
    DEFAULT_USER_GROUP, ModuleRegistry, RegistryError, VISITOR_GROUP, factory_for,
};

pub use self::account::{Login, Register};
pub use self::help::Help;
pub use self::session::{Logout, Quit, WhoAmI};

pub(crate) const MODULES_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::modules");

/// Binds every built-in module into `registry`.
///
/// # Errors
///
/// Propagates [`RegistryError`] from [`ModuleRegistry::bind`].
pub fn install_builtins(registry: &ModuleRegistry) -> Result<(), RegistryError> {
    registry.bind(VISITOR_GROUP, "help", factory_for::<Help>())?;
    registry.bind(VISITOR_GROUP, "register", factory_for::<Register>())?;
    registry.bind(VISITOR_GROUP, "login", factory_for::<Login>())?;
    registry.bind(VISITOR_GROUP, "quit", factory_for::<Quit>())?;

    registry.bind(DEFAULT_USER_GROUP, "help", factory_for::<Help>())?;
    registry.bind(DEFAULT_USER_GROUP, "whoami", factory_for::<WhoAmI>())?;
    registry.bind(DEFAULT_USER_GROUP, "logout", factory_for::<Logout>())?;
    registry.bind(DEFAULT_USER_GROUP, "quit", factory_for::<Quit>())?;
    Ok(())
}

/// One-line usage for a built-in command.
fn usage(command: &str) -> Option<&'static str> {
    let text = match command {
        "help" => "help [command]: list the commands available to you",
        "register" => "register <name>: create an account",
        "login" => "login <name> <secret>: sign in",
        "logout" => "logout: sign out and continue as a visitor",
        "whoami" => "whoami: show your username and group",
        "quit" => "quit: close the connection",
        _ => return None,
    };
    Some(text)
}
