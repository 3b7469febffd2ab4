//! Commands acting on the current session.

use tracing::info;

use crate::command::Arguments;
use crate::dispatch::{Flow, Module, ModuleError};
use crate::session::SessionContext;

use super::MODULES_TARGET;

/// Farewell written before the connection closes.
pub const FAREWELL: &str = "Adios!";

/// `quit`: says goodbye and closes the connection.
#[derive(Debug, Default)]
pub struct Quit;

impl Module for Quit {
    fn call(&self, ctx: &mut SessionContext, _args: &Arguments) -> Result<Flow, ModuleError> {
        ctx.send(FAREWELL)?;
        Ok(Flow::Close)
    }
}

/// `whoami`: reports the signed-in user and group.
#[derive(Debug, Default)]
pub struct WhoAmI;

impl Module for WhoAmI {
    fn call(&self, ctx: &mut SessionContext, _args: &Arguments) -> Result<Flow, ModuleError> {
        let Some(username) = ctx.identity().username() else {
            return Err(ModuleError::contract("whoami requires a signed-in session"));
        };
        let line = format!("{username} ({})", ctx.identity().group());
        ctx.send(&line)?;
        Ok(Flow::Continue)
    }
}

/// `logout`: returns to the visitor group without closing.
#[derive(Debug, Default)]
pub struct Logout;

impl Module for Logout {
    fn call(&self, ctx: &mut SessionContext, _args: &Arguments) -> Result<Flow, ModuleError> {
        if let Some(username) = ctx.logout() {
            info!(target: MODULES_TARGET, %username, "user logged out");
            ctx.send(&format!("Goodbye, {username}."))?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::auth::UserRecord;
    use crate::dispatch::handle_line;
    use crate::session::test_support::{SessionHarness, harness};

    fn signed_in(harness: &SessionHarness) -> SessionContext {
        let mut ctx = harness.context(b"");
        ctx.login(&UserRecord {
            username: "Bob".into(),
            group: "basic".into(),
            credential: b"x".to_vec(),
        });
        ctx
    }

    #[rstest]
    fn quit_closes(harness: SessionHarness) {
        let mut ctx = harness.context(b"");
        assert_eq!(handle_line(&mut ctx, "quit now"), Flow::Close);
        assert_eq!(harness.output(), "Adios!\n");
    }

    #[rstest]
    fn whoami_and_logout(harness: SessionHarness) {
        let mut ctx = signed_in(&harness);
        handle_line(&mut ctx, "whoami");
        handle_line(&mut ctx, "logout");
        handle_line(&mut ctx, "whoami");
        assert_eq!(
            harness.output(),
            "Bob (basic)\nGoodbye, Bob.\nNo such command: whoami\n"
        );
        assert_eq!(ctx.identity().group(), "visitor");
    }

    #[rstest]
    fn basic_help_lists_basic_commands(harness: SessionHarness) {
        let mut ctx = signed_in(&harness);
        handle_line(&mut ctx, "help");
        assert_eq!(
            harness.output(),
            "Available commands: help, logout, quit, whoami\n"
        );
    }
}
