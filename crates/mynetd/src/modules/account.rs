//! Registration and sign-in.

use tracing::{info, warn};

use crate::auth::RegistrationError;
use crate::command::Arguments;
use crate::dispatch::{Flow, Module, ModuleError};
use crate::session::SessionContext;

use super::MODULES_TARGET;

/// Reply for every failed sign-in, whatever the cause.
pub const LOGIN_FAILED: &str = "Login failed: unknown user or wrong secret.";

/// `register <name>`: creates an account in the default group.
#[derive(Debug, Default)]
pub struct Register;

impl Module for Register {
    fn call(&self, ctx: &mut SessionContext, args: &Arguments) -> Result<Flow, ModuleError> {
        let name = joined_unquoted(args);
        let reply = match ctx.state().auth().register(&name) {
            Ok(user) => format!(
                "User {} registered. Ask an administrator to set your secret, then log in.",
                user.username
            ),
            Err(RegistrationError::EmptyName) => "Usage: register <name>".to_owned(),
            Err(RegistrationError::InvalidName { .. }) => {
                "Usernames may only contain letters, digits, '-' and '_'.".to_owned()
            }
            Err(RegistrationError::AlreadyExists { name }) => {
                format!("The user {name} already exists.")
            }
            Err(RegistrationError::Store(store_error)) => {
                return Err(ModuleError::failed(store_error.to_string()));
            }
        };
        ctx.send(&reply)?;
        Ok(Flow::Continue)
    }
}

/// `login <name> <secret>`: authenticates and switches group.
#[derive(Debug, Default)]
pub struct Login;

impl Module for Login {
    fn call(&self, ctx: &mut SessionContext, args: &Arguments) -> Result<Flow, ModuleError> {
        let (Some(name), Some(secret)) = (args.unquoted(0), args.unquoted(1)) else {
            ctx.send("Usage: login <name> <secret>")?;
            return Ok(Flow::Continue);
        };
        let record = ctx
            .state()
            .auth()
            .lookup(&name)
            .map_err(|store_error| ModuleError::failed(store_error.to_string()))?;
        let verified = record.filter(|user| ctx.state().verifier().verify(user, secret.as_bytes()));
        match verified {
            Some(user) => {
                ctx.login(&user);
                info!(target: MODULES_TARGET, group = %user.group, "user logged in");
                ctx.send(&format!("Welcome, {}.", user.username))?;
            }
            None => {
                warn!(target: MODULES_TARGET, attempted = %name, "login rejected");
                ctx.send(LOGIN_FAILED)?;
            }
        }
        Ok(Flow::Continue)
    }
}

fn joined_unquoted(args: &Arguments) -> String {
    (0..args.len())
        .filter_map(|index| args.unquoted(index))
        .collect::<Vec<_>>()
        .join(" ")
}
