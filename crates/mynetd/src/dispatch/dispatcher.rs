//! Resolves a command in the caller's group and runs its module.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info, warn};

use crate::command::{Arguments, parse_line, tokenize};
use crate::session::SessionContext;

use super::errors::DispatchError;
use super::module::{Flow, ModuleError};
use super::names::sanitize_name;
use super::DISPATCH_TARGET;

/// Parses a raw client line and dispatches it.
///
/// Lexing failures are reported to the peer as a syntax error and keep the
/// session open.
pub fn handle_line(ctx: &mut SessionContext, line: &str) -> Flow {
    let parsed = parse_line(line);
    if parsed.command.is_empty() {
        return Flow::Continue;
    }
    match tokenize(parsed.remainder) {
        Ok(args) => dispatch(ctx, &parsed.command, args),
        Err(parse_error) => report(ctx, &DispatchError::Syntax(parse_error)),
    }
}

/// Runs `command` for the session's current group.
///
/// Failures never escape: each is logged with full detail and answered with
/// a short client message. Only a broken connection or a module asking to
/// close yields [`Flow::Close`].
pub fn dispatch(ctx: &mut SessionContext, command: &str, args: Arguments) -> Flow {
    match run(ctx, command, &args) {
        Ok(flow) => flow,
        Err(dispatch_error) => report(ctx, &dispatch_error),
    }
}

fn run(ctx: &mut SessionContext, command: &str, args: &Arguments) -> Result<Flow, DispatchError> {
    let group = sanitize_name(ctx.identity().group());
    let clean = sanitize_name(command);
    // A token that changes under sanitisation is treated exactly like an
    // unbound one so callers learn nothing.
    if clean != command {
        return Err(DispatchError::command_not_found(command, group));
    }
    let factory = ctx
        .state()
        .registry()
        .resolve(&group, &clean)
        .ok_or_else(|| DispatchError::command_not_found(command, group.as_str()))?;

    ctx.record_command(&clean, args);
    if ctx.state().log_arguments() {
        info!(
            target: DISPATCH_TARGET,
            command = %clean,
            group = %group,
            args = ?args.as_slice(),
            "dispatching command"
        );
    } else {
        info!(
            target: DISPATCH_TARGET,
            command = %clean,
            group = %group,
            "dispatching command"
        );
    }

    let module = factory().map_err(|module_error| match module_error {
        ModuleError::Protocol(protocol) => DispatchError::Io(protocol),
        other => DispatchError::module_broken(&clean, other.to_string()),
    })?;
    match panic::catch_unwind(AssertUnwindSafe(|| module.call(ctx, args))) {
        Ok(Ok(flow)) => Ok(flow),
        Ok(Err(ModuleError::Contract { reason })) => {
            Err(DispatchError::module_broken(clean, reason))
        }
        Ok(Err(ModuleError::Failed { message })) => {
            Err(DispatchError::module_failed(clean, message))
        }
        Ok(Err(ModuleError::Protocol(protocol))) => Err(DispatchError::Io(protocol)),
        Err(payload) => Err(DispatchError::module_failed(clean, panic_message(&*payload))),
    }
}

fn report(ctx: &mut SessionContext, dispatch_error: &DispatchError) -> Flow {
    match dispatch_error {
        DispatchError::Syntax(parse_error) => {
            info!(target: DISPATCH_TARGET, error = %parse_error, "syntax error in call");
        }
        DispatchError::CommandNotFound { command, group } => {
            warn!(
                target: DISPATCH_TARGET,
                command = %command,
                group = %group,
                "unknown command requested"
            );
        }
        DispatchError::ModuleBroken { .. } | DispatchError::ModuleFailed { .. } => {
            error!(target: DISPATCH_TARGET, error = %dispatch_error, "module error");
        }
        DispatchError::Io(_) => {
            warn!(target: DISPATCH_TARGET, error = %dispatch_error, "client write failed");
        }
    }
    if let Some(message) = dispatch_error.client_message()
        && let Err(write_error) = ctx.send(&message)
    {
        warn!(target: DISPATCH_TARGET, error = %write_error, "client write failed");
        return Flow::Close;
    }
    if dispatch_error.is_fatal() {
        Flow::Close
    } else {
        Flow::Continue
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "module panicked".to_owned()
    }
}
