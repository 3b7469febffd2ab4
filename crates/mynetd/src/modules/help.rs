use crate::command::Arguments;
use crate::dispatch::{Flow, Module, ModuleError, sanitize_name};
use crate::session::SessionContext;

use super::usage;

/// Lists the commands bound for the caller's group, or describes one.
#[derive(Debug, Default)]
pub struct Help;

impl Module for Help {
    fn call(&self, ctx: &mut SessionContext, args: &Arguments) -> Result<Flow, ModuleError> {
        let group = sanitize_name(ctx.identity().group());
        let commands = ctx.state().registry().commands_for(&group);

        if let Some(topic) = args.unquoted(0).map(|topic| topic.to_lowercase())
            && commands.contains(&topic)
        {
            let line = usage(&topic).map_or_else(|| topic.clone(), str::to_owned);
            ctx.send(&line)?;
            return Ok(Flow::Continue);
        }

        ctx.send(&format!("Available commands: {}", commands.join(", ")))?;
        Ok(Flow::Continue)
    }
}
