//! Interactive sessions.
//!
//! A session owns one connection: it greets the peer, prompts, reads a line,
//! dispatches it in the group of the current identity, and repeats until the
//! peer leaves, a module asks to close, or the idle timeout fires.

mod context;
mod handler;
mod identity;
#[cfg(test)]
pub(crate) mod test_support;

pub use self::context::{PROMPT_SUFFIX, SessionContext, SessionStream};
pub(crate) use self::handler::SessionConnectionHandler;
pub use self::handler::{BANNER_HINT, BANNER_TITLE, SessionEnd, run_session};
pub use self::identity::Identity;

pub(crate) const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");
