//! Behavioural suites for the server.

mod session_behaviour;
mod support;
