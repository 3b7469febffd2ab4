//! End-to-end behaviour of client sessions over TCP.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::dispatch::SYNTAX_ERROR_MESSAGE;

use super::support::{ServerWorld, unquote_step};

#[fixture]
fn world() -> RefCell<ServerWorld> {
    RefCell::new(ServerWorld::default())
}

#[given("a running server")]
fn given_running_server(world: &RefCell<ServerWorld>) {
    world.borrow_mut().start_server();
}

#[given("a running server with a {secs} second idle timeout")]
fn given_server_with_timeout(world: &RefCell<ServerWorld>, secs: u64) {
    let mut world = world.borrow_mut();
    world.use_idle_timeout(secs);
    world.start_server();
}

#[given("a registered user {name} with secret {secret}")]
fn given_registered_user(world: &RefCell<ServerWorld>, name: String, secret: String) {
    let store = world.borrow().store();
    let name = unquote_step(&name);
    store.register(name).expect("register user");
    store
        .set_credential(name, unquote_step(&secret).as_bytes())
        .expect("provision credential");
}

#[when("a client connects")]
fn when_client_connects(world: &RefCell<ServerWorld>) {
    world.borrow_mut().connect();
}

#[when("the client sends {line}")]
fn when_client_sends(world: &RefCell<ServerWorld>, line: String) {
    world.borrow_mut().send(unquote_step(&line));
}

#[when("the client stays silent")]
fn when_client_silent(world: &RefCell<ServerWorld>) {
    let _ = world;
}

#[when("{count} clients register {name} at the same time")]
fn when_clients_register(world: &RefCell<ServerWorld>, count: usize, name: String) {
    world
        .borrow_mut()
        .register_concurrently(count, unquote_step(&name));
}

#[then("the client received {text}")]
fn then_client_received(world: &RefCell<ServerWorld>, text: String) {
    let expected = unquote_step(&text);
    let world = world.borrow();
    assert!(
        world.transcript.lines().any(|line| line == expected),
        "expected line {expected:?} in transcript {:?}",
        world.transcript
    );
}

#[then("the client was told about a syntax error")]
fn then_syntax_error(world: &RefCell<ServerWorld>) {
    let world = world.borrow();
    assert!(
        world
            .transcript
            .lines()
            .any(|line| line == SYNTAX_ERROR_MESSAGE),
        "syntax error missing from {:?}",
        world.transcript
    );
}

#[then("the connection closes with no further output")]
fn then_closes_silently(world: &RefCell<ServerWorld>) {
    let remaining = world
        .borrow_mut()
        .client()
        .read_to_close()
        .expect("server should close the idle connection");
    assert!(remaining.is_empty(), "unexpected output {remaining:?}");
}

#[then("exactly {count} registration succeeded")]
fn then_registrations_succeeded(world: &RefCell<ServerWorld>, count: usize) {
    let world = world.borrow();
    let succeeded = world
        .registration_replies
        .iter()
        .filter(|reply| reply.contains("registered."))
        .count();
    assert_eq!(succeeded, count, "replies: {:?}", world.registration_replies);
}

#[then("the others were told the name exists")]
fn then_others_refused(world: &RefCell<ServerWorld>) {
    let world = world.borrow();
    let refused = world
        .registration_replies
        .iter()
        .filter(|reply| reply.contains("already exists"))
        .count();
    assert_eq!(
        refused,
        world.registration_replies.len() - 1,
        "replies: {:?}",
        world.registration_replies
    );
}

#[scenario(path = "tests/features/session_syntax.feature")]
fn session_syntax(#[from(world)] world: RefCell<ServerWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/session_traversal.feature")]
fn session_traversal(#[from(world)] world: RefCell<ServerWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/session_idle.feature")]
fn session_idle(#[from(world)] world: RefCell<ServerWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/session_register.feature")]
fn session_register(#[from(world)] world: RefCell<ServerWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/session_login.feature")]
fn session_login(#[from(world)] world: RefCell<ServerWorld>) {
    drop(world);
}
