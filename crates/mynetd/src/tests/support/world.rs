//! Scenario world for end-to-end session and process suites.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::auth::AuthStore;
use crate::process::LaunchError;

use super::{RunningServer, TestClient, TestConfigLoader};

#[derive(Default)]
pub struct ServerWorld {
    idle_timeout_secs: Option<u64>,
    server: Option<RunningServer>,
    client: Option<TestClient>,
    pub greeting: String,
    pub transcript: String,
    pub registration_replies: Vec<String>,
    pub run_result: Option<Result<(), LaunchError>>,
}

impl ServerWorld {
    pub fn use_idle_timeout(&mut self, secs: u64) {
        self.idle_timeout_secs = Some(secs);
    }

    pub fn start_server(&mut self) {
        let mut loader = TestConfigLoader::new();
        if let Some(secs) = self.idle_timeout_secs {
            loader = loader.with_idle_timeout_secs(secs);
        }
        self.server = Some(RunningServer::start(loader));
    }

    pub fn server(&self) -> &RunningServer {
        self.server.as_ref().expect("server should be running")
    }

    pub fn server_mut(&mut self) -> &mut RunningServer {
        self.server.as_mut().expect("server should be running")
    }

    pub fn store(&self) -> AuthStore {
        AuthStore::new(self.server().loader.users_root())
    }

    pub fn connect(&mut self) {
        let mut client = TestClient::connect(self.server().addr());
        self.greeting = client.read_until_prompt();
        self.client = Some(client);
    }

    pub fn client(&mut self) -> &mut TestClient {
        self.client.as_mut().expect("client should be connected")
    }

    /// Sends a line and appends the reply (up to the next prompt or the
    /// end of the connection) to the transcript.
    pub fn send(&mut self, line: &str) {
        let client = self.client();
        client.send_line(line);
        let reply = client.read_until_prompt();
        self.transcript.push_str(&reply);
    }

    /// Connects `count` clients and has them all register `name` at once.
    pub fn register_concurrently(&mut self, count: usize, name: &str) {
        let addr = self.server().addr();
        let barrier = Arc::new(Barrier::new(count));
        let workers: Vec<_> = (0..count)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let line = format!("register {name}");
                thread::spawn(move || {
                    let mut client = TestClient::connect(addr);
                    client.read_until_prompt();
                    barrier.wait();
                    client.send_line(&line);
                    client.read_until_prompt()
                })
            })
            .collect();
        self.registration_replies = workers
            .into_iter()
            .map(|worker| worker.join().expect("registration client panicked"))
            .collect();
    }
}

/// Removes the surrounding double quotes of a quoted step argument.
pub fn unquote_step(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}
