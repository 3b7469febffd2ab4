//! Line client speaking to a running server over TCP.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use crate::session::PROMPT_SUFFIX;

const CLIENT_READ_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestClient {
    stream: TcpStream,
}

impl TestClient {
    pub fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).expect("connect to server");
        stream
            .set_read_timeout(Some(CLIENT_READ_TIMEOUT))
            .expect("set client read timeout");
        Self { stream }
    }

    pub fn send_line(&mut self, line: &str) {
        self.stream
            .write_all(format!("{line}\r\n").as_bytes())
            .expect("send line");
    }

    /// Reads until the server prints a prompt, returning the text before
    /// the prompt.
    pub fn read_until_prompt(&mut self) -> String {
        let mut received = Vec::new();
        let mut chunk = [0_u8; 256];
        while !received.ends_with(PROMPT_SUFFIX.as_bytes()) {
            match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => received.extend_from_slice(&chunk[..read]),
                Err(error) => panic!("no prompt from server: {error}"),
            }
        }
        let text = String::from_utf8_lossy(&received).into_owned();
        match text.rfind('\n') {
            Some(end) => text[..=end].to_owned(),
            None => String::new(),
        }
    }

    /// Reads until the server closes the connection.
    pub fn read_to_close(&mut self) -> io::Result<String> {
        let mut received = String::new();
        self.stream.read_to_string(&mut received)?;
        Ok(received)
    }
}
