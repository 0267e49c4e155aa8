use std::io::{Read, Write};
use std::net::TcpStream;

use thiserror::Error;
use tracing::{debug, info};

use super::codec::{read_sentence, write_sentence};
use crate::session::{DeviceSession, Reply, Row, RunError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to connect to {address}: {source}")]
    Io {
        address: String,
        source: std::io::Error,
    },
    #[error("login as {username} failed: {source}")]
    Login {
        username: String,
        source: RunError,
    },
}

/// RouterOS API session over any byte stream.
pub struct RouterOsSession<S = TcpStream> {
    stream: S,
}

impl RouterOsSession<TcpStream> {
    /// Open a TCP connection (`host:port`, API port is usually 8728) and log in.
    pub fn connect(address: &str, credentials: &Credentials) -> Result<Self, ConnectError> {
        let stream = TcpStream::connect(address).map_err(|source| ConnectError::Io {
            address: address.to_string(),
            source,
        })?;
        info!(address, "connected");
        Self::login(stream, credentials)
    }
}

impl<S: Read + Write> RouterOsSession<S> {
    /// Authenticate on an already open stream.
    pub fn login(stream: S, credentials: &Credentials) -> Result<Self, ConnectError> {
        let mut session = Self { stream };
        let words = [
            "/login".to_string(),
            format!("=name={}", credentials.username),
            format!("=password={}", credentials.password),
        ];
        session
            .run(&words)
            .map_err(|source| ConnectError::Login {
                username: credentials.username.clone(),
                source,
            })?;
        debug!(username = %credentials.username, "logged in");
        Ok(session)
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> DeviceSession for RouterOsSession<S> {
    fn run(&mut self, words: &[String]) -> Result<Reply, RunError> {
        write_sentence(&mut self.stream, words)?;

        let mut reply = Reply::default();
        let mut trap: Option<String> = None;
        loop {
            let sentence = read_sentence(&mut self.stream)?;
            let Some((kind, attrs)) = sentence.split_first() else {
                continue;
            };
            match kind.as_str() {
                "!re" => reply.rows.push(attributes(attrs)),
                "!trap" => {
                    // keep the first trap; the device still closes with !done
                    if trap.is_none() {
                        trap = Some(message_of(attrs));
                    }
                }
                // newer devices flag an empty print before !done
                "!empty" => {}
                "!done" => break,
                "!fatal" => return Err(RunError::Fatal { message: message_of(attrs) }),
                other => return Err(RunError::UnexpectedReply(other.to_string())),
            }
        }

        match trap {
            Some(message) => Err(RunError::Trap { message }),
            None => Ok(reply),
        }
    }
}

fn attributes(words: &[String]) -> Row {
    words
        .iter()
        .filter_map(|word| word.strip_prefix('=')?.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// `=message=` attribute, or the bare reason word a `!fatal` carries.
fn message_of(words: &[String]) -> String {
    let attrs = attributes(words);
    if let Some(message) = attrs.get("message") {
        return message.clone();
    }
    words
        .iter()
        .find(|word| !word.starts_with('='))
        .cloned()
        .unwrap_or_default()
}
