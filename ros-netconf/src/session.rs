//! Device session abstraction used by the executor and verifier.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::routeros::CodecError;

/// One `!re` reply sentence: attribute name -> value.
pub type Row = BTreeMap<String, String>;

/// Everything the device sent back for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub rows: Vec<Row>,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("device rejected command: {message}")]
    Trap { message: String },
    #[error("device closed the session: {message}")]
    Fatal { message: String },
    #[error("unexpected reply word {0:?}")]
    UnexpectedReply(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// An open, authenticated connection able to run one API sentence at a time.
pub trait DeviceSession {
    /// Send `words` as one sentence and collect the reply up to `!done`.
    fn run(&mut self, words: &[String]) -> Result<Reply, RunError>;
}
