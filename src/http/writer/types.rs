use std::io;

use thiserror::Error;

/// Represents the state of the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Initial,       // Can only write status
    StatusWritten, // Can only write headers
    HeadersOpen,   // Can write more headers
    HeadersClosed, // Headers done, can only write body
    BodyWritten,   // Body started, can keep writing body
    Failed,        // Error occurred, no operations allowed
}

/// Represents the error that can occur during writing
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("state machine violation: {0}")]
    InvalidState(&'static str),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("network/io error: {0}")]
    Io(#[from] io::Error),
}
