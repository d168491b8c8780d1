use std::time::Duration;

use lcp_codec::CodecError;
use thiserror::Error;

use crate::command::Command;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("timed out after {timeout:?} waiting for {expected} response")]
    Timeout { expected: Command, timeout: Duration },

    #[error("channel is closed")]
    Closed,

    #[error("store disconnected")]
    Disconnected,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("malformed {name} notification: {reason}")]
    BadNotification { name: String, reason: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ChannelResult<T> = Result<T, ChannelError>;
