use lcp_channel::ChannelError;
use lcp_proxy::ProxyError;
use lcp_types::{Status, TypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no execution context {0}")]
    UnknownContext(u8),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// The wire status reported for this failure.
    pub fn status(&self) -> Status {
        match self {
            Self::UnknownContext(_) => Status::InvalidParameter,
            Self::Proxy(e) => e.status(),
            Self::Type(e) if e.is_resource_exhausted() => Status::InsufficientResources,
            Self::Type(_) => Status::InvalidParameter,
            Self::Config(_) | Self::Channel(_) | Self::Io(_) => Status::Failure,
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
