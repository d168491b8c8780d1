use lcp_channel::{ChannelError, Command};
use lcp_codec::CodecError;
use lcp_types::{ObjectId, Status, TypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("object {0} not found")]
    NotFound(ObjectId),

    #[error("object {0} still owns other objects")]
    InUse(ObjectId),

    /// Partial success: scalars were decoded, undersized lists carry their
    /// true count only.
    #[error("list attribute does not fit the destination buffer")]
    BufferTooSmall,

    #[error("backend rejected {op}: {status}")]
    Rejected { op: Command, status: Status },

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("proxy is shut down")]
    ShutDown,
}

impl ProxyError {
    /// The wire status reported for this failure.
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidArgument(_) => Status::InvalidParameter,
            Self::Type(e) if e.is_resource_exhausted() => Status::InsufficientResources,
            // Allocation under an owner that is not a line card.
            Self::Type(TypeError::NotALinecard(_)) => Status::InsufficientResources,
            Self::Type(TypeError::LinecardInUse { .. }) => Status::ItemAlreadyExists,
            Self::Type(_) => Status::InvalidParameter,
            Self::Codec(e) if e.is_protocol_violation() => Status::Failure,
            Self::Codec(_) => Status::InvalidParameter,
            Self::NotFound(_) => Status::ItemNotFound,
            Self::InUse(_) => Status::ObjectInUse,
            Self::BufferTooSmall => Status::BufferOverflow,
            Self::Rejected { status, .. } => *status,
            Self::Protocol(_) | Self::Channel(_) => Status::Failure,
            Self::ShutDown => Status::Uninitialized,
        }
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
