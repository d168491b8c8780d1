use thiserror::Error;

use crate::object_id::ObjectId;
use crate::object_type::ObjectType;

/// Errors produced by identifier and allocation operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id {0}: reserved bits are not zero")]
    ReservedBitsSet(ObjectId),

    #[error("unknown object type tag {0:#04x}")]
    UnknownTypeTag(u8),

    #[error("unknown object type name: {0}")]
    UnknownTypeName(String),

    #[error("object type {0} cannot be allocated here")]
    InvalidObjectType(ObjectType),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid object id text: {0}")]
    InvalidIdText(String),

    #[error("{0} is not a line card id")]
    NotALinecard(ObjectId),

    #[error("{id} belongs to context {actual}, expected context {expected}")]
    ContextMismatch { id: ObjectId, expected: u8, actual: u8 },

    #[error("sequence space exhausted for {object_type} in context {context}")]
    SequenceExhausted { context: u8, object_type: ObjectType },

    #[error("no free line card slot in context {0}")]
    SlotsExhausted(u8),

    #[error("line card {hwinfo:?} is already allocated at slot {slot}")]
    LinecardInUse { hwinfo: String, slot: u8 },

    #[error("duplicate line card slot {0}")]
    DuplicateSlot(u8),

    #[error("duplicate line card hardware info {0:?}")]
    DuplicateHwInfo(String),

    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

impl TypeError {
    /// Returns `true` when the error reports an exhausted id or slot space.
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Self::SequenceExhausted { .. } | Self::SlotsExhausted(_))
    }
}

pub type TypeResult<T> = Result<T, TypeError>;
