use lcp_types::{ObjectType, TypeError};
use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("object type {0} has no attribute table")]
    NoMetadata(ObjectType),

    #[error("unknown attribute id {id} for {object_type}")]
    UnknownAttribute { object_type: ObjectType, id: u32 },

    #[error("unknown attribute name {name} for {object_type}")]
    UnknownAttributeName { object_type: ObjectType, name: String },

    #[error("unknown statistic id {id} for {object_type}")]
    UnknownStat { object_type: ObjectType, id: u32 },

    #[error("attribute {attr}: expected {expected:?} value, got {actual:?}")]
    KindMismatch {
        attr: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("attribute {attr}: character value is {len} bytes (max {max})")]
    CharsTooLong { attr: String, len: usize, max: usize },

    #[error("attribute {attr}: cannot parse {value:?}: {reason}")]
    InvalidValue {
        attr: String,
        value: String,
        reason: String,
    },

    #[error("response is missing field {0}")]
    MissingField(String),

    #[error("response carries {actual} values, {expected} were requested")]
    CountMismatch { expected: usize, actual: usize },

    #[error("response field {actual} does not match requested {expected}")]
    FieldMismatch { expected: String, actual: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl CodecError {
    pub(crate) fn invalid(attr: &str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            attr: attr.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for errors that can only come from a malformed
    /// backend response, as opposed to a bad caller argument.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::CountMismatch { .. } | Self::FieldMismatch { .. }
        )
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
