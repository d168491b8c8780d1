use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Status codes exchanged with the backend.
///
/// The backend reports the outcome of every request as the key of its
/// response record, using the symbolic name. Negative codes are failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Success,
    Failure,
    NotSupported,
    NoMemory,
    InsufficientResources,
    InvalidParameter,
    ItemAlreadyExists,
    ItemNotFound,
    BufferOverflow,
    NotImplemented,
    Uninitialized,
    ObjectInUse,
    InvalidObjectType,
    InvalidObjectId,
    InvalidAttribute,
}

impl Status {
    const ALL: [Status; 15] = [
        Self::Success,
        Self::Failure,
        Self::NotSupported,
        Self::NoMemory,
        Self::InsufficientResources,
        Self::InvalidParameter,
        Self::ItemAlreadyExists,
        Self::ItemNotFound,
        Self::BufferOverflow,
        Self::NotImplemented,
        Self::Uninitialized,
        Self::ObjectInUse,
        Self::InvalidObjectType,
        Self::InvalidObjectId,
        Self::InvalidAttribute,
    ];

    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => -1,
            Self::NotSupported => -2,
            Self::NoMemory => -3,
            Self::InsufficientResources => -4,
            Self::InvalidParameter => -5,
            Self::ItemAlreadyExists => -6,
            Self::ItemNotFound => -7,
            Self::BufferOverflow => -8,
            Self::NotImplemented => -15,
            Self::Uninitialized => -16,
            Self::ObjectInUse => -18,
            Self::InvalidObjectType => -19,
            Self::InvalidObjectId => -20,
            Self::InvalidAttribute => -21,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "STATUS_SUCCESS",
            Self::Failure => "STATUS_FAILURE",
            Self::NotSupported => "STATUS_NOT_SUPPORTED",
            Self::NoMemory => "STATUS_NO_MEMORY",
            Self::InsufficientResources => "STATUS_INSUFFICIENT_RESOURCES",
            Self::InvalidParameter => "STATUS_INVALID_PARAMETER",
            Self::ItemAlreadyExists => "STATUS_ITEM_ALREADY_EXISTS",
            Self::ItemNotFound => "STATUS_ITEM_NOT_FOUND",
            Self::BufferOverflow => "STATUS_BUFFER_OVERFLOW",
            Self::NotImplemented => "STATUS_NOT_IMPLEMENTED",
            Self::Uninitialized => "STATUS_UNINITIALIZED",
            Self::ObjectInUse => "STATUS_OBJECT_IN_USE",
            Self::InvalidObjectType => "STATUS_INVALID_OBJECT_TYPE",
            Self::InvalidObjectId => "STATUS_INVALID_OBJECT_ID",
            Self::InvalidAttribute => "STATUS_INVALID_ATTRIBUTE",
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Status {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.name() == s)
            .ok_or_else(|| TypeError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_codes_roundtrip() {
        for status in Status::ALL {
            assert_eq!(status.name().parse::<Status>().unwrap(), status);
            assert_eq!(Status::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn only_success_is_success() {
        assert!(Status::Success.is_success());
        assert_eq!(Status::Success.code(), 0);
        for status in Status::ALL.iter().skip(1) {
            assert!(!status.is_success());
            assert!(status.code() < 0);
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "STATUS_BOGUS".parse::<Status>(),
            Err(TypeError::UnknownStatus("STATUS_BOGUS".into()))
        );
    }
}
