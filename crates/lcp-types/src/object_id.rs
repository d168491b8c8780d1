use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::object_type::ObjectType;

/// Text prefix of a serialized object id.
pub const OID_PREFIX: &str = "oid:0x";

const CONTEXT_SHIFT: u32 = 48;
const SLOT_SHIFT: u32 = 40;
const TYPE_SHIFT: u32 = 32;
const RESERVED_SHIFT: u32 = 56;
const BYTE_MASK: u64 = 0xff;
const SEQUENCE_MASK: u64 = 0xffff_ffff;

/// Virtual object identifier handed out to callers.
///
/// Layout, most significant bit first:
///
/// ```text
/// | reserved:8 | context:8 | linecard slot:8 | type tag:8 | sequence:32 |
/// ```
///
/// The reserved byte is always zero for ids produced by this crate. A line
/// card's slot and sequence number are equal, which makes line-card ids
/// self-referential: the owning line card of a line card is itself.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// The null id. Decodes to [`ObjectType::Null`].
    pub const NULL: Self = Self(0);

    /// Pack the four fields into an id. Pure, never fails.
    pub const fn construct(context: u8, slot: u8, type_tag: u8, sequence: u32) -> Self {
        Self(
            ((context as u64) << CONTEXT_SHIFT)
                | ((slot as u64) << SLOT_SHIFT)
                | ((type_tag as u64) << TYPE_SHIFT)
                | sequence as u64,
        )
    }

    /// Typed variant of [`Self::construct`].
    pub const fn new(context: u8, slot: u8, object_type: ObjectType, sequence: u32) -> Self {
        Self::construct(context, slot, object_type.tag(), sequence)
    }

    /// Wrap a raw 64-bit value without any validation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub const fn reserved(&self) -> u8 {
        ((self.0 >> RESERVED_SHIFT) & BYTE_MASK) as u8
    }

    /// Execution context that owns the object.
    pub const fn context(&self) -> u8 {
        ((self.0 >> CONTEXT_SHIFT) & BYTE_MASK) as u8
    }

    /// Slot of the owning line card.
    pub const fn slot(&self) -> u8 {
        ((self.0 >> SLOT_SHIFT) & BYTE_MASK) as u8
    }

    pub const fn type_tag(&self) -> u8 {
        ((self.0 >> TYPE_SHIFT) & BYTE_MASK) as u8
    }

    pub const fn sequence(&self) -> u32 {
        (self.0 & SEQUENCE_MASK) as u32
    }

    /// Fast-dispatch type decode.
    ///
    /// Never fails: structurally invalid ids (reserved bits set, unknown
    /// tag) decode to [`ObjectType::Null`].
    pub fn object_type(&self) -> ObjectType {
        if self.reserved() != 0 {
            return ObjectType::Null;
        }
        ObjectType::from_tag(self.type_tag()).unwrap_or(ObjectType::Null)
    }

    /// Fast-dispatch owning line card decode. Returns [`Self::NULL`] when
    /// the type decodes to `Null`.
    pub fn owning_linecard(&self) -> ObjectId {
        match self.object_type() {
            ObjectType::Null => Self::NULL,
            ObjectType::Linecard => *self,
            _ => Self::linecard_at(self.context(), self.slot()),
        }
    }

    /// Validated type decode.
    ///
    /// The null id decodes to `Ok(ObjectType::Null)`. Non-zero reserved bits
    /// or an unknown tag are reported as errors.
    pub fn decode_type(&self) -> Result<ObjectType, TypeError> {
        if self.is_null() {
            return Ok(ObjectType::Null);
        }
        if self.reserved() != 0 {
            return Err(TypeError::ReservedBitsSet(*self));
        }
        ObjectType::from_tag(self.type_tag()).ok_or(TypeError::UnknownTypeTag(self.type_tag()))
    }

    /// Validated owning line card decode.
    pub fn decode_owning_linecard(&self) -> Result<ObjectId, TypeError> {
        Ok(match self.decode_type()? {
            ObjectType::Null => Self::NULL,
            ObjectType::Linecard => *self,
            _ => Self::linecard_at(self.context(), self.slot()),
        })
    }

    /// The id of the line card sitting in `slot` of `context`.
    pub const fn linecard_at(context: u8, slot: u8) -> ObjectId {
        Self::new(context, slot, ObjectType::Linecard, slot as u32)
    }

    /// Sixteen lowercase hex digits.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }

    /// Parse from 1 to 16 hex digits, with or without an `oid:0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let digits = s.strip_prefix(OID_PREFIX).unwrap_or(s);
        if digits.is_empty() || digits.len() > 16 {
            return Err(TypeError::InvalidIdText(s.to_string()));
        }
        let padded = format!("{digits:0>16}");
        let bytes = hex::decode(&padded).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes);
        Ok(Self(u64::from_be_bytes(arr)))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({self})")
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{OID_PREFIX}{}", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with(OID_PREFIX) {
            return Err(TypeError::InvalidIdText(s.to_string()));
        }
        Self::from_hex(s)
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}
