//! Attribute and statistics codec for the line-card proxy.
//!
//! Converts typed attribute values to and from the flat `(name, value)`
//! text pairs carried on the wire. Conversion is driven by static
//! per-object-type metadata tables; nothing here performs I/O.
//!
//! # Key Types
//!
//! - [`AttrValue`] — tagged union over every attribute value shape
//! - [`ValueList`] — owned, length-prefixed list with count-only mode
//! - [`AttrMeta`] / [`StatMeta`] — static descriptors from the tables
//! - [`DecodeStatus`] — complete or buffer-too-small decode outcome

pub mod codec;
pub mod error;
pub mod meta;
pub mod tables;
pub mod text;
pub mod value;

pub use codec::{
    compare, decode_attributes, decode_new_attributes, decode_stat_values, encode_attributes,
    encode_stat_ids, DecodeStatus, StatValue, FLOAT_EPSILON,
};
pub use error::{CodecError, CodecResult};
pub use meta::{AttrMeta, EnumMeta, StatKind, StatMeta};
pub use tables::{attrs, stats};
pub use value::{AttrValue, Attribute, SpectrumPower, U32Range, ValueKind, ValueList};
