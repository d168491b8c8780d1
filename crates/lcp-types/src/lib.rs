//! Foundation types for the line-card proxy (LCP).
//!
//! Every object a caller manipulates through the proxy is addressed by a
//! 64-bit [`ObjectId`] that the proxy invents locally. The id is
//! self-describing: the owning execution context, the owning line card and
//! the object type can all be recovered from its bits without a round trip
//! to the backend.
//!
//! # Key Types
//!
//! - [`ObjectId`] — bit-packed virtual object identifier
//! - [`ObjectType`] — one tag per object category, `Null` for "no object"
//! - [`IdAllocator`] — per-context sequence counters and line-card slots
//! - [`LinecardContainer`] — configured line cards of one context
//! - [`Status`] — status codes exchanged with the backend
//! - [`FieldValue`] — one `(name, value)` pair of a wire payload

pub mod allocator;
pub mod error;
pub mod field;
pub mod linecard;
pub mod object_id;
pub mod object_type;
pub mod status;

pub use allocator::IdAllocator;
pub use error::{TypeError, TypeResult};
pub use field::FieldValue;
pub use linecard::{LinecardConfig, LinecardContainer};
pub use object_id::ObjectId;
pub use object_type::ObjectType;
pub use status::Status;
