use lcp_types::ObjectType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::tables;
use crate::text;
use crate::value::{AttrValue, ValueKind};

/// Symbolic names of an enum-valued attribute.
#[derive(Debug, PartialEq)]
pub struct EnumMeta {
    pub name: &'static str,
    pub values: &'static [(i32, &'static str)],
    /// Old symbolic names still accepted on decode, mapped to their
    /// current name.
    pub deprecated: &'static [(&'static str, &'static str)],
}

impl EnumMeta {
    pub fn name_of(&self, value: i32) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, name)| *name)
    }

    /// Resolve a symbolic name, upgrading deprecated names.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        if let Some(value) = self.lookup(name) {
            return Some(value);
        }
        let (_, current) = self.deprecated.iter().find(|(old, _)| *old == name)?;
        debug!(enum_name = self.name, old = name, new = *current, "upgrading deprecated enum value");
        self.lookup(current)
    }

    fn lookup(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(v, _)| *v)
    }

    pub fn contains(&self, value: i32) -> bool {
        self.name_of(value).is_some()
    }
}

/// Static descriptor of one attribute.
#[derive(Debug, PartialEq)]
pub struct AttrMeta {
    pub object_type: ObjectType,
    pub id: u32,
    /// Canonical wire name.
    pub name: &'static str,
    pub kind: ValueKind,
    pub enum_meta: Option<&'static EnumMeta>,
    pub read_only: bool,
    pub create_only: bool,
    pub mandatory_on_create: bool,
    /// Wire text of the value the backend assumes when the attribute is
    /// not supplied on create.
    pub default: Option<&'static str>,
}

impl AttrMeta {
    pub(crate) const fn new(
        object_type: ObjectType,
        id: u32,
        name: &'static str,
        kind: ValueKind,
    ) -> Self {
        Self {
            object_type,
            id,
            name,
            kind,
            enum_meta: None,
            read_only: false,
            create_only: false,
            mandatory_on_create: false,
            default: None,
        }
    }

    pub(crate) const fn with_enum(mut self, meta: &'static EnumMeta) -> Self {
        self.enum_meta = Some(meta);
        self
    }

    pub(crate) const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub(crate) const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }

    pub(crate) const fn mandatory(mut self) -> Self {
        self.mandatory_on_create = true;
        self
    }

    pub(crate) const fn default_value(mut self, text: &'static str) -> Self {
        self.default = Some(text);
        self
    }

    pub fn is_oid(&self) -> bool {
        self.kind.carries_object_ids()
    }

    /// The decoded create-time default, if the attribute has one.
    pub fn default_attr_value(&self) -> CodecResult<Option<AttrValue>> {
        self.default
            .map(|text| text::decode_value(self, text))
            .transpose()
    }

    /// An attribute must be supplied on create when it is mandatory and
    /// has no default.
    pub fn required_on_create(&self) -> bool {
        self.mandatory_on_create && self.default.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    /// Monotonic counter.
    U64,
    /// Instantaneous gauge.
    F64,
}

/// Static descriptor of one statistic.
#[derive(Debug)]
pub struct StatMeta {
    pub object_type: ObjectType,
    pub id: u32,
    pub name: &'static str,
    pub kind: StatKind,
}

/// All attribute descriptors of `object_type`, in id order.
pub fn attributes_of(object_type: ObjectType) -> CodecResult<&'static [AttrMeta]> {
    match tables::attribute_table(object_type) {
        Some(table) => Ok(table),
        None => Err(CodecError::NoMetadata(object_type)),
    }
}

/// Descriptor of attribute `id` on `object_type`.
///
/// Ids are dense within a type, so this is an index into the table.
pub fn attribute(object_type: ObjectType, id: u32) -> CodecResult<&'static AttrMeta> {
    attributes_of(object_type)?
        .get(id as usize)
        .filter(|meta| meta.id == id)
        .ok_or(CodecError::UnknownAttribute { object_type, id })
}

pub fn attribute_by_name(object_type: ObjectType, name: &str) -> CodecResult<&'static AttrMeta> {
    attributes_of(object_type)?
        .iter()
        .find(|meta| meta.name == name)
        .ok_or_else(|| CodecError::UnknownAttributeName {
            object_type,
            name: name.to_string(),
        })
}

/// Statistic descriptors of `object_type`. Empty for types without stats.
pub fn stats_of(object_type: ObjectType) -> &'static [StatMeta] {
    tables::stat_table(object_type)
}

pub fn stat(object_type: ObjectType, id: u32) -> CodecResult<&'static StatMeta> {
    stats_of(object_type)
        .get(id as usize)
        .filter(|meta| meta.id == id)
        .ok_or(CodecError::UnknownStat { object_type, id })
}
