use lcp_types::ObjectId;
use serde::{Deserialize, Serialize};

/// Maximum length in bytes of a character attribute.
pub const CHARS_MAX_LEN: usize = 32;

/// Closed set of value shapes an attribute may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKind {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F64,
    Chars,
    Pointer,
    ObjectId,
    Enum,
    U32Range,
    U8List,
    U32List,
    I32List,
    F64List,
    ObjectList,
    EnumList,
    SpectrumList,
}

impl ValueKind {
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::U8List
                | Self::U32List
                | Self::I32List
                | Self::F64List
                | Self::ObjectList
                | Self::EnumList
                | Self::SpectrumList
        )
    }

    /// Kinds whose values reference other objects.
    pub fn carries_object_ids(self) -> bool {
        matches!(self, Self::ObjectId | Self::ObjectList)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct U32Range {
    pub min: u32,
    pub max: u32,
}

/// One bucket of an optical channel monitor scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPower {
    pub lower_frequency: u64,
    pub upper_frequency: u64,
    pub power: f64,
}

/// Length-prefixed list value.
///
/// `count` always holds the logical element count. `items` is the owned
/// backing storage; `None` means the list carries a count only, which is
/// what a size probe sends and what a decode into an undersized buffer
/// leaves behind. Storage is released when the list is dropped.
///
/// As a decode destination, a list with storage offers `count` elements of
/// capacity (see [`ValueList::with_capacity`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ValueList<T> {
    count: u32,
    items: Option<Vec<T>>,
}

impl<T> ValueList<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            count: items.len() as u32,
            items: Some(items),
        }
    }

    /// A decode destination able to receive up to `capacity` elements.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            count: capacity,
            items: Some(Vec::with_capacity(capacity as usize)),
        }
    }

    /// A list that carries only an element count.
    pub fn count_only(count: u32) -> Self {
        Self { count, items: None }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn items(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    pub fn has_storage(&self) -> bool {
        self.items.is_some()
    }

    /// Elements this list can receive when used as a decode destination.
    pub fn capacity(&self) -> u32 {
        if self.items.is_some() {
            self.count
        } else {
            0
        }
    }

    pub fn into_vec(self) -> Option<Vec<T>> {
        self.items
    }

    /// Move decoded elements into this destination.
    ///
    /// Returns `false` when `source` does not fit: nothing is copied and
    /// only the count is overwritten with the true length.
    pub(crate) fn transfer(&mut self, source: Vec<T>, count_only: bool) -> bool {
        let len = source.len() as u32;
        if count_only || self.items.is_none() {
            self.count = len;
            return true;
        }
        if len > self.count {
            self.count = len;
            return false;
        }
        self.count = len;
        self.items = Some(source);
        true
    }

    pub(crate) fn set_count(&mut self, count: u32) {
        self.count = count;
    }
}

/// Typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F64(f64),
    Chars(String),
    Pointer(u64),
    Oid(ObjectId),
    Enum(i32),
    U32Range(U32Range),
    U8List(ValueList<u8>),
    U32List(ValueList<u32>),
    I32List(ValueList<i32>),
    F64List(ValueList<f64>),
    OidList(ValueList<ObjectId>),
    EnumList(ValueList<i32>),
    SpectrumList(ValueList<SpectrumPower>),
}

impl AttrValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::U8(_) => ValueKind::U8,
            Self::I8(_) => ValueKind::I8,
            Self::U16(_) => ValueKind::U16,
            Self::I16(_) => ValueKind::I16,
            Self::U32(_) => ValueKind::U32,
            Self::I32(_) => ValueKind::I32,
            Self::U64(_) => ValueKind::U64,
            Self::I64(_) => ValueKind::I64,
            Self::F64(_) => ValueKind::F64,
            Self::Chars(_) => ValueKind::Chars,
            Self::Pointer(_) => ValueKind::Pointer,
            Self::Oid(_) => ValueKind::ObjectId,
            Self::Enum(_) => ValueKind::Enum,
            Self::U32Range(_) => ValueKind::U32Range,
            Self::U8List(_) => ValueKind::U8List,
            Self::U32List(_) => ValueKind::U32List,
            Self::I32List(_) => ValueKind::I32List,
            Self::F64List(_) => ValueKind::F64List,
            Self::OidList(_) => ValueKind::ObjectList,
            Self::EnumList(_) => ValueKind::EnumList,
            Self::SpectrumList(_) => ValueKind::SpectrumList,
        }
    }

    /// Zero scalar, or a count-only list, of the given kind. Suitable as a
    /// GET destination when list contents are not wanted.
    pub fn placeholder(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Bool => Self::Bool(false),
            ValueKind::U8 => Self::U8(0),
            ValueKind::I8 => Self::I8(0),
            ValueKind::U16 => Self::U16(0),
            ValueKind::I16 => Self::I16(0),
            ValueKind::U32 => Self::U32(0),
            ValueKind::I32 => Self::I32(0),
            ValueKind::U64 => Self::U64(0),
            ValueKind::I64 => Self::I64(0),
            ValueKind::F64 => Self::F64(0.0),
            ValueKind::Chars => Self::Chars(String::new()),
            ValueKind::Pointer => Self::Pointer(0),
            ValueKind::ObjectId => Self::Oid(ObjectId::NULL),
            ValueKind::Enum => Self::Enum(0),
            ValueKind::U32Range => Self::U32Range(U32Range::default()),
            ValueKind::U8List => Self::U8List(ValueList::count_only(0)),
            ValueKind::U32List => Self::U32List(ValueList::count_only(0)),
            ValueKind::I32List => Self::I32List(ValueList::count_only(0)),
            ValueKind::F64List => Self::F64List(ValueList::count_only(0)),
            ValueKind::ObjectList => Self::OidList(ValueList::count_only(0)),
            ValueKind::EnumList => Self::EnumList(ValueList::count_only(0)),
            ValueKind::SpectrumList => Self::SpectrumList(ValueList::count_only(0)),
        }
    }

    /// A list destination of the given kind with room for `capacity`
    /// elements. Scalar kinds yield their placeholder.
    pub fn list_with_capacity(kind: ValueKind, capacity: u32) -> Self {
        match kind {
            ValueKind::U8List => Self::U8List(ValueList::with_capacity(capacity)),
            ValueKind::U32List => Self::U32List(ValueList::with_capacity(capacity)),
            ValueKind::I32List => Self::I32List(ValueList::with_capacity(capacity)),
            ValueKind::F64List => Self::F64List(ValueList::with_capacity(capacity)),
            ValueKind::ObjectList => Self::OidList(ValueList::with_capacity(capacity)),
            ValueKind::EnumList => Self::EnumList(ValueList::with_capacity(capacity)),
            ValueKind::SpectrumList => Self::SpectrumList(ValueList::with_capacity(capacity)),
            scalar => Self::placeholder(scalar),
        }
    }

    /// Element count of a list value, `None` for scalars.
    pub fn list_count(&self) -> Option<u32> {
        match self {
            Self::U8List(l) => Some(l.count()),
            Self::U32List(l) => Some(l.count()),
            Self::I32List(l) | Self::EnumList(l) => Some(l.count()),
            Self::F64List(l) => Some(l.count()),
            Self::OidList(l) => Some(l.count()),
            Self::SpectrumList(l) => Some(l.count()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_chars(&self) -> Option<&str> {
        match self {
            Self::Chars(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<u64> {
        match self {
            Self::Pointer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<ObjectId> {
        match self {
            Self::Oid(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }
}

/// Attribute id paired with its value. Ids are scoped to an object type.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub id: u32,
    pub value: AttrValue,
}

impl Attribute {
    pub fn new(id: u32, value: AttrValue) -> Self {
        Self { id, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_into_roomy_destination() {
        let mut dest = ValueList::<u32>::with_capacity(4);
        assert_eq!(dest.capacity(), 4);
        assert!(dest.transfer(vec![1, 2, 3], false));
        assert_eq!(dest.count(), 3);
        assert_eq!(dest.items(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn transfer_into_small_destination_copies_nothing() {
        let mut dest = ValueList::<u32>::with_capacity(1);
        assert!(!dest.transfer(vec![7, 8, 9], false));
        assert_eq!(dest.count(), 3);
        assert_eq!(dest.items(), Some(&[][..]));
    }

    #[test]
    fn transfer_count_only() {
        let mut dest = ValueList::<u32>::with_capacity(8);
        assert!(dest.transfer(vec![1, 2], true));
        assert_eq!(dest.count(), 2);
        assert_eq!(dest.items(), Some(&[][..]));

        let mut probe = ValueList::<u32>::count_only(0);
        assert!(probe.transfer(vec![1, 2, 3, 4, 5], false));
        assert_eq!(probe.count(), 5);
        assert!(!probe.has_storage());
    }

    #[test]
    fn placeholder_kinds_match() {
        for kind in [
            ValueKind::Bool,
            ValueKind::Chars,
            ValueKind::U32Range,
            ValueKind::ObjectList,
            ValueKind::SpectrumList,
        ] {
            assert_eq!(AttrValue::placeholder(kind).kind(), kind);
            assert_eq!(AttrValue::list_with_capacity(kind, 2).kind(), kind);
        }
    }

    #[test]
    fn list_count_only_for_lists() {
        assert_eq!(AttrValue::U32(3).list_count(), None);
        assert_eq!(
            AttrValue::OidList(ValueList::from_vec(vec![ObjectId::NULL; 2])).list_count(),
            Some(2)
        );
    }
}
