use std::collections::HashMap;

use lcp_channel::NotificationKind;
use lcp_codec::Attribute;
use lcp_types::{ObjectId, ObjectType};

/// What the proxy remembers about one live object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectEntry {
    pub object_type: ObjectType,
    /// The owning line card; a line card owns itself.
    pub linecard: ObjectId,
    /// Notification callback handles set on a line card.
    notify: HashMap<NotificationKind, u64>,
}

impl ObjectEntry {
    pub fn new(object_type: ObjectType, linecard: ObjectId) -> Self {
        Self {
            object_type,
            linecard,
            notify: HashMap::new(),
        }
    }

    /// The handle registered for `kind`, if non-null.
    pub fn pointer(&self, kind: NotificationKind) -> Option<u64> {
        self.notify.get(&kind).copied().filter(|handle| *handle != 0)
    }

    /// Record pointer attributes carried by `attrs`. Returns `true` if any
    /// was found.
    pub fn apply(&mut self, attrs: &[Attribute]) -> bool {
        if self.object_type != ObjectType::Linecard {
            return false;
        }
        let mut applied = false;
        for attr in attrs {
            let Some(kind) = NotificationKind::from_pointer_attribute(attr.id) else {
                continue;
            };
            if let Some(handle) = attr.value.as_pointer() {
                self.notify.insert(kind, handle);
                applied = true;
            }
        }
        applied
    }
}

/// Objects created through one proxy and not yet removed.
#[derive(Debug, Default)]
pub struct ObjectTable {
    entries: HashMap<ObjectId, ObjectEntry>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ObjectId, entry: ObjectEntry) {
        self.entries.insert(id, entry);
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<ObjectEntry> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectEntry> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ObjectEntry> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Objects other than the line card itself that it owns.
    pub fn children_of(&self, linecard: ObjectId) -> usize {
        self.entries
            .iter()
            .filter(|(id, entry)| **id != linecard && entry.linecard == linecard)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcp_codec::{attrs, AttrValue};

    #[test]
    fn pointers_only_tracked_on_linecards() {
        let lc = ObjectId::linecard_at(0, 1);
        let attrs = [
            Attribute::new(attrs::linecard::STATE_CHANGE_NOTIFY, AttrValue::Pointer(7)),
            Attribute::new(attrs::linecard::SERIAL_NO, AttrValue::Chars("x".into())),
        ];
        let mut card = ObjectEntry::new(ObjectType::Linecard, lc);
        assert!(card.apply(&attrs));
        assert_eq!(card.pointer(NotificationKind::LinecardStateChange), Some(7));
        assert_eq!(card.pointer(NotificationKind::SpectrumPower), None);

        card.apply(&[Attribute::new(
            attrs::linecard::STATE_CHANGE_NOTIFY,
            AttrValue::Pointer(0),
        )]);
        assert_eq!(card.pointer(NotificationKind::LinecardStateChange), None);

        let mut port = ObjectEntry::new(ObjectType::Port, lc);
        assert!(!port.apply(&attrs));
    }

    #[test]
    fn children_exclude_the_linecard() {
        let lc = ObjectId::linecard_at(0, 1);
        let mut table = ObjectTable::new();
        table.insert(lc, ObjectEntry::new(ObjectType::Linecard, lc));
        assert_eq!(table.children_of(lc), 0);
        let port = ObjectId::new(0, 1, ObjectType::Port, 1);
        table.insert(port, ObjectEntry::new(ObjectType::Port, lc));
        assert_eq!(table.children_of(lc), 1);
        table.remove(port);
        assert_eq!(table.children_of(lc), 0);
        assert_eq!(table.len(), 1);
    }
}
