use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{TypeError, TypeResult};
use crate::linecard::LinecardContainer;
use crate::object_id::ObjectId;
use crate::object_type::ObjectType;

/// Largest sequence number that fits the 32-bit id field.
pub const MAX_SEQUENCE: u64 = u32::MAX as u64;

/// Identifier allocator for one execution context.
///
/// Owns the per-type sequence counters and the line-card slot table. Ids are
/// produced without consulting the backend. Sequence numbers of non-line-card
/// objects are never reused while the allocator lives, so an id named by an
/// in-flight notification always decodes to the object it was issued for.
#[derive(Debug)]
pub struct IdAllocator {
    context: u8,
    linecards: LinecardContainer,
    /// Slots not reserved by configuration and not currently allocated.
    free_slots: BTreeSet<u8>,
    /// Allocated line cards: slot -> hardware info.
    live: BTreeMap<u8, String>,
    /// Last slot handed to an unconfigured hardware info.
    previous_slots: HashMap<String, u8>,
    /// Last issued sequence number per type.
    sequences: HashMap<ObjectType, u64>,
}

impl IdAllocator {
    pub fn new(context: u8, linecards: LinecardContainer) -> Self {
        let free_slots = (0..=u8::MAX)
            .filter(|slot| !linecards.contains_slot(*slot))
            .collect();
        Self {
            context,
            linecards,
            free_slots,
            live: BTreeMap::new(),
            previous_slots: HashMap::new(),
            sequences: HashMap::new(),
        }
    }

    pub fn context(&self) -> u8 {
        self.context
    }

    pub fn linecards(&self) -> &LinecardContainer {
        &self.linecards
    }

    /// Allocate an id for a non-line-card object owned by `owning_linecard`.
    pub fn allocate(
        &mut self,
        object_type: ObjectType,
        owning_linecard: ObjectId,
    ) -> TypeResult<ObjectId> {
        if matches!(object_type, ObjectType::Null | ObjectType::Linecard) {
            return Err(TypeError::InvalidObjectType(object_type));
        }
        if owning_linecard.decode_type()? != ObjectType::Linecard {
            return Err(TypeError::NotALinecard(owning_linecard));
        }
        if owning_linecard.context() != self.context {
            return Err(TypeError::ContextMismatch {
                id: owning_linecard,
                expected: self.context,
                actual: owning_linecard.context(),
            });
        }

        let last = self.sequences.get(&object_type).copied().unwrap_or(0);
        let next = last + 1;
        if next > MAX_SEQUENCE {
            return Err(TypeError::SequenceExhausted {
                context: self.context,
                object_type,
            });
        }
        self.sequences.insert(object_type, next);

        Ok(ObjectId::new(
            self.context,
            owning_linecard.slot(),
            object_type,
            next as u32,
        ))
    }

    /// Allocate the id of the line card identified by `hwinfo`.
    ///
    /// A configured hardware info always maps to its configured slot, which
    /// keeps ids stable across restarts. Other hardware infos take a free
    /// slot, preferring the one they held last time.
    pub fn allocate_linecard(&mut self, hwinfo: &str) -> TypeResult<ObjectId> {
        if let Some((slot, _)) = self.live.iter().find(|(_, hw)| hw.as_str() == hwinfo) {
            return Err(TypeError::LinecardInUse {
                hwinfo: hwinfo.to_string(),
                slot: *slot,
            });
        }

        let slot = match self.linecards.by_hwinfo(hwinfo) {
            Some(config) => {
                if let Some(holder) = self.live.get(&config.slot()) {
                    return Err(TypeError::LinecardInUse {
                        hwinfo: holder.clone(),
                        slot: config.slot(),
                    });
                }
                config.slot()
            }
            None => self.take_free_slot(hwinfo)?,
        };

        self.live.insert(slot, hwinfo.to_string());
        Ok(ObjectId::linecard_at(self.context, slot))
    }

    fn take_free_slot(&mut self, hwinfo: &str) -> TypeResult<u8> {
        let preferred = self
            .previous_slots
            .get(hwinfo)
            .copied()
            .filter(|slot| self.free_slots.contains(slot));
        let slot = match preferred {
            Some(slot) => slot,
            None => *self
                .free_slots
                .iter()
                .next()
                .ok_or(TypeError::SlotsExhausted(self.context))?,
        };
        self.free_slots.remove(&slot);
        self.previous_slots.insert(hwinfo.to_string(), slot);
        Ok(slot)
    }

    /// Release an id on object removal.
    ///
    /// Releasing a line card returns its slot to the pool. Releasing any
    /// other object leaves the counters untouched.
    pub fn release(&mut self, id: ObjectId) {
        if id.object_type() != ObjectType::Linecard || id.context() != self.context {
            return;
        }
        let slot = id.slot();
        if self.live.remove(&slot).is_some() && !self.linecards.contains_slot(slot) {
            self.free_slots.insert(slot);
        }
    }

    pub fn is_live_linecard(&self, id: ObjectId) -> bool {
        id.object_type() == ObjectType::Linecard
            && id.context() == self.context
            && self.live.contains_key(&id.slot())
    }

    /// Last sequence number issued for `object_type`, `0` if none.
    pub fn last_sequence(&self, object_type: ObjectType) -> u64 {
        self.sequences.get(&object_type).copied().unwrap_or(0)
    }

    pub fn free_slot_count(&self) -> usize {
        self.free_slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linecard::LinecardConfig;

    fn default_allocator() -> IdAllocator {
        let linecards = LinecardContainer::from_configs([LinecardConfig::new(0, "")]).unwrap();
        IdAllocator::new(0, linecards)
    }

    #[test]
    fn unconfigured_hwinfo_takes_lowest_free_slot() {
        let mut alloc = default_allocator();
        let lc = alloc.allocate_linecard("card-A").unwrap();
        assert_eq!(lc, ObjectId::linecard_at(0, 1));
        assert_eq!(lc.slot(), 1);
        assert_eq!(lc.sequence(), 1);
    }

    #[test]
    fn configured_hwinfo_uses_configured_slot() {
        let linecards = LinecardContainer::from_configs([
            LinecardConfig::new(0, ""),
            LinecardConfig::new(9, "card-Z"),
        ])
        .unwrap();
        let mut alloc = IdAllocator::new(2, linecards);
        let lc = alloc.allocate_linecard("card-Z").unwrap();
        assert_eq!(lc, ObjectId::linecard_at(2, 9));
        assert_eq!(alloc.allocate_linecard("").unwrap(), ObjectId::linecard_at(2, 0));
    }

    #[test]
    fn slot_reused_after_release() {
        let mut alloc = default_allocator();
        let first = alloc.allocate_linecard("card-A").unwrap();
        alloc.release(first);
        let second = alloc.allocate_linecard("card-A").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn previous_slot_preferred_over_lowest() {
        let mut alloc = default_allocator();
        let a = alloc.allocate_linecard("card-A").unwrap();
        let b = alloc.allocate_linecard("card-B").unwrap();
        alloc.release(a);
        alloc.release(b);
        let b_again = alloc.allocate_linecard("card-B").unwrap();
        assert_eq!(b_again, b);
    }

    #[test]
    fn no_duplicate_slot_while_live() {
        let mut alloc = default_allocator();
        let lc = alloc.allocate_linecard("card-A").unwrap();
        let err = alloc.allocate_linecard("card-A").unwrap_err();
        assert_eq!(
            err,
            TypeError::LinecardInUse {
                hwinfo: "card-A".into(),
                slot: lc.slot()
            }
        );
        alloc.allocate_linecard("").unwrap();
        assert!(alloc.allocate_linecard("").is_err());
    }

    #[test]
    fn configured_slot_never_given_to_other_hwinfo() {
        let mut alloc = default_allocator();
        for _ in 0..255 {
            let lc = alloc.allocate_linecard(&format!("card-{}", alloc.free_slot_count())).unwrap();
            assert_ne!(lc.slot(), 0);
        }
        assert_eq!(alloc.free_slot_count(), 0);
        let err = alloc.allocate_linecard("one-too-many").unwrap_err();
        assert_eq!(err, TypeError::SlotsExhausted(0));
        assert!(err.is_resource_exhausted());
    }

    #[test]
    fn child_ids_carry_owner_slot_and_increase() {
        let mut alloc = default_allocator();
        let lc = alloc.allocate_linecard("card-A").unwrap();
        let p1 = alloc.allocate(ObjectType::Port, lc).unwrap();
        let p2 = alloc.allocate(ObjectType::Port, lc).unwrap();
        let oa = alloc.allocate(ObjectType::Oa, lc).unwrap();
        assert_eq!(p1.sequence(), 1);
        assert_eq!(p2.sequence(), 2);
        assert_eq!(oa.sequence(), 1);
        assert_eq!(p1.owning_linecard(), lc);
        assert_eq!(p1.object_type(), ObjectType::Port);
    }

    #[test]
    fn release_of_child_does_not_reuse_sequence() {
        let mut alloc = default_allocator();
        let lc = alloc.allocate_linecard("card-A").unwrap();
        let p1 = alloc.allocate(ObjectType::Port, lc).unwrap();
        alloc.release(p1);
        let p2 = alloc.allocate(ObjectType::Port, lc).unwrap();
        assert_ne!(p1, p2);
        assert_eq!(alloc.last_sequence(ObjectType::Port), 2);
    }

    #[test]
    fn sequence_exhaustion() {
        let mut alloc = default_allocator();
        let lc = alloc.allocate_linecard("card-A").unwrap();
        alloc.sequences.insert(ObjectType::Port, MAX_SEQUENCE - 1);
        let last = alloc.allocate(ObjectType::Port, lc).unwrap();
        assert_eq!(last.sequence(), u32::MAX);
        let err = alloc.allocate(ObjectType::Port, lc).unwrap_err();
        assert!(err.is_resource_exhausted());
    }

    #[test]
    fn owner_must_be_linecard() {
        let mut alloc = default_allocator();
        let lc = alloc.allocate_linecard("card-A").unwrap();
        let port = alloc.allocate(ObjectType::Port, lc).unwrap();
        assert_eq!(
            alloc.allocate(ObjectType::Och, port),
            Err(TypeError::NotALinecard(port))
        );
        assert_eq!(
            alloc.allocate(ObjectType::Och, ObjectId::NULL),
            Err(TypeError::NotALinecard(ObjectId::NULL))
        );
    }

    #[test]
    fn owner_from_other_context_rejected() {
        let mut alloc = default_allocator();
        let foreign = ObjectId::linecard_at(5, 1);
        assert!(matches!(
            alloc.allocate(ObjectType::Port, foreign),
            Err(TypeError::ContextMismatch { .. })
        ));
    }

    #[test]
    fn linecard_type_not_allocatable_through_allocate() {
        let mut alloc = default_allocator();
        let lc = alloc.allocate_linecard("card-A").unwrap();
        assert_eq!(
            alloc.allocate(ObjectType::Linecard, lc),
            Err(TypeError::InvalidObjectType(ObjectType::Linecard))
        );
    }
}
