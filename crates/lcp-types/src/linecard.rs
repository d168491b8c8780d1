use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Configured line card: a slot index bound to a hardware-info string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinecardConfig {
    #[serde(rename = "index")]
    slot: u8,
    hwinfo: String,
}

impl LinecardConfig {
    pub fn new(slot: u8, hwinfo: impl Into<String>) -> Self {
        Self {
            slot,
            hwinfo: hwinfo.into(),
        }
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn hwinfo(&self) -> &str {
        &self.hwinfo
    }
}

/// The line cards configured for one execution context.
///
/// Both the slot index and the hardware info are identity keys: neither may
/// repeat within a container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinecardContainer {
    by_slot: BTreeMap<u8, LinecardConfig>,
}

impl LinecardContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container, rejecting duplicate slots or hardware infos.
    pub fn from_configs(
        configs: impl IntoIterator<Item = LinecardConfig>,
    ) -> Result<Self, TypeError> {
        let mut container = Self::new();
        for config in configs {
            container.insert(config)?;
        }
        Ok(container)
    }

    pub fn insert(&mut self, config: LinecardConfig) -> Result<(), TypeError> {
        if self.by_slot.contains_key(&config.slot) {
            return Err(TypeError::DuplicateSlot(config.slot));
        }
        if self.by_hwinfo(&config.hwinfo).is_some() {
            return Err(TypeError::DuplicateHwInfo(config.hwinfo));
        }
        self.by_slot.insert(config.slot, config);
        Ok(())
    }

    pub fn by_slot(&self, slot: u8) -> Option<&LinecardConfig> {
        self.by_slot.get(&slot)
    }

    pub fn by_hwinfo(&self, hwinfo: &str) -> Option<&LinecardConfig> {
        self.by_slot.values().find(|c| c.hwinfo == hwinfo)
    }

    pub fn contains_slot(&self, slot: u8) -> bool {
        self.by_slot.contains_key(&slot)
    }

    /// Configured line cards in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &LinecardConfig> {
        self.by_slot.values()
    }

    pub fn len(&self) -> usize {
        self.by_slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_either_key() {
        let container = LinecardContainer::from_configs([
            LinecardConfig::new(0, ""),
            LinecardConfig::new(4, "card-B"),
        ])
        .unwrap();
        assert_eq!(container.len(), 2);
        assert_eq!(container.by_slot(4).unwrap().hwinfo(), "card-B");
        assert_eq!(container.by_hwinfo("card-B").unwrap().slot(), 4);
        assert_eq!(container.by_hwinfo("").unwrap().slot(), 0);
        assert!(container.by_hwinfo("card-Z").is_none());
    }

    #[test]
    fn duplicate_slot_rejected() {
        let err = LinecardContainer::from_configs([
            LinecardConfig::new(1, "a"),
            LinecardConfig::new(1, "b"),
        ])
        .unwrap_err();
        assert_eq!(err, TypeError::DuplicateSlot(1));
    }

    #[test]
    fn duplicate_hwinfo_rejected() {
        let err = LinecardContainer::from_configs([
            LinecardConfig::new(1, "a"),
            LinecardConfig::new(2, "a"),
        ])
        .unwrap_err();
        assert_eq!(err, TypeError::DuplicateHwInfo("a".into()));
    }

    #[test]
    fn serde_uses_index_field() {
        let cfg: LinecardConfig = serde_json::from_str(r#"{"index": 3, "hwinfo": "x"}"#).unwrap();
        assert_eq!(cfg, LinecardConfig::new(3, "x"));
    }

    #[test]
    fn out_of_range_index_fails_to_parse() {
        let res: Result<LinecardConfig, _> = serde_json::from_str(r#"{"index": 300, "hwinfo": ""}"#);
        assert!(res.is_err());
    }
}
