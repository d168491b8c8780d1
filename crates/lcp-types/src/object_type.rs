use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Category of an object addressed through the proxy.
///
/// The discriminant is the 8-bit tag packed into every [`ObjectId`]. Tag `0`
/// is reserved for [`ObjectType::Null`], which is what an all-zero id
/// decodes to and never names a real object category.
///
/// [`ObjectId`]: crate::ObjectId
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectType {
    Null = 0,
    Linecard = 1,
    Port = 2,
    Transceiver = 3,
    LogicalChannel = 4,
    Otn = 5,
    Ethernet = 6,
    PhysicalChannel = 7,
    Och = 8,
    Lldp = 9,
    Assignment = 10,
    Interface = 11,
    Oa = 12,
    Osc = 13,
    Aps = 14,
    ApsPort = 15,
    Attenuator = 16,
    Wss = 17,
    MediaChannel = 18,
    Ocm = 19,
    Otdr = 20,
}

impl ObjectType {
    /// Every real object category, in tag order. `Null` is excluded.
    pub const ALL: [ObjectType; 20] = [
        Self::Linecard,
        Self::Port,
        Self::Transceiver,
        Self::LogicalChannel,
        Self::Otn,
        Self::Ethernet,
        Self::PhysicalChannel,
        Self::Och,
        Self::Lldp,
        Self::Assignment,
        Self::Interface,
        Self::Oa,
        Self::Osc,
        Self::Aps,
        Self::ApsPort,
        Self::Attenuator,
        Self::Wss,
        Self::MediaChannel,
        Self::Ocm,
        Self::Otdr,
    ];

    /// The 8-bit tag packed into object ids.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Look up a type by tag. Returns `None` for tags outside the table.
    pub fn from_tag(tag: u8) -> Option<Self> {
        if tag == 0 {
            return Some(Self::Null);
        }
        Self::ALL.get(usize::from(tag) - 1).copied()
    }

    /// Canonical wire name, used as the prefix of store keys.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Linecard => "LINECARD",
            Self::Port => "PORT",
            Self::Transceiver => "TRANSCEIVER",
            Self::LogicalChannel => "LOGICALCHANNEL",
            Self::Otn => "OTN",
            Self::Ethernet => "ETHERNET",
            Self::PhysicalChannel => "PHYSICALCHANNEL",
            Self::Och => "OCH",
            Self::Lldp => "LLDP",
            Self::Assignment => "ASSIGNMENT",
            Self::Interface => "INTERFACE",
            Self::Oa => "OA",
            Self::Osc => "OSC",
            Self::Aps => "APS",
            Self::ApsPort => "APSPORT",
            Self::Attenuator => "ATTENUATOR",
            Self::Wss => "WSS",
            Self::MediaChannel => "MEDIACHANNEL",
            Self::Ocm => "OCM",
            Self::Otdr => "OTDR",
        }
    }

    pub fn is_null(self) -> bool {
        self == Self::Null
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::Null.name() {
            return Ok(Self::Null);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| TypeError::UnknownTypeName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_table_position() {
        for (i, ty) in ObjectType::ALL.iter().enumerate() {
            assert_eq!(usize::from(ty.tag()), i + 1);
            assert_eq!(ObjectType::from_tag(ty.tag()), Some(*ty));
        }
    }

    #[test]
    fn zero_tag_is_null() {
        assert_eq!(ObjectType::from_tag(0), Some(ObjectType::Null));
        assert!(ObjectType::Null.is_null());
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(ObjectType::from_tag(21), None);
        assert_eq!(ObjectType::from_tag(0xff), None);
    }

    #[test]
    fn names_roundtrip() {
        for ty in ObjectType::ALL {
            assert_eq!(ty.name().parse::<ObjectType>().unwrap(), ty);
        }
        assert_eq!("NULL".parse::<ObjectType>().unwrap(), ObjectType::Null);
    }

    #[test]
    fn unknown_name_rejected() {
        let err = "SWITCH".parse::<ObjectType>().unwrap_err();
        assert_eq!(err, TypeError::UnknownTypeName("SWITCH".into()));
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = ObjectType::ALL.iter().map(|t| t.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ObjectType::ALL.len());
    }
}
