use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operation tag carried alongside every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Create,
    Remove,
    Set,
    Get,
    GetStats,
    ClearStats,
    AttributeCapabilityQuery,
    AttributeEnumValuesCapabilityQuery,
    ObjectTypeAvailabilityQuery,
    GetResponse,
    Notify,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Self::Create,
        Self::Remove,
        Self::Set,
        Self::Get,
        Self::GetStats,
        Self::ClearStats,
        Self::AttributeCapabilityQuery,
        Self::AttributeEnumValuesCapabilityQuery,
        Self::ObjectTypeAvailabilityQuery,
        Self::GetResponse,
        Self::Notify,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Remove => "remove",
            Self::Set => "set",
            Self::Get => "get",
            Self::GetStats => "get_stats",
            Self::ClearStats => "clear_stats",
            Self::AttributeCapabilityQuery => "attribute_capability_query",
            Self::AttributeEnumValuesCapabilityQuery => "attribute_enum_values_capability_query",
            Self::ObjectTypeAvailabilityQuery => "object_type_get_availability_query",
            Self::GetResponse => "getresponse",
            Self::Notify => "notify",
        }
    }

    /// The tag the backend answers this command with. `None` for the
    /// response tag itself.
    pub const fn response_tag(self) -> Option<Command> {
        match self {
            Self::GetResponse => None,
            Self::Notify => Some(Self::Notify),
            _ => Some(Self::GetResponse),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tag() == s)
            .ok_or_else(|| format!("unknown command tag: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for cmd in Command::ALL {
            assert_eq!(cmd.tag().parse::<Command>().unwrap(), cmd);
        }
        assert!("frobnicate".parse::<Command>().is_err());
    }

    #[test]
    fn every_request_has_one_response_tag() {
        for cmd in Command::ALL {
            match cmd {
                Command::GetResponse => assert_eq!(cmd.response_tag(), None),
                Command::Notify => assert_eq!(cmd.response_tag(), Some(Command::Notify)),
                _ => assert_eq!(cmd.response_tag(), Some(Command::GetResponse)),
            }
        }
    }
}
