use std::collections::HashMap;

use lcp_codec::meta::attribute;
use lcp_codec::tables::{attrs, enums};
use lcp_codec::{text, AttrValue, SpectrumPower};
use lcp_types::field::find_field;
use lcp_types::{FieldValue, ObjectId, ObjectType};
use tracing::warn;

use crate::error::{ChannelError, ChannelResult};
use crate::store::Record;

pub const LINECARD_STATE_CHANGE: &str = "linecard_state_change";
pub const OCM_SPECTRUM_POWER: &str = "ocm_spectrum_power";

/// Kinds of backend notification, one per notification pointer attribute
/// of a line card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    LinecardStateChange,
    SpectrumPower,
}

impl NotificationKind {
    /// The line-card attribute holding the callback for this kind.
    pub fn pointer_attribute(self) -> u32 {
        match self {
            Self::LinecardStateChange => attrs::linecard::STATE_CHANGE_NOTIFY,
            Self::SpectrumPower => attrs::linecard::OCM_SPECTRUM_POWER_NOTIFY,
        }
    }

    pub fn from_pointer_attribute(id: u32) -> Option<Self> {
        match id {
            attrs::linecard::STATE_CHANGE_NOTIFY => Some(Self::LinecardStateChange),
            attrs::linecard::OCM_SPECTRUM_POWER_NOTIFY => Some(Self::SpectrumPower),
            _ => None,
        }
    }
}

/// Decoded backend notification.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    LinecardStateChange {
        linecard: ObjectId,
        oper_status: i32,
    },
    SpectrumPower {
        linecard: ObjectId,
        ocm: ObjectId,
        spectrum: Vec<SpectrumPower>,
    },
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::LinecardStateChange { .. } => NotificationKind::LinecardStateChange,
            Self::SpectrumPower { .. } => NotificationKind::SpectrumPower,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LinecardStateChange { .. } => LINECARD_STATE_CHANGE,
            Self::SpectrumPower { .. } => OCM_SPECTRUM_POWER,
        }
    }

    pub fn linecard(&self) -> ObjectId {
        match self {
            Self::LinecardStateChange { linecard, .. } | Self::SpectrumPower { linecard, .. } => {
                *linecard
            }
        }
    }

    /// Encode as a notification record, as the backend publishes it.
    pub fn to_record(&self) -> ChannelResult<Record> {
        let fields = match self {
            Self::LinecardStateChange {
                linecard,
                oper_status,
            } => {
                let status = enums::OPER_STATUS
                    .name_of(*oper_status)
                    .map(str::to_string)
                    .unwrap_or_else(|| oper_status.to_string());
                vec![
                    FieldValue::new("linecard_id", linecard.to_string()),
                    FieldValue::new("oper_status", status),
                ]
            }
            Self::SpectrumPower {
                linecard,
                ocm,
                spectrum,
            } => {
                let meta = attribute(ObjectType::Ocm, attrs::ocm::SPECTRUM_POWER)?;
                let value = AttrValue::SpectrumList(lcp_codec::ValueList::from_vec(spectrum.clone()));
                vec![
                    FieldValue::new("linecard_id", linecard.to_string()),
                    FieldValue::new("ocm_id", ocm.to_string()),
                    FieldValue::new("spectrum", text::encode_value(meta, &value, false)?),
                ]
            }
        };
        Ok(Record::new(self.linecard().to_string(), self.name(), fields))
    }
}

type Decoder = fn(&Record) -> ChannelResult<Notification>;

/// Notification decoders keyed by message name.
pub struct DecoderRegistry {
    decoders: HashMap<&'static str, Decoder>,
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        let mut decoders: HashMap<&'static str, Decoder> = HashMap::new();
        decoders.insert(LINECARD_STATE_CHANGE, decode_state_change);
        decoders.insert(OCM_SPECTRUM_POWER, decode_spectrum_power);
        Self { decoders }
    }
}

impl DecoderRegistry {
    /// Decode a notification record.
    ///
    /// Unknown names and malformed payloads are logged and yield `None`.
    pub fn decode(&self, record: &Record) -> Option<Notification> {
        let Some(decoder) = self.decoders.get(record.op.as_str()) else {
            warn!(name = %record.op, "no decoder for notification, dropping");
            return None;
        };
        match decoder(record) {
            Ok(notification) => Some(notification),
            Err(e) => {
                warn!(name = %record.op, error = %e, "dropping malformed notification");
                None
            }
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.decoders.contains_key(name)
    }
}

fn required<'a>(record: &'a Record, field: &str) -> ChannelResult<&'a str> {
    find_field(&record.fields, field).ok_or_else(|| ChannelError::BadNotification {
        name: record.op.clone(),
        reason: format!("missing field {field}"),
    })
}

fn parse_id(record: &Record, field: &str) -> ChannelResult<ObjectId> {
    required(record, field)?
        .parse()
        .map_err(|e: lcp_types::TypeError| ChannelError::BadNotification {
            name: record.op.clone(),
            reason: format!("{field}: {e}"),
        })
}

fn decode_state_change(record: &Record) -> ChannelResult<Notification> {
    let linecard = parse_id(record, "linecard_id")?;
    let text = required(record, "oper_status")?;
    let oper_status = enums::OPER_STATUS
        .value_of(text)
        .or_else(|| text.parse().ok())
        .ok_or_else(|| ChannelError::BadNotification {
            name: record.op.clone(),
            reason: format!("invalid oper_status {text:?}"),
        })?;
    Ok(Notification::LinecardStateChange {
        linecard,
        oper_status,
    })
}

fn decode_spectrum_power(record: &Record) -> ChannelResult<Notification> {
    let linecard = parse_id(record, "linecard_id")?;
    let ocm = parse_id(record, "ocm_id")?;
    let meta = attribute(ObjectType::Ocm, attrs::ocm::SPECTRUM_POWER)?;
    let spectrum = match text::decode_value(meta, required(record, "spectrum")?)? {
        AttrValue::SpectrumList(list) => list.into_vec().unwrap_or_default(),
        other => {
            return Err(ChannelError::BadNotification {
                name: record.op.clone(),
                reason: format!("unexpected spectrum value {other:?}"),
            })
        }
    };
    Ok(Notification::SpectrumPower {
        linecard,
        ocm,
        spectrum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lc() -> ObjectId {
        ObjectId::linecard_at(0, 1)
    }

    #[test]
    fn state_change_roundtrip() {
        let n = Notification::LinecardStateChange {
            linecard: lc(),
            oper_status: 1,
        };
        let record = n.to_record().unwrap();
        assert_eq!(record.op, LINECARD_STATE_CHANGE);
        assert_eq!(find_field(&record.fields, "oper_status"), Some("ACTIVE"));
        assert_eq!(DecoderRegistry::default().decode(&record), Some(n));
    }

    #[test]
    fn spectrum_roundtrip() {
        let n = Notification::SpectrumPower {
            linecard: lc(),
            ocm: ObjectId::new(0, 1, ObjectType::Ocm, 1),
            spectrum: vec![
                SpectrumPower {
                    lower_frequency: 100,
                    upper_frequency: 200,
                    power: -3.5,
                },
                SpectrumPower {
                    lower_frequency: 200,
                    upper_frequency: 300,
                    power: -4.0,
                },
            ],
        };
        let record = n.to_record().unwrap();
        assert_eq!(DecoderRegistry::default().decode(&record), Some(n));
    }

    #[test]
    fn deprecated_status_name_accepted() {
        let record = Record::new(
            "",
            LINECARD_STATE_CHANGE,
            vec![
                FieldValue::new("linecard_id", lc().to_string()),
                FieldValue::new("oper_status", "DOWN"),
            ],
        );
        assert_eq!(
            DecoderRegistry::default().decode(&record),
            Some(Notification::LinecardStateChange {
                linecard: lc(),
                oper_status: 0
            })
        );
    }

    #[test]
    fn unknown_and_malformed_are_dropped() {
        let registry = DecoderRegistry::default();
        assert!(!registry.is_registered("fan_speed"));
        assert_eq!(registry.decode(&Record::new("", "fan_speed", vec![])), None);
        assert_eq!(
            registry.decode(&Record::new("", LINECARD_STATE_CHANGE, vec![])),
            None
        );
    }

    #[test]
    fn pointer_attribute_mapping() {
        for kind in [NotificationKind::LinecardStateChange, NotificationKind::SpectrumPower] {
            assert_eq!(
                NotificationKind::from_pointer_attribute(kind.pointer_attribute()),
                Some(kind)
            );
        }
        assert_eq!(NotificationKind::from_pointer_attribute(attrs::linecard::SERIAL_NO), None);
    }
}
