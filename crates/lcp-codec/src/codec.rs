use std::cmp::Ordering;

use lcp_types::{FieldValue, ObjectType};
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::meta::{self, StatKind};
use crate::text;
use crate::value::{AttrValue, Attribute, SpectrumPower, ValueList};

/// Absolute tolerance for floating-point comparison.
pub const FLOAT_EPSILON: f64 = 1e-6;

/// Outcome of decoding into caller-provided destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStatus {
    Complete,
    /// At least one list did not fit its destination. Those lists carry
    /// their true count only; every other attribute was decoded.
    BufferTooSmall,
}

/// Decoded statistic value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StatValue {
    U64(u64),
    F64(f64),
}

impl StatValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            Self::F64(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Self::U64(v) => *v as f64,
            Self::F64(v) => *v,
        }
    }
}

/// Encode attributes of `object_type` as wire field/value pairs.
///
/// With `count_only`, list attributes carry `<count>:null` instead of
/// their contents.
pub fn encode_attributes(
    object_type: ObjectType,
    attrs: &[Attribute],
    count_only: bool,
) -> CodecResult<Vec<FieldValue>> {
    attrs
        .iter()
        .map(|attr| {
            let meta = meta::attribute(object_type, attr.id)?;
            let value = text::encode_value(meta, &attr.value, count_only)?;
            Ok(FieldValue::new(meta.name, value))
        })
        .collect()
}

/// Decode response fields into caller-provided destinations.
///
/// Each destination is matched to the field carrying its wire name, and
/// must already hold a value of the attribute's kind. List destinations
/// receive elements only when they have storage with enough capacity;
/// otherwise only their count is written. With `count_only`, no list
/// elements are transferred at all.
pub fn decode_attributes(
    object_type: ObjectType,
    fields: &[FieldValue],
    dest: &mut [Attribute],
    count_only: bool,
) -> CodecResult<DecodeStatus> {
    let mut status = DecodeStatus::Complete;
    for (index, attr) in dest.iter_mut().enumerate() {
        let meta = meta::attribute(object_type, attr.id)?;
        if attr.value.kind() != meta.kind {
            return Err(CodecError::KindMismatch {
                attr: meta.name,
                expected: meta.kind,
                actual: attr.value.kind(),
            });
        }
        let field = match fields.get(index) {
            Some(fv) if fv.field == meta.name => fv,
            _ => fields
                .iter()
                .find(|fv| fv.field == meta.name)
                .ok_or_else(|| CodecError::MissingField(meta.name.to_string()))?,
        };
        let decoded = text::decode_value(meta, &field.value)?;
        if !store(&mut attr.value, decoded, count_only) {
            status = DecodeStatus::BufferTooSmall;
        }
    }
    Ok(status)
}

/// Move a decoded value into a destination of the same kind.
fn store(dest: &mut AttrValue, decoded: AttrValue, count_only: bool) -> bool {
    match (dest, decoded) {
        (AttrValue::U8List(d), AttrValue::U8List(s)) => transfer(d, s, count_only),
        (AttrValue::U32List(d), AttrValue::U32List(s)) => transfer(d, s, count_only),
        (AttrValue::I32List(d), AttrValue::I32List(s)) => transfer(d, s, count_only),
        (AttrValue::F64List(d), AttrValue::F64List(s)) => transfer(d, s, count_only),
        (AttrValue::OidList(d), AttrValue::OidList(s)) => transfer(d, s, count_only),
        (AttrValue::EnumList(d), AttrValue::EnumList(s)) => transfer(d, s, count_only),
        (AttrValue::SpectrumList(d), AttrValue::SpectrumList(s)) => transfer(d, s, count_only),
        (dest, scalar) => {
            *dest = scalar;
            true
        }
    }
}

fn transfer<T>(dest: &mut ValueList<T>, source: ValueList<T>, count_only: bool) -> bool {
    let count = source.count();
    match source.into_vec() {
        Some(items) => dest.transfer(items, count_only),
        None => {
            // Sender reported the length only.
            let fits = count_only || !dest.has_storage() || count <= dest.capacity();
            dest.set_count(count);
            fits
        }
    }
}

/// Decode every field of a payload into newly allocated attributes.
///
/// The empty-payload sentinel decodes to no attributes.
pub fn decode_new_attributes(
    object_type: ObjectType,
    fields: &[FieldValue],
) -> CodecResult<Vec<Attribute>> {
    fields
        .iter()
        .filter(|fv| !fv.is_null_sentinel())
        .map(|fv| {
            let meta = meta::attribute_by_name(object_type, &fv.field)?;
            Ok(Attribute::new(meta.id, text::decode_value(meta, &fv.value)?))
        })
        .collect()
}

/// Encode a statistics request: one `(name, "")` pair per counter.
pub fn encode_stat_ids(object_type: ObjectType, ids: &[u32]) -> CodecResult<Vec<FieldValue>> {
    ids.iter()
        .map(|id| {
            let meta = meta::stat(object_type, *id)?;
            Ok(FieldValue::new(meta.name, ""))
        })
        .collect()
}

/// Decode a statistics response. Values must come back one per requested
/// counter, in request order.
pub fn decode_stat_values(
    object_type: ObjectType,
    ids: &[u32],
    fields: &[FieldValue],
) -> CodecResult<Vec<StatValue>> {
    if fields.len() != ids.len() {
        return Err(CodecError::CountMismatch {
            expected: ids.len(),
            actual: fields.len(),
        });
    }
    ids.iter()
        .zip(fields)
        .map(|(id, fv)| {
            let meta = meta::stat(object_type, *id)?;
            if fv.field != meta.name {
                return Err(CodecError::FieldMismatch {
                    expected: meta.name.to_string(),
                    actual: fv.field.clone(),
                });
            }
            let value = match meta.kind {
                StatKind::U64 => StatValue::U64(
                    fv.value
                        .parse()
                        .map_err(|e| CodecError::invalid(meta.name, &fv.value, e))?,
                ),
                StatKind::F64 => StatValue::F64(
                    fv.value
                        .parse()
                        .map_err(|e| CodecError::invalid(meta.name, &fv.value, e))?,
                ),
            };
            Ok(value)
        })
        .collect()
}

/// Compare two attributes of `object_type`.
///
/// Scalars compare by value, floats within [`FLOAT_EPSILON`]. Lists
/// compare by count first, then element by element; a count-only list
/// orders before a list with the same count and contents.
pub fn compare(object_type: ObjectType, a: &Attribute, b: &Attribute) -> CodecResult<Ordering> {
    let meta_a = meta::attribute(object_type, a.id)?;
    meta::attribute(object_type, b.id)?;
    if a.id != b.id {
        return Ok(a.id.cmp(&b.id));
    }
    for value in [&a.value, &b.value] {
        if value.kind() != meta_a.kind {
            return Err(CodecError::KindMismatch {
                attr: meta_a.name,
                expected: meta_a.kind,
                actual: value.kind(),
            });
        }
    }
    Ok(compare_values(&a.value, &b.value))
}

fn compare_values(a: &AttrValue, b: &AttrValue) -> Ordering {
    use AttrValue as V;
    match (a, b) {
        (V::Bool(x), V::Bool(y)) => x.cmp(y),
        (V::U8(x), V::U8(y)) => x.cmp(y),
        (V::I8(x), V::I8(y)) => x.cmp(y),
        (V::U16(x), V::U16(y)) => x.cmp(y),
        (V::I16(x), V::I16(y)) => x.cmp(y),
        (V::U32(x), V::U32(y)) => x.cmp(y),
        (V::I32(x), V::I32(y)) => x.cmp(y),
        (V::U64(x), V::U64(y)) => x.cmp(y),
        (V::I64(x), V::I64(y)) => x.cmp(y),
        (V::F64(x), V::F64(y)) => compare_f64(*x, *y),
        (V::Chars(x), V::Chars(y)) => x.as_bytes().cmp(y.as_bytes()),
        (V::Pointer(x), V::Pointer(y)) => x.cmp(y),
        (V::Oid(x), V::Oid(y)) => x.cmp(y),
        (V::Enum(x), V::Enum(y)) => x.cmp(y),
        (V::U32Range(x), V::U32Range(y)) => (x.min, x.max).cmp(&(y.min, y.max)),
        (V::U8List(x), V::U8List(y)) => compare_lists(x, y, Ord::cmp),
        (V::U32List(x), V::U32List(y)) => compare_lists(x, y, Ord::cmp),
        (V::I32List(x), V::I32List(y)) => compare_lists(x, y, Ord::cmp),
        (V::EnumList(x), V::EnumList(y)) => compare_lists(x, y, Ord::cmp),
        (V::F64List(x), V::F64List(y)) => compare_lists(x, y, |p, q| compare_f64(*p, *q)),
        (V::OidList(x), V::OidList(y)) => compare_lists(x, y, Ord::cmp),
        (V::SpectrumList(x), V::SpectrumList(y)) => compare_lists(x, y, compare_spectrum),
        // Callers check kinds first.
        _ => a.kind().cmp(&b.kind()),
    }
}

fn compare_f64(x: f64, y: f64) -> Ordering {
    if (x - y).abs() <= FLOAT_EPSILON {
        return Ordering::Equal;
    }
    match x.partial_cmp(&y) {
        Some(order) => order,
        // NaN equals nothing, itself included.
        None if x.is_nan() => Ordering::Greater,
        None => Ordering::Less,
    }
}

fn compare_spectrum(x: &SpectrumPower, y: &SpectrumPower) -> Ordering {
    x.lower_frequency
        .cmp(&y.lower_frequency)
        .then(x.upper_frequency.cmp(&y.upper_frequency))
        .then_with(|| compare_f64(x.power, y.power))
}

fn compare_lists<T>(
    x: &ValueList<T>,
    y: &ValueList<T>,
    item: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    x.count().cmp(&y.count()).then_with(|| match (x.items(), y.items()) {
        (Some(xs), Some(ys)) => xs
            .iter()
            .zip(ys)
            .map(|(p, q)| item(p, q))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{attrs, stats};
    use crate::value::ValueKind;
    use lcp_types::ObjectId;
    use proptest::prelude::*;

    fn lc_attrs() -> Vec<Attribute> {
        vec![
            Attribute::new(attrs::linecard::HARDWARE_INFO, AttrValue::Chars("card-A".into())),
            Attribute::new(attrs::linecard::ADMIN_STATE, AttrValue::Enum(0)),
            Attribute::new(attrs::linecard::STATE_CHANGE_NOTIFY, AttrValue::Pointer(0x10)),
        ]
    }

    #[test]
    fn encode_uses_wire_names() {
        let fields = encode_attributes(ObjectType::Linecard, &lc_attrs(), false).unwrap();
        assert_eq!(
            fields,
            vec![
                FieldValue::new("LINECARD_HARDWARE_INFO", "card-A"),
                FieldValue::new("LINECARD_ADMIN_STATE", "ENABLED"),
                FieldValue::new("LINECARD_STATE_CHANGE_NOTIFY", "ptr:0x10"),
            ]
        );
    }

    #[test]
    fn unknown_attribute_is_local_error() {
        let bad = [Attribute::new(42, AttrValue::U32(1))];
        assert!(matches!(
            encode_attributes(ObjectType::Port, &bad, false),
            Err(CodecError::UnknownAttribute { id: 42, .. })
        ));
    }

    #[test]
    fn new_attributes_roundtrip() {
        let attrs = lc_attrs();
        let fields = encode_attributes(ObjectType::Linecard, &attrs, false).unwrap();
        assert_eq!(decode_new_attributes(ObjectType::Linecard, &fields).unwrap(), attrs);
        assert!(decode_new_attributes(ObjectType::Linecard, &[FieldValue::null_sentinel()])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn decode_into_small_buffer_keeps_scalars() {
        let fields = vec![
            FieldValue::new("OTDR_ID", "4"),
            FieldValue::new("OTDR_SUPPORTED_PULSE_WIDTHS", "3:10,20,30"),
            FieldValue::new("OTDR_REFRACTIVE_INDEX", "1.4682"),
        ];
        let mut dest = vec![
            Attribute::new(attrs::otdr::ID, AttrValue::U32(0)),
            Attribute::new(
                attrs::otdr::SUPPORTED_PULSE_WIDTHS,
                AttrValue::list_with_capacity(ValueKind::U32List, 1),
            ),
            Attribute::new(attrs::otdr::REFRACTIVE_INDEX, AttrValue::F64(0.0)),
        ];
        let status = decode_attributes(ObjectType::Otdr, &fields, &mut dest, false).unwrap();
        assert_eq!(status, DecodeStatus::BufferTooSmall);
        assert_eq!(dest[0].value, AttrValue::U32(4));
        assert_eq!(dest[1].value.list_count(), Some(3));
        match &dest[1].value {
            AttrValue::U32List(l) => assert_eq!(l.items(), Some(&[][..])),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(dest[2].value, AttrValue::F64(1.4682));
    }

    #[test]
    fn decode_into_roomy_buffer() {
        let fields = vec![FieldValue::new("OTDR_SUPPORTED_PULSE_WIDTHS", "3:10,20,30")];
        let mut dest = vec![Attribute::new(
            attrs::otdr::SUPPORTED_PULSE_WIDTHS,
            AttrValue::list_with_capacity(ValueKind::U32List, 8),
        )];
        let status = decode_attributes(ObjectType::Otdr, &fields, &mut dest, false).unwrap();
        assert_eq!(status, DecodeStatus::Complete);
        assert_eq!(
            dest[0].value,
            AttrValue::U32List(ValueList::from_vec(vec![10, 20, 30]))
        );
    }

    #[test]
    fn count_only_decode_transfers_no_elements() {
        let fields = vec![FieldValue::new("OTDR_SUPPORTED_PULSE_WIDTHS", "3:10,20,30")];
        let mut dest = vec![Attribute::new(
            attrs::otdr::SUPPORTED_PULSE_WIDTHS,
            AttrValue::list_with_capacity(ValueKind::U32List, 8),
        )];
        let status = decode_attributes(ObjectType::Otdr, &fields, &mut dest, true).unwrap();
        assert_eq!(status, DecodeStatus::Complete);
        match &dest[0].value {
            AttrValue::U32List(l) => {
                assert_eq!(l.count(), 3);
                assert_eq!(l.items(), Some(&[][..]));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn count_only_wire_value_reports_overflow() {
        let fields = vec![FieldValue::new("OTDR_SUPPORTED_PULSE_WIDTHS", "3:null")];
        let mut dest = vec![Attribute::new(
            attrs::otdr::SUPPORTED_PULSE_WIDTHS,
            AttrValue::list_with_capacity(ValueKind::U32List, 1),
        )];
        let status = decode_attributes(ObjectType::Otdr, &fields, &mut dest, false).unwrap();
        assert_eq!(status, DecodeStatus::BufferTooSmall);
        assert_eq!(dest[0].value.list_count(), Some(3));
    }

    #[test]
    fn missing_field_is_protocol_violation() {
        let mut dest = vec![Attribute::new(attrs::otdr::ID, AttrValue::U32(0))];
        let err = decode_attributes(ObjectType::Otdr, &[], &mut dest, false).unwrap_err();
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn fields_matched_by_name_out_of_order() {
        let fields = vec![
            FieldValue::new("OA_TARGET_GAIN", "17.5"),
            FieldValue::new("OA_ENABLED", "true"),
        ];
        let mut dest = vec![
            Attribute::new(attrs::oa::ENABLED, AttrValue::Bool(false)),
            Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::F64(0.0)),
        ];
        decode_attributes(ObjectType::Oa, &fields, &mut dest, false).unwrap();
        assert_eq!(dest[0].value, AttrValue::Bool(true));
        assert_eq!(dest[1].value, AttrValue::F64(17.5));
    }

    #[test]
    fn stats_request_and_response() {
        let ids = [stats::ethernet::IN_PKTS, stats::ethernet::IN_CRC_ERRORS];
        let req = encode_stat_ids(ObjectType::Ethernet, &ids).unwrap();
        assert_eq!(
            req,
            vec![
                FieldValue::new("ETHERNET_IN_PKTS", ""),
                FieldValue::new("ETHERNET_IN_CRC_ERRORS", ""),
            ]
        );
        let resp = vec![
            FieldValue::new("ETHERNET_IN_PKTS", "1000"),
            FieldValue::new("ETHERNET_IN_CRC_ERRORS", "2"),
        ];
        let values = decode_stat_values(ObjectType::Ethernet, &ids, &resp).unwrap();
        assert_eq!(values, vec![StatValue::U64(1000), StatValue::U64(2)]);
    }

    #[test]
    fn stats_count_mismatch() {
        let ids = [stats::oa::INPUT_POWER, stats::oa::OUTPUT_POWER];
        let resp = vec![FieldValue::new("OA_INPUT_POWER", "-3.2")];
        let err = decode_stat_values(ObjectType::Oa, &ids, &resp).unwrap_err();
        assert_eq!(err, CodecError::CountMismatch { expected: 2, actual: 1 });
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn stats_order_mismatch() {
        let ids = [stats::oa::INPUT_POWER, stats::oa::OUTPUT_POWER];
        let resp = vec![
            FieldValue::new("OA_OUTPUT_POWER", "1.0"),
            FieldValue::new("OA_INPUT_POWER", "-3.2"),
        ];
        assert!(matches!(
            decode_stat_values(ObjectType::Oa, &ids, &resp),
            Err(CodecError::FieldMismatch { .. })
        ));
    }

    #[test]
    fn compare_floats_with_tolerance() {
        let a = Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::F64(17.5));
        let b = Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::F64(17.5 + 1e-9));
        let c = Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::F64(18.0));
        assert_eq!(compare(ObjectType::Oa, &a, &b).unwrap(), Ordering::Equal);
        assert_eq!(compare(ObjectType::Oa, &a, &c).unwrap(), Ordering::Less);
    }

    #[test]
    fn compare_nan_is_never_equal() {
        let nan = Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::F64(f64::NAN));
        let one = Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::F64(1.0));
        assert_ne!(compare(ObjectType::Oa, &nan, &one).unwrap(), Ordering::Equal);
        assert_ne!(compare(ObjectType::Oa, &one, &nan).unwrap(), Ordering::Equal);
        assert_ne!(compare(ObjectType::Oa, &nan, &nan.clone()).unwrap(), Ordering::Equal);

        let spans = |v: Vec<f64>| {
            Attribute::new(attrs::otdr::SPAN_LOSSES, AttrValue::F64List(ValueList::from_vec(v)))
        };
        assert_ne!(
            compare(ObjectType::Otdr, &spans(vec![0.5, f64::NAN]), &spans(vec![0.5, 2.0])).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn compare_lists() {
        let list = |v: Vec<ObjectId>| {
            Attribute::new(attrs::wss::MEDIA_CHANNELS, AttrValue::OidList(ValueList::from_vec(v)))
        };
        let id = |s| ObjectId::new(0, 1, ObjectType::MediaChannel, s);
        let empty = list(vec![]);
        let one = list(vec![id(1)]);
        let two = list(vec![id(1), id(2)]);
        let other = list(vec![id(1), id(3)]);
        assert_eq!(compare(ObjectType::Wss, &empty, &one).unwrap(), Ordering::Less);
        assert_ne!(compare(ObjectType::Wss, &one, &two).unwrap(), Ordering::Equal);
        assert_ne!(compare(ObjectType::Wss, &two, &other).unwrap(), Ordering::Equal);
        assert_eq!(compare(ObjectType::Wss, &two, &two.clone()).unwrap(), Ordering::Equal);
    }

    #[test]
    fn compare_rejects_wrong_kind() {
        let a = Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::F64(1.0));
        let b = Attribute::new(attrs::oa::TARGET_GAIN, AttrValue::U32(1));
        assert!(compare(ObjectType::Oa, &a, &b).is_err());
    }

    fn finite_f64() -> impl Strategy<Value = f64> {
        any::<f64>().prop_filter("finite", |v| v.is_finite())
    }

    fn any_oid() -> impl Strategy<Value = ObjectId> {
        (any::<u8>(), any::<u8>(), 1u8..=20, any::<u32>())
            .prop_map(|(ctx, slot, tag, seq)| ObjectId::construct(ctx, slot, tag, seq))
    }

    fn scalar_cases() -> impl Strategy<Value = (ObjectType, u32, AttrValue)> {
        use ObjectType as T;
        let integers = prop_oneof![
            any::<u8>().prop_map(|v| (T::Transceiver, attrs::transceiver::LANE_COUNT, AttrValue::U8(v))),
            any::<i8>().prop_map(|v| (T::Port, attrs::port::POWER_OFFSET, AttrValue::I8(v))),
            any::<u16>().prop_map(|v| (T::Linecard, attrs::linecard::SLOT_COUNT, AttrValue::U16(v))),
            any::<i16>().prop_map(|v| {
                (T::Attenuator, attrs::attenuator::ATTENUATION_STEP, AttrValue::I16(v))
            }),
            any::<u32>().prop_map(|v| (T::Oa, attrs::oa::ID, AttrValue::U32(v))),
            prop_oneof![Just(0), Just(u64::MAX), any::<u64>()]
                .prop_map(|v| (T::Och, attrs::och::FREQUENCY, AttrValue::U64(v))),
            prop_oneof![Just(i64::MIN), Just(i64::MAX), any::<i64>()]
                .prop_map(|v| (T::Och, attrs::och::FREQUENCY_OFFSET, AttrValue::I64(v))),
        ];
        let others = prop_oneof![
            any::<bool>().prop_map(|v| (T::Oa, attrs::oa::ENABLED, AttrValue::Bool(v))),
            finite_f64().prop_map(|v| (T::Oa, attrs::oa::TARGET_GAIN, AttrValue::F64(v))),
            prop_oneof![Just(0), Just(u64::MAX), any::<u64>()].prop_map(|v| {
                (T::Linecard, attrs::linecard::STATE_CHANGE_NOTIFY, AttrValue::Pointer(v))
            }),
            any_oid().prop_map(|v| {
                (T::Assignment, attrs::assignment::LOGICAL_CHANNEL, AttrValue::Oid(v))
            }),
            (0i32..2).prop_map(|v| (T::Oa, attrs::oa::AMP_MODE, AttrValue::Enum(v))),
            (any::<u32>(), any::<u32>()).prop_map(|(min, max)| {
                (T::Oa, attrs::oa::GAIN_RANGE, AttrValue::U32Range(crate::value::U32Range { min, max }))
            }),
        ];
        prop_oneof![integers, others]
    }

    fn list_cases() -> impl Strategy<Value = (ObjectType, u32, AttrValue)> {
        use proptest::collection::vec;
        use ObjectType as T;
        prop_oneof![
            vec(any::<u8>(), 0..16).prop_map(|v| {
                (T::Ethernet, attrs::ethernet::MAC_ADDRESS, AttrValue::U8List(ValueList::from_vec(v)))
            }),
            vec(any::<i32>(), 0..16).prop_map(|v| {
                (T::Osc, attrs::osc::LOSS_HISTORY, AttrValue::I32List(ValueList::from_vec(v)))
            }),
            vec(finite_f64(), 0..16).prop_map(|v| {
                (T::Otdr, attrs::otdr::SPAN_LOSSES, AttrValue::F64List(ValueList::from_vec(v)))
            }),
            vec(0i32..3, 0..16).prop_map(|v| {
                (T::Port, attrs::port::SUPPORTED_FEC_MODES, AttrValue::EnumList(ValueList::from_vec(v)))
            }),
            vec(any_oid(), 0..16).prop_map(|v| {
                (T::Wss, attrs::wss::MEDIA_CHANNELS, AttrValue::OidList(ValueList::from_vec(v)))
            }),
            vec((any::<u64>(), any::<u64>(), finite_f64()), 0..16).prop_map(|v| {
                let items = v
                    .into_iter()
                    .map(|(lower_frequency, upper_frequency, power)| SpectrumPower {
                        lower_frequency,
                        upper_frequency,
                        power,
                    })
                    .collect();
                (T::Ocm, attrs::ocm::SPECTRUM_POWER, AttrValue::SpectrumList(ValueList::from_vec(items)))
            }),
        ]
    }

    proptest! {
        #[test]
        fn scalar_roundtrip((object_type, id, value) in scalar_cases()) {
            let attr = Attribute::new(id, value);
            let fields = encode_attributes(object_type, std::slice::from_ref(&attr), false).unwrap();
            let decoded = decode_new_attributes(object_type, &fields).unwrap();
            prop_assert_eq!(decoded, vec![attr]);
        }

        #[test]
        fn chars_roundtrip(s in "[a-zA-Z0-9 _.-]{0,32}") {
            let attr = Attribute::new(attrs::port::NAME, AttrValue::Chars(s));
            let fields = encode_attributes(ObjectType::Port, std::slice::from_ref(&attr), false).unwrap();
            prop_assert_eq!(decode_new_attributes(ObjectType::Port, &fields).unwrap(), vec![attr]);
        }

        #[test]
        fn list_roundtrip_and_count_probe((object_type, id, value) in list_cases()) {
            let count = value.list_count();
            let kind = value.kind();
            let attr = Attribute::new(id, value);
            let full = encode_attributes(object_type, std::slice::from_ref(&attr), false).unwrap();
            prop_assert_eq!(decode_new_attributes(object_type, &full).unwrap(), vec![attr.clone()]);

            let mut dest = vec![Attribute::new(id, AttrValue::list_with_capacity(kind, 16))];
            let status = decode_attributes(object_type, &full, &mut dest, true).unwrap();
            prop_assert_eq!(status, DecodeStatus::Complete);
            prop_assert_eq!(dest[0].value.list_count(), count);

            let probe = encode_attributes(object_type, std::slice::from_ref(&attr), true).unwrap();
            let mut dest = vec![Attribute::new(id, AttrValue::list_with_capacity(kind, 16))];
            decode_attributes(object_type, &probe, &mut dest, false).unwrap();
            prop_assert_eq!(dest[0].value.list_count(), count);
        }
    }
}
