//! Wire text of individual attribute values.
//!
//! Scalars are decimal, pointers are `ptr:0x<hex>`, object ids use their
//! `oid:0x` form and enums their symbolic name. Lists are
//! `<count>:<item,item,...>`, or `<count>:null` when only the length is
//! carried.

use std::fmt::Display;
use std::str::FromStr;

use lcp_types::ObjectId;

use crate::error::{CodecError, CodecResult};
use crate::meta::{AttrMeta, EnumMeta};
use crate::value::{AttrValue, SpectrumPower, U32Range, ValueKind, ValueList, CHARS_MAX_LEN};

pub const POINTER_PREFIX: &str = "ptr:0x";
const NULL_ITEMS: &str = "null";

/// Encode `value` as wire text. `count_only` suppresses list contents.
pub fn encode_value(meta: &AttrMeta, value: &AttrValue, count_only: bool) -> CodecResult<String> {
    if value.kind() != meta.kind {
        return Err(CodecError::KindMismatch {
            attr: meta.name,
            expected: meta.kind,
            actual: value.kind(),
        });
    }
    let text = match value {
        AttrValue::Bool(v) => v.to_string(),
        AttrValue::U8(v) => v.to_string(),
        AttrValue::I8(v) => v.to_string(),
        AttrValue::U16(v) => v.to_string(),
        AttrValue::I16(v) => v.to_string(),
        AttrValue::U32(v) => v.to_string(),
        AttrValue::I32(v) => v.to_string(),
        AttrValue::U64(v) => v.to_string(),
        AttrValue::I64(v) => v.to_string(),
        AttrValue::F64(v) => v.to_string(),
        AttrValue::Chars(v) => {
            check_chars(meta.name, v)?;
            v.clone()
        }
        AttrValue::Pointer(v) => encode_pointer(*v),
        AttrValue::Oid(v) => v.to_string(),
        AttrValue::Enum(v) => encode_enum(meta.enum_meta, *v),
        AttrValue::U32Range(r) => format!("{},{}", r.min, r.max),
        AttrValue::U8List(l) => encode_list(l, count_only, |v| v.to_string()),
        AttrValue::U32List(l) => encode_list(l, count_only, |v| v.to_string()),
        AttrValue::I32List(l) => encode_list(l, count_only, |v| v.to_string()),
        AttrValue::F64List(l) => encode_list(l, count_only, |v| v.to_string()),
        AttrValue::OidList(l) => encode_list(l, count_only, |v| v.to_string()),
        AttrValue::EnumList(l) => encode_list(l, count_only, |v| encode_enum(meta.enum_meta, *v)),
        AttrValue::SpectrumList(l) => encode_list(l, count_only, |v| {
            format!("{}:{}:{}", v.lower_frequency, v.upper_frequency, v.power)
        }),
    };
    Ok(text)
}

pub fn encode_pointer(value: u64) -> String {
    format!("{POINTER_PREFIX}{value:x}")
}

fn encode_enum(meta: Option<&EnumMeta>, value: i32) -> String {
    match meta.and_then(|m| m.name_of(value)) {
        Some(name) => name.to_string(),
        None => value.to_string(),
    }
}

fn encode_list<T>(list: &ValueList<T>, count_only: bool, item: impl Fn(&T) -> String) -> String {
    match list.items() {
        Some(items) if !count_only => {
            let body: Vec<String> = items.iter().map(item).collect();
            format!("{}:{}", items.len(), body.join(","))
        }
        _ => format!("{}:{NULL_ITEMS}", list.count()),
    }
}

fn check_chars(attr: &str, value: &str) -> CodecResult<()> {
    if value.len() > CHARS_MAX_LEN {
        return Err(CodecError::CharsTooLong {
            attr: attr.to_string(),
            len: value.len(),
            max: CHARS_MAX_LEN,
        });
    }
    Ok(())
}

/// Decode wire text into a freshly allocated value of the attribute's kind.
/// Lists sent as `<count>:null` decode to count-only lists.
pub fn decode_value(meta: &AttrMeta, text: &str) -> CodecResult<AttrValue> {
    let name = meta.name;
    let value = match meta.kind {
        ValueKind::Bool => AttrValue::Bool(decode_bool(name, text)?),
        ValueKind::U8 => AttrValue::U8(parse(name, text)?),
        ValueKind::I8 => AttrValue::I8(parse(name, text)?),
        ValueKind::U16 => AttrValue::U16(parse(name, text)?),
        ValueKind::I16 => AttrValue::I16(parse(name, text)?),
        ValueKind::U32 => AttrValue::U32(parse(name, text)?),
        ValueKind::I32 => AttrValue::I32(parse(name, text)?),
        ValueKind::U64 => AttrValue::U64(parse(name, text)?),
        ValueKind::I64 => AttrValue::I64(parse(name, text)?),
        ValueKind::F64 => AttrValue::F64(parse(name, text)?),
        ValueKind::Chars => {
            check_chars(name, text)?;
            AttrValue::Chars(text.to_string())
        }
        ValueKind::Pointer => AttrValue::Pointer(decode_pointer(name, text)?),
        ValueKind::ObjectId => AttrValue::Oid(decode_oid(name, text)?),
        ValueKind::Enum => AttrValue::Enum(decode_enum(meta, text)?),
        ValueKind::U32Range => AttrValue::U32Range(decode_range(name, text)?),
        ValueKind::U8List => AttrValue::U8List(decode_list(name, text, |t| parse(name, t))?),
        ValueKind::U32List => AttrValue::U32List(decode_list(name, text, |t| parse(name, t))?),
        ValueKind::I32List => AttrValue::I32List(decode_list(name, text, |t| parse(name, t))?),
        ValueKind::F64List => AttrValue::F64List(decode_list(name, text, |t| parse(name, t))?),
        ValueKind::ObjectList => {
            AttrValue::OidList(decode_list(name, text, |t| decode_oid(name, t))?)
        }
        ValueKind::EnumList => {
            AttrValue::EnumList(decode_list(name, text, |t| decode_enum(meta, t))?)
        }
        ValueKind::SpectrumList => {
            AttrValue::SpectrumList(decode_list(name, text, |t| decode_spectrum(name, t))?)
        }
    };
    Ok(value)
}

fn parse<T>(attr: &str, text: &str) -> CodecResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse::<T>().map_err(|e| CodecError::invalid(attr, text, e))
}

fn decode_bool(attr: &str, text: &str) -> CodecResult<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CodecError::invalid(attr, text, "expected true or false")),
    }
}

pub fn decode_pointer(attr: &str, text: &str) -> CodecResult<u64> {
    let digits = text
        .strip_prefix(POINTER_PREFIX)
        .ok_or_else(|| CodecError::invalid(attr, text, "missing ptr:0x prefix"))?;
    u64::from_str_radix(digits, 16).map_err(|e| CodecError::invalid(attr, text, e))
}

fn decode_oid(attr: &str, text: &str) -> CodecResult<ObjectId> {
    text.parse::<ObjectId>()
        .map_err(|e| CodecError::invalid(attr, text, e))
}

fn decode_enum(meta: &AttrMeta, text: &str) -> CodecResult<i32> {
    if let Some(value) = meta.enum_meta.and_then(|m| m.value_of(text)) {
        return Ok(value);
    }
    parse(meta.name, text)
}

fn decode_range(attr: &str, text: &str) -> CodecResult<U32Range> {
    let (min, max) = text
        .split_once(',')
        .ok_or_else(|| CodecError::invalid(attr, text, "expected min,max"))?;
    Ok(U32Range {
        min: parse(attr, min)?,
        max: parse(attr, max)?,
    })
}

fn decode_spectrum(attr: &str, text: &str) -> CodecResult<SpectrumPower> {
    let mut parts = text.splitn(3, ':');
    let (Some(lower), Some(upper), Some(power)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CodecError::invalid(attr, text, "expected lower:upper:power"));
    };
    Ok(SpectrumPower {
        lower_frequency: parse(attr, lower)?,
        upper_frequency: parse(attr, upper)?,
        power: parse(attr, power)?,
    })
}

fn decode_list<T>(
    attr: &str,
    text: &str,
    item: impl Fn(&str) -> CodecResult<T>,
) -> CodecResult<ValueList<T>> {
    let (count, body) = text
        .split_once(':')
        .ok_or_else(|| CodecError::invalid(attr, text, "expected <count>:<items>"))?;
    let count: u32 = parse(attr, count)?;
    if body == NULL_ITEMS {
        return Ok(ValueList::count_only(count));
    }
    let items = if body.is_empty() {
        Vec::new()
    } else {
        body.split(',').map(&item).collect::<CodecResult<Vec<T>>>()?
    };
    if items.len() != count as usize {
        return Err(CodecError::invalid(
            attr,
            text,
            format!("count {count} does not match {} items", items.len()),
        ));
    }
    Ok(ValueList::from_vec(items))
}
