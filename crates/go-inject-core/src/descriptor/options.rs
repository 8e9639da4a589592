use crate::descriptor::{OptionField, OptionRegistry};
use crate::schema::AnnotationEntry;
use crate::{Error, Result};
use bytes::Buf;
use prost::encoding::{WireType, decode_key, decode_varint};
use prost_types::field_descriptor_proto::Type;

/// Field number of `ServiceOptions.uninterpreted_option`.
const UNINTERPRETED_OPTION: u32 = 999;

/// Scans the raw bytes of a `ServiceOptions` message into annotation entries.
///
/// Fields are visited in wire order, which protoc writes in declaration order.
/// A field is kept when `registry` knows its number and its value is a scalar;
/// message-typed options, `uninterpreted_option` and unknown numbers are
/// skipped. Packed repeated scalars yield one entry per element.
///
/// # Errors
///
/// Returns [`Error::MalformedOptions`] if `raw` is truncated, carries an
/// invalid wire type, or has unbalanced groups.
pub fn decode_options(
    service: &str,
    raw: &[u8],
    registry: &OptionRegistry,
) -> Result<Vec<AnnotationEntry>> {
    let mut buf = raw;
    let mut entries = Vec::new();

    while buf.has_remaining() {
        let (tag, wire_type) =
            decode_key(&mut buf).map_err(|e| Error::malformed(service, e.to_string()))?;

        let field = match registry.get(tag) {
            Some(field) if tag != UNINTERPRETED_OPTION => field,
            _ => {
                skip_value(service, tag, wire_type, &mut buf)?;
                continue;
            }
        };

        match wire_type {
            WireType::Varint => {
                let raw = read_varint(service, &mut buf)?;
                push(&mut entries, field, render_varint(field.kind, raw));
            }
            WireType::SixtyFourBit => {
                let raw = read_fixed64(service, &mut buf)?;
                push(&mut entries, field, render_fixed64(field.kind, raw));
            }
            WireType::ThirtyTwoBit => {
                let raw = read_fixed32(service, &mut buf)?;
                push(&mut entries, field, render_fixed32(field.kind, raw));
            }
            WireType::LengthDelimited => {
                let payload = read_length_delimited(service, &mut buf)?;
                decode_length_delimited(service, field, payload, &mut entries)?;
            }
            WireType::StartGroup => skip_group(service, tag, &mut buf)?,
            WireType::EndGroup => {
                return Err(Error::malformed(service, "unexpected end group"));
            }
        }
    }

    Ok(entries)
}

fn decode_length_delimited(
    service: &str,
    field: &OptionField,
    mut payload: &[u8],
    entries: &mut Vec<AnnotationEntry>,
) -> Result<()> {
    match field.kind {
        Type::String | Type::Bytes => {
            let value = String::from_utf8_lossy(payload).into_owned();
            push(entries, field, Some(value));
        }
        Type::Message | Type::Group => {
            tracing::debug!(
                field = %field.full_name,
                "Skipping message-typed service option"
            );
        }
        Type::Fixed64 | Type::Sfixed64 | Type::Double => {
            while payload.has_remaining() {
                let raw = read_fixed64(service, &mut payload)?;
                push(entries, field, render_fixed64(field.kind, raw));
            }
        }
        Type::Fixed32 | Type::Sfixed32 | Type::Float => {
            while payload.has_remaining() {
                let raw = read_fixed32(service, &mut payload)?;
                push(entries, field, render_fixed32(field.kind, raw));
            }
        }
        // Remaining kinds are all varint encoded.
        _ => {
            while payload.has_remaining() {
                let raw = read_varint(service, &mut payload)?;
                push(entries, field, render_varint(field.kind, raw));
            }
        }
    }
    Ok(())
}

fn push(entries: &mut Vec<AnnotationEntry>, field: &OptionField, value: Option<String>) {
    match value {
        Some(value) => entries.push(AnnotationEntry {
            tag: field.number,
            name: field.name.clone(),
            full_name: field.full_name.clone(),
            value,
        }),
        None => tracing::debug!(
            field = %field.full_name,
            kind = ?field.kind,
            "Wire type does not match declared option type"
        ),
    }
}

fn render_varint(kind: Type, raw: u64) -> Option<String> {
    let value = match kind {
        Type::Bool => (raw != 0).to_string(),
        Type::Int32 | Type::Enum => (raw as i32).to_string(),
        Type::Int64 => (raw as i64).to_string(),
        Type::Uint32 => (raw as u32).to_string(),
        Type::Uint64 => raw.to_string(),
        Type::Sint32 => {
            let raw = raw as u32;
            (((raw >> 1) as i32) ^ -((raw & 1) as i32)).to_string()
        }
        Type::Sint64 => (((raw >> 1) as i64) ^ -((raw & 1) as i64)).to_string(),
        _ => return None,
    };
    Some(value)
}

fn render_fixed64(kind: Type, raw: u64) -> Option<String> {
    let value = match kind {
        Type::Fixed64 => raw.to_string(),
        Type::Sfixed64 => (raw as i64).to_string(),
        Type::Double => f64::from_bits(raw).to_string(),
        _ => return None,
    };
    Some(value)
}

fn render_fixed32(kind: Type, raw: u32) -> Option<String> {
    let value = match kind {
        Type::Fixed32 => raw.to_string(),
        Type::Sfixed32 => (raw as i32).to_string(),
        Type::Float => f32::from_bits(raw).to_string(),
        _ => return None,
    };
    Some(value)
}

fn read_varint(service: &str, buf: &mut &[u8]) -> Result<u64> {
    decode_varint(buf).map_err(|e| Error::malformed(service, e.to_string()))
}

fn read_fixed64(service: &str, buf: &mut &[u8]) -> Result<u64> {
    if buf.remaining() < 8 {
        return Err(Error::malformed(service, "truncated fixed64"));
    }
    Ok(buf.get_u64_le())
}

fn read_fixed32(service: &str, buf: &mut &[u8]) -> Result<u32> {
    if buf.remaining() < 4 {
        return Err(Error::malformed(service, "truncated fixed32"));
    }
    Ok(buf.get_u32_le())
}

fn read_length_delimited<'a>(service: &str, buf: &mut &'a [u8]) -> Result<&'a [u8]> {
    let len = read_varint(service, buf)?;
    let len = usize::try_from(len)
        .ok()
        .filter(|len| *len <= buf.len())
        .ok_or_else(|| Error::malformed(service, "truncated length-delimited field"))?;
    let bytes: &'a [u8] = *buf;
    let (payload, rest) = bytes.split_at(len);
    *buf = rest;
    Ok(payload)
}

fn skip_value(service: &str, tag: u32, wire_type: WireType, buf: &mut &[u8]) -> Result<()> {
    match wire_type {
        WireType::Varint => read_varint(service, buf).map(drop),
        WireType::SixtyFourBit => read_fixed64(service, buf).map(drop),
        WireType::ThirtyTwoBit => read_fixed32(service, buf).map(drop),
        WireType::LengthDelimited => read_length_delimited(service, buf).map(drop),
        WireType::StartGroup => skip_group(service, tag, buf),
        WireType::EndGroup => Err(Error::malformed(service, "unexpected end group")),
    }
}

fn skip_group(service: &str, group_tag: u32, buf: &mut &[u8]) -> Result<()> {
    loop {
        if !buf.has_remaining() {
            return Err(Error::malformed(service, "unterminated group"));
        }
        let (tag, wire_type) =
            decode_key(buf).map_err(|e| Error::malformed(service, e.to_string()))?;
        if wire_type == WireType::EndGroup {
            if tag == group_tag {
                return Ok(());
            }
            return Err(Error::malformed(service, "mismatched end group"));
        }
        skip_value(service, tag, wire_type, buf)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DEPRECATED_FIELD_NUMBER;
    use crate::testing::{OptionsBuilder, extension, file};

    fn registry() -> OptionRegistry {
        let mut f = file("api/ping/v1/ping.proto", "api.ping.v1");
        f.extension.extend([
            extension("service_name", 50000, Type::String),
            extension("ping_service_name", 50001, Type::String),
            extension("ping_service_port", 50002, Type::Int32),
            extension("ping_service_public", 50003, Type::Bool),
            extension("ping_service_weight", 50004, Type::Sint64),
            extension("ping_service_ratio", 50005, Type::Double),
            extension("ping_service_shards", 50006, Type::Uint32),
            extension("ping_service_meta", 50007, Type::Message),
        ]);
        OptionRegistry::from_files(&[f])
    }

    #[test]
    fn keeps_declaration_order() {
        let raw = OptionsBuilder::new()
            .string(50001, "ping")
            .string(50000, "pong")
            .build();

        let entries = decode_options("PingService", &raw, &registry()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["ping_service_name", "service_name"]);
        assert_eq!(entries[0].value, "ping");
        assert_eq!(entries[0].tag, 50001);
        assert_eq!(entries[0].full_name, "api.ping.v1.ping_service_name");
        assert_eq!(entries[1].value, "pong");
    }

    #[test]
    fn renders_scalar_values() {
        let raw = OptionsBuilder::new()
            .varint(50002, (-7i32) as i64 as u64)
            .varint(50003, 1)
            .varint(50004, 5) // zig-zag for -3
            .fixed64(50005, 0.5f64.to_bits())
            .varint(DEPRECATED_FIELD_NUMBER, 0)
            .build();

        let entries = decode_options("PingService", &raw, &registry()).unwrap();
        let values: Vec<_> = entries.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["-7", "true", "-3", "0.5", "false"]);
        assert_eq!(
            entries[4].full_name,
            "google.protobuf.ServiceOptions.deprecated"
        );
    }

    #[test]
    fn expands_packed_scalars() {
        let mut packed = Vec::new();
        prost::encoding::encode_varint(3, &mut packed);
        prost::encoding::encode_varint(300, &mut packed);
        let raw = OptionsBuilder::new().bytes(50006, &packed).build();

        let entries = decode_options("PingService", &raw, &registry()).unwrap();
        let values: Vec<_> = entries.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["3", "300"]);
    }

    #[test]
    fn skips_unknown_message_and_uninterpreted_fields() {
        let raw = OptionsBuilder::new()
            .string(60000, "unknown")
            .bytes(50007, &[0x08, 0x01])
            .bytes(UNINTERPRETED_OPTION, &[0x10, 0x01])
            .string(50000, "pong")
            .build();

        let entries = decode_options("PingService", &raw, &registry()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "pong");
    }

    #[test]
    fn skips_mismatched_wire_type() {
        // `ping_service_name` is declared as a string but arrives as a varint.
        let raw = OptionsBuilder::new()
            .varint(50001, 42)
            .string(50000, "pong")
            .build();

        let entries = decode_options("PingService", &raw, &registry()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "service_name");
    }

    #[test]
    fn skips_groups() {
        let mut raw = Vec::new();
        prost::encoding::encode_key(60001, WireType::StartGroup, &mut raw);
        prost::encoding::encode_key(1, WireType::Varint, &mut raw);
        prost::encoding::encode_varint(9, &mut raw);
        prost::encoding::encode_key(60001, WireType::EndGroup, &mut raw);
        raw.extend(OptionsBuilder::new().string(50000, "pong").build());

        let entries = decode_options("PingService", &raw, &registry()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_options_yield_no_entries() {
        let entries = decode_options("PingService", &[], &registry()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn truncated_string_is_malformed() {
        let mut raw = OptionsBuilder::new().string(50000, "pong").build();
        raw.truncate(raw.len() - 1);

        let err = decode_options("PingService", &raw, &registry()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedOptions { ref service, .. } if service == "PingService"
        ));
    }

    #[test]
    fn unterminated_group_is_malformed() {
        let mut raw = Vec::new();
        prost::encoding::encode_key(60001, WireType::StartGroup, &mut raw);

        assert!(decode_options("PingService", &raw, &registry()).is_err());
    }
}
