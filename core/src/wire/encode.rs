// ## 📂 File: `src/wire/encode.rs`
//! src/wire/encode.rs
//!
//! Field writer.
//!
//! Design notes:
//! - Every `write_*` appends nothing for a zero / empty value.
//! - `int32` sign-extends negatives to a 10-byte varint like the reference encoder.
//! - Nested messages are plain bytes; builders encode the child first, then `write_message`.

use crate::wire::types::{WireField, WireType, WireValue};

/// Append the base-128 varint encoding of `v`.
#[inline]
pub fn put_varint(out: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        out.push((v as u8 & 0x7f) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}

pub fn encode_varint(v: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    put_varint(&mut out, v);
    out
}

pub fn encode_tag(field: u32, wire_type: WireType) -> Vec<u8> {
    encode_varint(tag_value(field, wire_type))
}

#[inline]
fn tag_value(field: u32, wire_type: WireType) -> u64 {
    ((field as u64) << 3) | wire_type as u64
}

/// Append-only message writer.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn tag(&mut self, field: u32, wire_type: WireType) {
        put_varint(&mut self.buf, tag_value(field, wire_type));
    }

    pub fn write_int32(&mut self, field: u32, value: i32) -> &mut Self {
        if value != 0 {
            self.tag(field, WireType::Varint);
            put_varint(&mut self.buf, value as i64 as u64);
        }
        self
    }

    pub fn write_int64(&mut self, field: u32, value: i64) -> &mut Self {
        self.write_uint64(field, value as u64)
    }

    pub fn write_uint64(&mut self, field: u32, value: u64) -> &mut Self {
        if value != 0 {
            self.tag(field, WireType::Varint);
            put_varint(&mut self.buf, value);
        }
        self
    }

    pub fn write_bytes(&mut self, field: u32, value: &[u8]) -> &mut Self {
        if !value.is_empty() {
            self.tag(field, WireType::LengthDelimited);
            put_varint(&mut self.buf, value.len() as u64);
            self.buf.extend_from_slice(value);
        }
        self
    }

    pub fn write_string(&mut self, field: u32, value: &str) -> &mut Self {
        self.write_bytes(field, value.as_bytes())
    }

    /// Nested message; an empty child is omitted like any empty bytes field.
    pub fn write_message(&mut self, field: u32, child: &WireWriter) -> &mut Self {
        self.write_bytes(field, &child.buf)
    }

    pub fn write_fixed64(&mut self, field: u32, value: u64) -> &mut Self {
        if value != 0 {
            self.tag(field, WireType::Fixed64);
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
        self
    }

    pub fn write_value(&mut self, field: u32, value: &WireValue) -> &mut Self {
        match value {
            WireValue::Varint(v) => self.write_uint64(field, *v),
            WireValue::Bytes(b) => self.write_bytes(field, b),
            WireValue::Fixed64(v) => self.write_fixed64(field, *v),
        }
    }

    pub fn write_field(&mut self, field: &WireField) -> &mut Self {
        self.write_value(field.number, &field.value)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.buf)
    }
}

/// Encode a field list in the given order.
pub fn encode_fields(fields: &[WireField]) -> Vec<u8> {
    let mut w = WireWriter::new();
    for f in fields {
        w.write_field(f);
    }
    w.into_bytes()
}
