// ## 📂 File: `src/wire/decode.rs`
//! src/wire/decode.rs
//!
//! Bounds-checked field reader.
//!
//! Design notes:
//! - Every read checks remaining length first; nothing panics on hostile input.
//! - Unknown fields are skipped by wire type, so builders can decode partial views.

use crate::wire::types::{WireError, WireField, WireType, WireValue, MAX_VARINT_LEN};

/// Cursor over an encoded message.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let available = self.buf.len() - self.pos;
        if n > available {
            return Err(WireError::Truncated { offset: self.pos, needed: n, available });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_varint(&mut self) -> Result<u64, WireError> {
        let start = self.pos;
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = match self.buf.get(self.pos) {
                Some(b) => *b,
                None => {
                    return Err(WireError::Truncated { offset: self.pos, needed: 1, available: 0 })
                }
            };
            self.pos += 1;
            value |= ((byte & 0x7f) as u64) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(WireError::VarintTooLong { offset: start })
    }

    pub fn read_tag(&mut self) -> Result<(u32, WireType), WireError> {
        let offset = self.pos;
        let raw = self.read_varint()?;
        let wire_raw = (raw & 0x7) as u8;
        let wire_type = WireType::try_from(wire_raw)
            .map_err(|_| WireError::UnsupportedWireType { raw: wire_raw, offset })?;
        let field = (raw >> 3) as u32;
        if field == 0 {
            return Err(WireError::InvalidFieldNumber { offset });
        }
        Ok((field, wire_type))
    }

    pub fn read_bytes(&mut self) -> Result<&'a [u8], WireError> {
        let offset = self.pos;
        let len = self.read_varint()?;
        let available = self.buf.len() - self.pos;
        if len > available as u64 {
            return Err(WireError::Truncated { offset, needed: len as usize, available });
        }
        self.take(len as usize)
    }

    pub fn read_string(&mut self) -> Result<&'a str, WireError> {
        let offset = self.pos;
        let raw = self.read_bytes()?;
        std::str::from_utf8(raw).map_err(|_| WireError::InvalidUtf8 { offset })
    }

    pub fn read_fixed64(&mut self) -> Result<u64, WireError> {
        let raw = self.take(8)?;
        let mut b = [0u8; 8];
        b.copy_from_slice(raw);
        Ok(u64::from_le_bytes(b))
    }

    pub fn read_fixed32(&mut self) -> Result<u32, WireError> {
        let raw = self.take(4)?;
        let mut b = [0u8; 4];
        b.copy_from_slice(raw);
        Ok(u32::from_le_bytes(b))
    }

    /// Skip the payload of a field whose tag was just read.
    pub fn skip(&mut self, wire_type: WireType) -> Result<(), WireError> {
        match wire_type {
            WireType::Varint => self.read_varint().map(|_| ()),
            WireType::Fixed64 => self.take(8).map(|_| ()),
            WireType::LengthDelimited => self.read_bytes().map(|_| ()),
            WireType::Fixed32 => self.take(4).map(|_| ()),
        }
    }

    /// Next field with its value; fixed-32 fields are skipped.
    pub fn read_field(&mut self) -> Result<Option<WireField>, WireError> {
        while !self.is_eof() {
            let (number, wire_type) = self.read_tag()?;
            let value = match wire_type {
                WireType::Varint => WireValue::Varint(self.read_varint()?),
                WireType::Fixed64 => WireValue::Fixed64(self.read_fixed64()?),
                WireType::LengthDelimited => WireValue::Bytes(self.read_bytes()?.to_vec()),
                WireType::Fixed32 => {
                    self.skip(wire_type)?;
                    continue;
                }
            };
            return Ok(Some(WireField { number, value }));
        }
        Ok(None)
    }
}

/// Decode a whole message into its fields in wire order.
pub fn decode_fields(buf: &[u8]) -> Result<Vec<WireField>, WireError> {
    let mut reader = WireReader::new(buf);
    let mut out = Vec::new();
    while let Some(field) = reader.read_field()? {
        out.push(field);
    }
    Ok(out)
}

/// Typed lookups over a decoded field list; the last occurrence wins.
pub trait FieldsExt {
    fn varint(&self, number: u32) -> Result<u64, WireError>;
    fn bytes(&self, number: u32) -> Result<&[u8], WireError>;
    fn string(&self, number: u32) -> Result<String, WireError>;
}

impl FieldsExt for [WireField] {
    fn varint(&self, number: u32) -> Result<u64, WireError> {
        match self.iter().rev().find(|f| f.number == number) {
            None => Ok(0),
            Some(f) => f.value.as_u64().ok_or(WireError::UnexpectedWireType {
                field: number,
                expected: WireType::Varint,
                found: f.value.wire_type(),
            }),
        }
    }

    fn bytes(&self, number: u32) -> Result<&[u8], WireError> {
        match self.iter().rev().find(|f| f.number == number) {
            None => Ok(&[]),
            Some(f) => f.value.as_bytes().ok_or(WireError::UnexpectedWireType {
                field: number,
                expected: WireType::LengthDelimited,
                found: f.value.wire_type(),
            }),
        }
    }

    fn string(&self, number: u32) -> Result<String, WireError> {
        let raw = self.bytes(number)?;
        String::from_utf8(raw.to_vec()).map_err(|_| WireError::InvalidUtf8 { offset: 0 })
    }
}
