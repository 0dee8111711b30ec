// ## 📂 File: `src/wire/types.rs`

//! wire/types.rs
//! Wire types, decoded values and the codec error.

use std::fmt;
use num_enum::TryFromPrimitive;

/// Largest legal varint encoding (64 bits / 7 bits per byte, rounded up).
pub const MAX_VARINT_LEN: usize = 10;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum WireType {
    Varint          = 0,
    Fixed64         = 1,
    LengthDelimited = 2,
    Fixed32         = 5,
}

/// A decoded or to-be-encoded scalar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireValue {
    Varint(u64),
    Bytes(Vec<u8>),
    Fixed64(u64),
}

impl WireValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            WireValue::Varint(_) => WireType::Varint,
            WireValue::Bytes(_) => WireType::LengthDelimited,
            WireValue::Fixed64(_) => WireType::Fixed64,
        }
    }

    /// Zero values are omitted on encode.
    pub fn is_default(&self) -> bool {
        match self {
            WireValue::Varint(v) | WireValue::Fixed64(v) => *v == 0,
            WireValue::Bytes(b) => b.is_empty(),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            WireValue::Varint(v) | WireValue::Fixed64(v) => Some(*v),
            WireValue::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            WireValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// One field: number plus value; together they form the tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireField {
    pub number: u32,
    pub value: WireValue,
}

impl WireField {
    pub fn new(number: u32, value: WireValue) -> Self {
        Self { number, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    Truncated { offset: usize, needed: usize, available: usize },
    VarintTooLong { offset: usize },
    UnsupportedWireType { raw: u8, offset: usize },
    InvalidFieldNumber { offset: usize },
    InvalidUtf8 { offset: usize },
    UnexpectedWireType { field: u32, expected: WireType, found: WireType },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Truncated { offset, needed, available } => write!(
                f,
                "malformed wire: truncated at {}, need {} bytes, have {}",
                offset, needed, available
            ),
            WireError::VarintTooLong { offset } => {
                write!(f, "malformed wire: varint at {} exceeds {} bytes", offset, MAX_VARINT_LEN)
            }
            WireError::UnsupportedWireType { raw, offset } => {
                write!(f, "malformed wire: unsupported wire type {} at {}", raw, offset)
            }
            WireError::InvalidFieldNumber { offset } => {
                write!(f, "malformed wire: field number 0 at {}", offset)
            }
            WireError::InvalidUtf8 { offset } => {
                write!(f, "malformed wire: invalid utf-8 string at {}", offset)
            }
            WireError::UnexpectedWireType { field, expected, found } => write!(
                f,
                "malformed wire: field {} expected {:?}, found {:?}",
                field, expected, found
            ),
        }
    }
}

impl std::error::Error for WireError {}
