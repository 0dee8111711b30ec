// ## 📂 File: `src/envelope/types.rs`

//! envelope/types.rs
//! Envelope variants, payload kinds and the envelope error.

use std::fmt;

use crate::constants::envelope::{MAGIC_REQUEST, MAGIC_RESPONSE};

/// Key selection for the inner XTEA layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EnvelopeVariant {
    /// Seed / token exchanges.
    #[default]
    Standard,
    /// Report (telemetry) exchanges; key derived from the SDK version string.
    Report,
}

impl EnvelopeVariant {
    pub fn from_is_report(is_report: bool) -> Self {
        if is_report {
            EnvelopeVariant::Report
        } else {
            EnvelopeVariant::Standard
        }
    }
}

/// Direction of a payload; selects the zlib magic searched on decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PayloadKind {
    Request,
    Response,
}

impl PayloadKind {
    pub fn from_is_request(is_request: bool) -> Self {
        if is_request {
            PayloadKind::Request
        } else {
            PayloadKind::Response
        }
    }

    pub fn zlib_magic(self) -> [u8; 2] {
        match self {
            PayloadKind::Request => MAGIC_REQUEST,
            PayloadKind::Response => MAGIC_RESPONSE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    InvalidHexInput(String),
    /// Requested fixed length (hex digits) is below the natural compressed length.
    PaddingTooSmall { natural: usize, requested: usize },
    /// Fixed lengths are hex digit counts and must be even.
    InvalidFixedLength(usize),
    ZlibHeaderNotFound { magic: [u8; 2] },
    DecompressionFailure(String),
    Compression { codec: String, msg: String },
    Cipher(String),
    Truncated { len: usize },
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeError::InvalidHexInput(msg) => write!(f, "invalid hex input: {}", msg),
            EnvelopeError::PaddingTooSmall { natural, requested } => write!(
                f,
                "fixed length {} is smaller than compressed length {}",
                requested, natural
            ),
            EnvelopeError::InvalidFixedLength(len) => write!(f, "fixed length {} is odd", len),
            EnvelopeError::ZlibHeaderNotFound { magic } => {
                write!(f, "zlib header {:02x}{:02x} not found", magic[0], magic[1])
            }
            EnvelopeError::DecompressionFailure(msg) => write!(f, "decompression failure: {}", msg),
            EnvelopeError::Compression { codec, msg } => write!(f, "{} error: {}", codec, msg),
            EnvelopeError::Cipher(msg) => write!(f, "cipher error: {}", msg),
            EnvelopeError::Truncated { len } => write!(f, "envelope too short: {} bytes", len),
        }
    }
}

impl std::error::Error for EnvelopeError {}
