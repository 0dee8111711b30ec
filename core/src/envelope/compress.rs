// ## 📂 File: `src/envelope/compress.rs`
//! src/envelope/compress.rs
//!
//! zlib stage of the envelope.
//!
//! Design:
//! - Level 1 deflate; the stream's two-byte header doubles as a direction marker.
//! - Optional fixed length is counted in hex digits, like the client's padded hex body.
//! - Decode scans byte offsets for the magic and inflates from the first offset that works.

use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use log::{trace, warn};

use crate::constants::envelope::ZLIB_LEVEL;
use crate::envelope::types::{EnvelopeError, PayloadKind};

/// Compress `data`; when `fixed_len_hex > 0`, zero-pad to that many hex digits,
/// then align so the digit count is `2 mod 8`.
pub fn compress_payload(data: &[u8], fixed_len_hex: usize) -> Result<Vec<u8>, EnvelopeError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(ZLIB_LEVEL));
    encoder.write_all(data).map_err(|e| EnvelopeError::Compression {
        codec: "zlib".into(),
        msg: e.to_string(),
    })?;
    let mut out = encoder.finish().map_err(|e| EnvelopeError::Compression {
        codec: "zlib".into(),
        msg: e.to_string(),
    })?;

    if fixed_len_hex == 0 {
        return Ok(out);
    }
    if fixed_len_hex % 2 != 0 {
        return Err(EnvelopeError::InvalidFixedLength(fixed_len_hex));
    }
    let natural = out.len() * 2;
    if natural > fixed_len_hex {
        return Err(EnvelopeError::PaddingTooSmall { natural, requested: fixed_len_hex });
    }
    out.resize(fixed_len_hex / 2, 0);
    let digits = out.len() * 2;
    if digits % 8 != 2 {
        out.resize((digits + 10 - digits % 8) / 2, 0);
    }
    trace!("zlib: {} -> {} bytes (fixed {} hex)", data.len(), out.len(), fixed_len_hex);
    Ok(out)
}

fn inflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

/// Locate the zlib stream for `kind` and inflate it; trailing padding is ignored.
pub fn locate_and_inflate(data: &[u8], kind: PayloadKind) -> Result<Vec<u8>, EnvelopeError> {
    let magic = kind.zlib_magic();
    let mut last_err = None;
    for (offset, window) in data.windows(2).enumerate() {
        if window != magic {
            continue;
        }
        match inflate(&data[offset..]) {
            Ok(out) => {
                trace!("zlib stream at offset {}: {} bytes", offset, out.len());
                return Ok(out);
            }
            Err(e) => {
                warn!("zlib magic at offset {} did not inflate: {}", offset, e);
                last_err = Some(e.to_string());
            }
        }
    }
    match last_err {
        Some(msg) => Err(EnvelopeError::DecompressionFailure(msg)),
        None => Err(EnvelopeError::ZlibHeaderNotFound { magic }),
    }
}
