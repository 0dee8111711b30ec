use std::fmt;

use num_enum::TryFromPrimitive;
use sm3::{Digest, Sm3};

use crate::types::SignError;

pub fn md5_digest(data: &[u8]) -> [u8; 16] {
    md5::compute(data).0
}

pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

pub fn sm3_digest(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sm3::digest(data));
    out
}

pub fn sm3_hex(data: &[u8]) -> String {
    hex::encode(sm3_digest(data))
}

/// Decode caller hex, tolerating surrounding whitespace; empty input yields an empty vec.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, SignError> {
    let trimmed = input.trim();
    hex::decode(trimmed).map_err(|e| SignError::InvalidHexInput(format!("{trimmed:.16}: {e}")))
}

/// PKCS#7 pad to a multiple of `block`; a full block is appended to aligned input.
pub fn pkcs7_pad(data: &[u8], block: usize) -> Vec<u8> {
    let pad = block - data.len() % block;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Swap the two nibbles of every byte.
pub fn swap_nibbles(data: &mut [u8]) {
    for b in data.iter_mut() {
        *b = b.rotate_left(4);
    }
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}
