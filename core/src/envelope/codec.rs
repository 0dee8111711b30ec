// ## 📂 File: `src/envelope/codec.rs`
//! src/envelope/codec.rs
//!
//! Envelope encode / decode.
//!
//! Encode order:
//! 1. zlib (optionally padded to a fixed hex length)
//! 2. `body = le32(plain_len) ‖ zlib`
//! 3. `inner = tag ‖ trailer(body) ‖ body`
//! 4. XTEA-CBC with `iv = salt4 ‖ 27042020`
//! 5. AES-128-CBC/PKCS#7 over `(x[0] ^ 3) ‖ x ‖ salt4`
//!
//! Decode reverses steps 5 and 4, then locates the zlib stream by its magic.
//! The tag, trailer and length prefix are not validated on decode.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use byteorder::{LittleEndian, WriteBytesExt};
use log::debug;

use crate::constants::envelope::{AES_IV, AES_KEY, FIRST_BYTE_MASK, IV_HIGH, IV_LOW, IV_SUFFIX};
use crate::envelope::compress::{compress_payload, locate_and_inflate};
use crate::envelope::trailer::{make_two_part, tag_byte};
use crate::envelope::types::{EnvelopeError, EnvelopeVariant, PayloadKind};
use crate::envelope::xtea::{rounds_from_iv, xtea_cbc_decrypt, xtea_cbc_encrypt, xtea_key};
use crate::random::{RandomSource, RngSource};

type AesCbcEnc = cbc::Encryptor<Aes128>;
type AesCbcDec = cbc::Decryptor<Aes128>;

fn decode_hex(input: &str) -> Result<Vec<u8>, EnvelopeError> {
    hex::decode(input.trim()).map_err(|e| EnvelopeError::InvalidHexInput(e.to_string()))
}

fn full_iv(salt: &[u8; 4]) -> [u8; 8] {
    let mut iv = [0u8; 8];
    iv[..4].copy_from_slice(salt);
    iv[4..].copy_from_slice(&IV_SUFFIX);
    iv
}

/// Encode raw payload bytes. The salt is drawn from `rng`.
pub fn mssdk_encrypt_bytes_with(
    payload: &[u8],
    variant: EnvelopeVariant,
    fixed_len_hex: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<u8>, EnvelopeError> {
    let zlib = compress_payload(payload, fixed_len_hex)?;

    let mut body = Vec::with_capacity(zlib.len() + 4);
    body.write_u32::<LittleEndian>(payload.len() as u32)
        .map_err(|e| EnvelopeError::Cipher(e.to_string()))?;
    body.extend_from_slice(&zlib);

    let trailer = make_two_part(&body);
    let mut inner = Vec::with_capacity(body.len() + trailer.len() + 1);
    inner.push(tag_byte(&body, payload.len()));
    inner.extend_from_slice(&trailer);
    inner.extend_from_slice(&body);

    let salt = (rng.in_range(IV_LOW, IV_HIGH) as u32).to_be_bytes();
    debug!(
        "envelope encode: plain={} zlib={} trailer={} rounds={} variant={:?}",
        payload.len(),
        zlib.len(),
        trailer.len(),
        rounds_from_iv(&salt),
        variant
    );
    let x = xtea_cbc_encrypt(&full_iv(&salt), &xtea_key(variant), &inner);

    let mut outer = Vec::with_capacity(x.len() + 5);
    outer.push(x.first().copied().unwrap_or(0) ^ FIRST_BYTE_MASK);
    outer.extend_from_slice(&x);
    outer.extend_from_slice(&salt);

    let aes = AesCbcEnc::new_from_slices(&AES_KEY, &AES_IV)
        .map_err(|e| EnvelopeError::Cipher(format!("aes init: {e}")))?;
    Ok(aes.encrypt_padded_vec_mut::<Pkcs7>(&outer))
}

/// Hex in, hex out; salt drawn from `rng`.
pub fn mssdk_encrypt_with(
    payload_hex: &str,
    variant: EnvelopeVariant,
    fixed_len_hex: usize,
    rng: &mut dyn RandomSource,
) -> Result<String, EnvelopeError> {
    let payload = decode_hex(payload_hex)?;
    mssdk_encrypt_bytes_with(&payload, variant, fixed_len_hex, rng).map(hex::encode)
}

/// Hex in, hex out; `fixed_len_hex == 0` keeps the natural compressed length.
pub fn mssdk_encrypt(payload_hex: &str, variant: EnvelopeVariant, fixed_len_hex: usize) -> Result<String, EnvelopeError> {
    mssdk_encrypt_with(payload_hex, variant, fixed_len_hex, &mut RngSource::from_entropy())
}

/// Decode raw envelope bytes back to the payload.
pub fn mssdk_decrypt_bytes(cipher: &[u8], variant: EnvelopeVariant, kind: PayloadKind) -> Result<Vec<u8>, EnvelopeError> {
    let aes = AesCbcDec::new_from_slices(&AES_KEY, &AES_IV)
        .map_err(|e| EnvelopeError::Cipher(format!("aes init: {e}")))?;
    let outer = aes
        .decrypt_padded_vec_mut::<Pkcs7>(cipher)
        .map_err(|_| EnvelopeError::Cipher(format!("aes unpad failed ({} bytes)", cipher.len())))?;
    if outer.len() < 5 {
        return Err(EnvelopeError::Truncated { len: outer.len() });
    }

    let n = outer.len();
    let salt = [outer[n - 4], outer[n - 3], outer[n - 2], outer[n - 1]];
    let inner = xtea_cbc_decrypt(&full_iv(&salt), &xtea_key(variant), &outer[1..n - 4])?;
    debug!(
        "envelope decode: inner={} rounds={} variant={:?} kind={:?}",
        inner.len(),
        rounds_from_iv(&salt),
        variant,
        kind
    );
    locate_and_inflate(&inner, kind)
}

pub fn mssdk_decrypt(cipher_hex: &str, variant: EnvelopeVariant, is_request: bool) -> Result<String, EnvelopeError> {
    let cipher = decode_hex(cipher_hex)?;
    mssdk_decrypt_bytes(&cipher, variant, PayloadKind::from_is_request(is_request)).map(hex::encode)
}
