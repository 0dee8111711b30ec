// ## 📂 File: `src/signers/argus.rs`

//! signers/argus.rs
//! X-Argus: keyed 72-round block transform over the fingerprint message, then AES-128-CBC.
//!
//! Design:
//! - Key material: SM3(sign_key ‖ rand4 ‖ sign_key) split into four little-endian words,
//!   expanded to 75 round keys.
//! - Blocks are PKCS#7-padded to 16 bytes and processed as two LE half-blocks.
//! - The assembled buffer is always a multiple of 16 bytes, so the final AES pass is unpadded.
//!
//! Random consumption order: 4 key-seed bytes, 4 header bytes, one allocation-address draw.

use aes::Aes128;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::NoPadding, BlockEncryptMut, KeyIvInit};
use log::trace;

use crate::constants::argus::*;
use crate::random::RandomSource;
use crate::types::SignError;
use crate::utils::{md5_digest, pkcs7_pad, sm3_digest};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;

fn sign_key() -> Result<Vec<u8>, SignError> {
    let key = STANDARD
        .decode(SIGN_KEY_B64)
        .map_err(|e| SignError::Cipher(format!("argus sign key: {e}")))?;
    if key.len() != 32 {
        return Err(SignError::Cipher(format!("argus sign key length {}", key.len())));
    }
    Ok(key)
}

#[inline]
fn le_word(b: &[u8]) -> u64 {
    let mut w = [0u8; 8];
    w.copy_from_slice(&b[..8]);
    u64::from_le_bytes(w)
}

/// Expand the four seed words into the round-key table.
fn expand_round_keys(seed: [u64; 4]) -> [u64; ROUND_KEYS] {
    let [s1, s2, s3, s4, s5] = SCHEDULE;
    let mut k = [0u64; ROUND_KEYS];
    k[..4].copy_from_slice(&seed);
    for i in 4..ROUND_KEYS {
        let k4 = k[i - 1];
        let k2 = k[i - 3];
        let k1 = k[i - 4];
        let tem3 = (s1 & k4.rotate_right(3)) | (s2 & (k4 >> 3));
        let tem5 = 0xe000_0000_0000_0000 ^ (k2 ^ tem3);
        let tem10 = (s3 & tem5.rotate_right(1)) | (s4 & (tem5 >> 1));
        let mut sv = (i - 4) as u32;
        if sv > 0x3d {
            sv = (sv % 0x3d) - 1;
        }
        let num = (s5 >> sv) & 1;
        let tem11 = (k1 ^ tem5) ^ tem10;
        let tem12 = 0xffff_ffff_ffff_fffd ^ num;
        let tem14 = (tem11 ^ 0x9000_0000_0000_0000) & tem12;
        let tem15 = tem11 | tem12;
        k[i] = tem15.wrapping_sub(tem14);
    }
    k
}

/// 72-round transform of the padded message; each block yields `p1.be ‖ p2.be`.
fn transform_blocks(message: &[u8], keys: &[u64; ROUND_KEYS]) -> Vec<u8> {
    let padded = pkcs7_pad(message, 16);
    let mut out = Vec::with_capacity(padded.len());
    for block in padded.chunks_exact(16) {
        let mut p1 = le_word(&block[..8]);
        let mut p2 = le_word(&block[8..]);
        for key in keys.iter().take(ROUNDS) {
            let t = p2.rotate_right(0x38) & p2.rotate_right(0x3f);
            let next = key ^ (p2.rotate_right(0x3e) ^ (p1 ^ t));
            p1 = p2;
            p2 = next;
        }
        out.extend_from_slice(&p1.to_be_bytes());
        out.extend_from_slice(&p2.to_be_bytes());
    }
    out
}

/// Mask derived from the two trailing seed bytes.
fn fragment_mask(res3: [u8; 2]) -> u32 {
    let tem = res3[0] as u32;
    let tem1 = res3[1] as u32;
    !((((tem << 0xb) | tem1) ^ (tem >> 5)) ^ tem)
}

fn header_word(query_hash: &[u8; 6]) -> u32 {
    let mut q = [0u8; 8];
    q[2..].copy_from_slice(query_hash);
    let p14 = u64::from_be_bytes(q);
    ((((p14 & 0x3f) << 0x2e) | 0x1800_0000_0000_0000 | 0x1000_0000_0000 | 0x1_0000_0000) >> 32) as u32
}

fn assemble(
    transformed: &[u8],
    mask: u32,
    res3: [u8; 2],
    query_hash: &[u8; 6],
    rng: &mut dyn RandomSource,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(transformed.len() + 48);
    out.push(TAG_HEAD);

    let rand_str = rng.bytes4();
    let mut header = [0u8; 8];
    header[..4].copy_from_slice(&header_word(query_hash).to_be_bytes());
    header[4..].copy_from_slice(&rand_str);
    header.reverse();
    out.extend_from_slice(&header);

    for block in transformed.chunks_exact(16).rev() {
        let w: Vec<u32> = block
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]) ^ mask)
            .collect();
        for idx in [2usize, 3, 0, 1] {
            out.extend_from_slice(&w[idx].to_be_bytes());
        }
    }

    out.extend_from_slice(&mask.to_be_bytes());
    out.extend_from_slice(&mask.to_be_bytes());
    out.extend_from_slice(&res3);

    let malloc = rng.in_range(ALLOC_LOW, ALLOC_HIGH);
    let check = out[..8].iter().fold(0u8, |acc, b| acc ^ b);
    for s in ALLOC_SHIFTS {
        out.push(((malloc >> s) & 0xff) as u8);
    }
    out.push(check);
    out.push(TAG_TAIL);
    out
}

/// Sign an encoded fingerprint message.
///
/// `query_hash` is the 6-byte SM3 prefix of the query string (also fingerprint field 14).
pub fn argus_sign(
    message: &[u8],
    query_hash: &[u8; 6],
    rng: &mut dyn RandomSource,
) -> Result<String, SignError> {
    let key = sign_key()?;

    let rand4 = rng.bytes4();
    let res1 = [rand4[0], rand4[1]];
    let res3 = [rand4[2], rand4[3]];

    let mut seed_input = Vec::with_capacity(68);
    seed_input.extend_from_slice(&key);
    seed_input.extend_from_slice(&rand4);
    seed_input.extend_from_slice(&key);
    let h = sm3_digest(&seed_input);
    let seed = [le_word(&h[0..]), le_word(&h[8..]), le_word(&h[16..]), le_word(&h[24..])];

    let keys = expand_round_keys(seed);
    let transformed = transform_blocks(message, &keys);
    let body = assemble(&transformed, fragment_mask(res3), res3, query_hash, rng);
    trace!("argus: message {} bytes, assembled {} bytes", message.len(), body.len());

    let aes_key = md5_digest(&key[..16]);
    let aes_iv = md5_digest(&key[16..32]);
    let ct = Aes128CbcEnc::new_from_slices(&aes_key, &aes_iv)
        .map_err(|e| SignError::Cipher(format!("argus aes: {e}")))?
        .encrypt_padded_vec_mut::<NoPadding>(&body);

    let mut signed = Vec::with_capacity(2 + ct.len());
    signed.extend_from_slice(&res1);
    signed.extend_from_slice(&ct);
    Ok(STANDARD.encode(signed))
}
