//! X-Ladon: two 34-round ARX passes over a timestamp block keyed by a salted MD5.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::constants::ladon::{BLOCK_LEN, ROUNDS, SUFFIX};
use crate::random::RandomSource;
use crate::types::SignError;
use crate::utils::md5_hex;

fn words(block: &[u8]) -> [u64; 4] {
    let mut out = [0u64; 4];
    for (w, chunk) in out.iter_mut().zip(block.chunks_exact(8)) {
        let mut b = [0u8; 8];
        b.copy_from_slice(chunk);
        *w = u64::from_le_bytes(b);
    }
    out
}

/// `ts ‖ SUFFIX` padded PKCS-style to 32 bytes.
fn time_block(ts: i64) -> Result<Vec<u8>, SignError> {
    let mut block = format!("{}{}", ts, SUFFIX).into_bytes();
    if block.len() > BLOCK_LEN {
        return Err(SignError::InvalidTimestamp(ts));
    }
    let pad = BLOCK_LEN - block.len();
    block.resize(BLOCK_LEN, pad as u8);
    Ok(block)
}

fn mix(key: &[u64; 4], mut b0: u64, mut b1: u64) -> (u64, u64) {
    let mut a0 = key[0];
    let mut aa = [key[1], key[2], key[3]];
    for i in 0..ROUNDS {
        if i != 0 {
            let cs = if i % 3 == 0 { 2 } else { i % 3 - 1 };
            aa[cs] = (aa[cs].rotate_right(8).wrapping_add(a0)) ^ (i as u64 - 1);
            a0 = a0.rotate_right(61) ^ aa[cs];
        }
        b1 = a0 ^ b0.wrapping_add(b1.rotate_right(8));
        b0 = b0.rotate_right(0x3d) ^ b1;
    }
    (b0, b1)
}

/// Compute the `x-ladon` header value for `ts` and the application id bytes.
pub fn ladon_sign(ts: i64, app_id: &[u8], rng: &mut dyn RandomSource) -> Result<String, SignError> {
    let salt = rng.bytes4();

    let mut keyed = salt.to_vec();
    keyed.extend_from_slice(app_id);
    // The hex digest text itself is the key material.
    let key = words(md5_hex(&keyed).as_bytes());
    let block = words(&time_block(ts)?);

    let mut out = Vec::with_capacity(4 + BLOCK_LEN);
    out.extend_from_slice(&salt);
    for (x0, x1) in [(0usize, 1usize), (2, 3)] {
        let (b0, b1) = mix(&key, block[x0], block[x1]);
        out.extend_from_slice(&b0.to_le_bytes());
        out.extend_from_slice(&b1.to_le_bytes());
    }
    Ok(STANDARD.encode(out))
}
