//! X-Gorgon: keyed RC4-like stream over request metadata with a bit-permutation finish.
//!
//! The key schedule is not textbook RC4: it overwrites `S[i]` with `S[j]` instead of
//! swapping, and both indices come from OR/AND combinations of running state.

use crate::constants::gorgon::{EMPTY_STUB, KEY, PREFIX};
use crate::types::SignError;
use crate::utils::{decode_hex, md5_digest};

fn key_schedule(key: &[u8; 8]) -> [u8; 256] {
    let mut s = [0u8; 256];
    for (i, v) in s.iter_mut().enumerate() {
        *v = i as u8;
    }
    let mut prev: u32 = 0;
    for i in 0..256 {
        let k = key[i & 7] as u32;
        let b = s[i] as u32;
        let inner = (2 * (prev | b)).wrapping_sub(prev ^ b);
        let v47 = (2 * (inner | k)).wrapping_sub(inner ^ k);
        let j = (v47.wrapping_sub(v47 & 0xFFFF_FF00) % 256) as usize;
        s[i] = s[j];
        prev = j as u32;
    }
    s
}

fn stream_xor(data: &mut [u8], state: &[u8; 256]) {
    let mut s = *state;
    let (mut v55, mut v56, mut v57) = (0usize, 0usize, 0usize);
    loop {
        let v59 = (v56 + 1) & 0xff;
        let sv = s[v59] as usize;
        let v62 = ((v55 ^ sv) + 2 * (v55 & sv)) & 0xff;
        let v63 = s[v62];
        s[v59] = v63;
        s[v62] = v63;
        let a = s[v59] as usize;
        let idx = ((a | v63 as usize) + (a & v63 as usize)) & 0xff;
        data[v57] ^= s[idx];
        v57 = 2 * (v57 & 1) + (v57 ^ 1);
        v55 = v62;
        v56 = v59;
        if v57 >= data.len() {
            break;
        }
    }
}

fn finish(data: &mut [u8]) -> String {
    let n = data.len();
    let mut out = String::with_capacity(n * 2);
    for i in 0..n {
        let next = if i == n - 1 { data[0] } else { data[i + 1] };
        let d = data[i].rotate_left(4) ^ next;
        let d = d as u64;
        let tem3 = ((d << 1) & 0xffaa) | ((d >> 1) & 0x55);
        let tem4 = ((tem3 << 2) & 0xff_ffcf) | ((tem3 >> 2) & 0x33);
        let tem5 = (tem4 >> 4) & 0xf;
        let mask: u64 = (1 << 28) - 1;
        let ans = (tem5 & !(mask << 4)) | ((tem4 & mask) << 4);
        let ans = ((ans ^ 0xffff_ffeb) & 0xff) as u8;
        data[i] = ans;
        out.push_str(&format!("{:02x}", ans));
    }
    out
}

/// Seed bytes: `MD5(query)[..4] ‖ stub[..4] ‖ sdk_version ‖ timestamp`.
fn gorgon_seed(ts: i64, query: &str, stub_hex: &str, sdk_version_hex: &str) -> Result<Vec<u8>, SignError> {
    if ts < 0 {
        return Err(SignError::InvalidTimestamp(ts));
    }
    let stub_prefix = if stub_hex.is_empty() {
        EMPTY_STUB
    } else {
        stub_hex
            .get(..8)
            .ok_or_else(|| SignError::InvalidHexInput(format!("stub too short: {stub_hex}")))?
    };
    let mut ts_hex = format!("{:x}", ts);
    if ts_hex.len() % 2 == 1 {
        ts_hex.insert(0, '0');
    }

    let mut seed = md5_digest(query.as_bytes())[..4].to_vec();
    seed.extend(decode_hex(stub_prefix)?);
    seed.extend(decode_hex(sdk_version_hex)?);
    seed.extend(decode_hex(&ts_hex)?);
    Ok(seed)
}

/// Compute the `x-gorgon` header value.
pub fn gorgon_sign(
    ts: i64,
    query: &str,
    stub_hex: &str,
    sdk_version_hex: &str,
) -> Result<String, SignError> {
    let mut data = gorgon_seed(ts, query, stub_hex, sdk_version_hex)?;
    let state = key_schedule(&KEY);
    stream_xor(&mut data, &state);
    Ok(format!("{}{}", PREFIX, finish(&mut data)))
}
