// ## 📂 File: `src/envelope/xtea.rs`
//! src/envelope/xtea.rs
//!
//! XTEA variant in CBC mode.
//!
//! Design notes:
//! - Big-endian words, delta 0x9E3779B9; `rounds` counts full loop iterations.
//! - Round count is derived from the IV's first 4 bytes (little-endian).
//! - Misaligned input is zero-padded by `16 - len % 8` bytes, matching the client.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::constants::envelope::{REPORT_KEY_SOURCE, XTEA_DELTA, XTEA_KEY, XTEA_KEY_SUFFIX};
use crate::envelope::types::{EnvelopeError, EnvelopeVariant};

#[derive(Clone, Debug)]
pub struct Xtea {
    k: [u32; 4],
    rounds: u32,
}

impl Xtea {
    pub fn new(key: &[u8; 16], rounds: u32) -> Self {
        let mut k = [0u32; 4];
        BigEndian::read_u32_into(key, &mut k);
        Self { k, rounds }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn encrypt_block(&self, block: &mut [u8]) {
        let mut v0 = BigEndian::read_u32(&block[0..4]);
        let mut v1 = BigEndian::read_u32(&block[4..8]);
        let mut s: u32 = 0;
        for _ in 0..self.rounds {
            v0 = v0.wrapping_add(
                (((v1 << 4) ^ (v1 >> 5)).wrapping_add(v1)) ^ s.wrapping_add(self.k[(s & 3) as usize]),
            );
            s = s.wrapping_add(XTEA_DELTA);
            v1 = v1.wrapping_add(
                (((v0 << 4) ^ (v0 >> 5)).wrapping_add(v0))
                    ^ s.wrapping_add(self.k[((s >> 11) & 3) as usize]),
            );
        }
        BigEndian::write_u32(&mut block[0..4], v0);
        BigEndian::write_u32(&mut block[4..8], v1);
    }

    pub fn decrypt_block(&self, block: &mut [u8]) {
        let mut v0 = BigEndian::read_u32(&block[0..4]);
        let mut v1 = BigEndian::read_u32(&block[4..8]);
        let mut s = XTEA_DELTA.wrapping_mul(self.rounds);
        for _ in 0..self.rounds {
            v1 = v1.wrapping_sub(
                (((v0 << 4) ^ (v0 >> 5)).wrapping_add(v0))
                    ^ s.wrapping_add(self.k[((s >> 11) & 3) as usize]),
            );
            s = s.wrapping_sub(XTEA_DELTA);
            v0 = v0.wrapping_sub(
                (((v1 << 4) ^ (v1 >> 5)).wrapping_add(v1)) ^ s.wrapping_add(self.k[(s & 3) as usize]),
            );
        }
        BigEndian::write_u32(&mut block[0..4], v0);
        BigEndian::write_u32(&mut block[4..8], v1);
    }
}

/// `rounds = (8 * (((2m) & 8) | m)) ^ 0x20` with `m = le32(iv[..4]) % 5`.
pub fn rounds_from_iv(iv4: &[u8; 4]) -> u32 {
    let m = LittleEndian::read_u32(iv4) % 5;
    (8 * (((2 * m) & 8) | m)) ^ 0x20
}

/// First half of the report key, derived from the SDK version string.
pub fn report_key_prefix() -> [u8; 8] {
    let data = REPORT_KEY_SOURCE;
    let mut w12: u32 = 0x26000;
    let mut w11: u32 = 0x280000;
    let mut w13: u32 = 0x9000;
    let mut w17: u32 = w12 + (3 << 12);
    let mut w14: u32 = 0x1500_0000;
    let mut w15 = data[2] as u32;
    let mut w0 = data[5] as u32;
    let mut w10 = data[8] as u32;
    let mut w16: u32 = 0x5f0_0000;

    let mut w2 = w15 << 8;
    w17 ^= w2;
    w13 &= w2;
    w2 = w12 | 0x200;
    w11 |= w0 << 20;
    w0 <<= 0x18;
    w13 |= w17;
    w17 &= w2;
    w2 = w0 & 0xfdff_ffff;
    w0 &= w14;
    w14 ^= w2;
    w2 = w10 << 8;
    w15 <<= 0x10;
    w10 <<= 0x14;
    w16 ^= w15;
    w15 &= 0xf0_0000;
    w10 &= 0xfeff_ffff;
    w15 |= w16;
    w16 = w2 & 0x6000;
    w10 |= 0x3800_0000;
    w12 ^= w16;
    w10 ^= w11;
    w11 = w14 | w0;
    w14 = 0x21_6249;
    w16 = 0x3f4_7825;
    w10 ^= w14;
    w14 = w11 | w16;
    w11 &= 0x100_0000;
    w10 |= w13;
    w11 |= 0x20_0000;
    w10 = w10.wrapping_sub(w17);
    let first = w10;

    w11 = w14.wrapping_sub(w11);
    let mut w8 = w15 & !w11;
    w10 = w11 & !w15;
    w12 = w12.wrapping_add(w2);
    w8 |= w10;
    w10 = w8 | w12;
    w8 &= w12;
    w8 = w10.wrapping_sub(w8);

    let mut out = [0u8; 8];
    LittleEndian::write_u32(&mut out[..4], first);
    LittleEndian::write_u32(&mut out[4..], w8);
    out
}

pub fn xtea_key(variant: EnvelopeVariant) -> [u8; 16] {
    match variant {
        EnvelopeVariant::Standard => XTEA_KEY,
        EnvelopeVariant::Report => {
            let mut key = [0u8; 16];
            key[..8].copy_from_slice(&report_key_prefix());
            key[8..].copy_from_slice(&XTEA_KEY_SUFFIX);
            key
        }
    }
}

fn xor8(block: &mut [u8], chain: &[u8; 8]) {
    for (b, c) in block.iter_mut().zip(chain) {
        *b ^= c;
    }
}

/// CBC encrypt with the IV-derived round count.
pub fn xtea_cbc_encrypt(iv: &[u8; 8], key: &[u8; 16], data: &[u8]) -> Vec<u8> {
    let mut buf = data.to_vec();
    let rem = buf.len() % 8;
    if rem != 0 {
        buf.resize(buf.len() + 16 - rem, 0);
    }
    let cipher = Xtea::new(key, rounds_from_iv(&[iv[0], iv[1], iv[2], iv[3]]));
    let mut chain = *iv;
    for block in buf.chunks_exact_mut(8) {
        xor8(block, &chain);
        cipher.encrypt_block(block);
        chain.copy_from_slice(block);
    }
    buf
}

/// CBC decrypt; input must be block aligned.
pub fn xtea_cbc_decrypt(iv: &[u8; 8], key: &[u8; 16], data: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    if data.len() % 8 != 0 {
        return Err(EnvelopeError::Cipher(format!("xtea input {} not 8-byte aligned", data.len())));
    }
    let cipher = Xtea::new(key, rounds_from_iv(&[iv[0], iv[1], iv[2], iv[3]]));
    let mut buf = data.to_vec();
    let mut chain = *iv;
    for block in buf.chunks_exact_mut(8) {
        let mut next = [0u8; 8];
        next.copy_from_slice(block);
        cipher.decrypt_block(block);
        xor8(block, &chain);
        chain = next;
    }
    Ok(buf)
}
