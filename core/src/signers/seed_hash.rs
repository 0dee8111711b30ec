// ## 📂 File: `src/signers/seed_hash.rs`

//! signers/seed_hash.rs
//! 12-byte seed hash carried in the first fingerprint extra-info entry.
//!
//! Design:
//! - Each encode type hashes three inputs (query, stub, `00000001`) to 4 bytes apiece.
//! - The 12 bytes are then XORed with the reversed `rand26` bytes and reversed.
//! - Unknown encode types produce an empty payload.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;
use log::debug;
use num_enum::TryFromPrimitive;
use rc4::{consts::U32, Rc4, StreamCipher};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::types::SignError;
use crate::utils::{decode_hex, enum_name_or_hex, md5_digest, md5_hex, pkcs7_pad, sm3_digest, swap_nibbles};

const COUNTER: [u8; 4] = [0, 0, 0, 1];

#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum SeedEncodeType {
    Md5           = 1,
    Md5Swapped    = 2,
    Md5Masked     = 3,
    Md5Shuffled   = 4,
    Sm3Tail       = 5,
    AesOfbTail    = 6,
    Sha256Rc4     = 7,
    Sha1Crc32     = 8,
}

/// Swap adjacent bits, then adjacent bit pairs.
fn shuffle_bits(data: &mut [u8]) {
    for b in data.iter_mut() {
        let tt = ((*b & 0xaa) >> 1) | ((*b & 0x55) << 1);
        *b = ((tt & 0xcc) >> 2) | ((tt & 0x33) << 2);
    }
}

fn mask_5a(data: &mut [u8]) {
    for b in data.iter_mut() {
        *b ^= 0x5a;
    }
}

fn head4(d: &[u8]) -> [u8; 4] {
    [d[0], d[1], d[2], d[3]]
}

fn tail4(d: &[u8]) -> [u8; 4] {
    let n = d.len();
    [d[n - 4], d[n - 3], d[n - 2], d[n - 1]]
}

/// AES-128-OFB over the PKCS#7-padded input; returns the last 4 ciphertext bytes.
fn aes_ofb_tail(key: &[u8], iv: &[u8], data: &[u8]) -> Result<[u8; 4], SignError> {
    let cipher = Aes128::new_from_slice(key).map_err(|e| SignError::Cipher(format!("ofb key: {e}")))?;
    let mut feedback = GenericArray::clone_from_slice(iv);
    let mut out = pkcs7_pad(data, 16);
    for block in out.chunks_exact_mut(16) {
        cipher.encrypt_block(&mut feedback);
        for (b, k) in block.iter_mut().zip(feedback.iter()) {
            *b ^= k;
        }
    }
    Ok(tail4(&out))
}

fn rc4_counter(key: &[u8]) -> Result<[u8; 4], SignError> {
    let mut rc4 = Rc4::<U32>::new_from_slice(key)
        .map_err(|e| SignError::Cipher(format!("rc4 key: {e}")))?;
    let mut buf = COUNTER;
    rc4.apply_keystream(&mut buf);
    Ok(buf)
}

fn parts(kind: SeedEncodeType, query: &[u8], stub: &[u8], rand26: [u8; 4]) -> Result<[[u8; 4]; 3], SignError> {
    let inputs = [query, stub, &COUNTER[..]];
    let md5_heads = || inputs.map(|i| head4(&md5_digest(i)));

    let out = match kind {
        SeedEncodeType::Md5 => md5_heads(),
        SeedEncodeType::Md5Swapped => {
            let mut p = md5_heads();
            p.iter_mut().for_each(|x| swap_nibbles(x));
            p
        }
        SeedEncodeType::Md5Masked => {
            let mut p = md5_heads();
            p.iter_mut().for_each(|x| mask_5a(x));
            p
        }
        SeedEncodeType::Md5Shuffled => {
            let mut p = md5_heads();
            p.iter_mut().for_each(|x| {
                shuffle_bits(x);
                swap_nibbles(x);
            });
            p
        }
        SeedEncodeType::Sm3Tail => inputs.map(|i| tail4(&sm3_digest(i))),
        SeedEncodeType::AesOfbTail => {
            let m = md5_hex(&rand26);
            let (key, iv) = m.as_bytes().split_at(16);
            [
                aes_ofb_tail(key, iv, query)?,
                aes_ofb_tail(key, iv, stub)?,
                aes_ofb_tail(key, iv, &COUNTER)?,
            ]
        }
        SeedEncodeType::Sha256Rc4 => {
            let mut first = head4(&Sha256::digest(query));
            mask_5a(&mut first);
            let second = tail4(&md5_digest(stub));
            let mut third = rc4_counter(md5_hex(&rand26).as_bytes())?;
            shuffle_bits(&mut third);
            swap_nibbles(&mut third);
            [first, second, third]
        }
        SeedEncodeType::Sha1Crc32 => {
            let mut first = head4(&Sha1::digest(query));
            mask_5a(&mut first);
            let mut second = crc32fast::hash(stub).to_be_bytes();
            shuffle_bits(&mut second);
            swap_nibbles(&mut second);
            let mut third = head4(&Sha256::digest(COUNTER));
            swap_nibbles(&mut third);
            [first, second, third]
        }
    };
    Ok(out)
}

/// Seed hash for `kind`. An empty stub hashes as 16 zero bytes.
pub fn seed_hash(kind: u32, query: &str, stub_hex: &str, rand26: [u8; 4]) -> Result<Vec<u8>, SignError> {
    let Ok(kind_enum) = SeedEncodeType::try_from_primitive(kind) else {
        debug!("seed hash: unknown encode type {}", enum_name_or_hex::<SeedEncodeType>(kind));
        return Ok(Vec::new());
    };

    let stub = if stub_hex.is_empty() { vec![0u8; 16] } else { decode_hex(stub_hex)? };
    let parts = parts(kind_enum, query.as_bytes(), &stub, rand26)?;

    let mut reversed = rand26;
    reversed.reverse();
    let mut out: Vec<u8> = parts
        .iter()
        .flatten()
        .enumerate()
        .map(|(i, b)| b ^ reversed[i % 4])
        .collect();
    out.reverse();
    Ok(out)
}
