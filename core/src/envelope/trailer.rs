// ## 📂 File: `src/envelope/trailer.rs`
//! src/envelope/trailer.rs
//!
//! Integrity tag and variable-length checksum trailer placed ahead of the
//! length-prefixed body.

/// CRC-16/XMODEM lookup table (poly 0x1021), widened to u32.
const CRC_TABLE: [u32; 256] = build_crc_table();

const fn build_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u32) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ 0x1021 } else { crc << 1 };
            crc &= 0xffff;
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Running checksum; the accumulator keeps all 32 bits between bytes.
pub fn trailer_hash(data: &[u8]) -> u32 {
    data.iter().fold(0u32, |h, &b| {
        CRC_TABLE[(b as u32 ^ ((h >> 8) & 0xff)) as usize] ^ (h << 8)
    })
}

/// Number of trailer bytes emitted for a body of `len` bytes (0..=3).
pub fn trailer_len(len: usize) -> usize {
    let w9 = (8 - len % 8) % 8;
    let w10 = w9 ^ 7;
    let w24 = ((w9 << 1) & 7) + w10;
    w24 & 3
}

/// Low `trailer_len` bytes of the checksum, most significant first.
pub fn make_two_part(data: &[u8]) -> Vec<u8> {
    let n = trailer_len(data.len());
    trailer_hash(data).to_be_bytes()[4 - n..].to_vec()
}

/// Leading tag byte: mixes the last body byte with the plaintext length.
pub fn tag_byte(body: &[u8], plain_len: usize) -> u8 {
    let last = body.last().copied().unwrap_or(0) as u32;
    ((((last ^ (plain_len as u32 & 0xff)) << 1) & 0xf8) | 7) as u8
}
