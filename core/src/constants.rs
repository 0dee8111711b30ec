// ## 📂 File: `src/constants.rs`

//! constants.rs
//! Protocol constants shared by the signers, the envelope codec and the guard.
//!
//! Industry notes:
//! - Every value here is observed on the wire; changing one silently breaks verification.
//! - Grouped by consumer so each module imports only what it touches.

/// Application / SDK identity defaults (overridable through `AppProfile`).
pub mod app {
    pub const APP_VERSION: &str         = "42.4.3";
    pub const SDK_VERSION_STR: &str     = "v05.02.02-ov-android";
    pub const SDK_VERSION: u32          = 0x0502_0220;
    pub const CALL_TYPE: u32            = 738;
    pub const APP_VERSION_CONSTANT: u32 = 0x0C40_A800;
    pub const MS_APP_ID: &str           = "1233";
    pub const LICENSE_ID: &str          = "2142840551";
    pub const CHANNEL: &str             = "samsung_store";
    pub const GORGON_SDK_VERSION: &str  = "0000000020020205";
    pub const RAND26: u32               = 0x6A51_C28C;
}

/// Fingerprint message fixed field values.
pub mod fingerprint {
    pub const MAGIC: i32          = 0x2020_0929;
    pub const VERSION: i32        = 2;
    pub const PLATFORM: i32       = 22;
    pub const ENV_CODE: i32       = 10;
    pub const SEED_ALGORITHM: i32 = 2016;
    pub const FIELD_28: i32       = 1006;
    pub const FIELD_29: i32       = 516_112;
    pub const FIELD_30: i32       = 6;
    pub const FIELD_33: i32       = 4;
    pub const REPORT_COUNT: i32   = 4;
    pub const SETTING_COUNT: i32  = 4;
    pub const ACTION_6: i32       = 6;
}

/// Argus signer material.
pub mod argus {
    /// Base signing key (32 bytes once decoded).
    pub const SIGN_KEY_B64: &str = "wC8lD4bMTxmNVwY5jSkqi3QWmrphr/58ugLko7UZgWM=";
    pub const ROUND_KEYS: usize  = 75;
    pub const ROUNDS: usize      = 72;
    pub const SCHEDULE: [u64; 5] = [
        0xf210_1d11_3b81_5d60,
        0x0def_e2ee_c47e_a29f,
        0x8db0_dcd8_e81a_9b3e,
        0x724f_2327_17e5_64c1,
        0xc236_b3c5_fb92_9874,
    ];
    pub const TAG_HEAD: u8  = 0xec;
    pub const TAG_TAIL: u8  = 0x0d;
    pub const ALLOC_LOW: u64  = 0x7b_0c61_1111;
    pub const ALLOC_HIGH: u64 = 0x7b_0c6f_ffff;
    pub const ALLOC_SHIFTS: [u32; 11] = [0x16, 0x14, 0x12, 0x10, 0xe, 0xc, 0xa, 0x8, 0x6, 0x4, 0x2];
}

/// Gorgon signer material.
pub mod gorgon {
    pub const KEY: [u8; 8]    = [0x4a, 0x00, 0x16, 0xa8, 0x47, 0x6c, 0x00, 0x80];
    pub const PREFIX: &str    = "840480a80000";
    pub const EMPTY_STUB: &str = "00000000";
}

/// Ladon signer material.
pub mod ladon {
    pub const SUFFIX: &str     = "-2142840551-1233";
    pub const ROUNDS: usize    = 34;
    pub const BLOCK_LEN: usize = 32;
}

/// Envelope codec keys, IV bounds and magic.
pub mod envelope {
    pub const AES_KEY: [u8; 16] = [
        0xb8, 0xd7, 0x2d, 0xde, 0xc0, 0x51, 0x42, 0x94, 0x8b, 0xbf, 0x2d, 0xc8, 0x1d, 0x63, 0x75, 0x9c,
    ];
    pub const AES_IV: [u8; 16] = [
        0xd6, 0xc3, 0x96, 0x95, 0x82, 0xf9, 0xac, 0x53, 0x13, 0xd3, 0x9c, 0x18, 0x0b, 0x54, 0xa2, 0xbc,
    ];
    pub const XTEA_KEY: [u8; 16] = [
        0x78, 0x23, 0x99, 0xbd, 0xfa, 0xce, 0xde, 0xad, 0x32, 0x30, 0x31, 0x30, 0x30, 0x34, 0x30, 0x34,
    ];
    /// Fixed suffix shared by both XTEA keys ("20100404").
    pub const XTEA_KEY_SUFFIX: [u8; 8] = *b"20100404";
    /// Version string the report key is derived from.
    pub const REPORT_KEY_SOURCE: &[u8] = b"v05.02.00-ov-android";
    pub const IV_SUFFIX: [u8; 4] = [0x27, 0x04, 0x20, 0x20];
    pub const IV_LOW: u64  = 0xc013_3eb0;
    pub const IV_HIGH: u64 = 0xc013_3ec0;
    pub const XTEA_DELTA: u32 = 0x9E37_79B9;
    pub const FIRST_BYTE_MASK: u8 = 0x03;
    pub const ZLIB_LEVEL: u32 = 1;
    pub const MAGIC_REQUEST: [u8; 2]  = [0x78, 0x01];
    pub const MAGIC_RESPONSE: [u8; 2] = [0x78, 0xda];
}

/// Device / ticket guard header names and fixed values.
pub mod guard {
    pub const DEFAULT_PATH: &str = "/aweme/v1/aweme/stats/";
    pub const GUARD_VERSION: &str = "3";
    pub const DEVICE_ITERATION_VERSION: &str = "1";
    pub const TICKET_ITERATION_VERSION: &str = "0";
    pub const DEVICE_REQ_CONTENT: &str = "device_token,path,timestamp";
    pub const TICKET_REQ_CONTENT: &str = "ticket,path,timestamp";
    pub const KEYGEN_ATTEMPTS: usize = 8;

    pub const H_DEVICE_CLIENT_DATA: &str     = "tt-device-guard-client-data";
    pub const H_DEVICE_ITERATION: &str       = "tt-device-guard-iteration-version";
    pub const H_TICKET_CLIENT_DATA: &str     = "tt-ticket-guard-client-data";
    pub const H_TICKET_ITERATION: &str       = "tt-ticket-guard-iteration-version";
    pub const H_PUBLIC_KEY: &str             = "tt-ticket-guard-public-key";
    pub const H_VERSION: &str                = "tt-ticket-guard-version";
    pub const H_DEVICE_SERVER_DATA: &str     = "tt-device-guard-server-data";
}

/// Token / seed / report service message constants.
pub mod service {
    pub const REQUEST_MAGIC: i64      = 538_969_122;
    pub const REQUEST_VERSION: i32    = 2;
    pub const SEED_REQUEST_KIND: i32  = 4;
    pub const TOKEN_REQUEST_KIND: i32 = 2;
    pub const OS: &str                = "android";
    pub const SEED_SDK_VERSION: &str  = "v05.02.00";
    pub const TOKEN_SDK_VERSION: &str = "v05.02.02-alpha.12-ov-android";
    pub const TOKEN_SDK_VER_CODE: i64 = 84_017_184;
    pub const TOKEN_APP_VERSION: &str = "40.6.3";
    pub const TOKEN_STABLE: i64       = 1_999_997;
    pub const TOKEN_SLOT_VALUE: i32   = 48;
    pub const TOKEN_SLOT_COUNT: usize = 8;
    pub const NOT_SET: &str           = "!notset!";
}
