// ## 📂 File: `src/messages/fingerprint.rs`

//! messages/fingerprint.rs
//! Device / request fingerprint signed by the Argus signer.
//!
//! Design:
//! - One canonical schema; every field is written in ascending field order.
//! - Counters and timestamps go out as `value << 1` with 32-bit wrap for int32 fields.
//! - Field 31 mixes the sign counter, create time and `rand26` with a sign-bit branch.

use crate::config::AppProfile;
use crate::constants::fingerprint as fp;
use crate::wire::WireWriter;

/// Algorithm-tagged sub-payload carried in repeated field 26.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtraInfo {
    pub algorithm: i32,
    pub payload: Vec<u8>,
}

/// Inputs of the fingerprint message. Built per request.
#[derive(Clone, Debug)]
pub struct FingerprintMessage<'a> {
    pub profile: &'a AppProfile,
    pub device_id: &'a str,
    pub create_time: i64,
    pub body_hash: [u8; 6],
    pub query_hash: [u8; 6],
    pub sign_count: u32,
    pub app_launch_time: i64,
    pub sec_device_token: &'a str,
    pub psk_cal_hash: [u8; 32],
    pub phone_info: &'a str,
    pub seed: &'a str,
    pub seed_encode_type: u32,
    pub extra: Vec<ExtraInfo>,
    pub hex32: Vec<u8>,
}

/// `(v << 1)` truncated to the int32 wire width.
#[inline]
fn shl1_i32(v: u32) -> i32 {
    v.wrapping_shl(1) as i32
}

/// Field 31: counter mix with the sign-bit fold on its low 32 bits.
pub fn counter_mix(sign_count: u32, create_time: i64, rand26: u32) -> i64 {
    let t = (sign_count & 0xff) as u8;
    let comb = u32::from_be_bytes([0x82 ^ 0x38 ^ t, 0x82, t, 0x38]) as u64;
    let aaa = comb ^ (create_time as u64) ^ rand26 as u64;
    let low = aaa & 0xffff_ffff;
    if low & 0x8000_0000 != 0 {
        (((0x1_0000_0000u64 - low) << 1) - 1) as i64
    } else {
        (aaa << 1) as i64
    }
}

impl<'a> FingerprintMessage<'a> {
    fn action_record(&self) -> WireWriter {
        let mut w = WireWriter::new();
        w.write_int32(1, shl1_i32(self.sign_count))
            .write_int32(2, fp::REPORT_COUNT)
            .write_int32(5, fp::SETTING_COUNT)
            .write_int32(6, fp::ACTION_6)
            .write_int64(7, self.app_launch_time.wrapping_shl(1))
            .write_int32(8, shl1_i32(self.seed_encode_type));
        w
    }

    fn channel_info(&self) -> WireWriter {
        let mut w = WireWriter::new();
        w.write_string(1, self.phone_info)
            .write_int32(2, fp::PLATFORM)
            .write_string(3, &self.profile.channel)
            .write_int32(4, shl1_i32(self.profile.app_version_constant));
        w
    }

    pub fn encode(&self) -> Vec<u8> {
        let p = self.profile;
        let ct2 = self.create_time.wrapping_shl(1);

        let mut w = WireWriter::new();
        w.write_int32(1, fp::MAGIC << 1)
            .write_int32(2, fp::VERSION)
            .write_int64(3, (p.rand26 as i64) << 1)
            .write_string(4, &p.ms_app_id)
            .write_string(5, self.device_id)
            .write_string(6, &p.license_id)
            .write_string(7, &p.app_version)
            .write_string(8, &p.sdk_version_str)
            .write_int32(9, shl1_i32(p.sdk_version))
            .write_bytes(10, &[0u8; 8])
            .write_int64(12, ct2)
            .write_bytes(13, &self.body_hash)
            .write_bytes(14, &self.query_hash)
            .write_message(15, &self.action_record())
            .write_string(16, self.sec_device_token)
            .write_int64(17, ct2)
            .write_bytes(19, &self.psk_cal_hash)
            .write_string(20, "0")
            .write_int32(21, p.call_type as i32)
            .write_message(23, &self.channel_info())
            .write_string(24, self.seed)
            .write_int32(25, fp::ENV_CODE);

        for extra in &self.extra {
            let mut x = WireWriter::new();
            x.write_int32(1, extra.algorithm).write_bytes(2, &extra.payload);
            w.write_message(26, &x);
        }

        w.write_int64(27, ct2)
            .write_int32(28, fp::FIELD_28)
            .write_int32(29, fp::FIELD_29)
            .write_int32(30, fp::FIELD_30)
            .write_int64(31, counter_mix(self.sign_count, self.create_time, p.rand26))
            .write_bytes(32, &self.hex32)
            .write_int32(33, fp::FIELD_33);
        w.into_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }
}

/// The two field-26 entries emitted when a seed encode type is set.
pub fn seed_extra_info(seed_encode_type: u32, seed_hash: &[u8], algorithm_data: &[u8]) -> Vec<ExtraInfo> {
    if seed_encode_type == 0 {
        return Vec::new();
    }
    vec![
        ExtraInfo { algorithm: shl1_i32(seed_encode_type), payload: seed_hash.to_vec() },
        ExtraInfo { algorithm: fp::SEED_ALGORITHM, payload: algorithm_data.to_vec() },
    ]
}
