//! Token service payloads.
//!
//! The device profile (field 1) is a large opaque table of device facts; callers
//! supply it pre-encoded and this module only frames it.

use serde::Serialize;

use crate::constants::{app, service as svc};
use crate::messages::service::{parse_service_response, ServiceResponse};
use crate::types::SignError;
use crate::utils::decode_hex;
use crate::wire::{decode_fields, FieldsExt, WireError, WireWriter};

/// Token request body (before enveloping).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEncrypt {
    /// Pre-encoded device profile message.
    pub device_profile: Vec<u8>,
    pub last_token: String,
    pub os: String,
    pub sdk_version: String,
    pub sdk_version_code: i64,
    pub ms_app_id: String,
    pub app_version: String,
    pub device_id: String,
    pub slots: Vec<i32>,
    pub stable: i64,
    pub install_uuid: String,
    pub not_set: String,
}

impl TokenEncrypt {
    pub fn new(device_id: &str, install_uuid: &str, device_profile: Vec<u8>) -> Self {
        Self {
            device_profile,
            last_token: String::new(),
            os: svc::OS.into(),
            sdk_version: svc::TOKEN_SDK_VERSION.into(),
            sdk_version_code: svc::TOKEN_SDK_VER_CODE << 1,
            ms_app_id: app::MS_APP_ID.into(),
            app_version: svc::TOKEN_APP_VERSION.into(),
            device_id: device_id.to_owned(),
            slots: vec![svc::TOKEN_SLOT_VALUE; svc::TOKEN_SLOT_COUNT],
            stable: svc::TOKEN_STABLE,
            install_uuid: install_uuid.to_owned(),
            not_set: svc::NOT_SET.into(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut slots = WireWriter::new();
        for v in &self.slots {
            slots.write_int32(6, *v);
        }

        let mut w = WireWriter::new();
        w.write_bytes(1, &self.device_profile)
            .write_string(2, &self.last_token)
            .write_string(3, &self.os)
            .write_string(4, &self.sdk_version)
            .write_int64(5, self.sdk_version_code)
            .write_string(6, &self.ms_app_id)
            .write_string(7, &self.app_version)
            .write_string(8, &self.device_id)
            .write_message(9, &slots)
            .write_int64(11, self.stable)
            .write_string(12, &self.install_uuid)
            .write_string(15, &self.not_set)
            .write_int64(16, self.stable);
        w.into_bytes()
    }
}

pub fn make_token_encrypt(
    device_id: &str,
    install_uuid: &str,
    device_profile_hex: &str,
) -> Result<String, SignError> {
    let profile = decode_hex(device_profile_hex)?;
    Ok(hex::encode(TokenEncrypt::new(device_id, install_uuid, profile).encode()))
}

/// Decrypted token payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TokenDecrypt {
    pub token: String,
    pub expire_time: i64,
}

impl TokenDecrypt {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let fields = decode_fields(buf)?;
        Ok(Self { token: fields.string(1)?, expire_time: fields.varint(2)? as i64 })
    }
}

pub fn parse_token_decrypt(plain_hex: &str) -> Result<TokenDecrypt, SignError> {
    Ok(TokenDecrypt::decode(&decode_hex(plain_hex)?)?)
}

pub fn parse_token_response(response_hex: &str) -> Result<ServiceResponse, SignError> {
    parse_service_response(response_hex)
}
