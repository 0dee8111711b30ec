//! Seed service payloads.

use serde::Serialize;

use crate::constants::service as svc;
use crate::messages::service::{parse_service_response, ServiceResponse};
use crate::types::SignError;
use crate::utils::decode_hex;
use crate::wire::{decode_fields, FieldsExt, WireError, WireWriter};

/// Seed request body (before enveloping).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedEncrypt {
    pub session_id: String,
    pub device_id: String,
    pub os: String,
    pub sdk_version: String,
}

impl SeedEncrypt {
    /// Empty `os` / `sdk_version` fall back to the client defaults.
    pub fn new(session_id: &str, device_id: &str, os: &str, sdk_version: &str) -> Self {
        Self {
            session_id: session_id.to_owned(),
            device_id: device_id.to_owned(),
            os: if os.is_empty() { svc::OS } else { os }.to_owned(),
            sdk_version: if sdk_version.is_empty() { svc::SEED_SDK_VERSION } else { sdk_version }
                .to_owned(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = WireWriter::new();
        w.write_string(1, &self.session_id)
            .write_string(2, &self.device_id)
            .write_string(3, &self.os)
            .write_string(4, &self.sdk_version);
        w.into_bytes()
    }
}

pub fn make_seed_encrypt(session_id: &str, device_id: &str, os: &str, sdk_version: &str) -> String {
    hex::encode(SeedEncrypt::new(session_id, device_id, os, sdk_version).encode())
}

/// Decrypted seed payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeedDecrypt {
    pub seed: String,
    pub algorithm: String,
}

impl SeedDecrypt {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let fields = decode_fields(buf)?;
        let info = decode_fields(fields.bytes(2)?)?;
        Ok(Self { seed: fields.string(1)?, algorithm: info.string(1)? })
    }
}

pub fn parse_seed_decrypt(plain_hex: &str) -> Result<SeedDecrypt, SignError> {
    Ok(SeedDecrypt::decode(&decode_hex(plain_hex)?)?)
}

pub fn parse_seed_response(response_hex: &str) -> Result<ServiceResponse, SignError> {
    parse_service_response(response_hex)
}
