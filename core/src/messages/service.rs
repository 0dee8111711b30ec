// ## 📂 File: `src/messages/service.rs`

//! messages/service.rs
//! Request / response wrappers shared by the seed, token and report services.

use crate::constants::service as svc;
use crate::types::SignError;
use crate::utils::decode_hex;
use crate::wire::{decode_fields, FieldsExt, WireError, WireWriter};

/// Which service a wrapped request targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServiceKind {
    Seed,
    Token,
    Report,
}

impl ServiceKind {
    /// Field 3 of the request wrapper; the report service sends none.
    fn request_kind(self) -> i32 {
        match self {
            ServiceKind::Seed => svc::SEED_REQUEST_KIND,
            ServiceKind::Token => svc::TOKEN_REQUEST_KIND,
            ServiceKind::Report => 0,
        }
    }
}

/// Wrap an already-enveloped payload for `kind`.
pub fn encode_service_request(kind: ServiceKind, payload: &[u8], utime: i64) -> Vec<u8> {
    let mut w = WireWriter::new();
    w.write_int64(1, svc::REQUEST_MAGIC << 1)
        .write_int32(2, svc::REQUEST_VERSION)
        .write_int32(3, kind.request_kind())
        .write_bytes(4, payload)
        .write_int64(5, utime.wrapping_shl(1));
    w.into_bytes()
}

pub fn make_seed_request(payload_hex: &str, utime: i64) -> Result<String, SignError> {
    let payload = decode_hex(payload_hex)?;
    Ok(hex::encode(encode_service_request(ServiceKind::Seed, &payload, utime)))
}

pub fn make_token_request(payload_hex: &str, utime: i64) -> Result<String, SignError> {
    let payload = decode_hex(payload_hex)?;
    Ok(hex::encode(encode_service_request(ServiceKind::Token, &payload, utime)))
}

pub fn make_report_request(payload_hex: &str, utime: i64) -> Result<String, SignError> {
    let payload = decode_hex(payload_hex)?;
    Ok(hex::encode(encode_service_request(ServiceKind::Report, &payload, utime)))
}

/// Seed / token service response. `payload` is still enveloped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceResponse {
    pub s1: u64,
    pub s2: u64,
    pub s3: u64,
    pub payload: Vec<u8>,
}

impl ServiceResponse {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let fields = decode_fields(buf)?;
        Ok(Self {
            s1: fields.varint(1)?,
            s2: fields.varint(2)?,
            s3: fields.varint(5)?,
            payload: fields.bytes(6)?.to_vec(),
        })
    }

    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }
}

pub fn parse_service_response(response_hex: &str) -> Result<ServiceResponse, SignError> {
    let raw = decode_hex(response_hex)?;
    Ok(ServiceResponse::decode(&raw)?)
}
