//! Report (telemetry) service payloads.
//!
//! Only the identity section is typed; the remaining sections are device
//! telemetry tables supplied by the caller as encoded bytes.

use serde::Serialize;

use crate::constants::service as svc;
use crate::types::SignError;
use crate::utils::decode_hex;
use crate::wire::{decode_fields, FieldsExt, WireError, WireWriter};

/// Field number of the identity section inside `ReportEncrypt`.
pub const IDENTITY_FIELD: u32 = 3;

/// Identity section of a report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportIdentity {
    pub token: String,
    pub device_id: String,
    pub install_id: String,
    pub openudid: String,
    pub request_id: String,
    pub media_drm_id: String,
}

impl ReportIdentity {
    pub fn encode(&self) -> WireWriter {
        let mut w = WireWriter::new();
        w.write_string(1, &self.token)
            .write_string(2, &self.device_id)
            .write_string(3, &self.install_id);
        for field in 4..=8 {
            w.write_string(field, svc::NOT_SET);
        }
        w.write_string(9, &self.openudid).write_string(10, &self.openudid);
        for field in 11..=13 {
            w.write_string(field, svc::NOT_SET);
        }
        w.write_string(14, &self.request_id).write_string(16, &self.media_drm_id);
        w
    }
}

/// Report request body (before enveloping).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportEncrypt {
    pub stime: i64,
    pub identity: ReportIdentity,
    /// Opaque sections as (field number, encoded payload).
    pub sections: Vec<(u32, Vec<u8>)>,
}

impl ReportEncrypt {
    pub fn encode(&self) -> Vec<u8> {
        let identity = self.identity.encode();
        let mut sections: Vec<(u32, &[u8])> =
            self.sections
                .iter()
                .filter(|(n, _)| *n != IDENTITY_FIELD && *n != 1)
                .map(|(n, p)| (*n, p.as_slice()))
                .collect();
        sections.push((IDENTITY_FIELD, identity.as_bytes()));
        sections.sort_by_key(|(n, _)| *n);

        let mut w = WireWriter::new();
        w.write_int64(1, self.stime);
        for (number, payload) in sections {
            w.write_bytes(number, payload);
        }
        w.into_bytes()
    }
}

pub fn make_report_encrypt(report: &ReportEncrypt) -> String {
    hex::encode(report.encode())
}

/// Report service verdict.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportDecrypt {
    pub code: i32,
    pub message: String,
}

impl ReportDecrypt {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let fields = decode_fields(buf)?;
        Ok(Self { code: fields.varint(1)? as i32, message: fields.string(2)? })
    }
}

/// Report responses carry one nested `ReportDecrypt` at field 1.
pub fn parse_report_response(response_hex: &str) -> Result<ReportDecrypt, SignError> {
    let raw = decode_hex(response_hex)?;
    let fields = decode_fields(&raw)?;
    Ok(ReportDecrypt::decode(fields.bytes(1)?)?)
}
