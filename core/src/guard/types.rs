// ## 📂 File: `src/guard/types.rs`

//! guard/types.rs
//! Guard inputs, client-data payloads and the guard error.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::constants::guard::{DEFAULT_PATH, H_DEVICE_SERVER_DATA};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// Key generation or loading failed.
    KeyDerivationFailure(String),
    /// Device mode without a `device_token` in server data.
    MissingDeviceToken,
    MissingRequiredField(&'static str),
    InvalidHexInput(String),
    /// `tt-device-guard-server-data` was not base64 JSON.
    InvalidServerData(String),
    Json(String),
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::KeyDerivationFailure(msg) => write!(f, "key derivation failure: {}", msg),
            GuardError::MissingDeviceToken => write!(f, "device_token missing from device guard data"),
            GuardError::MissingRequiredField(name) => write!(f, "missing required field: {}", name),
            GuardError::InvalidHexInput(msg) => write!(f, "invalid hex input: {}", msg),
            GuardError::InvalidServerData(msg) => write!(f, "invalid guard server data: {}", msg),
            GuardError::Json(msg) => write!(f, "json error: {}", msg),
        }
    }
}

impl std::error::Error for GuardError {}

impl From<serde_json::Error> for GuardError {
    fn from(e: serde_json::Error) -> Self {
        GuardError::Json(e.to_string())
    }
}

/// Device guard state returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGuardData {
    #[serde(default)]
    pub device_token: Option<String>,
    #[serde(default)]
    pub dtoken_sign: Option<String>,
}

impl DeviceGuardData {
    pub fn new(device_token: &str, dtoken_sign: Option<&str>) -> Self {
        Self {
            device_token: Some(device_token.to_owned()),
            dtoken_sign: dtoken_sign.map(str::to_owned),
        }
    }

    /// Parse the base64 JSON value of the `tt-device-guard-server-data` response header.
    pub fn from_server_header(value: &str) -> Result<Self, GuardError> {
        let raw = STANDARD
            .decode(value.trim())
            .map_err(|e| GuardError::InvalidServerData(e.to_string()))?;
        serde_json::from_slice(&raw).map_err(|e| GuardError::InvalidServerData(e.to_string()))
    }

    /// Find the server-data header among response headers (name match is case-insensitive).
    pub fn from_response_headers<'a, I>(headers: I) -> Result<Self, GuardError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        headers
            .into_iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(H_DEVICE_SERVER_DATA))
            .ok_or(GuardError::MissingRequiredField(H_DEVICE_SERVER_DATA))
            .and_then(|(_, value)| Self::from_server_header(value))
    }
}

/// The ticket cookies the ticket guard reads. Absent cookies are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketCookies {
    pub x_tt_token: String,
    pub ts_sign: String,
    pub ts_sign_ree: String,
}

impl TicketCookies {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = Self::default();
        for (name, value) in pairs {
            match name.trim() {
                "x-tt-token" => out.x_tt_token = value.trim().to_owned(),
                "ts_sign" => out.ts_sign = value.trim().to_owned(),
                "ts_sign_ree" => out.ts_sign_ree = value.trim().to_owned(),
                _ => {}
            }
        }
        out
    }

    /// Parse a `Cookie:` header (`a=b; c=d`).
    pub fn from_cookie_header(header: &str) -> Self {
        Self::from_pairs(header.split(';').filter_map(|kv| kv.split_once('=')))
    }

    /// `ts_sign`, falling back to `ts_sign_ree`.
    pub fn effective_ts_sign(&self) -> &str {
        if self.ts_sign.is_empty() {
            &self.ts_sign_ree
        } else {
            &self.ts_sign
        }
    }
}

/// Inputs of one guard-header construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardParams {
    pub device: DeviceGuardData,
    pub cookies: TicketCookies,
    pub path: String,
    /// Unix seconds; `0` means now.
    pub timestamp: i64,
    /// Hex private scalar; empty (or `...`) generates a fresh key.
    pub priv_key_hex: String,
    pub is_ticket: bool,
}

impl Default for GuardParams {
    fn default() -> Self {
        Self {
            device: DeviceGuardData::default(),
            cookies: TicketCookies::default(),
            path: DEFAULT_PATH.into(),
            timestamp: 0,
            priv_key_hex: String::new(),
            is_ticket: false,
        }
    }
}

/// Device mode client data. Field order is the emitted JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceClientData {
    pub device_token: String,
    pub dreq_sign: String,
    pub dtoken_sign: Option<String>,
    pub req_content: String,
    pub timestamp: i64,
}

/// Ticket mode client data. Field order is the emitted JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketClientData {
    pub req_content: String,
    pub req_sign: String,
    pub timestamp: i64,
    pub ts_sign: String,
}
