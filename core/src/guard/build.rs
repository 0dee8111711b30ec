//! Guard header assembly.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;

use crate::constants::guard::*;
use crate::guard::keypair::GuardKeyPair;
use crate::guard::types::{DeviceClientData, GuardError, GuardParams, TicketClientData};
use crate::random::{RandomSource, RngSource};

/// Canonical string signed in device mode.
pub fn device_canonical(device_token: &str, path: &str, timestamp: i64) -> String {
    format!("device_token={}&path={}&timestamp={}", device_token, path, timestamp)
}

/// Canonical string signed in ticket mode.
pub fn ticket_canonical(x_tt_token: &str, path: &str, timestamp: i64) -> String {
    format!("{}&path={}&timestamp={}", x_tt_token, path, timestamp)
}

fn resolve_timestamp(ts: i64) -> i64 {
    if ts == 0 {
        chrono::Utc::now().timestamp()
    } else {
        ts
    }
}

fn load_or_generate(priv_hex: &str, rng: &mut dyn RandomSource) -> Result<GuardKeyPair, GuardError> {
    let priv_hex = priv_hex.trim();
    if priv_hex.is_empty() || priv_hex == "..." {
        GuardKeyPair::generate(rng)
    } else {
        GuardKeyPair::from_priv_hex(priv_hex)
    }
}

/// Build guard headers with an explicit keypair.
pub fn build_guard_with_key(
    params: &GuardParams,
    key: &GuardKeyPair,
) -> Result<BTreeMap<String, String>, GuardError> {
    if params.path.is_empty() {
        return Err(GuardError::MissingRequiredField("path"));
    }
    let timestamp = resolve_timestamp(params.timestamp);
    let mut headers = BTreeMap::new();

    if params.is_ticket {
        let cookies = &params.cookies;
        let canonical = ticket_canonical(&cookies.x_tt_token, &params.path, timestamp);
        let data = TicketClientData {
            req_content: TICKET_REQ_CONTENT.into(),
            req_sign: key.sign(&canonical)?,
            timestamp,
            ts_sign: cookies.effective_ts_sign().to_owned(),
        };
        let json = serde_json::to_vec(&data)?;
        headers.insert(H_TICKET_CLIENT_DATA.into(), STANDARD.encode(json));
        headers.insert(H_TICKET_ITERATION.into(), TICKET_ITERATION_VERSION.into());
    } else {
        let token = params.device.device_token.as_deref().ok_or(GuardError::MissingDeviceToken)?;
        let canonical = device_canonical(token, &params.path, timestamp);
        let data = DeviceClientData {
            device_token: token.to_owned(),
            dreq_sign: key.sign(&canonical)?,
            dtoken_sign: params.device.dtoken_sign.clone(),
            req_content: DEVICE_REQ_CONTENT.into(),
            timestamp,
        };
        let json = serde_json::to_vec(&data)?;
        headers.insert(H_DEVICE_CLIENT_DATA.into(), STANDARD.encode(json));
        headers.insert(H_DEVICE_ITERATION.into(), DEVICE_ITERATION_VERSION.into());
    }

    headers.insert(H_PUBLIC_KEY.into(), key.public_key_b64());
    headers.insert(H_VERSION.into(), GUARD_VERSION.into());
    debug!(
        "guard: {} mode, path {}, {} headers",
        if params.is_ticket { "ticket" } else { "device" },
        params.path,
        headers.len()
    );
    Ok(headers)
}

/// Build guard headers, loading `priv_key_hex` or generating a key from `rng`.
pub fn build_guard_with(
    params: &GuardParams,
    rng: &mut dyn RandomSource,
) -> Result<BTreeMap<String, String>, GuardError> {
    let key = load_or_generate(&params.priv_key_hex, rng)?;
    build_guard_with_key(params, &key)
}

pub fn build_guard(params: &GuardParams) -> Result<BTreeMap<String, String>, GuardError> {
    build_guard_with(params, &mut RngSource::from_entropy())
}
