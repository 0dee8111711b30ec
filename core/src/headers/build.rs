// ## 📂 File: `src/headers/build.rs`
//! src/headers/build.rs
//!
//! `build_headers`: stub and SM3 digests, fingerprint, then the three signers.

use log::debug;

use crate::messages::fingerprint::{seed_extra_info, FingerprintMessage};
use crate::random::{RandomSource, RngSource};
use crate::signers::{argus_sign, gorgon_sign, ladon_sign, seed_hash};
use crate::headers::types::{HeaderParams, HeaderSet};
use crate::types::SignError;
use crate::utils::{decode_hex, md5_hex, sm3_digest};

const EMPTY_STUB: &str = "00000000000000000000000000000000";

/// Digests derived from the query and body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDigests {
    /// Lowercase MD5 hex of the body, or 32 zeros for an empty body.
    pub stub: String,
    pub body_hash: [u8; 6],
    pub query_hash: [u8; 6],
    pub psk_cal_hash: [u8; 32],
}

fn prefix6(d: &[u8; 32]) -> [u8; 6] {
    [d[0], d[1], d[2], d[3], d[4], d[5]]
}

pub fn request_digests(query: &str, post_data_hex: &str) -> Result<RequestDigests, SignError> {
    let body = decode_hex(post_data_hex)?;
    let stub = if body.is_empty() { EMPTY_STUB.to_string() } else { md5_hex(&body) };
    let stub_bytes = decode_hex(&stub)?;

    let mut psk_input = Vec::with_capacity(query.len() + stub_bytes.len() + 1);
    psk_input.extend_from_slice(query.as_bytes());
    psk_input.extend_from_slice(&stub_bytes);
    psk_input.push(b'0');

    Ok(RequestDigests {
        body_hash: prefix6(&sm3_digest(&stub_bytes)),
        query_hash: prefix6(&sm3_digest(query.as_bytes())),
        psk_cal_hash: sm3_digest(&psk_input),
        stub,
    })
}

/// Build the signed header set, drawing randomness from `rng` (Argus, then Ladon).
pub fn build_headers_with(params: &HeaderParams, rng: &mut dyn RandomSource) -> Result<HeaderSet, SignError> {
    if params.create_time < 0 {
        return Err(SignError::InvalidTimestamp(params.create_time));
    }
    let profile = params.profile.clone().normalized();
    let digests = request_digests(&params.query_string, &params.post_data_hex)?;

    let extra = if params.seed_encode_type != 0 {
        let hash = seed_hash(
            params.seed_encode_type,
            &params.query_string,
            &digests.stub,
            profile.rand26_bytes(),
        )?;
        seed_extra_info(params.seed_encode_type, &hash, &params.seed_algorithm_data)
    } else {
        Vec::new()
    };

    let stub_upper = digests.stub.to_uppercase();
    let message = FingerprintMessage {
        profile: &profile,
        device_id: &params.device_id,
        create_time: params.create_time,
        body_hash: digests.body_hash,
        query_hash: digests.query_hash,
        sign_count: params.sign_count,
        app_launch_time: params.app_launch_time,
        sec_device_token: &params.sec_device_token,
        psk_cal_hash: digests.psk_cal_hash,
        phone_info: &params.phone_info,
        seed: &params.seed,
        seed_encode_type: params.seed_encode_type,
        extra,
        hex32: Vec::new(),
    }
    .encode();

    let x_argus = argus_sign(&message, &digests.query_hash, rng)?;
    let x_ladon = ladon_sign(params.create_time, profile.ms_app_id.as_bytes(), rng)?;
    let x_gorgon = gorgon_sign(
        params.create_time,
        &params.query_string,
        &stub_upper,
        &profile.gorgon_sdk_version,
    )?;

    debug!(
        "build_headers: query={} body={} fingerprint={} seed_type={}",
        params.query_string.len(),
        params.post_data_hex.len() / 2,
        message.len(),
        params.seed_encode_type
    );

    Ok(HeaderSet {
        x_ss_stub: stub_upper,
        x_khronos: params.create_time.to_string(),
        x_argus,
        x_gorgon,
        x_ladon,
    })
}

/// Build the signed header set with a fresh OS-seeded generator.
pub fn build_headers(params: &HeaderParams) -> Result<HeaderSet, SignError> {
    build_headers_with(params, &mut RngSource::from_entropy())
}
