//! Function bindings. Every error surfaces as `ValueError` with the core's message.

use std::collections::BTreeMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use reqsign_core::config::AppProfile;
use reqsign_core::constants::guard::DEFAULT_PATH;
use reqsign_core::envelope::{self, EnvelopeVariant};
use reqsign_core::guard::{self, DeviceGuardData, GuardParams, TicketCookies};
use reqsign_core::headers::{self, HeaderParams};

fn value_error<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyfunction]
#[pyo3(signature = (
    device_id,
    create_time,
    sign_count,
    query_string,
    post_data_hex = "",
    report_count = 0,
    setting_count = 0,
    app_launch_time = 0,
    sec_device_token = "",
    phone_info = "",
    seed = "",
    seed_encode_type = 0,
    app_version = "",
    sdk_version_str = "",
    sdk_version = 0,
    call_type = 0,
    app_version_constant = 0,
))]
#[allow(clippy::too_many_arguments)]
fn build_headers<'py>(
    py: Python<'py>,
    device_id: &str,
    create_time: i64,
    sign_count: u32,
    query_string: &str,
    post_data_hex: &str,
    report_count: u32,
    setting_count: u32,
    app_launch_time: i64,
    sec_device_token: &str,
    phone_info: &str,
    seed: &str,
    seed_encode_type: u32,
    app_version: &str,
    sdk_version_str: &str,
    sdk_version: u32,
    call_type: u32,
    app_version_constant: u32,
) -> PyResult<Bound<'py, PyDict>> {
    let params = HeaderParams {
        device_id: device_id.into(),
        create_time,
        sign_count,
        report_count,
        setting_count,
        app_launch_time,
        sec_device_token: sec_device_token.into(),
        phone_info: phone_info.into(),
        seed: seed.into(),
        seed_encode_type,
        query_string: query_string.into(),
        post_data_hex: post_data_hex.into(),
        profile: AppProfile {
            app_version: app_version.into(),
            sdk_version_str: sdk_version_str.into(),
            sdk_version,
            call_type,
            app_version_constant,
            ..AppProfile::default()
        },
        seed_algorithm_data: Vec::new(),
    };
    let set = headers::build_headers(&params).map_err(value_error)?;

    let out = PyDict::new_bound(py);
    for (name, value) in set.to_pairs() {
        out.set_item(name, value)?;
    }
    Ok(out)
}

#[pyfunction]
#[pyo3(signature = (
    device_token = None,
    dtoken_sign = None,
    cookie_header = "",
    path = DEFAULT_PATH,
    timestamp = 0,
    priv_key_hex = "",
    is_ticket = false,
))]
fn build_guard(
    device_token: Option<&str>,
    dtoken_sign: Option<&str>,
    cookie_header: &str,
    path: &str,
    timestamp: i64,
    priv_key_hex: &str,
    is_ticket: bool,
) -> PyResult<BTreeMap<String, String>> {
    let params = GuardParams {
        device: DeviceGuardData {
            device_token: device_token.map(str::to_owned),
            dtoken_sign: dtoken_sign.map(str::to_owned),
        },
        cookies: TicketCookies::from_cookie_header(cookie_header),
        path: path.into(),
        timestamp,
        priv_key_hex: priv_key_hex.into(),
        is_ticket,
    };
    guard::build_guard(&params).map_err(value_error)
}

#[pyfunction]
#[pyo3(signature = (payload_hex, is_report = false, fixed_zlib_len = 0))]
fn mssdk_encrypt(payload_hex: &str, is_report: bool, fixed_zlib_len: usize) -> PyResult<String> {
    envelope::mssdk_encrypt(payload_hex, EnvelopeVariant::from_is_report(is_report), fixed_zlib_len)
        .map_err(value_error)
}

#[pyfunction]
#[pyo3(signature = (cipher_hex, is_report = false, is_request = false))]
fn mssdk_decrypt(cipher_hex: &str, is_report: bool, is_request: bool) -> PyResult<String> {
    envelope::mssdk_decrypt(cipher_hex, EnvelopeVariant::from_is_report(is_report), is_request)
        .map_err(value_error)
}

#[pyfunction]
#[pyo3(signature = (device_id = ""))]
fn make_trace_id(device_id: &str) -> String {
    headers::make_trace_id_now(device_id)
}

pub fn register(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(build_headers, m)?)?;
    m.add_function(wrap_pyfunction!(build_guard, m)?)?;
    m.add_function(wrap_pyfunction!(mssdk_encrypt, m)?)?;
    m.add_function(wrap_pyfunction!(mssdk_decrypt, m)?)?;
    m.add_function(wrap_pyfunction!(make_trace_id, m)?)?;
    Ok(())
}
