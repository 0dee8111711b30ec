// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! Orchestrator inputs and the signed header set.

use serde::Serialize;

use crate::config::AppProfile;

/// Per-request inputs of `build_headers`.
#[derive(Clone, Debug, Default)]
pub struct HeaderParams {
    pub device_id: String,
    /// Unix seconds; also the `x-khronos` value.
    pub create_time: i64,
    pub sign_count: u32,
    /// Accepted for call-site compatibility; the fingerprint always carries the fixed value.
    pub report_count: u32,
    /// Accepted for call-site compatibility; the fingerprint always carries the fixed value.
    pub setting_count: u32,
    pub app_launch_time: i64,
    pub sec_device_token: String,
    pub phone_info: String,
    pub seed: String,
    pub seed_encode_type: u32,
    pub query_string: String,
    /// Request body as hex; empty for bodiless requests.
    pub post_data_hex: String,
    pub profile: AppProfile,
    /// Payload of the algorithm-2016 extra-info entry.
    pub seed_algorithm_data: Vec<u8>,
}

/// The five signed header values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HeaderSet {
    pub x_ss_stub: String,
    pub x_khronos: String,
    pub x_argus: String,
    pub x_gorgon: String,
    pub x_ladon: String,
}

impl HeaderSet {
    /// Header name / value pairs in wire spelling.
    pub fn to_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("x-ss-stub", &self.x_ss_stub),
            ("x-khronos", &self.x_khronos),
            ("x-argus", &self.x_argus),
            ("x-gorgon", &self.x_gorgon),
            ("x-ladon", &self.x_ladon),
        ]
    }
}
