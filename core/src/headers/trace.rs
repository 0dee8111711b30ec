// ## 📂 File: `src/headers/trace.rs`

//! headers/trace.rs
//! W3C-style trace id sent alongside signed requests.

use chrono::Utc;

use crate::random::{RandomSource, RngSource};

const INT63: u64 = 1 << 63;

/// `00-{a:016x}{b:016x}-0000000000000000-01`; `a` is `now` for a known device.
pub fn make_trace_id(device_id: &str, now: i64, rng: &mut dyn RandomSource) -> String {
    let a = if device_id.is_empty() { rng.in_range(0, INT63) } else { now as u64 };
    let b = rng.in_range(0, INT63);
    format!("00-{:016x}{:016x}-0000000000000000-01", a, b)
}

pub fn make_trace_id_now(device_id: &str) -> String {
    make_trace_id(device_id, Utc::now().timestamp(), &mut RngSource::from_entropy())
}
