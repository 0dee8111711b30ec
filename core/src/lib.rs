//! reqsign-core
//!
//! Request-signing engine: wire codec, message builders, the Argus / Gorgon /
//! Ladon signers, the device / ticket guard and the MSSDK envelope codec.
//! No Python, no PyO3, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;
pub mod random;

// Protocol layers
pub mod wire;
pub mod messages;
pub mod signers;
pub mod guard;
pub mod envelope;

// Orchestration
pub mod headers;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::AppProfile;
    pub use crate::envelope::{mssdk_decrypt, mssdk_encrypt, mssdk_encrypt_with, EnvelopeError, EnvelopeVariant};
    pub use crate::guard::{build_guard, build_guard_with, GuardError, GuardKeyPair, GuardParams};
    pub use crate::headers::{build_headers, build_headers_with, make_trace_id, HeaderParams, HeaderSet};
    pub use crate::random::{RandomSource, RngSource, ScriptedRandom};
    pub use crate::types::SignError;
}
