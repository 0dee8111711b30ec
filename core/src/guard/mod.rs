//! guard/mod.rs
//! Device / ticket guard headers: ECDSA P-256 over a canonical string, packaged as JSON+base64.
//!
//! Industry notes:
//! - Nonces are RFC 6979 deterministic; signatures are ordinary ECDSA and verify against the
//!   advertised public key.
//! - Server-supplied state is parsed into typed structs at the boundary; missing fields fail fast.
//! - Some guard flows require the same keypair across requests; callers persist `priv_key_hex`.

pub mod types;
pub mod keypair;
pub mod build;

pub use types::*;
pub use keypair::*;
pub use build::*;
