//! messages/mod.rs
//! Field-tagged message layouts exchanged with the remote protocol.
//!
//! Industry notes:
//! - Field numbers, order and the `<< 1` scaling are reproduced exactly; the remote
//!   verifier hashes the emitted bytes.
//! - Builders return hex (the collaborator-facing form) plus a byte-level `encode_*` twin.
//! - Parsers are tolerant of unknown fields but reject truncated data.

pub mod service;
pub mod fingerprint;
pub mod seed;
pub mod token;
pub mod report;

pub use service::*;
pub use fingerprint::*;
pub use seed::*;
pub use token::*;
pub use report::*;
