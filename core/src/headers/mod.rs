//! headers/mod.rs
//! Request header orchestration: one call turns request inputs into the five
//! signed header values.
//!
//! Industry notes:
//! - The stub (body MD5) feeds every signer; compute it once.
//! - Argus consumes randomness before Ladon; scripted sources rely on that order.
//! - Zero / empty profile values fall back to the shipping defaults.

pub mod types;
pub mod build;
pub mod trace;

pub use types::*;
pub use build::*;
pub use trace::*;
