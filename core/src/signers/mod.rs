//! signers/mod.rs
//! Request signature generators.
//!
//! Industry notes:
//! - Arithmetic is kept as observed in the reference binary: wrapping 64-bit words,
//!   explicit rotations and the literal OR/AND/XOR chains. Do not simplify.
//! - Randomness enters only through `RandomSource`; with a scripted source every
//!   signer is a pure function of its inputs.

pub mod argus;
pub mod gorgon;
pub mod ladon;
pub mod seed_hash;

pub use argus::*;
pub use gorgon::*;
pub use ladon::*;
pub use seed_hash::*;
