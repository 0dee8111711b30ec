// ## 📂 File: `src/guard/keypair.rs`
//! src/guard/keypair.rs
//!
//! P-256 key material and the detached signature format.
//!
//! Design notes:
//! - Private scalars travel as 64 hex digits (left-padded); public keys as base64 of the
//!   65-byte uncompressed SEC1 point.
//! - Signatures are ECDSA over SHA-256 of the canonical string, DER-encoded by hand so the
//!   integer rules (strip leading zeros, prefix 0x00 on a set high bit) stay visible.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::{Signature, SigningKey};
use sha2::{Digest, Sha256};

use crate::constants::guard::KEYGEN_ATTEMPTS;
use crate::guard::types::GuardError;
use crate::random::RandomSource;

/// Loaded or generated guard keypair.
#[derive(Clone)]
pub struct GuardKeyPair {
    signing: SigningKey,
}

impl std::fmt::Debug for GuardKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardKeyPair").field("public_key", &self.public_key_b64()).finish()
    }
}

impl GuardKeyPair {
    /// Draw a scalar from `rng`, retrying out-of-range values.
    pub fn generate(rng: &mut dyn RandomSource) -> Result<Self, GuardError> {
        let mut scalar = [0u8; 32];
        for _ in 0..KEYGEN_ATTEMPTS {
            rng.fill(&mut scalar);
            if let Ok(signing) = SigningKey::from_slice(&scalar) {
                return Ok(Self { signing });
            }
        }
        Err(GuardError::KeyDerivationFailure(format!(
            "no valid scalar after {} attempts",
            KEYGEN_ATTEMPTS
        )))
    }

    /// Load a big-endian hex scalar (up to 32 bytes; shorter input is left-padded).
    pub fn from_priv_hex(priv_hex: &str) -> Result<Self, GuardError> {
        let raw = hex::decode(priv_hex.trim())
            .map_err(|e| GuardError::InvalidHexInput(format!("private key: {e}")))?;
        if raw.is_empty() || raw.len() > 32 {
            return Err(GuardError::KeyDerivationFailure(format!(
                "private key must be 1..=32 bytes, got {}",
                raw.len()
            )));
        }
        let mut scalar = [0u8; 32];
        scalar[32 - raw.len()..].copy_from_slice(&raw);
        let signing = SigningKey::from_slice(&scalar)
            .map_err(|e| GuardError::KeyDerivationFailure(e.to_string()))?;
        Ok(Self { signing })
    }

    pub fn priv_key_hex(&self) -> String {
        hex::encode(self.signing.to_bytes())
    }

    /// Uncompressed SEC1 point `04 ‖ X ‖ Y`.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.signing.verifying_key().to_encoded_point(false).as_bytes().to_vec()
    }

    pub fn public_key_b64(&self) -> String {
        STANDARD.encode(self.public_key_bytes())
    }

    /// Base64 DER signature over SHA-256(`canonical`).
    pub fn sign(&self, canonical: &str) -> Result<String, GuardError> {
        let digest = Sha256::digest(canonical.as_bytes());
        let sig: Signature = self
            .signing
            .sign_prehash(&digest)
            .map_err(|e| GuardError::KeyDerivationFailure(format!("sign: {e}")))?;
        let (r, s) = sig.split_bytes();
        Ok(STANDARD.encode(der_signature(&r, &s)))
    }
}

fn der_integer(out: &mut Vec<u8>, be: &[u8]) {
    let first = be.iter().position(|b| *b != 0).unwrap_or(be.len());
    let trimmed = &be[first..];
    let pad = trimmed.first().map_or(false, |b| b & 0x80 != 0);
    out.push(0x02);
    out.push((trimmed.len() + pad as usize) as u8);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
}

/// `30 len 02 rlen r 02 slen s` with minimal integers.
pub fn der_signature(r: &[u8], s: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(72);
    der_integer(&mut body, r);
    der_integer(&mut body, s);
    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(0x30);
    out.push(body.len() as u8);
    out.extend_from_slice(&body);
    out
}
