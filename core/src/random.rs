// ## 📂 File: `src/random.rs`

//! random.rs
//! Injectable randomness for salts, IVs and the Argus allocation tail.
//!
//! Design:
//! - Signers never reach for a global generator; callers pass `&mut dyn RandomSource`.
//! - `RngSource` adapts any `rand` generator (production).
//! - `ScriptedRandom` replays fixed values (golden vectors, traffic replay).

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of the per-call random inputs.
pub trait RandomSource {
    /// Fill `buf` with random bytes.
    fn fill(&mut self, buf: &mut [u8]);

    /// Uniform value in the half-open range `[low, high)`.
    fn in_range(&mut self, low: u64, high: u64) -> u64;

    fn bytes4(&mut self) -> [u8; 4] {
        let mut out = [0u8; 4];
        self.fill(&mut out);
        out
    }
}

/// Adapter over any `rand::RngCore`.
pub struct RngSource<R: RngCore>(pub R);

impl RngSource<StdRng> {
    /// OS-seeded generator; one per call or per worker.
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn fill(&mut self, buf: &mut [u8]) {
        self.0.fill_bytes(buf);
    }

    fn in_range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..high)
    }
}

/// Deterministic source replaying queued values.
///
/// Byte requests pop one queued chunk and copy as much as fits; an exhausted
/// queue yields zeros. Range requests pop one queued value clamped into the
/// requested range; an exhausted queue yields `low`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    chunks: VecDeque<Vec<u8>>,
    values: VecDeque<u64>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(mut self, chunk: impl Into<Vec<u8>>) -> Self {
        self.chunks.push_back(chunk.into());
        self
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.values.push_back(value);
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.chunks.is_empty() && self.values.is_empty()
    }
}

impl RandomSource for ScriptedRandom {
    fn fill(&mut self, buf: &mut [u8]) {
        buf.fill(0);
        if let Some(chunk) = self.chunks.pop_front() {
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
        }
    }

    fn in_range(&mut self, low: u64, high: u64) -> u64 {
        match self.values.pop_front() {
            Some(v) if v >= low && v < high => v,
            Some(v) if high > low => low + (v % (high - low)),
            _ => low,
        }
    }
}
