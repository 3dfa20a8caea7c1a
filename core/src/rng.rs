//! Seed hashing and the deterministic random stream behind board generation.
//!
//! Everything here is plain integer arithmetic so a given seed yields the same
//! layout on every platform.

use core::fmt;
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// User-facing seed; numbers and text hash through their textual form.
///
/// Untagged, so a JSON number lands in the narrowest variant that holds it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl Seed {
    /// Seed derived from the wall clock, in milliseconds since the UNIX epoch.
    pub fn from_time() -> Self {
        use web_time::{SystemTime, UNIX_EPOCH};

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        Self::Number(millis.try_into().unwrap_or(u64::MAX))
    }

    pub fn hashed(&self) -> u32 {
        hash_seed(self)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Signed(value) => write!(f, "{value}"),
            // negative zero prints as plain zero
            Self::Float(value) if *value == 0.0 => f.write_str("0"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self::Signed(value)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// FNV-1a over the bytes of the seed's textual form.
pub fn hash_seed(seed: &Seed) -> u32 {
    match seed {
        Seed::Text(text) => hash_bytes(text.as_bytes()),
        number => hash_bytes(number.to_string().as_bytes()),
    }
}

pub fn hash_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Mulberry32: a single 32-bit state word advanced by a Weyl increment and
/// finished with xorshift-multiply mixing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    const INCREMENT: u32 = 0x6d2b_79f5;

    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let state = self.state;
        let mut value = (state ^ (state >> 15)).wrapping_mul(1 | state);
        value ^= value.wrapping_add((value ^ (value >> 7)).wrapping_mul(61 | value));
        value ^ (value >> 14)
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform draw in `[0, bound)`; `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        // the product is strictly below `bound`, so truncation stays in range
        (self.next_f64() * bound as f64) as usize
    }
}

impl Iterator for Mulberry32 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_f64())
    }
}

/// In-place Fisher-Yates, walking from the last index down and swapping `i`
/// with a draw from `[0, i]`.
pub fn shuffle<T>(items: &mut [T], rng: &mut Mulberry32) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
