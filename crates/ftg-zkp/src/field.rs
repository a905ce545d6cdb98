//! # Goldilocks Field
//!
//! Prime field with p = 2^64 - 2^32 + 1 (the "Goldilocks" prime).
//!
//! Verification-key hashes, token ids and map values are all field elements,
//! mirroring the native word of the proof system that produces side-loaded
//! proofs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Goldilocks prime: p = 2^64 - 2^32 + 1
pub const GOLDILOCKS_PRIME: u64 = 0xFFFF_FFFF_0000_0001;

/// Element in the Goldilocks field.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldElement(u64);

impl FieldElement {
    /// Additive identity.
    pub const ZERO: Self = Self(0);

    /// Multiplicative identity.
    pub const ONE: Self = Self(1);

    /// Create new field element (reduces mod p).
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value % GOLDILOCKS_PRIME)
    }

    /// Reduce the first eight bytes of a digest into the field.
    #[must_use]
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut limb = [0u8; 8];
        limb.copy_from_slice(&digest[..8]);
        Self::new(u64::from_le_bytes(limb))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Canonical little-endian encoding.
    #[must_use]
    pub const fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({})", self.0)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}
