//! # Keccak Hashing
//!
//! Domain-separated Keccak-256 helpers shared by the map and the proof
//! primitives.

use crate::field::FieldElement;
use sha3::{Digest, Keccak256};

/// 256-bit hash output.
pub type HashOutput = [u8; 32];

/// Hash a sequence of byte strings under a domain separator.
///
/// Each part is length-prefixed so that `["ab", "c"]` and `["a", "bc"]`
/// never collide.
#[must_use]
pub fn keccak_parts(domain: &[u8], parts: &[&[u8]]) -> HashOutput {
    let mut hasher = Keccak256::new();
    hasher.update((domain.len() as u64).to_le_bytes());
    hasher.update(domain);
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Hash a sequence of byte strings into a field element.
#[must_use]
pub fn hash_to_field(domain: &[u8], parts: &[&[u8]]) -> FieldElement {
    FieldElement::from_digest(&keccak_parts(domain, parts))
}
