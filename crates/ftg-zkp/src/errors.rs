//! ZKP error types.

use thiserror::Error;

/// Errors raised by the proof-system and authenticated-map primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZkpError {
    /// Map height outside the supported range.
    #[error("invalid map height {height}: must be in 1..={max}")]
    InvalidHeight {
        /// Requested height.
        height: u8,
        /// Largest supported height.
        max: u8,
    },

    /// Key does not fit in the map's key space.
    #[error("key {key} out of range for map of height {height}")]
    KeyOutOfRange {
        /// Offending key.
        key: u64,
        /// Map height.
        height: u8,
    },

    /// Verification key data is empty.
    #[error("verification key is empty")]
    EmptyVerificationKey,

    /// Witness path length does not match the map height.
    #[error("witness has {actual} siblings, expected {expected}")]
    MalformedWitness {
        /// Expected sibling count.
        expected: usize,
        /// Actual sibling count.
        actual: usize,
    },
}
