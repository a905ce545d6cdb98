//! # FTG-ZKP: Proof and Commitment Primitives
//!
//! External collaborators of the token engine, kept behind narrow seams.
//!
//! ## Components
//!
//! - `field` - Goldilocks field elements (key hashes, token ids, map values)
//! - `hashing` - Domain-separated Keccak-256
//! - `sparse_map` - Fixed-height authenticated sparse map
//! - `proof` - Verification keys, side-loaded proofs, conditional verification

#![warn(missing_docs)]

pub mod errors;
pub mod field;
pub mod hashing;
pub mod proof;
pub mod sparse_map;

pub use errors::ZkpError;
pub use field::{FieldElement, GOLDILOCKS_PRIME};
pub use hashing::{hash_to_field, keccak_parts, HashOutput};
pub use proof::{
    CommitmentProofSystem, ProofSystem, Prover, SideloadedProof, Statement, VerificationKey,
};
pub use sparse_map::{MapWitness, SparseMerkleMap, DEFAULT_HEIGHT, MAX_HEIGHT};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
