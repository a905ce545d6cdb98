//! # Side-loaded Proofs
//!
//! Verification keys, proofs over a caller-defined public statement, and the
//! proof-system seam consumed by the token engine.
//!
//! The reference [`CommitmentProofSystem`] binds a proof to
//! `(verification key, statement)` with a Keccak commitment. It stands in for
//! a real recursive SNARK verifier and honours the same calling convention:
//! `verify_conditionally` with `enabled == false` returns `true` and performs
//! no cryptographic work.

use crate::errors::ZkpError;
use crate::field::FieldElement;
use crate::hashing::{hash_to_field, keccak_parts, HashOutput};
use std::sync::atomic::{AtomicU64, Ordering};

const VK_DOMAIN: &[u8] = b"ftg:vk:v1";
const PROOF_DOMAIN: &[u8] = b"ftg:proof:v1";

/// Public statement a proof attests to.
pub trait Statement {
    /// Canonical byte encoding of the statement.
    fn statement_bytes(&self) -> Vec<u8>;
}

/// Verification key with its field hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    data: Vec<u8>,
    hash: FieldElement,
}

impl VerificationKey {
    /// Create a key from its serialized data.
    pub fn new(data: Vec<u8>) -> Result<Self, ZkpError> {
        if data.is_empty() {
            return Err(ZkpError::EmptyVerificationKey);
        }
        let hash = hash_to_field(VK_DOMAIN, &[&data]);
        Ok(Self { data, hash })
    }

    /// Serialized key data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Field hash of the key, the value stored in registries.
    #[must_use]
    pub fn hash(&self) -> FieldElement {
        self.hash
    }
}

/// Proof over a public statement, produced off-chain against some past state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideloadedProof<S> {
    /// Public input and output the proof attests to.
    pub statement: S,
    commitment: HashOutput,
}

impl<S> SideloadedProof<S> {
    /// Rebuild a proof from a statement and raw proof bytes.
    #[must_use]
    pub fn from_parts(statement: S, commitment: HashOutput) -> Self {
        Self {
            statement,
            commitment,
        }
    }

    /// Raw proof bytes.
    #[must_use]
    pub fn commitment(&self) -> &HashOutput {
        &self.commitment
    }
}

/// Proof-system primitive.
pub trait ProofSystem {
    /// Verify `proof` against `vk` only when `enabled`; returns `true` when
    /// disabled.
    fn verify_conditionally<S: Statement>(
        &self,
        proof: &SideloadedProof<S>,
        vk: &VerificationKey,
        enabled: bool,
    ) -> bool;
}

/// Prover for the commitment proof system.
#[derive(Clone, Debug)]
pub struct Prover {
    vk: VerificationKey,
}

impl Prover {
    /// Create a prover for circuits identified by `vk`.
    #[must_use]
    pub fn new(vk: VerificationKey) -> Self {
        Self { vk }
    }

    /// Verification key this prover targets.
    #[must_use]
    pub fn verification_key(&self) -> &VerificationKey {
        &self.vk
    }

    /// Produce a proof for `statement`.
    pub fn prove<S: Statement>(&self, statement: S) -> SideloadedProof<S> {
        let commitment = commit(&self.vk, &statement.statement_bytes());
        SideloadedProof {
            statement,
            commitment,
        }
    }
}

/// Reference verifier counting the proofs it actually checked.
#[derive(Debug, Default)]
pub struct CommitmentProofSystem {
    verified: AtomicU64,
}

impl CommitmentProofSystem {
    /// Create a new verifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cryptographic verifications performed so far.
    #[must_use]
    pub fn verifications_performed(&self) -> u64 {
        self.verified.load(Ordering::Relaxed)
    }
}

impl ProofSystem for CommitmentProofSystem {
    fn verify_conditionally<S: Statement>(
        &self,
        proof: &SideloadedProof<S>,
        vk: &VerificationKey,
        enabled: bool,
    ) -> bool {
        if !enabled {
            return true;
        }
        self.verified.fetch_add(1, Ordering::Relaxed);
        commit(vk, &proof.statement.statement_bytes()) == proof.commitment
    }
}

fn commit(vk: &VerificationKey, statement: &[u8]) -> HashOutput {
    keccak_parts(
        PROOF_DOMAIN,
        &[&vk.hash().to_le_bytes(), vk.data(), statement],
    )
}
