//! # Local Signer
//!
//! Ed25519 key pair for producing call authorizations off-chain
//! (wallets, tests, tooling).

use crate::domain::entities::{CallAuthorization, TokenCall};
use crate::domain::value_objects::{PublicKey, Signature};
use crate::errors::TokenError;
use ed25519_dalek::{Signer, SigningKey};
use ftg_zkp::HashOutput;

/// Ed25519 signing key.
pub struct LocalSigner {
    signing_key: SigningKey,
}

impl LocalSigner {
    /// Create from secret seed (32 bytes).
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign raw bytes.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_bytes(self.signing_key.sign(message).to_bytes())
    }

    /// Sign `call` as submitted to `contract` at state `version`.
    pub fn sign_call(
        &self,
        call: &TokenCall,
        contract: &PublicKey,
        version: u64,
    ) -> Result<Signature, TokenError> {
        Ok(self.sign(&call.digest(contract, version)?))
    }

    /// Add this signer's signature over `call` to `auth`.
    pub fn authorize(
        &self,
        auth: CallAuthorization,
        call: &TokenCall,
        contract: &PublicKey,
        version: u64,
    ) -> Result<CallAuthorization, TokenError> {
        Ok(auth.with_signature(self.public_key(), self.sign_call(call, contract, version)?))
    }

    /// Add this signer's signature over the proof-gated form of `call`,
    /// bound to the proof with commitment `proof`.
    pub fn authorize_with_proof(
        &self,
        auth: CallAuthorization,
        call: &TokenCall,
        contract: &PublicKey,
        version: u64,
        proof: &HashOutput,
    ) -> Result<CallAuthorization, TokenError> {
        let digest = call.digest_with_proof(contract, version, proof)?;
        Ok(auth.with_signature(self.public_key(), self.sign(&digest)))
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
