//! # Side-loaded Proof Cross-Validation
//!
//! A proof carries a snapshot of the subject's accounts taken when it was
//! generated. Before the proof is consumed, the snapshot is compared with the
//! live ledger, the verification key is checked against the registry and the
//! proof itself is verified. Each comparison is relaxed by its own
//! `require_*` flag and the whole protocol is gated by `should_verify`.
//!
//! Evaluation is total. Every predicate is computed up front, each outcome is
//! `!enabled || predicate`, and the report keeps all of them. No check is
//! skipped because an earlier one failed. With `should_verify == false` the
//! proof system is still called, with `enabled == false`, and performs no
//! cryptographic work.

use crate::domain::entities::{AccountState, TokenProof};
use crate::domain::packed::DynamicProofConfig;
use crate::domain::registry::VkRegistry;
use crate::domain::value_objects::{AccountKind, OperationKey, PublicKey, TokenId};
use crate::errors::TokenError;
use ftg_zkp::{ProofSystem, SparseMerkleMap, VerificationKey};

/// Individual checks of the protocol, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Check {
    /// Caller's registry map matches the stored root.
    RegistrySync,
    /// A key is registered for the operation.
    KeyRegistered,
    /// Supplied key hash equals the registered hash.
    KeyMatches,
    /// Proof subject is the call's counterparty.
    Recipient,
    /// Proof token id is this token.
    TokenId,
    /// Native snapshot carries the native token id.
    NativeTokenId,
    /// Native balance unchanged since the snapshot.
    NativeBalance,
    /// Custom-token balance unchanged since the snapshot.
    CustomBalance,
    /// Native nonce unchanged since the snapshot.
    NativeNonce,
    /// Custom-token nonce unchanged since the snapshot.
    CustomNonce,
    /// Cryptographic verification.
    Proof,
}

/// Live values a proof is checked against.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    /// Operation consuming the proof.
    pub operation: OperationKey,
    /// Strictness for this operation.
    pub config: DynamicProofConfig,
    /// Stored registry root.
    pub registry: &'a VkRegistry,
    /// Caller-supplied registry map.
    pub vk_map: &'a SparseMerkleMap,
    /// Claimed verification key.
    pub vk: &'a VerificationKey,
    /// Counterparty the proof must be about.
    pub expected_subject: PublicKey,
    /// This contract's token id.
    pub token_id: TokenId,
    /// Subject's native account now.
    pub current_native: AccountState,
    /// Subject's custom-token account now.
    pub current_custom: AccountState,
}

/// Outcome of every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    outcomes: Vec<(Check, Result<(), TokenError>)>,
}

impl ValidationReport {
    /// Per-check outcomes in evaluation order.
    #[must_use]
    pub fn outcomes(&self) -> &[(Check, Result<(), TokenError>)] {
        &self.outcomes
    }

    /// True when every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_ok())
    }

    /// Outcome of one check.
    #[must_use]
    pub fn outcome(&self, check: Check) -> Option<&Result<(), TokenError>> {
        self.outcomes
            .iter()
            .find(|(c, _)| *c == check)
            .map(|(_, outcome)| outcome)
    }

    /// First failure in evaluation order, if any.
    pub fn into_result(self) -> Result<(), TokenError> {
        self.outcomes
            .into_iter()
            .map(|(_, outcome)| outcome)
            .find(Result::is_err)
            .unwrap_or(Ok(()))
    }
}

fn gate(enabled: bool, holds: bool, error: TokenError) -> Result<(), TokenError> {
    if !enabled || holds {
        Ok(())
    } else {
        Err(error)
    }
}

/// Run the full protocol.
pub fn cross_validate<P: ProofSystem>(
    proof_system: &P,
    proof: &TokenProof,
    ctx: &ValidationContext<'_>,
) -> ValidationReport {
    let cfg = ctx.config;
    let on = cfg.should_verify;
    let input = proof.statement.input;
    let native = proof.statement.output.native;
    let custom = proof.statement.output.custom;

    let in_sync = ctx.registry.in_sync(ctx.vk_map);
    let registered = ctx.vk_map.get(ctx.operation.as_u64());
    let vk_hash = ctx.vk.hash();
    let claimed_token = if input.token_id == ctx.token_id {
        custom.token_id
    } else {
        input.token_id
    };
    let verified = proof_system.verify_conditionally(proof, ctx.vk, on);

    let outcomes = vec![
        (
            Check::RegistrySync,
            gate(on, in_sync, TokenError::RegistryOutOfSync),
        ),
        (
            Check::KeyRegistered,
            gate(
                on,
                registered.is_some(),
                TokenError::MissingVerificationKey(ctx.operation),
            ),
        ),
        (
            Check::KeyMatches,
            gate(
                on,
                registered == Some(vk_hash),
                TokenError::VerificationKeyMismatch(ctx.operation),
            ),
        ),
        (
            Check::Recipient,
            gate(
                on && cfg.require_recipient_match,
                input.subject == ctx.expected_subject,
                TokenError::RecipientMismatch {
                    expected: ctx.expected_subject,
                    actual: input.subject,
                },
            ),
        ),
        (
            Check::TokenId,
            gate(
                on && cfg.require_token_id_match,
                claimed_token == ctx.token_id,
                TokenError::TokenIdMismatch {
                    expected: ctx.token_id,
                    actual: claimed_token,
                },
            ),
        ),
        (
            Check::NativeTokenId,
            gate(
                on,
                native.token_id.is_native(),
                TokenError::NativeTokenIdMismatch(native.token_id),
            ),
        ),
        (
            Check::NativeBalance,
            gate(
                on && cfg.require_mina_balance_match,
                native.balance == ctx.current_native.balance,
                TokenError::BalanceMismatch {
                    kind: AccountKind::Native,
                    snapshot: native.balance,
                    current: ctx.current_native.balance,
                },
            ),
        ),
        (
            Check::CustomBalance,
            gate(
                on && cfg.require_custom_token_balance_match,
                custom.balance == ctx.current_custom.balance,
                TokenError::BalanceMismatch {
                    kind: AccountKind::Custom,
                    snapshot: custom.balance,
                    current: ctx.current_custom.balance,
                },
            ),
        ),
        (
            Check::NativeNonce,
            gate(
                on && cfg.require_mina_nonce_match,
                native.nonce == ctx.current_native.nonce,
                TokenError::NonceMismatch {
                    kind: AccountKind::Native,
                    snapshot: native.nonce,
                    current: ctx.current_native.nonce,
                },
            ),
        ),
        (
            Check::CustomNonce,
            gate(
                on && cfg.require_custom_token_nonce_match,
                custom.nonce == ctx.current_custom.nonce,
                TokenError::NonceMismatch {
                    kind: AccountKind::Custom,
                    snapshot: custom.nonce,
                    current: ctx.current_custom.nonce,
                },
            ),
        ),
        (Check::Proof, gate(on, verified, TokenError::ProofInvalid)),
    ];

    ValidationReport { outcomes }
}
