//! # Error Types
//!
//! All error types for the token engine. Every failure aborts the whole
//! operation; nothing is retried internally.

use crate::domain::value_objects::{AccountKind, OperationKey, PublicKey, TokenId};
use ftg_zkp::ZkpError;
use thiserror::Error;

// =============================================================================
// TOKEN ERRORS
// =============================================================================

/// Errors raised by the token engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Admin signature required but missing or invalid.
    #[error("admin signature required")]
    Unauthorized,

    /// Policy verdict was negative for the requested amount.
    #[error("amount {amount} not authorized for {operation}")]
    NotAuthorized {
        /// Operation kind.
        operation: OperationKey,
        /// Requested amount.
        amount: u64,
    },

    /// Holder signature required for a debit.
    #[error("signature of holder {0} required")]
    HolderSignatureRequired(PublicKey),

    /// Operation key outside `1..=4`.
    #[error("invalid operation key: {0}")]
    InvalidOperationKey(u64),

    /// Operation type outside `{Mint, Burn}`.
    #[error("invalid operation type: {0}")]
    InvalidOperationType(u8),

    /// Parameter type outside the closed enumeration.
    #[error("invalid parameter type: {0}")]
    InvalidParameterType(u8),

    /// Flag type outside the closed enumeration.
    #[error("invalid flag type: {0}")]
    InvalidFlagType(u8),

    /// Packed-state invariant violated.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Caller-supplied registry map does not match the stored root.
    #[error("verification key registry out of sync")]
    RegistryOutOfSync,

    /// No verification key registered for the operation.
    #[error("no verification key registered for {0}")]
    MissingVerificationKey(OperationKey),

    /// Supplied verification key differs from the registered one.
    #[error("verification key does not match registration for {0}")]
    VerificationKeyMismatch(OperationKey),

    /// Proof subject is not the call's counterparty.
    #[error("proof subject {actual} does not match {expected}")]
    RecipientMismatch {
        /// Counterparty of the call.
        expected: PublicKey,
        /// Subject claimed by the proof.
        actual: PublicKey,
    },

    /// Proof token id is not this contract's token id.
    #[error("proof token id {actual} does not match {expected}")]
    TokenIdMismatch {
        /// This contract's token id.
        expected: TokenId,
        /// Token id claimed by the proof.
        actual: TokenId,
    },

    /// Native side of the snapshot does not carry the native token id.
    #[error("native snapshot carries token id {0}")]
    NativeTokenIdMismatch(TokenId),

    /// Snapshot balance differs from current balance.
    #[error("{kind} balance mismatch: snapshot {snapshot}, current {current}")]
    BalanceMismatch {
        /// Which account.
        kind: AccountKind,
        /// Balance the proof observed.
        snapshot: u64,
        /// Balance on the ledger now.
        current: u64,
    },

    /// Snapshot nonce differs from current nonce.
    #[error("{kind} nonce mismatch: snapshot {snapshot}, current {current}")]
    NonceMismatch {
        /// Which account.
        kind: AccountKind,
        /// Nonce the proof observed.
        snapshot: u32,
        /// Nonce on the ledger now.
        current: u32,
    },

    /// Proof failed cryptographic verification.
    #[error("side-loaded proof failed verification")]
    ProofInvalid,

    /// A proof is configured for this operation but none was supplied.
    #[error("{0} requires a side-loaded proof")]
    ProofRequired(OperationKey),

    /// Batch node both is the circulation account and uses the token.
    #[error("circulation account may not be touched directly")]
    CirculationAccountMisuse,

    /// Batch node changes access or receive permission.
    #[error("permission change denied for {0}")]
    PermissionChangeDenied(PublicKey),

    /// Running total of a batch became positive.
    #[error("flash mint detected: running total reached {0}")]
    FlashMintDetected(i128),

    /// Batch does not net to zero.
    #[error("unbalanced transaction: net change {0}")]
    UnbalancedTransaction(i128),

    /// Batch exceeds the configured node limit.
    #[error("forest too large: more than {max} nodes")]
    ForestTooLarge {
        /// Configured limit.
        max: usize,
    },

    /// `initialize` called twice.
    #[error("contract already initialized")]
    AlreadyInitialized,

    /// Operation requires an initialized contract.
    #[error("contract not initialized")]
    NotInitialized,

    /// A signature by the holder is attached but does not verify against
    /// this call at the current state version.
    #[error("invalid signature by {0}")]
    InvalidSignature(PublicKey),

    /// Canonical call encoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Ledger adapter failure.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Proof or map primitive failure.
    #[error("zkp error: {0}")]
    Zkp(#[from] ZkpError),
}

impl TokenError {
    /// Returns true if the error is an authorization or policy verdict.
    #[must_use]
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::NotAuthorized { .. }
                | Self::HolderSignatureRequired(_)
                | Self::InvalidSignature(_)
                | Self::CirculationAccountMisuse
                | Self::PermissionChangeDenied(_)
                | Self::FlashMintDetected(_)
                | Self::UnbalancedTransaction(_)
                | Self::ForestTooLarge { .. }
        )
    }

    /// Returns true if the error came from side-loaded proof validation.
    #[must_use]
    pub fn is_proof_rejection(&self) -> bool {
        matches!(
            self,
            Self::RegistryOutOfSync
                | Self::MissingVerificationKey(_)
                | Self::VerificationKeyMismatch(_)
                | Self::RecipientMismatch { .. }
                | Self::TokenIdMismatch { .. }
                | Self::NativeTokenIdMismatch(_)
                | Self::BalanceMismatch { .. }
                | Self::NonceMismatch { .. }
                | Self::ProofInvalid
                | Self::ProofRequired(_)
        )
    }
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from ledger access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Debit larger than balance.
    #[error("insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        /// Debited account.
        account: PublicKey,
        /// Requested debit.
        required: u64,
        /// Current balance.
        available: u64,
    },

    /// Credit would overflow the balance type.
    #[error("balance overflow for {0}")]
    BalanceOverflow(PublicKey),

    /// Nonce would overflow.
    #[error("nonce overflow for {0}")]
    NonceOverflow(PublicKey),

    /// State moved since it was read.
    #[error("stale precondition: expected version {expected:?}, found {actual:?}")]
    StalePrecondition {
        /// Version the caller read.
        expected: Option<u64>,
        /// Version currently stored.
        actual: Option<u64>,
    },
}
