//! # Domain Entities
//!
//! Core domain entities for the token engine: ledger accounts, proof
//! statements, batch updates, persistent contract state and signed calls.

use crate::domain::packed::{
    AmountConfig, AmountConfigs, AmountParams, DynamicProofConfig, DynamicProofConfigs,
    PackedState,
};
use crate::domain::registry::VkRegistry;
use crate::domain::value_objects::{
    AuthRequired, FlagType, OperationKey, OperationType, ParameterType, PublicKey, Signature,
    TokenId,
};
use crate::errors::TokenError;
use ftg_zkp::{keccak_parts, FieldElement, HashOutput, SideloadedProof, Statement};
use serde::{Deserialize, Serialize};

const CALL_DOMAIN: &[u8] = b"ftg:call:v1";
const PROVEN_CALL_DOMAIN: &[u8] = b"ftg:call-with-proof:v1";

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Balance and nonce of one `(public key, token id)` account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Balance in base units.
    pub balance: u64,
    /// Account nonce.
    pub nonce: u32,
}

/// Account state as observed by a proof at generation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Token the account belongs to.
    pub token_id: TokenId,
    /// Observed balance.
    pub balance: u64,
    /// Observed nonce.
    pub nonce: u32,
}

impl AccountSnapshot {
    /// Snapshot of `state` under `token_id`.
    #[must_use]
    pub const fn of(token_id: TokenId, state: AccountState) -> Self {
        Self {
            token_id,
            balance: state.balance,
            nonce: state.nonce,
        }
    }
}

// =============================================================================
// SIDE-LOADED PROOF STATEMENT
// =============================================================================

/// Public input of a side-loaded proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPublicInput {
    /// Token the proof speaks about.
    pub token_id: TokenId,
    /// Account the proof speaks about.
    pub subject: PublicKey,
}

/// Public output of a side-loaded proof: the two observed accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPublicOutput {
    /// Native-currency account of the subject.
    pub native: AccountSnapshot,
    /// Custom-token account of the subject.
    pub custom: AccountSnapshot,
}

/// Statement proven by a side-loaded proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideloadStatement {
    /// Public input.
    pub input: ProofPublicInput,
    /// Public output.
    pub output: ProofPublicOutput,
}

impl Statement for SideloadStatement {
    fn statement_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 + 3 * 8 + 2 * (8 + 4));
        bytes.extend_from_slice(&self.input.token_id.0.to_le_bytes());
        bytes.extend_from_slice(self.input.subject.as_bytes());
        for snapshot in [self.output.native, self.output.custom] {
            bytes.extend_from_slice(&snapshot.token_id.0.to_le_bytes());
            bytes.extend_from_slice(&snapshot.balance.to_le_bytes());
            bytes.extend_from_slice(&snapshot.nonce.to_le_bytes());
        }
        bytes
    }
}

/// Side-loaded proof carried by `*_with_proof` operations.
pub type TokenProof = SideloadedProof<SideloadStatement>;

// =============================================================================
// BATCH UPDATES
// =============================================================================

/// Permission changes requested by an account update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsUpdate {
    /// New `access` permission.
    pub access: Option<AuthRequired>,
    /// New `receive` permission.
    pub receive: Option<AuthRequired>,
    /// New `send` permission.
    pub send: Option<AuthRequired>,
}

/// One node of an account-update forest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    /// Account being updated.
    pub public_key: PublicKey,
    /// Token of the account.
    pub token_id: TokenId,
    /// Signed balance change.
    pub balance_change: i64,
    /// Requested permission changes.
    pub permissions: Option<PermissionsUpdate>,
    /// Nested updates.
    pub children: Vec<AccountUpdate>,
}

impl AccountUpdate {
    /// Leaf update without permission changes.
    #[must_use]
    pub fn new(public_key: PublicKey, token_id: TokenId, balance_change: i64) -> Self {
        Self {
            public_key,
            token_id,
            balance_change,
            permissions: None,
            children: Vec::new(),
        }
    }

    /// Attach a child update.
    #[must_use]
    pub fn with_child(mut self, child: AccountUpdate) -> Self {
        self.children.push(child);
        self
    }

    /// Request permission changes.
    #[must_use]
    pub fn with_permissions(mut self, permissions: PermissionsUpdate) -> Self {
        self.permissions = Some(permissions);
        self
    }
}

/// Ordered list of update trees.
pub type AccountUpdateForest = Vec<AccountUpdate>;

// =============================================================================
// CONTRACT STATE
// =============================================================================

/// Persistent state of a token contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    /// Display decimals.
    pub decimals: u8,
    /// Admin key.
    pub admin: PublicKey,
    /// Packed configuration words.
    pub packed: PackedState,
    /// Side-loaded key registry root.
    pub vk_registry: VkRegistry,
    /// Hash of the contract's own verification key.
    pub contract_vk_hash: Option<FieldElement>,
    /// Bumped on every committed change.
    pub version: u64,
}

impl ContractState {
    /// Fresh state at version 0.
    #[must_use]
    pub fn new(decimals: u8, admin: PublicKey, packed: PackedState) -> Self {
        Self {
            decimals,
            admin,
            packed,
            vk_registry: VkRegistry::empty(),
            contract_vk_hash: None,
            version: 0,
        }
    }

    /// Copy of this state with the version bumped.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            version: self.version + 1,
            ..self.clone()
        }
    }
}

/// Decoded view of every configuration structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfigs {
    /// Mint and Burn amount configs.
    pub amount: AmountConfigs,
    /// Mint params.
    pub mint_params: AmountParams,
    /// Burn params.
    pub burn_params: AmountParams,
    /// Dynamic proof configs.
    pub dynamic_proof: DynamicProofConfigs,
}

impl TokenConfigs {
    /// Decode from packed state.
    #[must_use]
    pub fn decode(packed: &PackedState) -> Self {
        Self {
            amount: packed.amount_configs(),
            mint_params: packed.params(OperationType::Mint),
            burn_params: packed.params(OperationType::Burn),
            dynamic_proof: packed.dynamic_proof_configs(),
        }
    }

    /// Validate and pack.
    pub fn encode(&self) -> Result<PackedState, TokenError> {
        PackedState::new(
            self.amount,
            self.mint_params,
            self.burn_params,
            self.dynamic_proof,
        )
    }
}

// =============================================================================
// LEDGER WRITES
// =============================================================================

/// Balance change applied by a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDelta {
    /// Account.
    pub public_key: PublicKey,
    /// Token of the account.
    pub token_id: TokenId,
    /// Signed change.
    pub delta: i128,
    /// Bump the account nonce.
    pub increment_nonce: bool,
}

impl BalanceDelta {
    /// Credit `amount`.
    #[must_use]
    pub fn credit(public_key: PublicKey, token_id: TokenId, amount: u64) -> Self {
        Self {
            public_key,
            token_id,
            delta: i128::from(amount),
            increment_nonce: false,
        }
    }

    /// Debit `amount` and bump the holder's nonce.
    #[must_use]
    pub fn debit(public_key: PublicKey, token_id: TokenId, amount: u64) -> Self {
        Self {
            public_key,
            token_id,
            delta: -i128::from(amount),
            increment_nonce: true,
        }
    }
}

/// Everything one facade call writes, applied atomically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCommit {
    /// Contract state after the call.
    pub state: ContractState,
    /// Balance changes.
    pub deltas: Vec<BalanceDelta>,
}

// =============================================================================
// SIGNED CALLS
// =============================================================================

/// Canonical description of a call requiring signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum TokenCall {
    /// Replace the admin.
    SetAdmin {
        /// New admin.
        new_admin: PublicKey,
    },
    /// Mint to a recipient.
    Mint {
        /// Recipient.
        recipient: PublicKey,
        /// Amount.
        amount: u64,
    },
    /// Burn from a holder.
    Burn {
        /// Holder.
        from: PublicKey,
        /// Amount.
        amount: u64,
    },
    /// Move tokens between holders.
    Transfer {
        /// Sender.
        from: PublicKey,
        /// Receiver.
        to: PublicKey,
        /// Amount.
        amount: u64,
    },
    /// Approve an update forest.
    ApproveBase {
        /// Forest being approved.
        forest: AccountUpdateForest,
    },
    /// Register a side-loaded key.
    UpdateSideLoadedVKeyHash {
        /// Operation key.
        operation: OperationKey,
        /// Hash of the key.
        vk_hash: FieldElement,
    },
    /// Replace the contract's own key.
    UpdateVerificationKey {
        /// Hash of the key.
        vk_hash: FieldElement,
    },
    /// Replace one amount config.
    UpdateAmountConfig {
        /// Operation type.
        operation: OperationType,
        /// New config.
        config: AmountConfig,
    },
    /// Replace one params word.
    UpdateAmountParams {
        /// Operation type.
        operation: OperationType,
        /// New params.
        params: AmountParams,
    },
    /// Set one config flag.
    UpdateConfigFlag {
        /// Operation type.
        operation: OperationType,
        /// Flag.
        flag: FlagType,
        /// Value.
        value: bool,
    },
    /// Set one amount parameter.
    UpdateAmountValue {
        /// Operation type.
        operation: OperationType,
        /// Parameter.
        parameter: ParameterType,
        /// Value.
        value: u64,
    },
    /// Replace one dynamic proof config.
    UpdateDynamicProofConfig {
        /// Operation key.
        operation: OperationKey,
        /// New config.
        config: DynamicProofConfig,
    },
}

impl TokenCall {
    /// Message signers sign: binds the call to a contract and state version,
    /// so a signature cannot be replayed after the state moves.
    pub fn digest(&self, contract: &PublicKey, version: u64) -> Result<HashOutput, TokenError> {
        let body = self.encode()?;
        Ok(keccak_parts(
            CALL_DOMAIN,
            &[contract.as_bytes(), &version.to_le_bytes(), &body],
        ))
    }

    /// Message signers sign for the proof-gated form of a call. Also binds
    /// the proof commitment, so plain and proof-gated calls never share a
    /// signature.
    pub fn digest_with_proof(
        &self,
        contract: &PublicKey,
        version: u64,
        proof: &HashOutput,
    ) -> Result<HashOutput, TokenError> {
        let body = self.encode()?;
        Ok(keccak_parts(
            PROVEN_CALL_DOMAIN,
            &[contract.as_bytes(), &version.to_le_bytes(), proof, &body],
        ))
    }

    fn encode(&self) -> Result<Vec<u8>, TokenError> {
        serde_json::to_vec(self).map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

/// What a call authorization says about one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureStatus {
    /// The key attached no signature.
    Missing,
    /// The key attached signatures, none of which verify.
    Invalid,
    /// At least one signature by the key verifies.
    Valid,
}

/// Signatures accompanying a call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallAuthorization {
    signatures: Vec<(PublicKey, Signature)>,
}

impl CallAuthorization {
    /// No signatures.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Add a signature.
    #[must_use]
    pub fn with_signature(mut self, signer: PublicKey, signature: Signature) -> Self {
        self.signatures.push((signer, signature));
        self
    }

    /// True if `key` produced a valid signature over `message`.
    #[must_use]
    pub fn is_signed_by(&self, key: &PublicKey, message: &[u8]) -> bool {
        self.signatures
            .iter()
            .any(|(signer, signature)| signer == key && key.verify(message, signature))
    }

    /// Classify the signatures `key` attached over `message`.
    #[must_use]
    pub fn status_for(&self, key: &PublicKey, message: &[u8]) -> SignatureStatus {
        let mut attached = self
            .signatures
            .iter()
            .filter(|(signer, _)| signer == key)
            .peekable();
        if attached.peek().is_none() {
            SignatureStatus::Missing
        } else if attached.any(|(_, signature)| key.verify(message, signature)) {
            SignatureStatus::Valid
        } else {
            SignatureStatus::Invalid
        }
    }

    /// Number of attached signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// True when no signature is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
