//! # Driving Ports (API - Inbound)
//!
//! The public operation surface of a token contract. Every mutating call
//! either commits in full (and then publishes its events) or fails with no
//! effect.
//!
//! Selector arguments of the configuration updates (`op_type`, `flag_type`,
//! `param_type`, operation keys) arrive as raw integers, the way they are
//! encoded in a call, and are validated against their closed enumerations.

use crate::domain::entities::{
    AccountUpdateForest, CallAuthorization, ContractState, TokenConfigs, TokenProof,
};
use crate::domain::packed::{AmountConfig, AmountParams, DynamicProofConfig};
use crate::domain::value_objects::{PublicKey, TokenId};
use crate::errors::TokenError;
use ftg_zkp::{SparseMerkleMap, VerificationKey};

// =============================================================================
// CALL INPUTS
// =============================================================================

/// Arguments of `initialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeParams {
    /// First admin.
    pub admin: PublicKey,
    /// Display decimals.
    pub decimals: u8,
    /// Initial configuration.
    pub configs: TokenConfigs,
}

/// Side-loaded proof with the material needed to check it.
#[derive(Clone, Copy, Debug)]
pub struct ProofBundle<'a> {
    /// The proof.
    pub proof: &'a TokenProof,
    /// Key the proof claims to verify under.
    pub vk: &'a VerificationKey,
    /// Caller's mirror of the registry map.
    pub vk_map: &'a SparseMerkleMap,
}

// =============================================================================
// FUNGIBLE TOKEN API
// =============================================================================

/// Primary API of a fungible token contract.
pub trait FungibleTokenApi {
    /// One-time setup. Fails `AlreadyInitialized` on a second call.
    fn initialize(&self, params: InitializeParams) -> Result<(), TokenError>;

    /// Replace the admin. Admin-signed.
    fn set_admin(&self, new_admin: PublicKey, auth: &CallAuthorization) -> Result<(), TokenError>;

    /// Mint without a proof.
    fn mint(
        &self,
        recipient: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Mint gated by a side-loaded proof about `recipient`.
    fn mint_with_proof(
        &self,
        recipient: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError>;

    /// Burn from `from`. Holder-signed.
    fn burn(&self, from: PublicKey, amount: u64, auth: &CallAuthorization)
        -> Result<(), TokenError>;

    /// Burn gated by a side-loaded proof about `from`.
    fn burn_with_proof(
        &self,
        from: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError>;

    /// Move tokens. Holder-signed.
    fn transfer(
        &self,
        from: PublicKey,
        to: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Transfer gated by a side-loaded proof about `from`.
    fn transfer_with_proof(
        &self,
        from: PublicKey,
        to: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError>;

    /// Approve and apply an update forest. Every debited holder signs.
    fn approve_base(
        &self,
        forest: &AccountUpdateForest,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Approve a forest gated by a side-loaded proof about `subject`.
    fn approve_base_with_proof(
        &self,
        forest: &AccountUpdateForest,
        subject: PublicKey,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError>;

    /// Register a side-loaded key for `operation_key`. Admin-signed.
    ///
    /// Returns the updated registry map for the caller's mirror.
    fn update_side_loaded_vkey_hash(
        &self,
        operation_key: u64,
        vk: &VerificationKey,
        vk_map: &SparseMerkleMap,
        auth: &CallAuthorization,
    ) -> Result<SparseMerkleMap, TokenError>;

    /// Replace the contract's own verification key. Admin-signed.
    fn update_verification_key(
        &self,
        vk: &VerificationKey,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Replace the mint amount config. Admin-signed.
    fn update_mint_config(
        &self,
        config: AmountConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Replace the burn amount config. Admin-signed.
    fn update_burn_config(
        &self,
        config: AmountConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Replace the mint params. Admin-signed.
    fn update_mint_params(
        &self,
        params: AmountParams,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Replace the burn params. Admin-signed.
    fn update_burn_params(
        &self,
        params: AmountParams,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Set one amount-config flag. Admin-signed.
    fn update_config_flag(
        &self,
        op_type: u8,
        flag_type: u8,
        value: bool,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Set one amount parameter. Admin-signed.
    fn update_amount_value(
        &self,
        op_type: u8,
        param_type: u8,
        value: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Replace one dynamic proof config. Admin-signed.
    fn update_dynamic_proof_config(
        &self,
        operation_key: u64,
        config: DynamicProofConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError>;

    /// Custom-token balance of `owner`.
    fn balance_of(&self, owner: &PublicKey) -> Result<u64, TokenError>;

    /// Circulating supply.
    fn circulating(&self) -> Result<u64, TokenError>;

    /// Display decimals.
    fn decimals(&self) -> Result<u8, TokenError>;

    /// Current admin.
    fn admin(&self) -> Result<PublicKey, TokenError>;

    /// Decoded configuration.
    fn configs(&self) -> Result<TokenConfigs, TokenError>;

    /// Full persistent state.
    fn contract_state(&self) -> Result<ContractState, TokenError>;

    /// Id of the token this contract manages.
    fn token_id(&self) -> TokenId;
}
