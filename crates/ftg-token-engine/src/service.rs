//! # Fungible Token Service
//!
//! The contract facade. Each call:
//!
//! 1. reads the contract state once
//! 2. authorizes (signatures, amount policy, side-loaded proof, batch pass)
//! 3. builds a `PendingCommit` with the bumped state and balance deltas
//! 4. commits against the version it read
//! 5. publishes events only after the commit succeeded
//!
//! Any failure before or during step 4 leaves the ledger untouched and emits
//! nothing.

use crate::adapters::{InMemoryLedger, RecordingEventSink};
use crate::config::ServiceConfig;
use crate::domain::approval::{approve_forest, ApprovalContext};
use crate::domain::cross_validation::{cross_validate, ValidationContext};
use crate::domain::entities::{
    AccountUpdateForest, BalanceDelta, CallAuthorization, ContractState, PendingCommit,
    SignatureStatus, TokenCall, TokenConfigs,
};
use crate::domain::packed::{AmountConfig, AmountParams, DynamicProofConfig};
use crate::domain::policy;
use crate::domain::value_objects::{
    FlagType, OperationKey, OperationType, ParameterType, PublicKey, TokenId,
};
use crate::errors::TokenError;
use crate::events::{ConfigStructure, TokenEvent};
use crate::ports::inbound::{FungibleTokenApi, InitializeParams, ProofBundle};
use crate::ports::outbound::{EventSink, LedgerAccess};
use ftg_zkp::{CommitmentProofSystem, HashOutput, ProofSystem, SparseMerkleMap, VerificationKey};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Statistics for the token service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Calls that committed.
    pub operations_committed: u64,
    /// Calls that failed.
    pub operations_rejected: u64,
    /// Side-loaded proofs that went through cryptographic verification.
    pub proofs_checked: u64,
}

/// The token contract service.
pub struct FungibleTokenService<L: LedgerAccess, E: EventSink, P: ProofSystem> {
    /// Service configuration.
    config: ServiceConfig,
    /// Contract address; also the circulation account.
    contract: PublicKey,
    /// Token managed by this contract.
    token_id: TokenId,
    /// Ledger adapter.
    ledger: Arc<L>,
    /// Event adapter.
    events: Arc<E>,
    /// Proof verifier.
    proofs: Arc<P>,
    /// Service statistics.
    stats: RwLock<ServiceStats>,
}

impl<L: LedgerAccess, E: EventSink, P: ProofSystem> FungibleTokenService<L, E, P> {
    /// Create a service for the contract at `contract`.
    pub fn new(
        contract: PublicKey,
        ledger: Arc<L>,
        events: Arc<E>,
        proofs: Arc<P>,
        config: ServiceConfig,
    ) -> Result<Self, TokenError> {
        config.validate()?;
        Ok(Self {
            config,
            contract,
            token_id: TokenId::derive(&contract, TokenId::NATIVE),
            ledger,
            events,
            proofs,
            stats: RwLock::new(ServiceStats::default()),
        })
    }

    /// Contract address.
    #[must_use]
    pub fn contract(&self) -> PublicKey {
        self.contract
    }

    /// Ledger adapter.
    #[must_use]
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Event adapter.
    #[must_use]
    pub fn event_sink(&self) -> &Arc<E> {
        &self.events
    }

    /// Proof verifier.
    #[must_use]
    pub fn proof_system(&self) -> &Arc<P> {
        &self.proofs
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    // -------------------------------------------------------------------------
    // Shared steps
    // -------------------------------------------------------------------------

    fn load(&self) -> Result<ContractState, TokenError> {
        self.ledger
            .contract_state()?
            .ok_or(TokenError::NotInitialized)
    }

    /// Message the signers of `call` must have signed. A proof-gated call
    /// binds the proof it carries.
    fn call_digest(
        &self,
        call: &TokenCall,
        state: &ContractState,
        bundle: Option<&ProofBundle<'_>>,
    ) -> Result<HashOutput, TokenError> {
        match bundle {
            Some(bundle) => {
                call.digest_with_proof(&self.contract, state.version, bundle.proof.commitment())
            }
            None => call.digest(&self.contract, state.version),
        }
    }

    fn require_admin(
        &self,
        auth: &CallAuthorization,
        call: &TokenCall,
        state: &ContractState,
    ) -> Result<(), TokenError> {
        let digest = self.call_digest(call, state, None)?;
        if auth.is_signed_by(&state.admin, &digest) {
            Ok(())
        } else {
            Err(TokenError::Unauthorized)
        }
    }

    fn require_holder(
        &self,
        auth: &CallAuthorization,
        holder: &PublicKey,
        digest: &HashOutput,
    ) -> Result<(), TokenError> {
        match auth.status_for(holder, digest) {
            SignatureStatus::Valid => Ok(()),
            SignatureStatus::Invalid => Err(TokenError::InvalidSignature(*holder)),
            SignatureStatus::Missing => Err(TokenError::HolderSignatureRequired(*holder)),
        }
    }

    fn ensure_not_circulation(&self, account: &PublicKey) -> Result<(), TokenError> {
        if *account == self.contract {
            Err(TokenError::CirculationAccountMisuse)
        } else {
            Ok(())
        }
    }

    /// Run side-loaded proof checks for `operation`.
    ///
    /// Without a bundle the call succeeds only when the operation does not
    /// demand a proof.
    fn check_proof(
        &self,
        state: &ContractState,
        operation: OperationKey,
        subject: PublicKey,
        bundle: Option<ProofBundle<'_>>,
    ) -> Result<(), TokenError> {
        let config = state.packed.dynamic_proof_configs().get(operation);
        let Some(bundle) = bundle else {
            return if config.should_verify {
                Err(TokenError::ProofRequired(operation))
            } else {
                Ok(())
            };
        };

        let ctx = ValidationContext {
            operation,
            config,
            registry: &state.vk_registry,
            vk_map: bundle.vk_map,
            vk: bundle.vk,
            expected_subject: subject,
            token_id: self.token_id,
            current_native: self.ledger.account(&subject, TokenId::NATIVE)?,
            current_custom: self.ledger.account(&subject, self.token_id)?,
        };
        let report = cross_validate(self.proofs.as_ref(), bundle.proof, &ctx);
        for (check, outcome) in report.outcomes() {
            debug!(%operation, ?check, passed = outcome.is_ok(), "proof check");
        }
        if config.should_verify {
            self.stats.write().proofs_checked += 1;
        }
        report.into_result()
    }

    fn finish(
        &self,
        read_version: Option<u64>,
        commit: PendingCommit,
        events: Vec<TokenEvent>,
    ) -> Result<(), TokenError> {
        let version = commit.state.version;
        self.ledger.commit(read_version, commit)?;
        for event in &events {
            self.events.publish(event);
        }
        self.stats.write().operations_committed += 1;
        info!(version, events = events.len(), "committed");
        Ok(())
    }

    fn record<T>(&self, operation: &'static str, result: Result<T, TokenError>) -> Result<T, TokenError> {
        if let Err(e) = &result {
            self.stats.write().operations_rejected += 1;
            warn!(operation, error = %e, "rejected");
        }
        result
    }

    fn supply_delta(&self, delta: i128) -> BalanceDelta {
        BalanceDelta {
            public_key: self.contract,
            token_id: self.token_id,
            delta,
            increment_nonce: false,
        }
    }

    // -------------------------------------------------------------------------
    // Balance-changing operations
    // -------------------------------------------------------------------------

    fn do_mint(
        &self,
        recipient: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: Option<ProofBundle<'_>>,
    ) -> Result<(), TokenError> {
        let state = self.load()?;
        self.ensure_not_circulation(&recipient)?;

        let call = TokenCall::Mint { recipient, amount };
        let digest = self.call_digest(&call, &state, bundle.as_ref())?;
        let admin_signed = auth.is_signed_by(&state.admin, &digest);
        policy::authorize(
            OperationKey::Mint,
            &state.packed.amount_configs().mint,
            &state.packed.params(OperationType::Mint),
            amount,
            admin_signed,
        )?;
        self.check_proof(&state, OperationKey::Mint, recipient, bundle)?;

        let commit = PendingCommit {
            state: state.next(),
            deltas: vec![
                BalanceDelta::credit(recipient, self.token_id, amount),
                self.supply_delta(i128::from(amount)),
            ],
        };
        let mut events = vec![TokenEvent::Mint { recipient, amount }];
        events.extend(TokenEvent::balance_change(recipient, i128::from(amount)));
        self.finish(Some(state.version), commit, events)
    }

    fn do_burn(
        &self,
        from: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: Option<ProofBundle<'_>>,
    ) -> Result<(), TokenError> {
        let state = self.load()?;
        self.ensure_not_circulation(&from)?;

        let call = TokenCall::Burn { from, amount };
        let digest = self.call_digest(&call, &state, bundle.as_ref())?;
        self.require_holder(auth, &from, &digest)?;
        let admin_signed = auth.is_signed_by(&state.admin, &digest);
        policy::authorize(
            OperationKey::Burn,
            &state.packed.amount_configs().burn,
            &state.packed.params(OperationType::Burn),
            amount,
            admin_signed,
        )?;
        self.check_proof(&state, OperationKey::Burn, from, bundle)?;

        let commit = PendingCommit {
            state: state.next(),
            deltas: vec![
                BalanceDelta::debit(from, self.token_id, amount),
                self.supply_delta(-i128::from(amount)),
            ],
        };
        let mut events = vec![TokenEvent::Burn { from, amount }];
        events.extend(TokenEvent::balance_change(from, -i128::from(amount)));
        self.finish(Some(state.version), commit, events)
    }

    fn do_transfer(
        &self,
        from: PublicKey,
        to: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: Option<ProofBundle<'_>>,
    ) -> Result<(), TokenError> {
        let state = self.load()?;
        self.ensure_not_circulation(&from)?;
        self.ensure_not_circulation(&to)?;

        let call = TokenCall::Transfer { from, to, amount };
        let digest = self.call_digest(&call, &state, bundle.as_ref())?;
        self.require_holder(auth, &from, &digest)?;
        self.check_proof(&state, OperationKey::Transfer, from, bundle)?;

        let commit = PendingCommit {
            state: state.next(),
            deltas: vec![
                BalanceDelta::debit(from, self.token_id, amount),
                BalanceDelta::credit(to, self.token_id, amount),
            ],
        };
        let mut events = vec![TokenEvent::Transfer { from, to, amount }];
        events.extend(TokenEvent::balance_change(from, -i128::from(amount)));
        events.extend(TokenEvent::balance_change(to, i128::from(amount)));
        self.finish(Some(state.version), commit, events)
    }

    fn do_approve_base(
        &self,
        forest: &AccountUpdateForest,
        subject: Option<PublicKey>,
        auth: &CallAuthorization,
        bundle: Option<ProofBundle<'_>>,
    ) -> Result<(), TokenError> {
        let state = self.load()?;
        let summary = approve_forest(
            forest,
            &ApprovalContext {
                token_id: self.token_id,
                circulation_account: self.contract,
                max_nodes: self.config.max_forest_nodes,
            },
        )?;
        debug!(nodes = summary.nodes_visited, "forest approved");

        // Net change per account, in first-touch order.
        let mut net: Vec<(PublicKey, i128, bool)> = Vec::new();
        for (account, change) in &summary.token_changes {
            let change = i128::from(*change);
            match net.iter_mut().find(|(key, _, _)| *key == *account) {
                Some(entry) => {
                    entry.1 += change;
                    entry.2 |= change < 0;
                }
                None => net.push((*account, change, change < 0)),
            }
        }

        let call = TokenCall::ApproveBase {
            forest: forest.clone(),
        };
        let digest = self.call_digest(&call, &state, bundle.as_ref())?;
        for (account, _, debited) in &net {
            if *debited {
                self.require_holder(auth, account, &digest)?;
            }
        }
        let subject = subject.unwrap_or(self.contract);
        self.check_proof(&state, OperationKey::ApproveBase, subject, bundle)?;

        let deltas = net
            .iter()
            .filter(|(_, delta, debited)| *delta != 0 || *debited)
            .map(|(account, delta, debited)| BalanceDelta {
                public_key: *account,
                token_id: self.token_id,
                delta: *delta,
                increment_nonce: *debited,
            })
            .collect();
        let events = net
            .iter()
            .filter_map(|(account, delta, _)| TokenEvent::balance_change(*account, *delta))
            .collect();

        let commit = PendingCommit {
            state: state.next(),
            deltas,
        };
        self.finish(Some(state.version), commit, events)
    }

    // -------------------------------------------------------------------------
    // Admin operations
    // -------------------------------------------------------------------------

    fn do_initialize(&self, params: InitializeParams) -> Result<(), TokenError> {
        if self.ledger.contract_state()?.is_some() {
            return Err(TokenError::AlreadyInitialized);
        }
        if params.decimals > self.config.max_decimals {
            return Err(TokenError::ConfigInvalid(format!(
                "decimals {} exceed maximum {}",
                params.decimals, self.config.max_decimals
            )));
        }
        let packed = params.configs.encode()?;
        let commit = PendingCommit {
            state: ContractState::new(params.decimals, params.admin, packed),
            deltas: Vec::new(),
        };
        let events = vec![TokenEvent::Initialization {
            admin: params.admin,
            decimals: params.decimals,
            token_id: self.token_id,
        }];
        self.finish(None, commit, events)
    }

    fn do_set_admin(&self, new_admin: PublicKey, auth: &CallAuthorization) -> Result<(), TokenError> {
        let state = self.load()?;
        self.require_admin(auth, &TokenCall::SetAdmin { new_admin }, &state)?;

        let mut next = state.next();
        next.admin = new_admin;
        let events = vec![TokenEvent::SetAdmin {
            previous: state.admin,
            admin: new_admin,
        }];
        self.commit_state(&state, next, events)
    }

    fn do_update_side_loaded_vkey_hash(
        &self,
        operation_key: u64,
        vk: &VerificationKey,
        vk_map: &SparseMerkleMap,
        auth: &CallAuthorization,
    ) -> Result<SparseMerkleMap, TokenError> {
        let operation = OperationKey::try_from(operation_key)?;
        let state = self.load()?;
        let vk_hash = vk.hash();
        self.require_admin(
            auth,
            &TokenCall::UpdateSideLoadedVKeyHash { operation, vk_hash },
            &state,
        )?;

        let previous = state.vk_registry.get(operation, vk_map)?;
        let (registry, updated_map) = state.vk_registry.set(operation, vk_hash, vk_map)?;
        let mut next = state.next();
        next.vk_registry = registry;
        let events = vec![TokenEvent::SideLoadedVKeyUpdate {
            operation,
            previous,
            vk_hash,
            root: registry.root(),
        }];
        self.commit_state(&state, next, events)?;
        Ok(updated_map)
    }

    fn do_update_verification_key(
        &self,
        vk: &VerificationKey,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let state = self.load()?;
        let vk_hash = vk.hash();
        self.require_admin(auth, &TokenCall::UpdateVerificationKey { vk_hash }, &state)?;

        let mut next = state.next();
        next.contract_vk_hash = Some(vk_hash);
        let events = vec![TokenEvent::VerificationKeyUpdate {
            previous: state.contract_vk_hash,
            vk_hash,
        }];
        self.commit_state(&state, next, events)
    }

    fn do_update_amount_config(
        &self,
        operation: OperationType,
        config: AmountConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let state = self.load()?;
        self.require_admin(
            auth,
            &TokenCall::UpdateAmountConfig { operation, config },
            &state,
        )?;

        let previous = state.packed.amount_configs().get(operation);
        let mut next = state.next();
        next.packed = state.packed.with_amount_config(operation, config)?;
        let events = vec![TokenEvent::ConfigStructureUpdate {
            operation,
            previous: ConfigStructure::Amount(previous),
            updated: ConfigStructure::Amount(config),
        }];
        self.commit_state(&state, next, events)
    }

    fn do_update_amount_params(
        &self,
        operation: OperationType,
        params: AmountParams,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let state = self.load()?;
        self.require_admin(
            auth,
            &TokenCall::UpdateAmountParams { operation, params },
            &state,
        )?;

        let previous = state.packed.params(operation);
        let mut next = state.next();
        next.packed = state.packed.with_params(operation, params)?;
        let events = vec![TokenEvent::ConfigStructureUpdate {
            operation,
            previous: ConfigStructure::Params(previous),
            updated: ConfigStructure::Params(params),
        }];
        self.commit_state(&state, next, events)
    }

    fn do_update_config_flag(
        &self,
        op_type: u8,
        flag_type: u8,
        value: bool,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let operation = OperationType::try_from(op_type)?;
        let flag = FlagType::try_from(flag_type)?;
        let state = self.load()?;
        self.require_admin(
            auth,
            &TokenCall::UpdateConfigFlag {
                operation,
                flag,
                value,
            },
            &state,
        )?;

        let current = state.packed.amount_configs().get(operation);
        let updated = current.with_flag(flag, value);
        if updated == current {
            debug!(?operation, ?flag, value, "flag unchanged");
            return Ok(());
        }

        let mut next = state.next();
        next.packed = state.packed.with_amount_config(operation, updated)?;
        let events = vec![TokenEvent::ConfigFlagUpdate {
            operation,
            flag,
            previous: current.flag(flag),
            value,
        }];
        self.commit_state(&state, next, events)
    }

    fn do_update_amount_value(
        &self,
        op_type: u8,
        param_type: u8,
        value: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let operation = OperationType::try_from(op_type)?;
        let parameter = ParameterType::try_from(param_type)?;
        let state = self.load()?;
        self.require_admin(
            auth,
            &TokenCall::UpdateAmountValue {
                operation,
                parameter,
                value,
            },
            &state,
        )?;

        let current = state.packed.params(operation);
        let mut next = state.next();
        next.packed = state
            .packed
            .with_params(operation, current.with_value(parameter, value))?;
        let events = vec![TokenEvent::AmountValueUpdate {
            operation,
            parameter,
            previous: current.value(parameter),
            value,
        }];
        self.commit_state(&state, next, events)
    }

    fn do_update_dynamic_proof_config(
        &self,
        operation_key: u64,
        config: DynamicProofConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let operation = OperationKey::try_from(operation_key)?;
        let state = self.load()?;
        self.require_admin(
            auth,
            &TokenCall::UpdateDynamicProofConfig { operation, config },
            &state,
        )?;

        let previous = state.packed.dynamic_proof_configs().get(operation);
        let mut next = state.next();
        next.packed = state.packed.with_dynamic_proof_config(operation, config);
        let events = vec![TokenEvent::DynamicProofConfigUpdate {
            operation,
            previous,
            updated: config,
        }];
        self.commit_state(&state, next, events)
    }

    fn commit_state(
        &self,
        read: &ContractState,
        next: ContractState,
        events: Vec<TokenEvent>,
    ) -> Result<(), TokenError> {
        let commit = PendingCommit {
            state: next,
            deltas: Vec::new(),
        };
        self.finish(Some(read.version), commit, events)
    }
}

/// Create a service with in-memory adapters (for testing).
#[must_use]
pub fn create_test_service(
) -> FungibleTokenService<InMemoryLedger, RecordingEventSink, CommitmentProofSystem> {
    FungibleTokenService {
        config: ServiceConfig::default(),
        contract: PublicKey::new([0xC0; 32]),
        token_id: TokenId::derive(&PublicKey::new([0xC0; 32]), TokenId::NATIVE),
        ledger: Arc::new(InMemoryLedger::new()),
        events: Arc::new(RecordingEventSink::new()),
        proofs: Arc::new(CommitmentProofSystem::new()),
        stats: RwLock::new(ServiceStats::default()),
    }
}

// =============================================================================
// FungibleTokenApi Implementation
// =============================================================================

impl<L: LedgerAccess, E: EventSink, P: ProofSystem> FungibleTokenApi
    for FungibleTokenService<L, E, P>
{
    #[instrument(skip(self, params), fields(admin = %params.admin, decimals = params.decimals))]
    fn initialize(&self, params: InitializeParams) -> Result<(), TokenError> {
        let result = self.do_initialize(params);
        self.record("initialize", result)
    }

    #[instrument(skip(self, auth))]
    fn set_admin(&self, new_admin: PublicKey, auth: &CallAuthorization) -> Result<(), TokenError> {
        let result = self.do_set_admin(new_admin, auth);
        self.record("set_admin", result)
    }

    #[instrument(skip(self, auth))]
    fn mint(
        &self,
        recipient: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_mint(recipient, amount, auth, None);
        self.record("mint", result)
    }

    #[instrument(skip(self, auth, bundle))]
    fn mint_with_proof(
        &self,
        recipient: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError> {
        let result = self.do_mint(recipient, amount, auth, Some(bundle));
        self.record("mint_with_proof", result)
    }

    #[instrument(skip(self, auth))]
    fn burn(
        &self,
        from: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_burn(from, amount, auth, None);
        self.record("burn", result)
    }

    #[instrument(skip(self, auth, bundle))]
    fn burn_with_proof(
        &self,
        from: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError> {
        let result = self.do_burn(from, amount, auth, Some(bundle));
        self.record("burn_with_proof", result)
    }

    #[instrument(skip(self, auth))]
    fn transfer(
        &self,
        from: PublicKey,
        to: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_transfer(from, to, amount, auth, None);
        self.record("transfer", result)
    }

    #[instrument(skip(self, auth, bundle))]
    fn transfer_with_proof(
        &self,
        from: PublicKey,
        to: PublicKey,
        amount: u64,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError> {
        let result = self.do_transfer(from, to, amount, auth, Some(bundle));
        self.record("transfer_with_proof", result)
    }

    #[instrument(skip(self, forest, auth), fields(trees = forest.len()))]
    fn approve_base(
        &self,
        forest: &AccountUpdateForest,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_approve_base(forest, None, auth, None);
        self.record("approve_base", result)
    }

    #[instrument(skip(self, forest, auth, bundle), fields(trees = forest.len()))]
    fn approve_base_with_proof(
        &self,
        forest: &AccountUpdateForest,
        subject: PublicKey,
        auth: &CallAuthorization,
        bundle: ProofBundle<'_>,
    ) -> Result<(), TokenError> {
        let result = self.do_approve_base(forest, Some(subject), auth, Some(bundle));
        self.record("approve_base_with_proof", result)
    }

    #[instrument(skip(self, vk, vk_map, auth))]
    fn update_side_loaded_vkey_hash(
        &self,
        operation_key: u64,
        vk: &VerificationKey,
        vk_map: &SparseMerkleMap,
        auth: &CallAuthorization,
    ) -> Result<SparseMerkleMap, TokenError> {
        let result = self.do_update_side_loaded_vkey_hash(operation_key, vk, vk_map, auth);
        self.record("update_side_loaded_vkey_hash", result)
    }

    #[instrument(skip(self, vk, auth))]
    fn update_verification_key(
        &self,
        vk: &VerificationKey,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_verification_key(vk, auth);
        self.record("update_verification_key", result)
    }

    #[instrument(skip(self, auth))]
    fn update_mint_config(
        &self,
        config: AmountConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_amount_config(OperationType::Mint, config, auth);
        self.record("update_mint_config", result)
    }

    #[instrument(skip(self, auth))]
    fn update_burn_config(
        &self,
        config: AmountConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_amount_config(OperationType::Burn, config, auth);
        self.record("update_burn_config", result)
    }

    #[instrument(skip(self, auth))]
    fn update_mint_params(
        &self,
        params: AmountParams,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_amount_params(OperationType::Mint, params, auth);
        self.record("update_mint_params", result)
    }

    #[instrument(skip(self, auth))]
    fn update_burn_params(
        &self,
        params: AmountParams,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_amount_params(OperationType::Burn, params, auth);
        self.record("update_burn_params", result)
    }

    #[instrument(skip(self, auth))]
    fn update_config_flag(
        &self,
        op_type: u8,
        flag_type: u8,
        value: bool,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_config_flag(op_type, flag_type, value, auth);
        self.record("update_config_flag", result)
    }

    #[instrument(skip(self, auth))]
    fn update_amount_value(
        &self,
        op_type: u8,
        param_type: u8,
        value: u64,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_amount_value(op_type, param_type, value, auth);
        self.record("update_amount_value", result)
    }

    #[instrument(skip(self, auth))]
    fn update_dynamic_proof_config(
        &self,
        operation_key: u64,
        config: DynamicProofConfig,
        auth: &CallAuthorization,
    ) -> Result<(), TokenError> {
        let result = self.do_update_dynamic_proof_config(operation_key, config, auth);
        self.record("update_dynamic_proof_config", result)
    }

    fn balance_of(&self, owner: &PublicKey) -> Result<u64, TokenError> {
        Ok(self.ledger.balance(owner, self.token_id)?)
    }

    fn circulating(&self) -> Result<u64, TokenError> {
        Ok(self.ledger.balance(&self.contract, self.token_id)?)
    }

    fn decimals(&self) -> Result<u8, TokenError> {
        Ok(self.load()?.decimals)
    }

    fn admin(&self) -> Result<PublicKey, TokenError> {
        Ok(self.load()?.admin)
    }

    fn configs(&self) -> Result<TokenConfigs, TokenError> {
        Ok(TokenConfigs::decode(&self.load()?.packed))
    }

    fn contract_state(&self) -> Result<ContractState, TokenError> {
        self.load()
    }

    fn token_id(&self) -> TokenId {
        self.token_id
    }
}

// =============================================================================
// TESTS
// =============================================================================
