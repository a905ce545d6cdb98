//! # Shared Fixtures
//!
//! Builders for an initialized token service, signed calls and side-loaded
//! proofs taken against the service's current ledger state.

use ftg_token_engine::prelude::*;

/// Service wired to the in-memory adapters.
pub type TestService =
    FungibleTokenService<InMemoryLedger, RecordingEventSink, CommitmentProofSystem>;

/// Admin key seed.
pub const ADMIN_SEED: [u8; 32] = [0xAD; 32];

/// Admin signer.
pub fn admin() -> LocalSigner {
    LocalSigner::from_seed(ADMIN_SEED)
}

/// Holder signer derived from a one-byte tag.
pub fn holder(tag: u8) -> LocalSigner {
    LocalSigner::from_seed([tag; 32])
}

/// Mint fixed at 200 and admin-gated; burn ranged and holder-only;
/// no proof requirements.
pub fn default_configs() -> TokenConfigs {
    TokenConfigs {
        amount: AmountConfigs {
            mint: AmountConfig::fixed(false),
            burn: AmountConfig::ranged(true),
        },
        mint_params: AmountParams::new(200, 0, 0),
        burn_params: AmountParams::new(0, 1, 1_000_000),
        dynamic_proof: DynamicProofConfigs::default(),
    }
}

/// Fresh service initialized with `configs`.
pub fn service_with(configs: TokenConfigs) -> TestService {
    let service = create_test_service();
    service
        .initialize(InitializeParams {
            admin: admin().public_key(),
            decimals: 9,
            configs,
        })
        .expect("initialize");
    service
}

/// Fresh service initialized with `default_configs`.
pub fn service() -> TestService {
    service_with(default_configs())
}

/// Authorize `call` by every signer at the current state version.
pub fn sign(service: &TestService, signers: &[&LocalSigner], call: &TokenCall) -> CallAuthorization {
    let version = service.contract_state().expect("state").version;
    signers.iter().fold(CallAuthorization::none(), |auth, signer| {
        signer
            .authorize(auth, call, &service.contract(), version)
            .expect("sign")
    })
}

/// Authorize the proof-gated form of `call`, bound to `proof`, by every
/// signer at the current state version.
pub fn sign_with_proof(
    service: &TestService,
    signers: &[&LocalSigner],
    call: &TokenCall,
    proof: &TokenProof,
) -> CallAuthorization {
    let version = service.contract_state().expect("state").version;
    signers.iter().fold(CallAuthorization::none(), |auth, signer| {
        signer
            .authorize_with_proof(auth, call, &service.contract(), version, proof.commitment())
            .expect("sign")
    })
}

/// Admin-signed mint of the fixed 200.
pub fn mint_200(service: &TestService, recipient: PublicKey) {
    let call = TokenCall::Mint {
        recipient,
        amount: 200,
    };
    let auth = sign(service, &[&admin()], &call);
    service.mint(recipient, 200, &auth).expect("mint");
}

/// Register `vk` for `operation`; returns the caller's updated mirror.
pub fn register_vk(
    service: &TestService,
    operation: OperationKey,
    vk: &VerificationKey,
    map: &SparseMerkleMap,
) -> SparseMerkleMap {
    let call = TokenCall::UpdateSideLoadedVKeyHash {
        operation,
        vk_hash: vk.hash(),
    };
    let auth = sign(service, &[&admin()], &call);
    service
        .update_side_loaded_vkey_hash(operation.as_u64(), vk, map, &auth)
        .expect("register vk")
}

/// Admin-signed dynamic proof config update.
pub fn set_proof_config(service: &TestService, operation: OperationKey, config: DynamicProofConfig) {
    let call = TokenCall::UpdateDynamicProofConfig { operation, config };
    let auth = sign(service, &[&admin()], &call);
    service
        .update_dynamic_proof_config(operation.as_u64(), config, &auth)
        .expect("update dynamic proof config");
}

/// Proof over `subject`'s current native and custom accounts.
pub fn snapshot_proof(service: &TestService, prover: &Prover, subject: PublicKey) -> TokenProof {
    let token_id = service.token_id();
    let native = service
        .ledger()
        .account(&subject, TokenId::NATIVE)
        .expect("native account");
    let custom = service
        .ledger()
        .account(&subject, token_id)
        .expect("custom account");
    prover.prove(SideloadStatement {
        input: ProofPublicInput { token_id, subject },
        output: ProofPublicOutput {
            native: AccountSnapshot::of(TokenId::NATIVE, native),
            custom: AccountSnapshot::of(token_id, custom),
        },
    })
}

/// Prover for a named circuit.
pub fn prover(circuit: &str) -> Prover {
    Prover::new(VerificationKey::new(circuit.as_bytes().to_vec()).expect("vk"))
}
