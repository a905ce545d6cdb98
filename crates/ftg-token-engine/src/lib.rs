//! # FTG Token Engine - Fungible Token Authorization and Proof Gating
//!
//! ## Purpose
//!
//! Decides whether a fungible-token operation (mint, burn, transfer, batch
//! approval) may commit. Every decision is made fresh from a compact packed
//! configuration held in contract state, optionally gated by a side-loaded
//! proof whose verification key is registered in an authenticated map.
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | Packed config round-trips and rejects invalid modes | `domain/packed.rs` |
//! | Signature gate before amount gate | `domain/policy.rs` - `authorize()` |
//! | Registry root matches the supplied map | `domain/registry.rs` - `ensure_in_sync()` |
//! | Enabled proof checks all pass, disabled ones never fail | `domain/cross_validation.rs` |
//! | No flash mint, net zero token change | `domain/approval.rs` - `approve_forest()` |
//! | All-or-nothing commit, events after commit | `service.rs` - `finish()` |
//!
//! ## Layout
//!
//! | Layer | Location | Purpose |
//! |-------|----------|---------|
//! | Domain | `domain/` | Pure codec, policy, registry and validation logic |
//! | Ports | `ports/` | `FungibleTokenApi` in, `LedgerAccess`/`EventSink` out |
//! | Adapters | `adapters/` | In-memory ledger, event sinks, local signer |
//! | Service | `service.rs` | The contract facade |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ftg_token_engine::prelude::*;
//!
//! let service = create_test_service();
//! service.initialize(InitializeParams { admin, decimals: 9, configs })?;
//!
//! let call = TokenCall::Mint { recipient, amount: 200 };
//! let auth = admin_signer.authorize(CallAuthorization::none(), &call, &service.contract(), 0)?;
//! service.mint(recipient, 200, &auth)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{
        AccountKind, AuthRequired, FlagType, OperationKey, OperationType, ParameterType,
        PublicKey, Signature, TokenId,
    };

    // Packed configuration
    pub use crate::domain::packed::{
        AmountConfig, AmountConfigs, AmountParams, DynamicProofConfig, DynamicProofConfigs,
        PackedState,
    };

    // Domain entities
    pub use crate::domain::entities::{
        AccountSnapshot, AccountState, AccountUpdate, AccountUpdateForest, BalanceDelta,
        CallAuthorization, ContractState, PendingCommit, PermissionsUpdate, ProofPublicInput,
        ProofPublicOutput, SideloadStatement, SignatureStatus, TokenCall, TokenConfigs,
        TokenProof,
    };

    // Domain services
    pub use crate::domain::approval::{approve_forest, ApprovalContext, ApprovalSummary};
    pub use crate::domain::cross_validation::{
        cross_validate, Check, ValidationContext, ValidationReport,
    };
    pub use crate::domain::policy::{amount_permitted, authorize, requires_admin_signature};
    pub use crate::domain::registry::VkRegistry;

    // Ports
    pub use crate::ports::inbound::{FungibleTokenApi, InitializeParams, ProofBundle};
    pub use crate::ports::outbound::{EventSink, LedgerAccess};

    // Events
    pub use crate::events::{ConfigStructure, TokenEvent};

    // Errors
    pub use crate::errors::{LedgerError, TokenError};

    // Adapters
    pub use crate::adapters::{InMemoryLedger, LocalSigner, RecordingEventSink, TracingEventSink};

    // Service
    pub use crate::config::{init_logging, ServiceConfig};
    pub use crate::service::{create_test_service, FungibleTokenService, ServiceStats};

    // Proof primitives
    pub use ftg_zkp::{
        CommitmentProofSystem, FieldElement, ProofSystem, Prover, SparseMerkleMap,
        VerificationKey,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
