//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the token engine depends on:
//! - Ledger access (contract state and token accounts)
//! - Event publication
//!
//! Dependencies point INWARD; adapters implement these traits.

use crate::domain::entities::{AccountState, ContractState, PendingCommit};
use crate::domain::value_objects::{PublicKey, TokenId};
use crate::errors::LedgerError;
use crate::events::TokenEvent;

// =============================================================================
// LEDGER ACCESS
// =============================================================================

/// Persistent state of the contract and its accounts.
///
/// ## Concurrency
///
/// Writes are optimistic. `commit` applies a `PendingCommit` only if the
/// stored contract version still equals `expected_version`
/// (`None` meaning "no contract state yet"). Otherwise it fails with
/// `LedgerError::StalePrecondition` and applies nothing. There is no retry.
pub trait LedgerAccess: Send + Sync {
    /// Current contract state, `None` before initialization.
    fn contract_state(&self) -> Result<Option<ContractState>, LedgerError>;

    /// Account of `public_key` under `token_id`; missing accounts are empty.
    fn account(&self, public_key: &PublicKey, token_id: TokenId)
        -> Result<AccountState, LedgerError>;

    /// Atomically apply `commit` if the version precondition holds.
    fn commit(&self, expected_version: Option<u64>, commit: PendingCommit)
        -> Result<(), LedgerError>;

    /// Balance convenience.
    fn balance(&self, public_key: &PublicKey, token_id: TokenId) -> Result<u64, LedgerError> {
        Ok(self.account(public_key, token_id)?.balance)
    }
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Receiver of committed events.
///
/// Called only after a successful commit, so publication cannot fail the
/// operation.
pub trait EventSink: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: &TokenEvent);
}
