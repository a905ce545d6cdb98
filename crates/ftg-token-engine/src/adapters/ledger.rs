//! # In-Memory Ledger
//!
//! Reference `LedgerAccess` implementation. Holds the contract state and
//! every `(public key, token id)` account behind one lock, so a commit is
//! checked and applied as a single step.

use crate::domain::entities::{AccountState, BalanceDelta, ContractState, PendingCommit};
use crate::domain::value_objects::{PublicKey, TokenId};
use crate::errors::LedgerError;
use crate::ports::outbound::LedgerAccess;
use parking_lot::RwLock;
use std::collections::HashMap;

type AccountKey = (PublicKey, TokenId);

#[derive(Debug, Default)]
struct LedgerInner {
    contract: Option<ContractState>,
    accounts: HashMap<AccountKey, AccountState>,
    commits: u64,
}

/// In-memory ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerInner>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly (genesis balances, tests).
    pub fn set_account(&self, public_key: PublicKey, token_id: TokenId, state: AccountState) {
        self.inner
            .write()
            .accounts
            .insert((public_key, token_id), state);
    }

    /// Number of successful commits.
    #[must_use]
    pub fn commits(&self) -> u64 {
        self.inner.read().commits
    }
}

impl LedgerAccess for InMemoryLedger {
    fn contract_state(&self) -> Result<Option<ContractState>, LedgerError> {
        Ok(self.inner.read().contract.clone())
    }

    fn account(
        &self,
        public_key: &PublicKey,
        token_id: TokenId,
    ) -> Result<AccountState, LedgerError> {
        Ok(self
            .inner
            .read()
            .accounts
            .get(&(*public_key, token_id))
            .copied()
            .unwrap_or_default())
    }

    fn commit(
        &self,
        expected_version: Option<u64>,
        commit: PendingCommit,
    ) -> Result<(), LedgerError> {
        let mut inner = self.inner.write();

        let actual = inner.contract.as_ref().map(|state| state.version);
        if actual != expected_version {
            return Err(LedgerError::StalePrecondition {
                expected: expected_version,
                actual,
            });
        }

        // Stage every touched account before writing any of them.
        let mut staged: HashMap<AccountKey, AccountState> = HashMap::new();
        for delta in &commit.deltas {
            let key = (delta.public_key, delta.token_id);
            let current = staged
                .get(&key)
                .or_else(|| inner.accounts.get(&key))
                .copied()
                .unwrap_or_default();
            staged.insert(key, apply_delta(current, delta)?);
        }

        inner.accounts.extend(staged);
        inner.contract = Some(commit.state);
        inner.commits += 1;
        Ok(())
    }
}

fn apply_delta(mut account: AccountState, delta: &BalanceDelta) -> Result<AccountState, LedgerError> {
    let balance = i128::from(account.balance) + delta.delta;
    if balance < 0 {
        return Err(LedgerError::InsufficientBalance {
            account: delta.public_key,
            required: u64::try_from(-delta.delta).unwrap_or(u64::MAX),
            available: account.balance,
        });
    }
    account.balance =
        u64::try_from(balance).map_err(|_| LedgerError::BalanceOverflow(delta.public_key))?;
    if delta.increment_nonce {
        account.nonce = account
            .nonce
            .checked_add(1)
            .ok_or(LedgerError::NonceOverflow(delta.public_key))?;
    }
    Ok(account)
}
