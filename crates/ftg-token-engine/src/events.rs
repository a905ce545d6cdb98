//! # Event Schema
//!
//! Records emitted after a committed state change, consumed by external
//! indexers. A rejected operation emits nothing.
//!
//! | Event | Emitted |
//! |-------|---------|
//! | `BalanceChange` | only for non-zero deltas |
//! | `ConfigFlagUpdate` | only when the flag actually changed |
//! | all others | on every committed call |

use crate::domain::packed::{AmountConfig, AmountParams, DynamicProofConfig};
use crate::domain::value_objects::{
    FlagType, OperationKey, OperationType, ParameterType, PublicKey, TokenId,
};
use ftg_zkp::{FieldElement, HashOutput};
use serde::{Deserialize, Serialize};

/// Which configuration structure a `ConfigStructureUpdate` replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "snake_case")]
pub enum ConfigStructure {
    /// Amount config.
    Amount(AmountConfig),
    /// Amount params.
    Params(AmountParams),
}

/// Token contract event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Contract initialized.
    Initialization {
        /// First admin.
        admin: PublicKey,
        /// Display decimals.
        decimals: u8,
        /// Derived token id.
        token_id: TokenId,
    },
    /// Admin replaced.
    SetAdmin {
        /// Previous admin.
        previous: PublicKey,
        /// New admin.
        admin: PublicKey,
    },
    /// Tokens minted.
    Mint {
        /// Recipient.
        recipient: PublicKey,
        /// Amount.
        amount: u64,
    },
    /// Tokens burned.
    Burn {
        /// Holder.
        from: PublicKey,
        /// Amount.
        amount: u64,
    },
    /// Tokens moved.
    Transfer {
        /// Sender.
        from: PublicKey,
        /// Receiver.
        to: PublicKey,
        /// Amount.
        amount: u64,
    },
    /// Account balance changed.
    BalanceChange {
        /// Account.
        account: PublicKey,
        /// Signed change.
        amount: i128,
    },
    /// Side-loaded key registered.
    SideLoadedVKeyUpdate {
        /// Operation key.
        operation: OperationKey,
        /// Previously registered hash.
        previous: Option<FieldElement>,
        /// New hash.
        vk_hash: FieldElement,
        /// New registry root.
        root: HashOutput,
    },
    /// Contract's own key replaced.
    VerificationKeyUpdate {
        /// Previous hash.
        previous: Option<FieldElement>,
        /// New hash.
        vk_hash: FieldElement,
    },
    /// Amount config or params replaced.
    ConfigStructureUpdate {
        /// Operation type.
        operation: OperationType,
        /// Previous value.
        previous: ConfigStructure,
        /// New value.
        updated: ConfigStructure,
    },
    /// One config flag changed.
    ConfigFlagUpdate {
        /// Operation type.
        operation: OperationType,
        /// Flag.
        flag: FlagType,
        /// Previous value.
        previous: bool,
        /// New value.
        value: bool,
    },
    /// One amount parameter replaced.
    AmountValueUpdate {
        /// Operation type.
        operation: OperationType,
        /// Parameter.
        parameter: ParameterType,
        /// Previous value.
        previous: u64,
        /// New value.
        value: u64,
    },
    /// Dynamic proof config replaced.
    DynamicProofConfigUpdate {
        /// Operation key.
        operation: OperationKey,
        /// Previous config.
        previous: DynamicProofConfig,
        /// New config.
        updated: DynamicProofConfig,
    },
}

impl TokenEvent {
    /// Stable event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialization { .. } => "Initialization",
            Self::SetAdmin { .. } => "SetAdmin",
            Self::Mint { .. } => "Mint",
            Self::Burn { .. } => "Burn",
            Self::Transfer { .. } => "Transfer",
            Self::BalanceChange { .. } => "BalanceChange",
            Self::SideLoadedVKeyUpdate { .. } => "SideLoadedVKeyUpdate",
            Self::VerificationKeyUpdate { .. } => "VerificationKeyUpdate",
            Self::ConfigStructureUpdate { .. } => "ConfigStructureUpdate",
            Self::ConfigFlagUpdate { .. } => "ConfigFlagUpdate",
            Self::AmountValueUpdate { .. } => "AmountValueUpdate",
            Self::DynamicProofConfigUpdate { .. } => "DynamicProofConfigUpdate",
        }
    }

    /// `BalanceChange` for a non-zero delta, `None` otherwise.
    #[must_use]
    pub fn balance_change(account: PublicKey, amount: i128) -> Option<Self> {
        (amount != 0).then_some(Self::BalanceChange { account, amount })
    }
}
