//! # Packed-State Codec
//!
//! Several small configuration structures share single 256-bit storage words.
//! Bit offsets are part of the on-chain contract and MUST NOT change:
//!
//! | Word | Bits | Content |
//! |------|------|---------|
//! | amount config | `[0..2]` | Mint `{unauthorized, fixed, ranged}` |
//! | amount config | `[3..5]` | Burn `{unauthorized, fixed, ranged}` |
//! | amount params | `[0..63]` / `[64..127]` / `[128..191]` | fixed / min / max |
//! | dynamic proof | `[0..6]` `[7..13]` `[14..20]` `[21..27]` | Mint / Burn / Transfer / ApproveBase |
//!
//! Every `pack` validates first. Partial updates go through `splice`, which
//! rewrites only the owning bit range and leaves every other bit untouched.
//! Raw words never leave this module; callers see typed structs only.

use crate::domain::value_objects::{FlagType, OperationKey, OperationType, ParameterType};
use crate::errors::TokenError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Storage word.
type Word = U256;

const AMOUNT_CONFIG_BITS: usize = 3;
const DYNAMIC_PROOF_CONFIG_BITS: usize = 7;
const AMOUNT_FIELD_BITS: usize = 64;

fn mask(width: usize) -> Word {
    (Word::one() << width) - Word::one()
}

fn read_bits(word: Word, offset: usize, width: usize) -> u64 {
    ((word >> offset) & mask(width)).low_u64()
}

fn write_bits(word: Word, offset: usize, width: usize, value: u64) -> Word {
    let cleared = word & !(mask(width) << offset);
    cleared | ((Word::from(value) & mask(width)) << offset)
}

fn bit(bits: u64, index: u32) -> bool {
    (bits >> index) & 1 == 1
}

// =============================================================================
// AMOUNT CONFIG
// =============================================================================

/// Authorization mode for one amount-gated operation kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmountConfig {
    /// No admin signature required.
    pub unauthorized: bool,
    /// Amount must equal `AmountParams::fixed_amount`.
    pub fixed_amount: bool,
    /// Amount must lie in `[min_amount, max_amount]`.
    pub ranged_amount: bool,
}

impl AmountConfig {
    /// Fixed-amount mode.
    #[must_use]
    pub const fn fixed(unauthorized: bool) -> Self {
        Self {
            unauthorized,
            fixed_amount: true,
            ranged_amount: false,
        }
    }

    /// Ranged-amount mode.
    #[must_use]
    pub const fn ranged(unauthorized: bool) -> Self {
        Self {
            unauthorized,
            fixed_amount: false,
            ranged_amount: true,
        }
    }

    /// Exactly one amount mode must be active.
    pub fn validate(&self) -> Result<(), TokenError> {
        match (self.fixed_amount, self.ranged_amount) {
            (true, true) => Err(TokenError::ConfigInvalid(
                "fixed and ranged amount modes are mutually exclusive".into(),
            )),
            (false, false) => Err(TokenError::ConfigInvalid(
                "one of fixed or ranged amount mode must be enabled".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Set one flag. Setting an amount mode sets its counterpart to the
    /// opposite value, so exactly one mode stays active.
    #[must_use]
    pub fn with_flag(self, flag: FlagType, value: bool) -> Self {
        match flag {
            FlagType::Unauthorized => Self {
                unauthorized: value,
                ..self
            },
            FlagType::FixedAmount => Self {
                fixed_amount: value,
                ranged_amount: !value,
                ..self
            },
            FlagType::RangedAmount => Self {
                fixed_amount: !value,
                ranged_amount: value,
                ..self
            },
        }
    }

    /// Current value of one flag.
    #[must_use]
    pub fn flag(&self, flag: FlagType) -> bool {
        match flag {
            FlagType::Unauthorized => self.unauthorized,
            FlagType::FixedAmount => self.fixed_amount,
            FlagType::RangedAmount => self.ranged_amount,
        }
    }

    fn to_bits(self) -> u64 {
        u64::from(self.unauthorized)
            | (u64::from(self.fixed_amount) << 1)
            | (u64::from(self.ranged_amount) << 2)
    }

    fn from_bits(bits: u64) -> Self {
        Self {
            unauthorized: bit(bits, 0),
            fixed_amount: bit(bits, 1),
            ranged_amount: bit(bits, 2),
        }
    }
}

/// Mint and Burn amount configs sharing one word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmountConfigs {
    /// Mint configuration, bits `[0..2]`.
    pub mint: AmountConfig,
    /// Burn configuration, bits `[3..5]`.
    pub burn: AmountConfig,
}

impl AmountConfigs {
    const fn offset(op: OperationType) -> usize {
        match op {
            OperationType::Mint => 0,
            OperationType::Burn => AMOUNT_CONFIG_BITS,
        }
    }

    /// Config for one operation kind.
    #[must_use]
    pub fn get(&self, op: OperationType) -> AmountConfig {
        match op {
            OperationType::Mint => self.mint,
            OperationType::Burn => self.burn,
        }
    }

    /// Validate both halves.
    pub fn validate(&self) -> Result<(), TokenError> {
        self.mint.validate()?;
        self.burn.validate()
    }

    fn pack(&self) -> Result<Word, TokenError> {
        self.validate()?;
        let word = write_bits(
            Word::zero(),
            Self::offset(OperationType::Mint),
            AMOUNT_CONFIG_BITS,
            self.mint.to_bits(),
        );
        Ok(write_bits(
            word,
            Self::offset(OperationType::Burn),
            AMOUNT_CONFIG_BITS,
            self.burn.to_bits(),
        ))
    }

    fn unpack(word: Word) -> Self {
        Self {
            mint: AmountConfig::from_bits(read_bits(
                word,
                Self::offset(OperationType::Mint),
                AMOUNT_CONFIG_BITS,
            )),
            burn: AmountConfig::from_bits(read_bits(
                word,
                Self::offset(OperationType::Burn),
                AMOUNT_CONFIG_BITS,
            )),
        }
    }

    fn splice(word: Word, op: OperationType, config: AmountConfig) -> Result<Word, TokenError> {
        config.validate()?;
        Ok(write_bits(
            word,
            Self::offset(op),
            AMOUNT_CONFIG_BITS,
            config.to_bits(),
        ))
    }
}

// =============================================================================
// AMOUNT PARAMS
// =============================================================================

/// Numeric parameters for one amount-gated operation kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmountParams {
    /// Exact amount for fixed mode.
    pub fixed_amount: u64,
    /// Inclusive lower bound for ranged mode.
    pub min_amount: u64,
    /// Inclusive upper bound for ranged mode.
    pub max_amount: u64,
}

impl AmountParams {
    /// Create params.
    #[must_use]
    pub const fn new(fixed_amount: u64, min_amount: u64, max_amount: u64) -> Self {
        Self {
            fixed_amount,
            min_amount,
            max_amount,
        }
    }

    /// `min_amount <= max_amount`.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.min_amount > self.max_amount {
            return Err(TokenError::ConfigInvalid(format!(
                "min amount {} exceeds max amount {}",
                self.min_amount, self.max_amount
            )));
        }
        Ok(())
    }

    /// Replace one parameter.
    #[must_use]
    pub fn with_value(self, parameter: ParameterType, value: u64) -> Self {
        match parameter {
            ParameterType::FixedAmount => Self {
                fixed_amount: value,
                ..self
            },
            ParameterType::MinAmount => Self {
                min_amount: value,
                ..self
            },
            ParameterType::MaxAmount => Self {
                max_amount: value,
                ..self
            },
        }
    }

    /// Current value of one parameter.
    #[must_use]
    pub fn value(&self, parameter: ParameterType) -> u64 {
        match parameter {
            ParameterType::FixedAmount => self.fixed_amount,
            ParameterType::MinAmount => self.min_amount,
            ParameterType::MaxAmount => self.max_amount,
        }
    }

    const fn offset(parameter: ParameterType) -> usize {
        match parameter {
            ParameterType::FixedAmount => 0,
            ParameterType::MinAmount => AMOUNT_FIELD_BITS,
            ParameterType::MaxAmount => 2 * AMOUNT_FIELD_BITS,
        }
    }

    fn pack(&self) -> Result<Word, TokenError> {
        self.validate()?;
        let mut word = Word::zero();
        for parameter in [
            ParameterType::FixedAmount,
            ParameterType::MinAmount,
            ParameterType::MaxAmount,
        ] {
            word = write_bits(
                word,
                Self::offset(parameter),
                AMOUNT_FIELD_BITS,
                self.value(parameter),
            );
        }
        Ok(word)
    }

    fn unpack(word: Word) -> Self {
        let field = |parameter| read_bits(word, Self::offset(parameter), AMOUNT_FIELD_BITS);
        Self {
            fixed_amount: field(ParameterType::FixedAmount),
            min_amount: field(ParameterType::MinAmount),
            max_amount: field(ParameterType::MaxAmount),
        }
    }
}

// =============================================================================
// DYNAMIC PROOF CONFIG
// =============================================================================

/// Which side-loaded proof checks an operation kind enforces.
///
/// `should_verify` gates the whole protocol; each `require_*` flag relaxes
/// one consistency check when false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DynamicProofConfig {
    /// Run the protocol at all.
    pub should_verify: bool,
    /// Proof subject must equal the call's recipient.
    pub require_recipient_match: bool,
    /// Proof token id must equal this token's id.
    pub require_token_id_match: bool,
    /// Snapshot native balance must equal current.
    pub require_mina_balance_match: bool,
    /// Snapshot custom-token balance must equal current.
    pub require_custom_token_balance_match: bool,
    /// Snapshot native nonce must equal current.
    pub require_mina_nonce_match: bool,
    /// Snapshot custom-token nonce must equal current.
    pub require_custom_token_nonce_match: bool,
}

impl DynamicProofConfig {
    /// Protocol disabled.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            should_verify: false,
            require_recipient_match: false,
            require_token_id_match: false,
            require_mina_balance_match: false,
            require_custom_token_balance_match: false,
            require_mina_nonce_match: false,
            require_custom_token_nonce_match: false,
        }
    }

    /// Protocol enabled with every check enforced.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            should_verify: true,
            require_recipient_match: true,
            require_token_id_match: true,
            require_mina_balance_match: true,
            require_custom_token_balance_match: true,
            require_mina_nonce_match: true,
            require_custom_token_nonce_match: true,
        }
    }

    fn to_bits(self) -> u64 {
        [
            self.should_verify,
            self.require_recipient_match,
            self.require_token_id_match,
            self.require_mina_balance_match,
            self.require_custom_token_balance_match,
            self.require_mina_nonce_match,
            self.require_custom_token_nonce_match,
        ]
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, flag)| acc | (u64::from(*flag) << i))
    }

    fn from_bits(bits: u64) -> Self {
        Self {
            should_verify: bit(bits, 0),
            require_recipient_match: bit(bits, 1),
            require_token_id_match: bit(bits, 2),
            require_mina_balance_match: bit(bits, 3),
            require_custom_token_balance_match: bit(bits, 4),
            require_mina_nonce_match: bit(bits, 5),
            require_custom_token_nonce_match: bit(bits, 6),
        }
    }
}

/// The four dynamic proof configs sharing one word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DynamicProofConfigs {
    /// Bits `[0..6]`.
    pub mint: DynamicProofConfig,
    /// Bits `[7..13]`.
    pub burn: DynamicProofConfig,
    /// Bits `[14..20]`.
    pub transfer: DynamicProofConfig,
    /// Bits `[21..27]`.
    pub approve_base: DynamicProofConfig,
}

impl DynamicProofConfigs {
    const fn offset(key: OperationKey) -> usize {
        match key {
            OperationKey::Mint => 0,
            OperationKey::Burn => DYNAMIC_PROOF_CONFIG_BITS,
            OperationKey::Transfer => 2 * DYNAMIC_PROOF_CONFIG_BITS,
            OperationKey::ApproveBase => 3 * DYNAMIC_PROOF_CONFIG_BITS,
        }
    }

    /// Config for one operation kind.
    #[must_use]
    pub fn get(&self, key: OperationKey) -> DynamicProofConfig {
        match key {
            OperationKey::Mint => self.mint,
            OperationKey::Burn => self.burn,
            OperationKey::Transfer => self.transfer,
            OperationKey::ApproveBase => self.approve_base,
        }
    }

    fn pack(&self) -> Word {
        OperationKey::ALL.iter().fold(Word::zero(), |word, key| {
            write_bits(
                word,
                Self::offset(*key),
                DYNAMIC_PROOF_CONFIG_BITS,
                self.get(*key).to_bits(),
            )
        })
    }

    fn unpack(word: Word) -> Self {
        let config = |key| {
            DynamicProofConfig::from_bits(read_bits(
                word,
                Self::offset(key),
                DYNAMIC_PROOF_CONFIG_BITS,
            ))
        };
        Self {
            mint: config(OperationKey::Mint),
            burn: config(OperationKey::Burn),
            transfer: config(OperationKey::Transfer),
            approve_base: config(OperationKey::ApproveBase),
        }
    }

    fn splice(word: Word, key: OperationKey, config: DynamicProofConfig) -> Word {
        write_bits(
            word,
            Self::offset(key),
            DYNAMIC_PROOF_CONFIG_BITS,
            config.to_bits(),
        )
    }
}

// =============================================================================
// PACKED STATE
// =============================================================================

/// The four packed configuration words of a token contract.
///
/// Constructed only from validated structs; every mutator validates before
/// producing a new value and never mutates in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedState {
    amount_config: Word,
    mint_params: Word,
    burn_params: Word,
    dynamic_proof_config: Word,
}

impl PackedState {
    /// Pack validated configuration.
    pub fn new(
        amount_configs: AmountConfigs,
        mint_params: AmountParams,
        burn_params: AmountParams,
        dynamic_proof_configs: DynamicProofConfigs,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            amount_config: amount_configs.pack()?,
            mint_params: mint_params.pack()?,
            burn_params: burn_params.pack()?,
            dynamic_proof_config: dynamic_proof_configs.pack(),
        })
    }

    /// Decoded amount configs.
    #[must_use]
    pub fn amount_configs(&self) -> AmountConfigs {
        AmountConfigs::unpack(self.amount_config)
    }

    /// Decoded params for one operation kind.
    #[must_use]
    pub fn params(&self, op: OperationType) -> AmountParams {
        match op {
            OperationType::Mint => AmountParams::unpack(self.mint_params),
            OperationType::Burn => AmountParams::unpack(self.burn_params),
        }
    }

    /// Decoded dynamic proof configs.
    #[must_use]
    pub fn dynamic_proof_configs(&self) -> DynamicProofConfigs {
        DynamicProofConfigs::unpack(self.dynamic_proof_config)
    }

    /// Replace one operation kind's amount config in place within its word.
    pub fn with_amount_config(
        self,
        op: OperationType,
        config: AmountConfig,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            amount_config: AmountConfigs::splice(self.amount_config, op, config)?,
            ..self
        })
    }

    /// Replace one operation kind's params word.
    pub fn with_params(self, op: OperationType, params: AmountParams) -> Result<Self, TokenError> {
        let word = params.pack()?;
        Ok(match op {
            OperationType::Mint => Self {
                mint_params: word,
                ..self
            },
            OperationType::Burn => Self {
                burn_params: word,
                ..self
            },
        })
    }

    /// Replace one operation kind's dynamic proof config within its word.
    #[must_use]
    pub fn with_dynamic_proof_config(self, key: OperationKey, config: DynamicProofConfig) -> Self {
        Self {
            dynamic_proof_config: DynamicProofConfigs::splice(
                self.dynamic_proof_config,
                key,
                config,
            ),
            ..self
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
