//! # Value Objects
//!
//! Immutable domain primitives for the token engine.
//! These types represent concepts that are defined by their value, not identity.

use crate::errors::TokenError;
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use ftg_zkp::{hash_to_field, FieldElement};
use serde::{Deserialize, Serialize};
use std::fmt;

const TOKEN_ID_DOMAIN: &[u8] = b"ftg:token-id:v1";

// =============================================================================
// PUBLIC KEY (32 bytes)
// =============================================================================

/// An ed25519 public key identifying an account.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// The all-zero key. Never a valid signer.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a key from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify `signature` over `message` with this key.
    ///
    /// Strict verification: small-order keys and non-canonical encodings
    /// are rejected.
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = DalekSignature::from_bytes(&signature.0);
        key.verify_strict(message, &sig).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[30..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// SIGNATURE (64 bytes)
// =============================================================================

/// An ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Creates a signature from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x")?;
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...)")
    }
}

// =============================================================================
// TOKEN ID
// =============================================================================

/// Identifier of a token ledger.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub FieldElement);

impl TokenId {
    /// Reserved id of the native currency.
    pub const NATIVE: Self = Self(FieldElement::ONE);

    /// Derive the id of the token owned by `owner` under `parent`.
    #[must_use]
    pub fn derive(owner: &PublicKey, parent: TokenId) -> Self {
        let id = hash_to_field(TOKEN_ID_DOMAIN, &[owner.as_bytes(), &parent.0.to_le_bytes()]);
        Self(id)
    }

    /// True for the native currency id.
    #[must_use]
    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// CLOSED ENUMERATIONS
// =============================================================================

/// Registry key: the four operation kinds a side-loaded key can gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationKey {
    /// Minting.
    Mint = 1,
    /// Burning.
    Burn = 2,
    /// Custom transfer.
    Transfer = 3,
    /// Forest approval.
    ApproveBase = 4,
}

impl OperationKey {
    /// All keys in registry order.
    pub const ALL: [Self; 4] = [Self::Mint, Self::Burn, Self::Transfer, Self::ApproveBase];

    /// Numeric key used in the registry map.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self as u64
    }
}

impl TryFrom<u64> for OperationKey {
    type Error = TokenError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Mint),
            2 => Ok(Self::Burn),
            3 => Ok(Self::Transfer),
            4 => Ok(Self::ApproveBase),
            other => Err(TokenError::InvalidOperationKey(other)),
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mint => "mint",
            Self::Burn => "burn",
            Self::Transfer => "transfer",
            Self::ApproveBase => "approve_base",
        };
        f.write_str(name)
    }
}

/// Operation kinds that carry amount configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationType {
    /// Minting.
    Mint = 1,
    /// Burning.
    Burn = 2,
}

impl TryFrom<u8> for OperationType {
    type Error = TokenError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Mint),
            2 => Ok(Self::Burn),
            other => Err(TokenError::InvalidOperationType(other)),
        }
    }
}

impl From<OperationType> for OperationKey {
    fn from(op: OperationType) -> Self {
        match op {
            OperationType::Mint => Self::Mint,
            OperationType::Burn => Self::Burn,
        }
    }
}

/// Selector for one field of `AmountParams`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ParameterType {
    /// The fixed amount.
    FixedAmount = 0,
    /// Lower bound of the ranged amount.
    MinAmount = 1,
    /// Upper bound of the ranged amount.
    MaxAmount = 2,
}

impl TryFrom<u8> for ParameterType {
    type Error = TokenError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::FixedAmount),
            1 => Ok(Self::MinAmount),
            2 => Ok(Self::MaxAmount),
            other => Err(TokenError::InvalidParameterType(other)),
        }
    }
}

/// Selector for one flag of `AmountConfig`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FlagType {
    /// Fixed-amount mode.
    FixedAmount = 0,
    /// Ranged-amount mode.
    RangedAmount = 1,
    /// No admin signature required.
    Unauthorized = 2,
}

impl TryFrom<u8> for FlagType {
    type Error = TokenError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::FixedAmount),
            1 => Ok(Self::RangedAmount),
            2 => Ok(Self::Unauthorized),
            other => Err(TokenError::InvalidFlagType(other)),
        }
    }
}

/// Which side of a proof snapshot a check refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Native-currency account.
    Native,
    /// Custom-token account.
    Custom,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Custom => f.write_str("custom-token"),
        }
    }
}

/// Authorization an account demands for a permissioned action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthRequired {
    /// Anyone may perform the action.
    None,
    /// Proof or signature.
    Either,
    /// Proof only.
    Proof,
    /// Signature only.
    Signature,
    /// Nobody may perform the action.
    Impossible,
}

// =============================================================================
// TESTS
// =============================================================================
