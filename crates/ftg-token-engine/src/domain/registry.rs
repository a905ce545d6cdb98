//! # Verification-Key Registry
//!
//! Operation key to verification-key hash, stored as a sparse authenticated
//! map. Only the root lives on-chain; callers supply their off-chain copy of
//! the map on every read and write, and the copy is rejected unless its root
//! matches. Absent keys read as `None`, never as a zero hash.

use crate::domain::value_objects::OperationKey;
use crate::errors::TokenError;
use ftg_zkp::{FieldElement, HashOutput, SparseMerkleMap};
use serde::{Deserialize, Serialize};

/// On-chain view of the registry: its root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VkRegistry {
    root: HashOutput,
}

impl VkRegistry {
    /// Registry with no registrations.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: SparseMerkleMap::new().root(),
        }
    }

    /// Registry committed to `root`.
    #[must_use]
    pub const fn from_root(root: HashOutput) -> Self {
        Self { root }
    }

    /// Stored root.
    #[must_use]
    pub const fn root(&self) -> HashOutput {
        self.root
    }

    /// True when `map` mirrors the stored root.
    #[must_use]
    pub fn in_sync(&self, map: &SparseMerkleMap) -> bool {
        map.root() == self.root
    }

    /// Fail `RegistryOutOfSync` unless `map` mirrors the stored root.
    pub fn ensure_in_sync(&self, map: &SparseMerkleMap) -> Result<(), TokenError> {
        if self.in_sync(map) {
            Ok(())
        } else {
            Err(TokenError::RegistryOutOfSync)
        }
    }

    /// Registered hash for `key`; root is checked before the lookup.
    pub fn get(
        &self,
        key: OperationKey,
        map: &SparseMerkleMap,
    ) -> Result<Option<FieldElement>, TokenError> {
        self.ensure_in_sync(map)?;
        Ok(map.get(key.as_u64()))
    }

    /// Register `hash` for `key`.
    ///
    /// Returns the updated registry together with the updated map; the input
    /// map is left unchanged so a failed commit leaves the caller's mirror
    /// intact.
    pub fn set(
        &self,
        key: OperationKey,
        hash: FieldElement,
        map: &SparseMerkleMap,
    ) -> Result<(Self, SparseMerkleMap), TokenError> {
        self.ensure_in_sync(map)?;
        let mut next = map.clone();
        next.set(key.as_u64(), hash)?;
        Ok((Self::from_root(next.root()), next))
    }

    /// `set` for a raw key, validating the operation key range first.
    pub fn set_raw(
        &self,
        key: u64,
        hash: FieldElement,
        map: &SparseMerkleMap,
    ) -> Result<(Self, SparseMerkleMap), TokenError> {
        self.set(OperationKey::try_from(key)?, hash, map)
    }
}

impl Default for VkRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
