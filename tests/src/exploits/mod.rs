//! # Exploit Simulations
//!
//! Each module replays one attack against the token facade and asserts it is
//! rejected in full: no balance moves, no event is published.
//!
//! | Attack | Module | Expected rejection |
//! |--------|--------|--------------------|
//! | Mint-then-repay inside one batch | `flash_mint` | `FlashMintDetected` |
//! | Proof checked against a stale map mirror | `registry_desync` | `RegistryOutOfSync` |
//! | Proof or signature reused after state moved | `stale_proof` | `BalanceMismatch` / `NonceMismatch` |
//! | Permission change hidden in a batch | `permission_smuggling` | `PermissionChangeDenied` |

pub mod flash_mint;
pub mod registry_desync;
