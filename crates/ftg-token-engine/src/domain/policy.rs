//! # Authorization Policy
//!
//! Decides whether an amount-gated operation may proceed. Evaluated fresh on
//! every call from the decoded config and params; holds no state.

use crate::domain::packed::{AmountConfig, AmountParams};
use crate::domain::value_objects::OperationKey;
use crate::errors::TokenError;

/// Signature gate: an admin signature is needed unless `unauthorized` is set.
#[must_use]
pub fn requires_admin_signature(config: &AmountConfig) -> bool {
    !config.unauthorized
}

/// Amount-shape gate.
///
/// Fixed mode accepts exactly `fixed_amount`; ranged mode accepts the closed
/// interval `[min_amount, max_amount]`.
#[must_use]
pub fn amount_permitted(config: &AmountConfig, params: &AmountParams, amount: u64) -> bool {
    let fixed_ok = amount == params.fixed_amount;
    let ranged_ok = params.min_amount <= amount && amount <= params.max_amount;
    (config.fixed_amount && fixed_ok) || (config.ranged_amount && ranged_ok)
}

/// Full verdict for one operation.
///
/// Fails `Unauthorized` when the signature gate is closed and
/// `admin_signed` is false, then `NotAuthorized` when the amount is outside
/// the configured shape.
pub fn authorize(
    operation: OperationKey,
    config: &AmountConfig,
    params: &AmountParams,
    amount: u64,
    admin_signed: bool,
) -> Result<(), TokenError> {
    if requires_admin_signature(config) && !admin_signed {
        return Err(TokenError::Unauthorized);
    }
    if !amount_permitted(config, params, amount) {
        return Err(TokenError::NotAuthorized { operation, amount });
    }
    Ok(())
}
