//! # Batch Approval Pass
//!
//! Walks an account-update forest in pre-order and accepts it only when it is
//! a closed transfer of this token:
//!
//! - no node that uses the token may be the circulation account
//! - no node may set `access` or `receive` to anything but `None`
//! - the running total of token-using changes never goes above zero
//! - the final total is exactly zero
//!
//! The walk is iterative, so nesting depth is bounded only by the node limit.

use crate::domain::entities::AccountUpdate;
use crate::domain::value_objects::{AuthRequired, PublicKey, TokenId};
use crate::errors::TokenError;

/// Parameters of one approval pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApprovalContext {
    /// Token being managed.
    pub token_id: TokenId,
    /// Account tracking circulating supply.
    pub circulation_account: PublicKey,
    /// Upper bound on visited nodes.
    pub max_nodes: usize,
}

/// Result of an approved forest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApprovalSummary {
    /// Nodes visited.
    pub nodes_visited: usize,
    /// Token-using changes in traversal order.
    pub token_changes: Vec<(PublicKey, i64)>,
}

/// Approve with the default uses-token predicate (`token_id` equality).
pub fn approve_forest(
    forest: &[AccountUpdate],
    ctx: &ApprovalContext,
) -> Result<ApprovalSummary, TokenError> {
    let token_id = ctx.token_id;
    approve_forest_with(forest, ctx, |node| node.token_id == token_id)
}

/// Approve with a caller-supplied uses-token predicate.
pub fn approve_forest_with<F>(
    forest: &[AccountUpdate],
    ctx: &ApprovalContext,
    uses_token: F,
) -> Result<ApprovalSummary, TokenError>
where
    F: Fn(&AccountUpdate) -> bool,
{
    let mut summary = ApprovalSummary::default();
    let mut total: i128 = 0;
    let mut stack: Vec<&AccountUpdate> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        summary.nodes_visited += 1;
        if summary.nodes_visited > ctx.max_nodes {
            return Err(TokenError::ForestTooLarge { max: ctx.max_nodes });
        }

        if changes_guarded_permission(node) {
            return Err(TokenError::PermissionChangeDenied(node.public_key));
        }

        if uses_token(node) {
            if node.public_key == ctx.circulation_account {
                return Err(TokenError::CirculationAccountMisuse);
            }
            total += i128::from(node.balance_change);
            if total > 0 {
                return Err(TokenError::FlashMintDetected(total));
            }
            summary
                .token_changes
                .push((node.public_key, node.balance_change));
        }

        stack.extend(node.children.iter().rev());
    }

    if total != 0 {
        return Err(TokenError::UnbalancedTransaction(total));
    }
    Ok(summary)
}

fn changes_guarded_permission(node: &AccountUpdate) -> bool {
    node.permissions.is_some_and(|p| {
        [p.access, p.receive]
            .into_iter()
            .flatten()
            .any(|auth| auth != AuthRequired::None)
    })
}
