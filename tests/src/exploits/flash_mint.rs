//! # Flash Mint
//!
//! A batch that credits first and debits later nets to zero, but for the
//! span between the two nodes tokens exist that nobody paid for. The
//! approval pass tracks the running total in traversal order and rejects the
//! first moment it goes positive.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ftg_token_engine::prelude::*;

    fn funded() -> (TestService, LocalSigner, PublicKey) {
        let service = service();
        let victim = holder(0x61);
        mint_200(&service, victim.public_key());
        (service, victim, holder(0x62).public_key())
    }

    fn approve(service: &TestService, signer: &LocalSigner, forest: AccountUpdateForest) -> Result<(), TokenError> {
        let call = TokenCall::ApproveBase {
            forest: forest.clone(),
        };
        let auth = sign(service, &[signer], &call);
        service.approve_base(&forest, &auth)
    }

    #[test]
    fn test_credit_before_debit_is_flash_mint() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        let forest = vec![
            AccountUpdate::new(attacker, token, 100),
            AccountUpdate::new(victim.public_key(), token, -100),
        ];

        assert_eq!(
            approve(&service, &victim, forest),
            Err(TokenError::FlashMintDetected(100))
        );
        assert_eq!(service.balance_of(&attacker).unwrap(), 0);
    }

    #[test]
    fn test_same_changes_debit_first_pass() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        let forest = vec![
            AccountUpdate::new(victim.public_key(), token, -100),
            AccountUpdate::new(attacker, token, 100),
        ];

        approve(&service, &victim, forest).unwrap();
        assert_eq!(service.balance_of(&attacker).unwrap(), 100);
    }

    #[test]
    fn test_credit_hidden_in_child_before_parent_sibling_debit() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        // Pre-order visits the child credit before the sibling debit.
        let forest = vec![
            AccountUpdate::new(attacker, token, 0).with_child(AccountUpdate::new(attacker, token, 50)),
            AccountUpdate::new(victim.public_key(), token, -50),
        ];

        assert_eq!(
            approve(&service, &victim, forest),
            Err(TokenError::FlashMintDetected(50))
        );
    }

    #[test]
    fn test_net_burn_is_unbalanced() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        let forest = vec![
            AccountUpdate::new(victim.public_key(), token, -100),
            AccountUpdate::new(attacker, token, 60),
        ];

        assert_eq!(
            approve(&service, &victim, forest),
            Err(TokenError::UnbalancedTransaction(-40))
        );
        assert_eq!(service.balance_of(&victim.public_key()).unwrap(), 200);
    }

    #[test]
    fn test_circulation_account_cannot_fund_a_batch() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        let forest = vec![
            AccountUpdate::new(service.contract(), token, -100),
            AccountUpdate::new(attacker, token, 100),
        ];

        assert_eq!(
            approve(&service, &victim, forest),
            Err(TokenError::CirculationAccountMisuse)
        );
        assert_eq!(service.circulating().unwrap(), 200);
    }

    #[test]
    fn test_other_token_changes_are_ignored() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        // Native-token node is not part of this token's accounting.
        let forest = vec![
            AccountUpdate::new(attacker, TokenId::NATIVE, 1_000),
            AccountUpdate::new(victim.public_key(), token, -10),
            AccountUpdate::new(attacker, token, 10),
        ];

        approve(&service, &victim, forest).unwrap();
        assert_eq!(service.balance_of(&attacker).unwrap(), 10);
        assert_eq!(
            service.ledger().balance(&attacker, TokenId::NATIVE).unwrap(),
            0
        );
    }

    #[test]
    fn test_oversized_forest_rejected() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        let forest: AccountUpdateForest = (0..65)
            .map(|_| AccountUpdate::new(attacker, token, 0))
            .collect();

        assert_eq!(
            approve(&service, &victim, forest),
            Err(TokenError::ForestTooLarge { max: 64 })
        );
    }

    #[test]
    fn test_rejected_batch_publishes_nothing() {
        let (service, victim, attacker) = funded();
        let token = service.token_id();
        service.event_sink().drain();

        let forest = vec![
            AccountUpdate::new(attacker, token, 1),
            AccountUpdate::new(victim.public_key(), token, -1),
        ];
        assert!(approve(&service, &victim, forest).is_err());
        assert!(service.event_sink().is_empty());
    }
}
