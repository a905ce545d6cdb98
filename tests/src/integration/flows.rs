//! # Integration Test Flows
//!
//! End-to-end runs through the token facade with the in-memory ledger, the
//! recording event sink and the commitment proof system.
//!
//! ## Flows Tested:
//!
//! 1. **Fixed-amount mint**: exact amount with admin signature only
//! 2. **Proof-gated transfer**: snapshot balance drift against the match flags
//! 3. **Admin lifecycle**: reconfigure, hand over, old admin locked out
//! 4. **Supply accounting**: circulating supply tracks mint and burn

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ftg_token_engine::prelude::*;

    // =============================================================================
    // FIXED-AMOUNT MINT
    // =============================================================================

    #[test]
    fn test_fixed_mint_accepts_exact_amount_with_admin_signature() {
        let service = service();
        let recipient = holder(0x11).public_key();

        mint_200(&service, recipient);

        assert_eq!(service.balance_of(&recipient).unwrap(), 200);
        assert_eq!(service.circulating().unwrap(), 200);
        assert_eq!(
            service.event_sink().names(),
            vec!["Initialization", "Mint", "BalanceChange"]
        );
    }

    #[test]
    fn test_fixed_mint_rejects_other_amounts() {
        let service = service();
        let recipient = holder(0x11).public_key();

        for amount in [199, 201] {
            let call = TokenCall::Mint { recipient, amount };
            let auth = sign(&service, &[&admin()], &call);
            assert_eq!(
                service.mint(recipient, amount, &auth),
                Err(TokenError::NotAuthorized {
                    operation: OperationKey::Mint,
                    amount
                })
            );
        }
        assert_eq!(service.balance_of(&recipient).unwrap(), 0);
    }

    #[test]
    fn test_fixed_mint_without_admin_signature_is_unauthorized() {
        let service = service();
        let recipient = holder(0x11).public_key();
        let call = TokenCall::Mint {
            recipient,
            amount: 200,
        };
        // Signed, but by the recipient rather than the admin.
        let auth = sign(&service, &[&holder(0x11)], &call);

        assert_eq!(
            service.mint(recipient, 200, &auth),
            Err(TokenError::Unauthorized)
        );
        assert_eq!(service.event_sink().names(), vec!["Initialization"]);
        assert_eq!(service.stats().operations_rejected, 1);
    }

    #[test]
    fn test_open_ranged_mint_needs_no_signature() {
        let mut configs = default_configs();
        configs.amount.mint = AmountConfig::ranged(true);
        configs.mint_params = AmountParams::new(0, 10, 20);
        let service = service_with(configs);
        let recipient = holder(0x11).public_key();

        for amount in [10, 20] {
            service
                .mint(recipient, amount, &CallAuthorization::none())
                .unwrap();
        }
        for amount in [9, 21] {
            assert!(matches!(
                service.mint(recipient, amount, &CallAuthorization::none()),
                Err(TokenError::NotAuthorized { .. })
            ));
        }
        assert_eq!(service.balance_of(&recipient).unwrap(), 30);
    }

    // =============================================================================
    // PROOF-GATED TRANSFER
    // =============================================================================

    struct TransferSetup {
        service: TestService,
        sender: LocalSigner,
        receiver: PublicKey,
        prover: Prover,
        map: SparseMerkleMap,
    }

    fn proof_gated_transfer() -> TransferSetup {
        let service = service();
        let sender = holder(0x21);
        let receiver = holder(0x22).public_key();
        service.ledger().set_account(
            sender.public_key(),
            TokenId::NATIVE,
            AccountState {
                balance: 1_000,
                nonce: 4,
            },
        );
        mint_200(&service, sender.public_key());

        let prover = prover("transfer-circuit");
        let map = register_vk(
            &service,
            OperationKey::Transfer,
            prover.verification_key(),
            &SparseMerkleMap::new(),
        );
        set_proof_config(&service, OperationKey::Transfer, DynamicProofConfig::strict());

        TransferSetup {
            service,
            sender,
            receiver,
            prover,
            map,
        }
    }

    fn transfer_with(setup: &TransferSetup, proof: &TokenProof) -> Result<(), TokenError> {
        let from = setup.sender.public_key();
        let call = TokenCall::Transfer {
            from,
            to: setup.receiver,
            amount: 50,
        };
        let auth = sign_with_proof(&setup.service, &[&setup.sender], &call, proof);
        setup.service.transfer_with_proof(
            from,
            setup.receiver,
            50,
            &auth,
            ProofBundle {
                proof,
                vk: setup.prover.verification_key(),
                vk_map: &setup.map,
            },
        )
    }

    #[test]
    fn test_fresh_proof_transfers() {
        let setup = proof_gated_transfer();
        let proof = snapshot_proof(&setup.service, &setup.prover, setup.sender.public_key());

        transfer_with(&setup, &proof).unwrap();

        assert_eq!(setup.service.balance_of(&setup.receiver).unwrap(), 50);
        assert_eq!(setup.service.stats().proofs_checked, 1);
        assert_eq!(setup.service.proof_system().verifications_performed(), 1);
    }

    #[test]
    fn test_native_balance_drift_rejected_then_accepted_when_relaxed() {
        let setup = proof_gated_transfer();
        let sender = setup.sender.public_key();
        let proof = snapshot_proof(&setup.service, &setup.prover, sender);

        setup.service.ledger().set_account(
            sender,
            TokenId::NATIVE,
            AccountState {
                balance: 999,
                nonce: 4,
            },
        );
        assert_eq!(
            transfer_with(&setup, &proof),
            Err(TokenError::BalanceMismatch {
                kind: AccountKind::Native,
                snapshot: 1_000,
                current: 999
            })
        );
        assert_eq!(setup.service.balance_of(&setup.receiver).unwrap(), 0);

        let relaxed = DynamicProofConfig {
            require_mina_balance_match: false,
            ..DynamicProofConfig::strict()
        };
        set_proof_config(&setup.service, OperationKey::Transfer, relaxed);

        transfer_with(&setup, &proof).unwrap();
        assert_eq!(setup.service.balance_of(&setup.receiver).unwrap(), 50);
    }

    #[test]
    fn test_plain_transfer_rejected_while_proof_required() {
        let setup = proof_gated_transfer();
        let from = setup.sender.public_key();
        let call = TokenCall::Transfer {
            from,
            to: setup.receiver,
            amount: 50,
        };
        let auth = sign(&setup.service, &[&setup.sender], &call);

        assert_eq!(
            setup.service.transfer(from, setup.receiver, 50, &auth),
            Err(TokenError::ProofRequired(OperationKey::Transfer))
        );
    }

    #[test]
    fn test_disabled_proof_config_skips_verification() {
        let setup = proof_gated_transfer();
        set_proof_config(
            &setup.service,
            OperationKey::Transfer,
            DynamicProofConfig::disabled(),
        );
        // A proof about somebody else still goes through when verification is off.
        let proof = snapshot_proof(&setup.service, &setup.prover, setup.receiver);

        transfer_with(&setup, &proof).unwrap();
        assert_eq!(setup.service.stats().proofs_checked, 0);
        assert_eq!(setup.service.proof_system().verifications_performed(), 0);
    }

    // =============================================================================
    // ADMIN LIFECYCLE
    // =============================================================================

    #[test]
    fn test_reconfigure_and_hand_over_admin() {
        let service = service();
        let next_admin = holder(0x31);
        let recipient = holder(0x32).public_key();

        let call = TokenCall::UpdateAmountValue {
            operation: OperationType::Mint,
            parameter: ParameterType::FixedAmount,
            value: 500,
        };
        let auth = sign(&service, &[&admin()], &call);
        service.update_amount_value(1, 0, 500, &auth).unwrap();
        assert_eq!(service.configs().unwrap().mint_params.fixed_amount, 500);

        let call = TokenCall::SetAdmin {
            new_admin: next_admin.public_key(),
        };
        let auth = sign(&service, &[&admin()], &call);
        service.set_admin(next_admin.public_key(), &auth).unwrap();

        let call = TokenCall::Mint {
            recipient,
            amount: 500,
        };
        let old = sign(&service, &[&admin()], &call);
        assert_eq!(
            service.mint(recipient, 500, &old),
            Err(TokenError::Unauthorized)
        );
        let new = sign(&service, &[&next_admin], &call);
        service.mint(recipient, 500, &new).unwrap();
        assert_eq!(service.balance_of(&recipient).unwrap(), 500);

        let names = service.event_sink().names();
        assert!(names.contains(&"AmountValueUpdate"));
        assert!(names.contains(&"SetAdmin"));
    }

    #[test]
    fn test_invalid_config_update_leaves_state_untouched() {
        let service = service();
        let before = service.contract_state().unwrap();

        let bad = AmountConfig {
            unauthorized: false,
            fixed_amount: true,
            ranged_amount: true,
        };
        let call = TokenCall::UpdateAmountConfig {
            operation: OperationType::Burn,
            config: bad,
        };
        let auth = sign(&service, &[&admin()], &call);
        assert!(matches!(
            service.update_burn_config(bad, &auth),
            Err(TokenError::ConfigInvalid(_))
        ));
        assert_eq!(service.contract_state().unwrap(), before);
    }

    // =============================================================================
    // SUPPLY ACCOUNTING
    // =============================================================================

    #[test]
    fn test_circulating_supply_tracks_mint_and_burn() {
        let service = service();
        let alice = holder(0x41);
        let bob = holder(0x42);
        mint_200(&service, alice.public_key());
        mint_200(&service, bob.public_key());

        let call = TokenCall::Burn {
            from: alice.public_key(),
            amount: 75,
        };
        let auth = sign(&service, &[&alice], &call);
        service.burn(alice.public_key(), 75, &auth).unwrap();

        let total =
            service.balance_of(&alice.public_key()).unwrap() + service.balance_of(&bob.public_key()).unwrap();
        assert_eq!(service.circulating().unwrap(), 325);
        assert_eq!(total, 325);
    }

    #[test]
    fn test_batch_transfer_between_holders() {
        let service = service();
        let alice = holder(0x51);
        let bob = holder(0x52);
        let carol = holder(0x53).public_key();
        mint_200(&service, alice.public_key());
        mint_200(&service, bob.public_key());

        let token = service.token_id();
        let forest = vec![
            AccountUpdate::new(alice.public_key(), token, -120)
                .with_child(AccountUpdate::new(carol, token, 100)),
            AccountUpdate::new(bob.public_key(), token, -30),
            AccountUpdate::new(carol, token, 50),
        ];
        let call = TokenCall::ApproveBase {
            forest: forest.clone(),
        };
        let auth = sign(&service, &[&alice, &bob], &call);
        service.approve_base(&forest, &auth).unwrap();

        assert_eq!(service.balance_of(&alice.public_key()).unwrap(), 80);
        assert_eq!(service.balance_of(&bob.public_key()).unwrap(), 170);
        assert_eq!(service.balance_of(&carol).unwrap(), 150);
        assert_eq!(service.circulating().unwrap(), 400);
    }
}
