//! # Registry Desync
//!
//! The verification-key map lives off-chain; only its root is stored. A
//! caller holding an old copy of the map could otherwise present a key that
//! was registered once and later replaced. Every lookup first checks the
//! supplied map against the stored root.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ftg_token_engine::prelude::*;

    struct Setup {
        service: TestService,
        recipient: PublicKey,
        old_prover: Prover,
        old_map: SparseMerkleMap,
        new_prover: Prover,
        new_map: SparseMerkleMap,
    }

    /// Mint is proof-gated; its key was rotated once.
    fn rotated() -> Setup {
        let service = service();
        let recipient = holder(0x71).public_key();
        let old_prover = prover("mint-v1");
        let new_prover = prover("mint-v2");

        let old_map = register_vk(
            &service,
            OperationKey::Mint,
            old_prover.verification_key(),
            &SparseMerkleMap::new(),
        );
        let new_map = register_vk(
            &service,
            OperationKey::Mint,
            new_prover.verification_key(),
            &old_map,
        );
        set_proof_config(&service, OperationKey::Mint, DynamicProofConfig::strict());

        Setup {
            service,
            recipient,
            old_prover,
            old_map,
            new_prover,
            new_map,
        }
    }

    fn mint_with(setup: &Setup, prover: &Prover, map: &SparseMerkleMap) -> Result<(), TokenError> {
        let proof = snapshot_proof(&setup.service, prover, setup.recipient);
        let call = TokenCall::Mint {
            recipient: setup.recipient,
            amount: 200,
        };
        let auth = sign_with_proof(&setup.service, &[&admin()], &call, &proof);
        setup.service.mint_with_proof(
            setup.recipient,
            200,
            &auth,
            ProofBundle {
                proof: &proof,
                vk: prover.verification_key(),
                vk_map: map,
            },
        )
    }

    #[test]
    fn test_current_key_and_map_accepted() {
        let setup = rotated();
        mint_with(&setup, &setup.new_prover, &setup.new_map).unwrap();
        assert_eq!(setup.service.balance_of(&setup.recipient).unwrap(), 200);
    }

    #[test]
    fn test_plain_admin_signature_does_not_authorize_proof_mint() {
        let setup = rotated();
        let proof = snapshot_proof(&setup.service, &setup.new_prover, setup.recipient);
        let call = TokenCall::Mint {
            recipient: setup.recipient,
            amount: 200,
        };
        let plain = sign(&setup.service, &[&admin()], &call);

        let result = setup.service.mint_with_proof(
            setup.recipient,
            200,
            &plain,
            ProofBundle {
                proof: &proof,
                vk: setup.new_prover.verification_key(),
                vk_map: &setup.new_map,
            },
        );
        assert_eq!(result, Err(TokenError::Unauthorized));
        assert_eq!(setup.service.balance_of(&setup.recipient).unwrap(), 0);
    }

    #[test]
    fn test_retired_key_with_stale_map_rejected() {
        let setup = rotated();
        assert_eq!(
            mint_with(&setup, &setup.old_prover, &setup.old_map),
            Err(TokenError::RegistryOutOfSync)
        );
        assert_eq!(setup.service.balance_of(&setup.recipient).unwrap(), 0);
    }

    #[test]
    fn test_retired_key_with_current_map_rejected() {
        let setup = rotated();
        assert_eq!(
            mint_with(&setup, &setup.old_prover, &setup.new_map),
            Err(TokenError::VerificationKeyMismatch(OperationKey::Mint))
        );
    }

    #[test]
    fn test_forged_map_with_matching_entry_rejected() {
        let setup = rotated();
        // Attacker builds their own map that maps Mint to a key they control.
        let rogue = prover("rogue");
        let mut forged = SparseMerkleMap::new();
        forged
            .set(OperationKey::Mint.as_u64(), rogue.verification_key().hash())
            .unwrap();

        assert_eq!(
            mint_with(&setup, &rogue, &forged),
            Err(TokenError::RegistryOutOfSync)
        );
    }

    #[test]
    fn test_unregistered_operation_rejected() {
        let setup = rotated();
        set_proof_config(&setup.service, OperationKey::Burn, DynamicProofConfig::strict());

        let from = holder(0x72);
        setup.service.ledger().set_account(
            from.public_key(),
            setup.service.token_id(),
            AccountState {
                balance: 200,
                nonce: 0,
            },
        );
        let burn_prover = prover("burn");
        let proof = snapshot_proof(&setup.service, &burn_prover, from.public_key());
        let call = TokenCall::Burn {
            from: from.public_key(),
            amount: 10,
        };
        let auth = sign_with_proof(&setup.service, &[&from], &call, &proof);

        let result = setup.service.burn_with_proof(
            from.public_key(),
            10,
            &auth,
            ProofBundle {
                proof: &proof,
                vk: burn_prover.verification_key(),
                vk_map: &setup.new_map,
            },
        );
        assert_eq!(result, Err(TokenError::MissingVerificationKey(OperationKey::Burn)));
    }

    #[test]
    fn test_registry_update_with_stale_map_rejected() {
        let setup = rotated();
        let root = setup.service.contract_state().unwrap().vk_registry.root();
        let call = TokenCall::UpdateSideLoadedVKeyHash {
            operation: OperationKey::Transfer,
            vk_hash: setup.old_prover.verification_key().hash(),
        };
        let auth = sign(&setup.service, &[&admin()], &call);

        let result = setup.service.update_side_loaded_vkey_hash(
            OperationKey::Transfer.as_u64(),
            setup.old_prover.verification_key(),
            &setup.old_map,
            &auth,
        );
        assert_eq!(result.map(|_| ()), Err(TokenError::RegistryOutOfSync));
        assert_eq!(
            setup.service.contract_state().unwrap().vk_registry.root(),
            root
        );
    }

    #[test]
    fn test_registry_events_carry_previous_key() {
        let setup = rotated();
        let updates: Vec<_> = setup
            .service
            .event_sink()
            .events()
            .into_iter()
            .filter_map(|event| match event {
                TokenEvent::SideLoadedVKeyUpdate { previous, vk_hash, .. } => {
                    Some((previous, vk_hash))
                }
                _ => None,
            })
            .collect();

        assert_eq!(
            updates,
            vec![
                (None, setup.old_prover.verification_key().hash()),
                (
                    Some(setup.old_prover.verification_key().hash()),
                    setup.new_prover.verification_key().hash()
                ),
            ]
        );
    }
}
