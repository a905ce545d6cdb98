//! # Token Engine Benchmarks
//!
//! | Component | Operation | Target |
//! |-----------|-----------|--------|
//! | Packed codec | decode + splice one sub-field | < 1μs |
//! | Policy | authorize one amount | < 100ns |
//! | Registry | set + in-sync lookup | < 50μs |
//! | Approval pass | 64-node forest | < 50μs |
//! | Facade | signed mint end to end | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ftg_token_engine::prelude::*;
use rand::Rng;
use std::time::Duration;

// ============================================================================
// Packed codec and policy
// ============================================================================

fn bench_packed_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("packed-codec");

    let configs = TokenConfigs {
        amount: AmountConfigs {
            mint: AmountConfig::fixed(false),
            burn: AmountConfig::ranged(true),
        },
        mint_params: AmountParams::new(200, 0, 0),
        burn_params: AmountParams::new(0, 1, 1_000_000),
        dynamic_proof: DynamicProofConfigs::default(),
    };
    let packed = configs.encode().expect("valid configs");

    group.bench_function("encode", |b| b.iter(|| black_box(configs.encode())));
    group.bench_function("decode", |b| {
        b.iter(|| black_box(TokenConfigs::decode(black_box(&packed))))
    });
    group.bench_function("splice_dynamic_proof_config", |b| {
        b.iter(|| {
            black_box(
                packed.with_dynamic_proof_config(OperationKey::Transfer, DynamicProofConfig::strict()),
            )
        })
    });
    group.bench_function("flip_config_flag", |b| {
        b.iter(|| {
            let mint = packed.amount_configs().mint.with_flag(FlagType::RangedAmount, true);
            black_box(packed.with_amount_config(OperationType::Mint, mint))
        })
    });

    let mut rng = rand::thread_rng();
    let amounts: Vec<u64> = (0..1_000).map(|_| rng.gen_range(0..2_000_000)).collect();
    group.throughput(Throughput::Elements(amounts.len() as u64));
    group.bench_function("authorize_ranged_1000", |b| {
        let burn = packed.amount_configs().burn;
        let params = packed.params(OperationType::Burn);
        b.iter(|| {
            amounts
                .iter()
                .filter(|amount| authorize(OperationKey::Burn, &burn, &params, **amount, false).is_ok())
                .count()
        })
    });

    group.finish();
}

// ============================================================================
// Verification-key registry
// ============================================================================

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("vk-registry");

    let vk = VerificationKey::new(b"bench-circuit".to_vec()).expect("vk");
    let (registry, map) = OperationKey::ALL
        .iter()
        .try_fold(
            (VkRegistry::empty(), SparseMerkleMap::new()),
            |(registry, map), key| registry.set(*key, vk.hash(), &map),
        )
        .expect("register all keys");

    group.bench_function("set", |b| {
        b.iter(|| black_box(registry.set(OperationKey::Transfer, vk.hash(), &map)))
    });
    group.bench_function("get", |b| {
        b.iter(|| black_box(registry.get(OperationKey::Mint, &map)))
    });
    group.bench_function("in_sync", |b| b.iter(|| black_box(registry.in_sync(&map))));

    group.finish();
}

// ============================================================================
// Batch approval pass
// ============================================================================

fn bench_approval(c: &mut Criterion) {
    let mut group = c.benchmark_group("approval-pass");
    group.measurement_time(Duration::from_secs(5));

    let contract = PublicKey::new([0xC0; 32]);
    let token_id = TokenId::derive(&contract, TokenId::NATIVE);
    let ctx = ApprovalContext {
        token_id,
        circulation_account: contract,
        max_nodes: 1_024,
    };

    for pairs in [4_usize, 32, 256] {
        // Flat forest of debit/credit pairs.
        let flat: AccountUpdateForest = (0..pairs)
            .flat_map(|i| {
                let tag = u8::try_from(i % 200).unwrap_or(0);
                [
                    AccountUpdate::new(PublicKey::new([tag; 32]), token_id, -10),
                    AccountUpdate::new(PublicKey::new([tag.wrapping_add(1); 32]), token_id, 10),
                ]
            })
            .collect();

        // Same changes as one deep chain.
        let deep = (0..pairs * 2).rev().fold(None, |child: Option<AccountUpdate>, i| {
            let change = if i % 2 == 0 { -10 } else { 10 };
            let node = AccountUpdate::new(PublicKey::new([1; 32]), token_id, change);
            Some(match child {
                Some(child) => node.with_child(child),
                None => node,
            })
        });
        let deep: AccountUpdateForest = deep.into_iter().collect();

        group.throughput(Throughput::Elements((pairs * 2) as u64));
        group.bench_with_input(BenchmarkId::new("flat", pairs * 2), &flat, |b, forest| {
            b.iter(|| black_box(approve_forest(forest, &ctx)))
        });
        group.bench_with_input(BenchmarkId::new("nested", pairs * 2), &deep, |b, forest| {
            b.iter(|| black_box(approve_forest(forest, &ctx)))
        });
    }

    group.finish();
}

// ============================================================================
// Facade
// ============================================================================

fn bench_facade(c: &mut Criterion) {
    let mut group = c.benchmark_group("facade");

    let admin = LocalSigner::from_seed([0xAD; 32]);
    let recipient = PublicKey::new([0x11; 32]);
    let service = create_test_service();
    service
        .initialize(InitializeParams {
            admin: admin.public_key(),
            decimals: 9,
            configs: TokenConfigs {
                amount: AmountConfigs {
                    mint: AmountConfig::fixed(false),
                    burn: AmountConfig::ranged(true),
                },
                mint_params: AmountParams::new(1, 0, 0),
                burn_params: AmountParams::new(0, 1, 1),
                dynamic_proof: DynamicProofConfigs::default(),
            },
        })
        .expect("initialize");

    group.bench_function("signed_mint", |b| {
        b.iter(|| {
            let version = service.contract_state().expect("state").version;
            let call = TokenCall::Mint {
                recipient,
                amount: 1,
            };
            let auth = admin
                .authorize(CallAuthorization::none(), &call, &service.contract(), version)
                .expect("sign");
            black_box(service.mint(recipient, 1, &auth))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_packed_codec,
    bench_registry,
    bench_approval,
    bench_facade
);
criterion_main!(benches);
