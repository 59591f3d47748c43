// Hashing & signing benchmarks for the operation pipeline.
//
// Covers keypair generation, fact construction (validation + canonical
// encoding + hashing), operation signing, and the wire projection at
// various batch sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use mitum_sdk::common::{Address, Amount, Token};
use mitum_sdk::fact::currency::{TransferFact, TransferItem};
use mitum_sdk::key::{Keypair, Keys, PubKey};
use mitum_sdk::operation::{NetworkId, Operation};

fn addr(seed: u8) -> Address {
    let keypair = Keypair::from_seed(&[seed; 32]);
    Keys::new(vec![PubKey::new(keypair.public_key(), 100).unwrap()], 100)
        .unwrap()
        .address()
}

fn items(count: usize) -> Vec<TransferItem> {
    (0..count)
        .map(|i| {
            TransferItem::new(
                addr(i as u8 + 100),
                vec![Amount::from_parts("1000", "PEN").unwrap()],
            )
            .unwrap()
        })
        .collect()
}

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("ed25519/keypair_generate", |b| {
        b.iter(Keypair::generate);
    });
}

fn bench_fact_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("fact/construct_and_hash");

    for size in [1usize, 10, 100] {
        let prepared = items(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &prepared, |b, prepared| {
            b.iter(|| {
                TransferFact::new(
                    Token::new("bench-token").unwrap(),
                    addr(1),
                    prepared.clone(),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_sign_operation(c: &mut Criterion) {
    let keypair = Keypair::generate();
    let fact =
        TransferFact::new(Token::new("bench-token").unwrap(), addr(1), items(1)).unwrap();

    c.bench_function("operation/sign", |b| {
        b.iter(|| {
            let mut operation =
                Operation::new(NetworkId::new("mitum").unwrap(), fact.clone());
            operation.sign(&keypair);
            operation
        });
    });
}

fn bench_wire_projection(c: &mut Criterion) {
    let keypair = Keypair::generate();
    let fact =
        TransferFact::new(Token::new("bench-token").unwrap(), addr(1), items(10)).unwrap();
    let mut operation = Operation::new(NetworkId::new("mitum").unwrap(), fact);
    operation.sign(&keypair);

    c.bench_function("operation/to_hinted_json", |b| {
        b.iter(|| operation.to_hinted_json());
    });
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_fact_construction,
    bench_sign_operation,
    bench_wire_projection,
);
criterion_main!(benches);
