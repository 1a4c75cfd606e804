use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dbls_sign::{aggregate_signatures, verify, verify_batch, Key};
use dbls_tests::{g2_signature_vectors, verify_vectors};

fn bench_fixture_verification(c: &mut Criterion) {
    let cases: Vec<_> = verify_vectors()
        .iter()
        .map(|v| (v.signature, v.message().unwrap(), v.public_key))
        .collect();

    c.bench_function("verify all fixture cases", |b| {
        b.iter(|| {
            for (sig, message, pk) in &cases {
                black_box(verify(sig, message, pk).unwrap());
            }
        })
    });

    let vectors = g2_signature_vectors();
    let messages: Vec<Vec<u8>> = vectors.iter().map(|v| v.message().unwrap()).collect();
    let public_keys: Vec<Key> = vectors.iter().map(|v| v.public_key.unwrap()).collect();
    let signatures: Vec<Key> = vectors.iter().map(|v| v.signature).collect();
    let aggregate = aggregate_signatures(&signatures).unwrap();

    c.bench_function("verify_batch over fixture signatures", |b| {
        b.iter(|| black_box(verify_batch(&aggregate, &messages, &public_keys).unwrap()))
    });
}

criterion_group!(benches, bench_fixture_verification);
criterion_main!(benches);
