use kcdsa25519::curve::{clamp, keygen, scalar_mult};
use kcdsa25519::wallet::KeyPair;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_scalar_mult(c: &mut Criterion) {
    let mut k = [0x42u8; 32];
    clamp(&mut k);

    c.bench_function("scalar_mult base point", |b| {
        b.iter(|| scalar_mult(black_box(&k), None))
    });
}

pub fn bench_keygen(c: &mut Criterion) {
    let seed = [0x24u8; 32];

    c.bench_function("keygen", |b| b.iter(|| keygen(black_box(&seed))));
}

pub fn bench_sign(c: &mut Criterion) {
    let keypair = KeyPair::from_passphrase("benchmark passphrase").unwrap();
    let message = [0u8; 64];

    c.bench_function("wallet sign 64 bytes", |b| {
        b.iter(|| keypair.sign(black_box(&message)))
    });
}

pub fn bench_verify(c: &mut Criterion) {
    let keypair = KeyPair::from_passphrase("benchmark passphrase").unwrap();
    let message = [0u8; 64];
    let signature = keypair.sign(&message).unwrap();
    let public = keypair.public_key();

    c.bench_function("wallet verify 64 bytes", |b| {
        b.iter(|| public.verify(black_box(&signature), black_box(&message)))
    });
}

criterion_group!(
    benches,
    bench_scalar_mult,
    bench_keygen,
    bench_sign,
    bench_verify
);
criterion_main!(benches);
