//! # Verification Benchmarks
//!
//! Hot path costs of the engine:
//! - Cold verification: root check + payload check (two Ed25519 verifications)
//! - Warm verification: cached intermediate key, payload check only
//! - Rejection of malformed headers before any signature math

use std::sync::Arc;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use pc_signature_verification::testing::fixture;
use pc_signature_verification::{
    FixedTimeSource, ResponseVerificationApi, ResponseVerificationRequest,
    ResponseVerificationService, Signature, SigningConfig, VerificationPolicy,
};

use crate::integration::NOW;

fn engine() -> ResponseVerificationService {
    let config = SigningConfig::new(VerificationPolicy::Enforced)
        .with_root_public_key(fixture::ROOT_PUBLIC_KEY);
    let clock = Arc::new(FixedTimeSource::new(NOW));
    ResponseVerificationService::from_config_with_time(&config, clock)
        .unwrap_or_else(|e| panic!("fixture config must be valid: {e}"))
}

fn request<'a>() -> ResponseVerificationRequest<'a> {
    ResponseVerificationRequest::new(fixture::PATH, 200, fixture::NONCE)
        .with_signature(fixture::SIGNATURE)
        .with_body(fixture::BODY)
        .with_request_time(fixture::REQUEST_TIME)
}

pub fn bench_verify_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc/verify_response");

    group.bench_function("cold_cache", |b| {
        b.iter_batched(
            engine,
            |service| black_box(service.verify_response(&request())),
            criterion::BatchSize::SmallInput,
        )
    });

    let warm = engine();
    warm.verify_response(&request());
    group.bench_function("warm_cache", |b| {
        b.iter(|| black_box(warm.verify_response(black_box(&request()))))
    });

    group.bench_function("malformed_header", |b| {
        let bad = request().with_signature("AAAA");
        b.iter(|| black_box(warm.verify_response(black_box(&bad))))
    });

    group.finish();
}

pub fn bench_body_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc/body_size");
    let warm = engine();
    warm.verify_response(&request());

    for size in [256usize, 4 * 1024, 64 * 1024] {
        let body = "x".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("warm_failed", size), &body, |b, body| {
            b.iter(|| black_box(warm.verify_response(&request().with_body(body))))
        });
    }

    group.finish();
}

pub fn bench_signature_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("pc/signature");

    group.bench_function("parse", |b| {
        b.iter(|| black_box(Signature::parse(black_box(fixture::SIGNATURE))))
    });

    group.bench_function("nonce", |b| b.iter(shared_crypto::create_random_nonce));

    group.finish();
}
