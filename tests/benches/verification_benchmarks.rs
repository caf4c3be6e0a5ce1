//! # Purchases-Core Verification Benchmarks
//!
//! | Path | Work |
//! |------|------|
//! | cold cache | base64 decode, 2 Ed25519 verifications |
//! | warm cache | base64 decode, 1 Ed25519 verification |
//! | malformed | base64 decode only |

use criterion::{criterion_group, criterion_main};
use pc_tests::benchmarks::{bench_body_sizes, bench_signature_codec, bench_verify_response};

criterion_group!(
    benches,
    bench_verify_response,
    bench_body_sizes,
    bench_signature_codec,
);

criterion_main!(benches);
