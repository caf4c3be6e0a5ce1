//! # Concurrent Verification
//!
//! One engine instance is shared by every request worker. Verdicts must not
//! depend on interleaving, and the intermediate key cache must stay coherent
//! while keys expire underneath running workers.

#[cfg(test)]
mod tests {
    use super::super::{fixture_request, fixture_service, NOW};
    use parking_lot::Mutex;
    use pc_signature_verification::testing::{fixture, CountingVerifier, ResponseSigner};
    use pc_signature_verification::{
        FixedTimeSource, ResponseVerificationApi, ResponseVerificationService, VerificationMode,
        VerificationPolicy, VerificationResult,
    };
    use shared_crypto::Ed25519Verifier;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    const WORKERS: usize = 8;
    const ROUNDS: usize = 50;

    #[test]
    fn test_shared_engine_gives_stable_verdicts() {
        let (service, _) = fixture_service(VerificationPolicy::Enforced);
        let tampered = fixture::BODY.replace("user-42", "user-99");

        thread::scope(|scope| {
            for worker in 0..WORKERS {
                let service = &service;
                let tampered = tampered.as_str();
                scope.spawn(move || {
                    for round in 0..ROUNDS {
                        if (worker + round) % 2 == 0 {
                            assert_eq!(
                                service.verify_response(&fixture_request()),
                                VerificationResult::Verified
                            );
                        } else {
                            assert_eq!(
                                service.verify_response(&fixture_request().with_body(tampered)),
                                VerificationResult::Failed
                            );
                        }
                    }
                });
            }
        });

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.total(), (WORKERS * ROUNDS) as u64);
        assert_eq!(snapshot.verified, snapshot.failed);
    }

    #[test]
    fn test_cold_cache_race_bounds_root_checks() {
        let signer = ResponseSigner::default();
        let root = Arc::new(CountingVerifier::new(Arc::new(
            Ed25519Verifier::new(&signer.root_public_key()).unwrap(),
        )));
        let mode = VerificationMode::from_policy(
            VerificationPolicy::Enforced,
            root.clone(),
            Arc::new(FixedTimeSource::new(NOW)),
        );
        let service = ResponseVerificationService::new(mode, false);

        thread::scope(|scope| {
            for _ in 0..WORKERS {
                scope.spawn(|| {
                    for _ in 0..ROUNDS {
                        assert_eq!(
                            service.verify_response(&fixture_request()),
                            VerificationResult::Verified
                        );
                    }
                });
            }
        });

        // Racing workers may each validate the cold key once, never more.
        assert!(root.calls() >= 1);
        assert!(root.calls() <= WORKERS);

        let snapshot = service.metrics().snapshot();
        assert_eq!(
            snapshot.cache_hits + snapshot.cache_misses,
            (WORKERS * ROUNDS) as u64
        );
        assert_eq!(snapshot.cache_misses as usize, root.calls());
    }

    #[test]
    fn test_expiry_while_workers_run() {
        let (service, clock) = fixture_service(VerificationPolicy::Enforced);
        let signer = ResponseSigner::default().with_expiration((NOW + 10) as u32);
        let header = signer.sign_base64(
            fixture::NONCE,
            fixture::PATH,
            fixture::BODY,
            fixture::REQUEST_TIME,
        );
        let seen = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for _ in 0..WORKERS {
                scope.spawn(|| {
                    for _ in 0..ROUNDS {
                        let result =
                            service.verify_response(&fixture_request().with_signature(&header));
                        seen.lock().push(result);
                    }
                });
            }
            scope.spawn(|| clock.advance(10));
        });

        let seen = seen.into_inner();
        assert_eq!(seen.len(), WORKERS * ROUNDS);
        assert!(seen.iter().all(|r| *r != VerificationResult::NotRequested));

        // Once the clock has passed the expiration, the key is gone for good.
        assert_eq!(
            service.verify_response(&fixture_request().with_signature(&header)),
            VerificationResult::Failed
        );
    }

    #[test]
    fn test_concurrent_nonces_are_unique() {
        let (service, _) = fixture_service(VerificationPolicy::Disabled);
        let nonces = Mutex::new(HashSet::new());

        thread::scope(|scope| {
            for _ in 0..WORKERS {
                scope.spawn(|| {
                    for _ in 0..ROUNDS {
                        let nonce = service.create_random_nonce();
                        assert!(nonces.lock().insert(nonce));
                    }
                });
            }
        });

        assert_eq!(nonces.into_inner().len(), WORKERS * ROUNDS);
    }
}
