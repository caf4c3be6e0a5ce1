//! # End-to-End Response Verification
//!
//! A signed response travels from the (simulated) backend signer to the
//! engine; any change to a signed input must flip the verdict to `FAILED`.

#[cfg(test)]
mod tests {
    use super::super::{fixture_request, fixture_service, NOW};
    use pc_signature_verification::testing::{fixture, ResponseSigner};
    use pc_signature_verification::{
        ResponseVerificationApi, ResponseVerificationRequest, Signature, VerificationError,
        VerificationPolicy, VerificationResult,
    };
    use proptest::prelude::*;

    // =========================================================================
    // CAPTURED RESPONSE
    // =========================================================================

    #[test]
    fn test_captured_response_verifies() {
        let (service, _) = fixture_service(VerificationPolicy::Enforced);

        assert_eq!(
            service.verify_response(&fixture_request()),
            VerificationResult::Verified
        );
    }

    #[test]
    fn test_captured_response_with_previous_millisecond_fails() {
        let (service, _) = fixture_service(VerificationPolicy::Enforced);
        let request = fixture_request().with_request_time("1677005916011");

        assert_eq!(
            service.verify_response(&request),
            VerificationResult::Failed
        );
    }

    #[test]
    fn test_fresh_signer_round_trip() {
        let (service, _) = fixture_service(VerificationPolicy::Enforced);
        let signer = ResponseSigner::default().with_salt([0xA5; 16]);
        let nonce = service.create_random_nonce();
        let body = r#"{"offerings":[]}"#;
        let header = signer.sign_base64(&nonce, "/v1/offerings", body, "1700000000123");

        let request = ResponseVerificationRequest::new("/v1/offerings", 200, &nonce)
            .with_signature(&header)
            .with_body(body)
            .with_request_time("1700000000123");

        assert_eq!(
            service.verify_response(&request),
            VerificationResult::Verified
        );
    }

    // =========================================================================
    // 304 NOT MODIFIED
    // =========================================================================

    #[test]
    fn test_not_modified_verifies_against_etag() {
        let (service, _) = fixture_service(VerificationPolicy::Informational);
        let etag = "W/\"5f3c\"";
        let header = ResponseSigner::default().sign_base64(
            fixture::NONCE,
            fixture::PATH,
            etag,
            fixture::REQUEST_TIME,
        );

        let request = ResponseVerificationRequest::new(fixture::PATH, 304, fixture::NONCE)
            .with_signature(&header)
            .with_etag(etag)
            .with_request_time(fixture::REQUEST_TIME);
        assert_eq!(
            service.verify_response(&request),
            VerificationResult::Verified
        );

        let request = request.with_etag("W/\"5f3d\"");
        assert_eq!(
            service.verify_response(&request),
            VerificationResult::Failed
        );
    }

    // =========================================================================
    // TRUST CHAIN
    // =========================================================================

    #[test]
    fn test_key_rotation_after_expiry() {
        let (service, clock) = fixture_service(VerificationPolicy::Enforced);
        let old = ResponseSigner::default().with_expiration((NOW + 60) as u32);
        let new = ResponseSigner::from_seeds([0x11; 32], [0x44; 32]);

        let sign = |signer: &ResponseSigner| {
            signer.sign_base64(
                fixture::NONCE,
                fixture::PATH,
                fixture::BODY,
                fixture::REQUEST_TIME,
            )
        };
        let old_header = sign(&old);
        let new_header = sign(&new);

        assert_eq!(
            service.verify_response(&fixture_request().with_signature(&old_header)),
            VerificationResult::Verified
        );

        clock.advance(60);

        assert_eq!(
            service.verify_response_detailed(&fixture_request().with_signature(&old_header)),
            Err(VerificationError::IntermediateKeyExpired {
                expiration: NOW + 60,
                now: NOW + 60,
            })
        );
        assert_eq!(
            service.verify_response(&fixture_request().with_signature(&new_header)),
            VerificationResult::Verified
        );
    }

    #[test]
    fn test_intermediate_key_swap_is_rejected() {
        let (service, _) = fixture_service(VerificationPolicy::Enforced);
        let rogue = ResponseSigner::from_seeds([0x11; 32], [0x55; 32]);
        let rogue_sig = Signature::parse(&rogue.sign_base64(
            fixture::NONCE,
            fixture::PATH,
            fixture::BODY,
            fixture::REQUEST_TIME,
        ))
        .unwrap();

        // Rogue intermediate key and payload, genuine root certificate.
        let mut spliced = Signature::parse(fixture::SIGNATURE).unwrap();
        spliced.intermediate_key = rogue_sig.intermediate_key;
        spliced.payload = rogue_sig.payload;
        let header = spliced.to_base64();

        assert_eq!(
            service.verify_response_detailed(&fixture_request().with_signature(&header)),
            Err(VerificationError::IntermediateKeyInvalid)
        );
    }

    // =========================================================================
    // TAMPERING (property-based)
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_any_flipped_signature_bit_fails(index in 0usize..180, bit in 0u8..8) {
            let (service, _) = fixture_service(VerificationPolicy::Enforced);
            let mut bytes = Signature::parse(fixture::SIGNATURE).unwrap().to_bytes();
            bytes[index] ^= 1 << bit;
            let header = Signature::from_bytes(&bytes).unwrap().to_base64();

            prop_assert_eq!(
                service.verify_response(&fixture_request().with_signature(&header)),
                VerificationResult::Failed
            );
        }

        #[test]
        fn prop_any_other_body_fails(body in ".{0,64}") {
            prop_assume!(body != fixture::BODY);
            let (service, _) = fixture_service(VerificationPolicy::Enforced);

            prop_assert_eq!(
                service.verify_response(&fixture_request().with_body(&body)),
                VerificationResult::Failed
            );
        }

        #[test]
        fn prop_garbage_headers_never_verify(header in "[A-Za-z0-9+/=]{0,300}") {
            let (service, _) = fixture_service(VerificationPolicy::Enforced);

            prop_assert_eq!(
                service.verify_response(&fixture_request().with_signature(&header)),
                VerificationResult::Failed
            );
        }
    }
}
