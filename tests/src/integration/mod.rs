//! # Integration Tests
//!
//! Every test drives the engine through `ResponseVerificationApi`, the same
//! surface the HTTP layer uses.

pub mod concurrency;
pub mod e2e;

use std::sync::{Arc, OnceLock};

use pc_signature_verification::testing::fixture;
use pc_telemetry::{init_telemetry, TelemetryConfig, TelemetryGuard};
use pc_signature_verification::{
    FixedTimeSource, ResponseVerificationRequest, ResponseVerificationService, SigningConfig,
    VerificationPolicy,
};

/// Unix time used by the integration suite (2023-11-14).
pub const NOW: u64 = 1_700_000_000;

static LOGGING: OnceLock<Option<TelemetryGuard>> = OnceLock::new();

/// Render engine logs when `PC_LOG_LEVEL` asks for them.
pub fn init_test_logging() {
    LOGGING.get_or_init(|| {
        std::env::var("PC_LOG_LEVEL").ok()?;
        // A subscriber may already be installed by another harness.
        init_telemetry(TelemetryConfig::from_env()).ok()
    });
}

/// Engine trusting the fixture root key, with a clock the test controls.
pub fn fixture_service(
    policy: VerificationPolicy,
) -> (ResponseVerificationService, Arc<FixedTimeSource>) {
    init_test_logging();
    let clock = Arc::new(FixedTimeSource::new(NOW));
    let config = SigningConfig::new(policy).with_root_public_key(fixture::ROOT_PUBLIC_KEY);
    let service = ResponseVerificationService::from_config_with_time(&config, clock.clone())
        .unwrap_or_else(|e| panic!("fixture config must be valid: {e}"));
    (service, clock)
}

/// The captured fixture response, unchanged.
pub fn fixture_request<'a>() -> ResponseVerificationRequest<'a> {
    ResponseVerificationRequest::new(fixture::PATH, 200, fixture::NONCE)
        .with_signature(fixture::SIGNATURE)
        .with_body(fixture::BODY)
        .with_request_time(fixture::REQUEST_TIME)
}
