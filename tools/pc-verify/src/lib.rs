//! PC-Verify: offline checker for signed backend responses.
//!
//! Takes a captured response (signature header, request nonce, path, body or
//! ETag, request time) and reports the verdict the SDK would reach.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use pc_signature_verification::{
    FixedTimeSource, ResponseVerificationRequest, ResponseVerificationService, SigningConfig,
    SystemTimeSource, TimeSource, VerificationPolicy, VerificationResult,
};

/// PC-Verify: response signature checker
#[derive(Parser, Debug)]
#[command(name = "pc-verify", version)]
#[command(about = "Verify Purchases-Core backend response signatures")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print fresh request nonces
    Nonce(NonceArgs),
    /// Verify one captured response
    Response(ResponseArgs),
}

#[derive(Args, Debug)]
pub struct NonceArgs {
    /// How many nonces to print
    #[arg(short, long, default_value = "1")]
    pub count: usize,
}

#[derive(Args, Debug)]
pub struct ResponseArgs {
    /// Logical request path that was signed
    #[arg(long)]
    pub path: String,

    /// Base64 `X-Signature` header value
    #[arg(long)]
    pub signature: String,

    /// Base64 nonce sent with the request
    #[arg(long)]
    pub nonce: String,

    /// `X-RevenueCat-Request-Time` header value
    #[arg(long)]
    pub request_time: String,

    /// Response body, inline
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Response body, read from a file
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// ETag of a 304 response
    #[arg(long)]
    pub etag: Option<String>,

    /// HTTP status code, for logging
    #[arg(long, default_value = "200")]
    pub status: u16,

    /// Verification mode
    #[arg(long, default_value = "enforced")]
    pub mode: VerificationPolicy,

    /// Base64 root public key (defaults to the compiled-in production key)
    #[arg(long, env = "PC_ROOT_PUBLIC_KEY")]
    pub root_key: Option<String>,

    /// Evaluate intermediate key expiration at this Unix time instead of now
    #[arg(long)]
    pub now: Option<u64>,

    /// Print the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

/// Verdict printed by `pc-verify response`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub result: VerificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Process exit code: only `FAILED` is an error.
    pub fn exit_code(&self) -> i32 {
        if self.result.is_failed() {
            1
        } else {
            0
        }
    }

    pub fn render(&self, json: bool) -> anyhow::Result<String> {
        if json {
            return serde_json::to_string(self).context("serializing report");
        }
        Ok(match &self.error {
            Some(error) => format!("{}: {}", self.result, error),
            None => self.result.to_string(),
        })
    }
}

pub fn nonces(args: &NonceArgs) -> anyhow::Result<Vec<String>> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    Ok((0..args.count)
        .map(|_| shared_crypto::create_random_nonce())
        .collect())
}

pub fn verify(args: &ResponseArgs) -> anyhow::Result<Report> {
    let body = match &args.body_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading body from {}", path.display()))?,
        ),
        None => args.body.clone(),
    };

    let mut config = SigningConfig::new(args.mode);
    if let Some(key) = &args.root_key {
        config = config.with_root_public_key(key.clone());
    }

    let time: Arc<dyn TimeSource> = match args.now {
        Some(now) => Arc::new(FixedTimeSource::new(now)),
        None => Arc::new(SystemTimeSource),
    };
    let service = ResponseVerificationService::from_config_with_time(&config, time)
        .context("building verification engine")?;

    let mut request = ResponseVerificationRequest::new(&args.path, args.status, &args.nonce)
        .with_signature(&args.signature)
        .with_request_time(&args.request_time);
    if let Some(body) = body.as_deref() {
        request = request.with_body(body);
    }
    if let Some(etag) = args.etag.as_deref() {
        request = request.with_etag(etag);
    }

    let span = pc_telemetry::verification_span!(args.path, status_code = args.status);
    let _enter = span.enter();

    let report = match service.verify_response_detailed(&request) {
        Ok(outcome) => Report {
            result: outcome.into(),
            reason: None,
            error: None,
        },
        Err(error) => Report {
            result: VerificationResult::Failed,
            reason: Some(error.reason()),
            error: Some(error.to_string()),
        },
    };
    Ok(report)
}
