//! PC-Verify: Purchases-Core response signature checker
//!
//! Exit status is `0` for `VERIFIED` and `NOT_REQUESTED`, `1` for `FAILED`.

use std::process::ExitCode;

use clap::Parser;
use pc_telemetry::{init_telemetry, TelemetryConfig};
use pc_verify::{nonces, verify, Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Keep stdout for the verdict; logs go to stderr at warn unless asked otherwise.
    let mut telemetry = TelemetryConfig::from_env();
    if std::env::var("PC_LOG_LEVEL").is_err() && std::env::var("RUST_LOG").is_err() {
        telemetry = telemetry.with_log_level("warn");
    }
    let _guard = init_telemetry(telemetry)?;

    match cli.cmd {
        Command::Nonce(args) => {
            for nonce in nonces(&args)? {
                println!("{nonce}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Response(args) => {
            let report = verify(&args)?;
            println!("{}", report.render(args.json)?);
            Ok(ExitCode::from(report.exit_code() as u8))
        }
    }
}
