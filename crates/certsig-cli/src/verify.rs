//! # Verify Subcommand
//!
//! Runs a certificate document through the verification pipeline and
//! prints a one-line verdict.
//!
//! | Outcome  | Output                                  | Exit |
//! |----------|-----------------------------------------|------|
//! | Valid    | `OK: signature is valid`                | 0    |
//! | Invalid  | `FAIL: signature verification failed`   | 1    |
//! | Rejected | `REJECTED: <reason>`                    | 2    |

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use certsig_verify::VerificationOutcome;

use crate::config::CliConfig;
use crate::source::read_document;

/// Arguments for `certsig verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Certificate document to verify (`-` for stdin).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the verify subcommand. Returns the process exit code.
pub fn run_verify(args: &VerifyArgs, config: &CliConfig) -> Result<u8> {
    let bytes = read_document(&args.file, config.max_document_bytes)?;
    let outcome = certsig_verify::verify_slice(&bytes);
    println!("{}", render(&outcome));
    if let VerificationOutcome::Valid(report) = &outcome {
        tracing::info!(
            file = %args.file.display(),
            signer = %report.signer,
            fingerprint = %report.fingerprint,
            "verified"
        );
    }
    Ok(outcome.exit_code())
}

/// The verdict line for an outcome.
pub fn render(outcome: &VerificationOutcome) -> String {
    match outcome {
        VerificationOutcome::Valid(_) => "OK: signature is valid".to_string(),
        VerificationOutcome::Invalid => "FAIL: signature verification failed".to_string(),
        VerificationOutcome::Rejected(err) => format!("REJECTED: {err}"),
    }
}
