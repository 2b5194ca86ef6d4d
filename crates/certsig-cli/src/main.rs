//! # certsig CLI entry point
//!
//! Parses command-line arguments, loads configuration, initializes logging,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use certsig_cli::config::{CliConfig, LogFormat};
use certsig_cli::fingerprint::{run_fingerprint, FingerprintArgs};
use certsig_cli::verify::{run_verify, VerifyArgs};

/// Verify Ed25519 signatures on self-describing certificate documents.
#[derive(Parser, Debug)]
#[command(name = "certsig", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log line format (overrides the config file).
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Largest document accepted, in bytes (overrides the config file).
    #[arg(long, global = true)]
    max_document_bytes: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify the signature of a certificate document.
    Verify(VerifyArgs),

    /// Print SHA-512 fingerprints of a document's canonical payloads.
    Fingerprint(FingerprintArgs),
}

fn main() -> ExitCode {
    // Exit code 2 is reserved for rejected documents, so usage errors map to 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = CliConfig::load(cli.config.as_deref())
        .and_then(|c| c.with_overrides(cli.log_format, cli.max_document_bytes));

    let log_format = match &config {
        Ok(c) => c.log_format,
        Err(_) => cli.log_format.unwrap_or_default(),
    };
    init_tracing(cli.verbose, log_format);

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "certsig starting");

    let result = match &cli.command {
        Commands::Verify(args) => run_verify(args, &config),
        Commands::Fingerprint(args) => run_fingerprint(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins over the `-v` count when set.
fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
