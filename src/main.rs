//! Command-line entry point for testcert.
//!
//! With no arguments, provisions `cert.pem` and `key.pem` into the home
//! directory and prints both paths.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use testcert::config::{DEFAULT_CERT_URL, ProvisionConfig};
use testcert::convert::{NativeConverter, OpensslCli};
use testcert::fetch::HttpFetcher;
use testcert::create_test_server_cert_and_key_with;

#[derive(Parser)]
#[command(name = "testcert")]
#[command(about = "Fetch the BankID test certificate and split it into cert.pem and key.pem")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Directory to write cert.pem and key.pem to (default: home directory)
    destination: Option<PathBuf>,

    /// PKCS#12 archive to download
    #[arg(long, default_value = DEFAULT_CERT_URL)]
    url: String,

    /// How to convert the archive to PEM
    #[arg(long, value_enum, default_value_t = ConverterKind::Openssl)]
    converter: ConverterKind,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConverterKind {
    /// The `openssl pkcs12` command
    Openssl,
    /// In-process PKCS#12 decoding
    Native,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok((cert_path, key_path)) => {
            println!("{}", cert_path.display());
            println!("{}", key_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(PathBuf, PathBuf)> {
    let destination = match cli.destination {
        Some(path) => path,
        None => dirs::home_dir().context("could not determine home directory")?,
    };

    let config = ProvisionConfig::builder()
        .cert_url(cli.url)
        .request_timeout(Duration::from_secs(cli.timeout))
        .build();
    let fetcher = HttpFetcher::new(config.request_timeout)?;

    let files = match cli.converter {
        ConverterKind::Openssl => {
            create_test_server_cert_and_key_with(&destination, config, fetcher, OpensslCli::new())
        }
        ConverterKind::Native => {
            create_test_server_cert_and_key_with(&destination, config, fetcher, NativeConverter)
        }
    };
    files.with_context(|| format!("failed to provision {}", destination.display()))
}
