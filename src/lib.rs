//! # testcert - BankID Test Certificate Provisioning
//!
//! testcert downloads the BankID relying-party test certificate (a PKCS#12
//! archive), converts it to PEM and splits it into a certificate file and a
//! private key file. Local TLS test servers can then be pointed at the two files
//! when running integration tests against the BankID test environment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # fn main() -> Result<(), testcert::error::ProvisionError> {
//! let (cert_path, key_path) = testcert::create_test_server_cert_and_key("/srv/tls")?;
//! println!("{}\n{}", cert_path.display(), key_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Choosing a Converter
//!
//! The default flow shells out to `openssl pkcs12`, which is unavailable on
//! Windows. [`convert::NativeConverter`] decodes the archive in-process instead:
//!
//! ```rust,no_run
//! use testcert::{
//!     config::ProvisionConfig,
//!     convert::NativeConverter,
//!     fetch::HttpFetcher,
//!     provision::Provisioner,
//! };
//!
//! # fn main() -> Result<(), testcert::error::ProvisionError> {
//! let config = ProvisionConfig::default();
//! let fetcher = HttpFetcher::new(config.request_timeout)?;
//! let files = Provisioner::new(config, fetcher, NativeConverter).provision("/srv/tls".as_ref())?;
//! println!("{}", files.cert_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Source URL, passphrase and file naming
//! - [`fetch`]: Downloading the archive
//! - [`convert`]: PKCS#12 to PEM converters
//! - [`pem_utils`]: Splitting converted text into certificate and key
//! - [`provision`]: The end-to-end run
//! - [`error`]: Error types

use std::path::{Path, PathBuf};

pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod pem_utils;
pub mod provision;

use config::ProvisionConfig;
use convert::{Converter, OpensslCli};
use error::Result;
use fetch::{Fetcher, HttpFetcher};
use provision::Provisioner;

/// Fetches the BankID test certificate and writes `cert.pem` and `key.pem`
/// beneath `destination_path`, using `openssl` for the conversion.
///
/// Returns the absolute `(cert_path, key_path)` pair.
pub fn create_test_server_cert_and_key(
    destination_path: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf)> {
    let config = ProvisionConfig::default();
    let fetcher = HttpFetcher::new(config.request_timeout)?;
    create_test_server_cert_and_key_with(destination_path, config, fetcher, OpensslCli::new())
}

/// Like [`create_test_server_cert_and_key`], with the config, fetcher and
/// converter supplied by the caller.
pub fn create_test_server_cert_and_key_with<F: Fetcher, C: Converter>(
    destination_path: impl AsRef<Path>,
    config: ProvisionConfig,
    fetcher: F,
    converter: C,
) -> Result<(PathBuf, PathBuf)> {
    let files = Provisioner::new(config, fetcher, converter).provision(destination_path.as_ref())?;
    Ok(files.into())
}
