//! PKCS#12 to PEM conversion.
//!
//! Two converters are available:
//! - [`OpensslCli`] shells out to `openssl pkcs12`, the way the test
//!   certificate has always been converted.
//! - [`NativeConverter`] decodes the archive in-process and needs no external
//!   binary.
//!
//! Both read the archive from a file and write PEM text to another file, so the
//! provisioner does not care which one it drives.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use der::Decode;
use log::debug;

use crate::error::{ProvisionError, Result};
use crate::pem_utils::der_to_pem;

/// Turns a passphrase-protected PKCS#12 archive into PEM text.
pub trait Converter {
    /// Fails with [`ProvisionError::UnsupportedPlatform`] if this converter
    /// cannot run on the current host.
    fn check_supported(&self) -> Result<()>;

    /// Reads the archive at `archive`, decrypts it with `passphrase` and writes
    /// the PEM text to `output`.
    fn convert(&self, archive: &Path, passphrase: &str, output: &Path) -> Result<()>;
}

/// Converter backed by the `openssl pkcs12` command.
///
/// The same passphrase is passed as `-passin` and `-passout`, so private keys
/// in the output are re-encrypted with it.
#[derive(Debug, Clone)]
pub struct OpensslCli {
    program: OsString,
}

impl Default for OpensslCli {
    fn default() -> Self {
        Self::new()
    }
}

impl OpensslCli {
    /// Uses `openssl` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("openssl")
    }

    /// Uses the given executable instead of `openssl`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, archive: &Path, passphrase: &str, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("pkcs12")
            .arg("-in")
            .arg(archive)
            .arg("-passin")
            .arg(format!("pass:{passphrase}"))
            .arg("-out")
            .arg(output)
            .arg("-passout")
            .arg(format!("pass:{passphrase}"))
            .stdin(Stdio::null());
        cmd
    }
}

impl Converter for OpensslCli {
    fn check_supported(&self) -> Result<()> {
        if cfg!(windows) {
            return Err(ProvisionError::UnsupportedPlatform(
                "the openssl converter is not supported on Windows; use the native converter"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn convert(&self, archive: &Path, passphrase: &str, output: &Path) -> Result<()> {
        let program = self.program.to_string_lossy();
        debug!(
            "running {program} pkcs12 -in {} -out {}",
            archive.display(),
            output.display()
        );

        let result = self
            .command(archive, passphrase, output)
            .output()
            .map_err(|e| ProvisionError::ConversionTool(format!("failed to run {program}: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ProvisionError::ConversionTool(format!(
                "{program} pkcs12 {}: {}",
                result.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// In-process converter built on the `p12` crate.
///
/// Writes every certificate bag followed by every key bag. Keys are emitted as
/// unencrypted PKCS#8 `PRIVATE KEY` blocks.
#[derive(Debug, Clone, Default)]
pub struct NativeConverter;

impl NativeConverter {
    /// Decodes a PKCS#12 archive into PEM text.
    pub fn pkcs12_to_pem(&self, data: &[u8], passphrase: &str) -> Result<String> {
        let pfx = p12::PFX::parse(data).map_err(|e| {
            ProvisionError::ConversionTool(format!("failed to parse PKCS#12: {e:?}"))
        })?;

        if !pfx.verify_mac(passphrase) {
            return Err(ProvisionError::ConversionTool(
                "PKCS#12 MAC verification failed: wrong passphrase, or a MAC algorithm other than SHA-1"
                    .to_string(),
            ));
        }

        let certs = pfx.cert_x509_bags(passphrase).map_err(|e| {
            ProvisionError::ConversionTool(format!("failed to extract certificates: {e:?}"))
        })?;
        let keys = pfx.key_bags(passphrase).map_err(|e| {
            ProvisionError::ConversionTool(format!("failed to extract keys: {e:?}"))
        })?;

        let Some(leaf) = certs.first() else {
            return Err(ProvisionError::MalformedOutput(
                "no certificate in PKCS#12".to_string(),
            ));
        };
        if keys.is_empty() {
            return Err(ProvisionError::MalformedOutput(
                "no private key in PKCS#12".to_string(),
            ));
        }
        let leaf = x509_cert::Certificate::from_der(leaf)?;
        debug!(
            "archive holds {} certificate(s) and {} key(s), leaf subject {}",
            certs.len(),
            keys.len(),
            leaf.tbs_certificate.subject
        );

        let mut text = String::new();
        for cert in &certs {
            text.push_str(&der_to_pem(cert, "CERTIFICATE"));
        }
        for key in &keys {
            text.push_str(&der_to_pem(key, "PRIVATE KEY"));
        }
        Ok(text)
    }
}

impl Converter for NativeConverter {
    fn check_supported(&self) -> Result<()> {
        Ok(())
    }

    fn convert(&self, archive: &Path, passphrase: &str, output: &Path) -> Result<()> {
        let data = fs::read(archive).map_err(|e| ProvisionError::filesystem(archive, e))?;
        let text = self.pkcs12_to_pem(&data, passphrase)?;
        fs::write(output, text).map_err(|e| ProvisionError::filesystem(output, e))
    }
}
