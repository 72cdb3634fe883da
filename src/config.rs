use std::path::PathBuf;
use std::time::Duration;

use bon::Builder;

/// Location of the BankID relying-party test certificate.
pub const DEFAULT_CERT_URL: &str = "http://www.bankid.com/Global/wwwbankidcom/RP/FPTestcert1.pfx";

/// Passphrase protecting the test certificate archive.
pub const DEFAULT_PASSPHRASE: &str = "qwerty123";

/// Parameters for a provisioning run.
///
/// `ProvisionConfig::default()` fetches the BankID test certificate and writes
/// `cert.pem` / `key.pem`. Every field can be overridden through the builder:
///
/// ```rust
/// use testcert::config::ProvisionConfig;
///
/// let config = ProvisionConfig::builder()
///     .cert_url("http://127.0.0.1:8080/bundle.pfx".to_string())
///     .passphrase("secret".to_string())
///     .build();
/// assert_eq!(config.archive_file_name(), "bundle.pfx");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ProvisionConfig {
    #[builder(default = DEFAULT_CERT_URL.to_string())]
    pub cert_url: String,

    /// Used both to decrypt the archive and as the converter's output passphrase.
    #[builder(default = DEFAULT_PASSPHRASE.to_string())]
    pub passphrase: String,

    /// Directory holding the downloaded archive and the converted PEM text.
    #[builder(default = std::env::temp_dir())]
    pub temp_dir: PathBuf,

    #[builder(default = "cert.pem".to_string())]
    pub cert_file_name: String,

    #[builder(default = "key.pem".to_string())]
    pub key_file_name: String,

    /// Name of the converter's output inside `temp_dir`.
    #[builder(default = "certificate.pem".to_string())]
    pub conversion_file_name: String,

    #[builder(default = Duration::from_secs(30))]
    pub request_timeout: Duration,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ProvisionConfig {
    /// The last path segment of `cert_url`, used to name the downloaded archive.
    ///
    /// Query strings and fragments are ignored. Falls back to `certificate.pfx`
    /// when the URL ends in a slash.
    pub fn archive_file_name(&self) -> &str {
        let path = self
            .cert_url
            .split(['?', '#'])
            .next()
            .unwrap_or(&self.cert_url);
        match path.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => "certificate.pfx",
        }
    }

    pub fn archive_tmp_path(&self) -> PathBuf {
        self.temp_dir.join(self.archive_file_name())
    }

    pub fn conversion_tmp_path(&self) -> PathBuf {
        self.temp_dir.join(&self.conversion_file_name)
    }
}
