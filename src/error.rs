//! use testcert::error::ProvisionError;

use std::path::PathBuf;

use thiserror::Error;

/// Represents errors that can occur while provisioning the test certificate.
///
/// Every failure surfaces to the caller as soon as it happens; nothing is retried.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The configured converter cannot run on this host.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The certificate archive could not be downloaded.
    #[error("Network error: {0}")]
    Network(String),

    /// The converter could not be started or reported a failure.
    #[error("Conversion tool error: {0}")]
    ConversionTool(String),

    /// The converted text does not contain the expected PEM blocks.
    #[error("Malformed conversion output: {0}")]
    MalformedOutput(String),

    /// A read, write or permission failure on a temp or output file.
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProvisionError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProvisionError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for ProvisionError {
    fn from(err: reqwest::Error) -> Self {
        ProvisionError::Network(err.to_string())
    }
}

impl From<der::Error> for ProvisionError {
    /// Converts a `der::Error` raised while decoding converter output.
    fn from(err: der::Error) -> Self {
        ProvisionError::MalformedOutput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
