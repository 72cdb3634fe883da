//! Downloading the certificate archive.

use std::time::Duration;

use log::debug;

use crate::error::{ProvisionError, Result};

/// Retrieves the raw bytes of a certificate archive.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP GET without authentication or retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("testcert/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {url}");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProvisionError::Network(format!(
                "{url} returned status {status}"
            )));
        }

        let body = response.bytes()?;
        debug!("received {} bytes from {url}", body.len());
        Ok(body.to_vec())
    }
}
