//! The provisioning run: fetch, convert, split, write, clean up.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::ProvisionConfig;
use crate::convert::Converter;
use crate::error::{ProvisionError, Result};
use crate::fetch::Fetcher;
use crate::pem_utils::split_cert_and_key;

/// Paths of the files written by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedFiles {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl From<ProvisionedFiles> for (PathBuf, PathBuf) {
    fn from(files: ProvisionedFiles) -> Self {
        (files.cert_path, files.key_path)
    }
}

/// Drives one provisioning run with a pluggable fetcher and converter.
///
/// Temp file names come straight from the config and are not randomized, so two
/// runs sharing a temp directory must not overlap.
pub struct Provisioner<F, C> {
    config: ProvisionConfig,
    fetcher: F,
    converter: C,
}

impl<F: Fetcher, C: Converter> Provisioner<F, C> {
    pub fn new(config: ProvisionConfig, fetcher: F, converter: C) -> Self {
        Self {
            config,
            fetcher,
            converter,
        }
    }

    /// Writes the certificate and key beneath `destination`.
    ///
    /// `destination` must already exist; only the two output files are created.
    /// Nothing is written there unless the converted text contains a
    /// certificate end marker.
    pub fn provision(&self, destination: &Path) -> Result<ProvisionedFiles> {
        self.converter.check_supported()?;

        let destination = std::path::absolute(destination)
            .map_err(|e| ProvisionError::filesystem(destination, e))?;
        let cert_path = destination.join(&self.config.cert_file_name);
        let key_path = destination.join(&self.config.key_file_name);

        let archive_path = self.config.archive_tmp_path();
        let converted_path = self.config.conversion_tmp_path();
        let _scratch = TempFiles::new(vec![archive_path.clone(), converted_path.clone()]);

        let archive = self.fetcher.fetch(&self.config.cert_url)?;
        debug!(
            "writing {} byte archive to {}",
            archive.len(),
            archive_path.display()
        );
        fs::write(&archive_path, &archive)
            .map_err(|e| ProvisionError::filesystem(&archive_path, e))?;

        self.converter
            .convert(&archive_path, &self.config.passphrase, &converted_path)?;

        let converted = fs::read_to_string(&converted_path)
            .map_err(|e| ProvisionError::filesystem(&converted_path, e))?;
        let (cert, key) = split_cert_and_key(&converted)?;

        fs::write(&cert_path, cert).map_err(|e| ProvisionError::filesystem(&cert_path, e))?;
        fs::write(&key_path, key).map_err(|e| ProvisionError::filesystem(&key_path, e))?;
        info!(
            "wrote certificate to {} and key to {}",
            cert_path.display(),
            key_path.display()
        );

        Ok(ProvisionedFiles {
            cert_path,
            key_path,
        })
    }
}

/// Removes its files when dropped. Failures are logged and otherwise ignored.
struct TempFiles {
    paths: Vec<PathBuf>,
}

impl TempFiles {
    fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        for path in &self.paths {
            match fs::remove_file(path) {
                Ok(()) => debug!("removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("could not remove temp file {}: {e}", path.display()),
            }
        }
    }
}
