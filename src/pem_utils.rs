use crate::error::{ProvisionError, Result};

/// Line that closes a PEM certificate block.
pub const CERT_END_MARKER: &str = "-----END CERTIFICATE-----";

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Split converted PEM text into its certificate part and its key part.
///
/// The split point is the end of the first [`CERT_END_MARKER`]. The certificate
/// part includes the marker; the key part is the verbatim remainder, so any
/// attribute lines or newlines the converter emitted stay with the key.
/// Concatenating both parts always yields `text` again.
pub fn split_cert_and_key(text: &str) -> Result<(&str, &str)> {
    let start = text.find(CERT_END_MARKER).ok_or_else(|| {
        ProvisionError::MalformedOutput(format!("no `{CERT_END_MARKER}` marker found"))
    })?;
    Ok(text.split_at(start + CERT_END_MARKER.len()))
}
