//! Error types for certificate provisioning.

use std::io;

use thiserror::Error;

/// Errors surfaced while provisioning the self-signed certificate.
///
/// Every provisioning step aborts on its first failure; there is no retry or
/// local recovery anywhere in this crate. A partial write (key file on disk,
/// certificate missing) is left behind for the caller to overwrite on the
/// next attempt.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The key pair could not be constructed for signing.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The private key could not be serialised to SEC1 or PKCS#8 DER.
    #[error("private key encoding failed: {0}")]
    KeyEncode(String),

    /// The OS random source failed while drawing the serial number.
    /// Provisioning aborts rather than continuing with a degenerate serial.
    #[error("serial number generation failed: {0}")]
    SerialGeneration(String),

    /// File creation was refused by the OS. The message names the resolved
    /// path so an operator can spot permission or missing-directory problems.
    #[error("unable to create file {path}, check directory and permissions: {source}")]
    FileCreate {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The encoded PEM block could not be written to the created file. The
    /// partially written file is left behind.
    #[error("failed to write PEM block to {path}: {source}")]
    PemEncode {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A previously written PEM file could not be read back or parsed.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Self-signing the certificate template failed.
    #[error("certificate signing failed: {0}")]
    CertificateSign(String),

    /// rustls rejected the certificate, key, or protocol configuration.
    #[error("TLS configuration rejected: {0}")]
    TlsConfig(#[from] rustls::Error),
}
