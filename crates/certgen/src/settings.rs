//! TLS listener configuration derived from the provisioned certificate.
//!
//! [`TlsSettings`] is the artifact [`provision`](crate::provision::provision)
//! returns: the resolved PEM paths plus the negotiation policy for the
//! listener. [`TlsSettings::server_config`] realises it as a
//! [`rustls::ServerConfig`] by loading the two files back through
//! `rustls-pemfile`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustls::crypto::ring::{cipher_suite, default_provider, kx_group};
use rustls::crypto::{CryptoProvider, SupportedKxGroup};
use rustls::{version, ServerConfig, SupportedCipherSuite, SupportedProtocolVersion};

use crate::error::ProvisionError;

/// Minimum TLS protocol version accepted by the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsVersion {
    Tls12,
    Tls13,
}

impl TlsVersion {
    /// The rustls protocol versions this floor enables.
    fn protocol_versions(self) -> &'static [&'static SupportedProtocolVersion] {
        static TLS12_VERSIONS: &[&SupportedProtocolVersion] =
            &[&version::TLS12, &version::TLS13];
        static TLS13_VERSIONS: &[&SupportedProtocolVersion] = &[&version::TLS13];
        match self {
            TlsVersion::Tls12 => TLS12_VERSIONS,
            TlsVersion::Tls13 => TLS13_VERSIONS,
        }
    }
}

/// Negotiation policy and file locations for the TLS listener.
///
/// Produced by provisioning; consumed by the listener. The policy fields are
/// fixed for this deployment: TLS 1.2 floor, NIST-curve key exchange ordered
/// strongest first, AES-256-GCM-first cipher suites, server-side suite
/// ordering.
#[derive(Debug)]
pub struct TlsSettings {
    /// Resolved path of the certificate PEM file.
    pub cert_path: PathBuf,
    /// Resolved path of the private-key PEM file.
    pub key_path: PathBuf,
    /// Lowest protocol version offered.
    pub min_protocol: TlsVersion,
    /// Cipher suites offered, in server preference order.
    pub cipher_suites: Vec<SupportedCipherSuite>,
    /// Key-exchange groups offered, in server preference order.
    pub kx_groups: Vec<&'static dyn SupportedKxGroup>,
    /// Honour the server's suite order over the client's.
    pub prefer_server_cipher_order: bool,
}

impl TlsSettings {
    /// Settings for a freshly provisioned certificate/key pair.
    pub fn new(cert_path: PathBuf, key_path: PathBuf) -> Self {
        Self {
            cert_path,
            key_path,
            min_protocol: TlsVersion::Tls12,
            cipher_suites: preferred_cipher_suites(),
            kx_groups: preferred_kx_groups(),
            prefer_server_cipher_order: true,
        }
    }

    /// Build a [`rustls::ServerConfig`] from the written PEM files and the
    /// negotiation policy, advertising `h2` and `http/1.1` over ALPN.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed, if the key
    /// file holds no private key, or if rustls rejects the configuration.
    pub fn server_config(&self) -> Result<Arc<ServerConfig>, ProvisionError> {
        let certs = rustls_pemfile::certs(&mut BufReader::new(open(&self.cert_path)?))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| read_error(&self.cert_path, e))?;

        let key = rustls_pemfile::private_key(&mut BufReader::new(open(&self.key_path)?))
            .map_err(|e| read_error(&self.key_path, e))?
            .ok_or_else(|| {
                ProvisionError::KeyEncode(format!(
                    "no private key found in {}",
                    self.key_path.display()
                ))
            })?;

        let provider = CryptoProvider {
            cipher_suites: self.cipher_suites.clone(),
            kx_groups: self.kx_groups.clone(),
            ..default_provider()
        };

        let mut config = ServerConfig::builder_with_provider(Arc::new(provider))
            .with_protocol_versions(self.min_protocol.protocol_versions())?
            .with_no_client_auth()
            .with_single_cert(certs, key)?;

        config.ignore_client_order = self.prefer_server_cipher_order;
        config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

        Ok(Arc::new(config))
    }
}

/// AES-256-GCM first. The ring provider ships no CBC or static-RSA suites;
/// the ECDSA suites lead because the provisioned certificate is ECDSA.
fn preferred_cipher_suites() -> Vec<SupportedCipherSuite> {
    vec![
        cipher_suite::TLS13_AES_256_GCM_SHA384,
        cipher_suite::TLS13_AES_128_GCM_SHA256,
        cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
        cipher_suite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
        cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    ]
}

/// Strongest NIST curve first. The ring provider implements no P-521 group,
/// so preference starts at P-384.
fn preferred_kx_groups() -> Vec<&'static dyn SupportedKxGroup> {
    vec![kx_group::SECP384R1, kx_group::SECP256R1]
}

fn open(path: &Path) -> Result<File, ProvisionError> {
    File::open(path).map_err(|e| read_error(path, e))
}

fn read_error(path: &Path, source: std::io::Error) -> ProvisionError {
    ProvisionError::FileRead {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_defaults() {
        let settings = TlsSettings::new("cert.pem".into(), "key.pem".into());
        assert_eq!(settings.min_protocol, TlsVersion::Tls12);
        assert!(settings.prefer_server_cipher_order);
        assert!(!settings.cipher_suites.is_empty());
        assert!(!settings.kx_groups.is_empty());
    }

    #[test]
    fn tls12_floor_enables_both_versions() {
        assert_eq!(TlsVersion::Tls12.protocol_versions().len(), 2);
        assert_eq!(TlsVersion::Tls13.protocol_versions().len(), 1);
    }

    #[test]
    fn missing_files_surface_read_error() {
        let settings = TlsSettings::new(
            "/nonexistent/cert.pem".into(),
            "/nonexistent/key.pem".into(),
        );
        let err = settings.server_config().unwrap_err();
        match err {
            ProvisionError::FileRead { path, .. } => assert!(path.contains("/nonexistent/")),
            other => panic!("expected FileRead, got: {other}"),
        }
    }
}
