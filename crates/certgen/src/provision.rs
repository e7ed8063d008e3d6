//! The certificate provisioning flow.
//!
//! Strictly linear: generate key → persist key PEM → draw serial → build
//! template → self-sign → persist certificate PEM → return [`TlsSettings`].
//! Each step aborts on failure; nothing written earlier is cleaned up.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use p256::pkcs8::EncodePrivateKey;
use p256::SecretKey;
use rand::rngs::OsRng;
use rand::RngCore;
use rcgen::{
    CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, KeyPair,
    KeyUsagePurpose, SanType, SerialNumber, PKCS_ECDSA_P256_SHA256,
};
use rustls::pki_types::PrivatePkcs8KeyDer;
use time::{Date, Month, OffsetDateTime};
use tracing::debug;

use crate::error::ProvisionError;
use crate::pemfile::{write_pem, PemArtifact};
use crate::settings::TlsSettings;

/// Subject and issuer common name. The certificate is self-signed, so the
/// two are always identical.
const COMMON_NAME: &str = "localhost";

/// Certificate validity in calendar years from the moment of provisioning.
const VALIDITY_YEARS: i32 = 10;

/// Serial numbers are drawn uniformly from `[0, 2^130)`: 17 random bytes
/// with the top 6 bits cleared.
const SERIAL_LEN: usize = 17;

/// Generate a fresh P-256 key pair and self-signed certificate, persist both
/// as PEM files, and return the TLS settings for the listener.
///
/// `cert_path` and `key_path` may use `~` shorthand and may omit the `.pem`
/// suffix; the returned [`TlsSettings`] carries the resolved paths actually
/// written. The destination directory must already exist.
///
/// # Errors
///
/// Any step failing aborts provisioning: key encoding, either file write,
/// serial generation, or certificate signing. The key file is written before
/// any certificate work, so a signing failure leaves only the key behind.
pub fn provision(cert_path: &str, key_path: &str) -> Result<TlsSettings, ProvisionError> {
    let secret = SecretKey::random(&mut OsRng);

    let sec1_der = secret
        .to_sec1_der()
        .map_err(|e| ProvisionError::KeyEncode(e.to_string()))?;
    let key_file = write_pem(key_path, &PemArtifact::ec_private_key(sec1_der.to_vec()))?;
    debug!(path = %key_file.display(), "private key written");

    let serial = random_serial()?;

    // rcgen signs with the PKCS#8 form of the same key the SEC1 file holds.
    let pkcs8_der = secret
        .to_pkcs8_der()
        .map_err(|e| ProvisionError::KeyEncode(e.to_string()))?;
    let pkcs8 = PrivatePkcs8KeyDer::from(pkcs8_der.as_bytes().to_vec());
    let key_pair = KeyPair::from_pkcs8_der_and_sign_algo(&pkcs8, &PKCS_ECDSA_P256_SHA256)
        .map_err(|e| ProvisionError::KeyGeneration(e.to_string()))?;

    let params = certificate_params(serial);
    let cert = params
        .self_signed(&key_pair)
        .map_err(|e| ProvisionError::CertificateSign(e.to_string()))?;

    let cert_file = write_pem(cert_path, &PemArtifact::certificate(cert.der().to_vec()))?;
    debug!(path = %cert_file.display(), "certificate written");

    Ok(TlsSettings::new(cert_file, key_file))
}

/// Build the certificate template: self-signed for `localhost`, valid for
/// ten years, covering both loopback addresses, usable for server and client
/// authentication.
fn certificate_params(serial: [u8; SERIAL_LEN]) -> CertificateParams {
    let mut params = CertificateParams::default();

    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, COMMON_NAME);
    params.distinguished_name = dn;

    params.serial_number = Some(SerialNumber::from(serial.to_vec()));

    let not_before = OffsetDateTime::now_utc();
    params.not_before = not_before;
    params.not_after = years_from(not_before, VALIDITY_YEARS);

    params.subject_alt_names = vec![
        SanType::IpAddress(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        SanType::IpAddress(IpAddr::V6(Ipv6Addr::LOCALHOST)),
    ];
    params.key_usages = vec![KeyUsagePurpose::DigitalSignature];
    params.extended_key_usages = vec![
        ExtendedKeyUsagePurpose::ClientAuth,
        ExtendedKeyUsagePurpose::ServerAuth,
    ];

    params
}

/// Draw a random serial, aborting on RNG failure rather than falling back to
/// a degenerate zero serial.
fn random_serial() -> Result<[u8; SERIAL_LEN], ProvisionError> {
    let mut bytes = [0u8; SERIAL_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ProvisionError::SerialGeneration(e.to_string()))?;
    // 17 bytes carry 136 bits; clear the top 6 to stay below 2^130.
    bytes[0] &= 0x03;
    Ok(bytes)
}

/// Calendar-year addition. A Feb 29 start with no leap day in the target
/// year normalises to Mar 1.
fn years_from(start: OffsetDateTime, years: i32) -> OffsetDateTime {
    let date = start.date();
    match date.replace_year(date.year() + years) {
        Ok(shifted) => start.replace_date(shifted),
        Err(_) => {
            let shifted = Date::from_calendar_date(date.year() + years, Month::March, 1)
                .unwrap_or(date);
            start.replace_date(shifted)
        }
    }
}
