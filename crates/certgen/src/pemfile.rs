//! PEM serialisation of key and certificate material to disk.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use pem::{EncodeConfig, LineEnding, Pem};

use crate::error::ProvisionError;
use crate::paths::expand_home;

const PEM_SUFFIX: &str = ".pem";

/// PEM type tag for a SEC1-encoded elliptic-curve private key.
pub const EC_PRIVATE_KEY_TAG: &str = "EC PRIVATE KEY";

/// PEM type tag for a DER-encoded X.509 certificate.
pub const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// A tagged DER block awaiting PEM serialisation.
///
/// Constructed in memory, written once by [`write_pem`], never mutated.
pub struct PemArtifact {
    tag: &'static str,
    der: Vec<u8>,
}

impl PemArtifact {
    /// An `EC PRIVATE KEY` block from SEC1 DER bytes.
    pub fn ec_private_key(der: Vec<u8>) -> Self {
        Self {
            tag: EC_PRIVATE_KEY_TAG,
            der,
        }
    }

    /// A `CERTIFICATE` block from X.509 DER bytes.
    pub fn certificate(der: Vec<u8>) -> Self {
        Self {
            tag: CERTIFICATE_TAG,
            der,
        }
    }

    /// The PEM type tag this block will be framed with.
    pub fn tag(&self) -> &str {
        self.tag
    }
}

/// Write `artifact` to `path` in PEM form, returning the path actually written.
///
/// A `.pem` suffix is appended when missing, and a leading `~` is expanded via
/// [`expand_home`]. The file is created or truncated; refusal by the OS yields
/// [`ProvisionError::FileCreate`] naming the resolved path. A write failure
/// after creation leaves the partial file behind.
pub fn write_pem(path: &str, artifact: &PemArtifact) -> Result<PathBuf, ProvisionError> {
    let path = if path.ends_with(PEM_SUFFIX) {
        path.to_owned()
    } else {
        format!("{path}{PEM_SUFFIX}")
    };
    let path = expand_home(&path);

    let mut file = File::create(&path).map_err(|e| ProvisionError::FileCreate {
        path: path.display().to_string(),
        source: e,
    })?;

    let block = Pem::new(artifact.tag, artifact.der.clone());
    let encoded = pem::encode_config(&block, EncodeConfig::new().set_line_ending(LineEnding::LF));
    file.write_all(encoded.as_bytes())
        .map_err(|e| ProvisionError::PemEncode {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(path)
}
