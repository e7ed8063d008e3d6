//! Self-signed TLS certificate provisioning.
//!
//! Runs once at process startup, before any listener is bound: generate a
//! P-256 key pair, persist it as an `EC PRIVATE KEY` PEM file, self-sign a
//! certificate for `localhost` and the loopback addresses, persist that as a
//! `CERTIFICATE` PEM file, and hand back the [`TlsSettings`] a TLS listener
//! needs. Any failure at any step aborts provisioning — the caller must not
//! start serving without both files on disk.

pub mod error;
pub mod paths;
pub mod pemfile;
pub mod provision;
pub mod settings;

pub use error::ProvisionError;
pub use paths::expand_home;
pub use pemfile::{write_pem, PemArtifact};
pub use provision::provision;
pub use settings::{TlsSettings, TlsVersion};
