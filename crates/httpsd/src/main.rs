//! `httpsd` — minimal HTTPS server binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Ensure the certificate directory exists.
//! 4. Provision the self-signed certificate and key.
//! 5. Build the Axum router and start the TLS listener.
//!
//! Any provisioning failure is fatal: the process never listens without a
//! valid certificate and key on disk.

mod config;
mod server;
mod telemetry;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        "httpsd starting"
    );

    // -----------------------------------------------------------------------
    // 3. Certificate directory
    // -----------------------------------------------------------------------
    // The provisioner expects its destination directory to exist.
    let cert_dir = certgen::expand_home(&cfg.cert_dir);
    std::fs::create_dir_all(&cert_dir).with_context(|| {
        format!(
            "failed to create certificate directory {}",
            cert_dir.display()
        )
    })?;

    // -----------------------------------------------------------------------
    // 4. Certificate provisioning
    // -----------------------------------------------------------------------
    let settings = certgen::provision(
        &format!("{}/cert", cfg.cert_dir),
        &format!("{}/key", cfg.cert_dir),
    )?;
    info!(
        cert = %settings.cert_path.display(),
        key = %settings.key_path.display(),
        "TLS certificate provisioned"
    );

    // -----------------------------------------------------------------------
    // 5. HTTPS server
    // -----------------------------------------------------------------------
    let router = server::router::build();
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    server::tls::serve(addr, router, &settings).await
}
