//! TLS listener: rustls acceptor over the provisioned certificate.
//!
//! Each accepted TCP connection is handshaken with
//! [`tokio_rustls::TlsAcceptor`] and then served HTTP/1.1 or HTTP/2 (ALPN)
//! through hyper-util's auto connection builder. A failed handshake drops
//! that connection only; the accept loop itself never exits on a
//! per-connection error.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use certgen::TlsSettings;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, info, warn};

/// Bind `addr` and serve `router` over TLS until the process exits.
///
/// # Errors
///
/// Returns an error if the rustls configuration cannot be built from the
/// provisioned files or the listener cannot bind. Per-connection failures
/// are logged and swallowed.
pub async fn serve(addr: SocketAddr, router: Router, settings: &TlsSettings) -> Result<()> {
    let tls_config = settings
        .server_config()
        .context("failed to build rustls server configuration")?;
    let acceptor = TlsAcceptor::from(tls_config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening for HTTPS connections");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "TCP accept failed");
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let app = router.clone();
        tokio::spawn(async move {
            let tls_stream = match acceptor.accept(stream).await {
                Ok(s) => s,
                Err(e) => {
                    debug!(peer = %peer, error = %e, "TLS handshake failed");
                    return;
                }
            };

            let service = TowerToHyperService::new(app);
            if let Err(e) = ConnectionBuilder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(tls_stream), service)
                .await
            {
                debug!(peer = %peer, error = %e, "connection closed with error");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptor_builds_from_provisioned_settings() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert");
        let key = dir.path().join("key");
        let settings =
            certgen::provision(cert.to_str().unwrap(), key.to_str().unwrap()).unwrap();

        let config = settings.server_config().unwrap();
        let _acceptor = TlsAcceptor::from(config);
    }

    #[test]
    fn unreadable_settings_refuse_to_serve() {
        let settings = TlsSettings::new("/nonexistent/cert.pem".into(), "/nonexistent/key.pem".into());
        assert!(settings.server_config().is_err());
    }
}
