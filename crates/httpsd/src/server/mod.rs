//! Axum HTTPS server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Wrap the TCP listener with TLS using the provisioned certificate.

pub mod handlers;
pub mod middleware;
pub mod protocol;
pub mod router;
pub mod tls;
