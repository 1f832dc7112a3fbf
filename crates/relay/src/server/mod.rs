//! HTTP(S) server: routing, origin guard, TLS discovery, listener bootstrap.
//!
//! # Responsibilities
//! - Decide plaintext vs TLS and bind the listener (`bootstrap`).
//! - Discover certificate material on disk (`tls`).
//! - Define the Axum router, handlers, and the credentialed-CORS origin
//!   guard (`router`, `handlers`, `cors`).
//! - Inject shared application state (`AppState`) into handlers.

pub mod bootstrap;
pub mod cors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod tls;
