//! `cdr-relay` — HTTP(S) front door for read-only CDR queries.
//!
//! The relay forwards two queries (aggregate call-detail-record statistics
//! and agent status) to an upstream telephony data source, guarded by a
//! credentialed-CORS origin allow-list, behind an optional TLS listener with
//! certificate discovery fallback.

pub mod config;
pub mod server;
pub mod telemetry;
pub mod upstream;
