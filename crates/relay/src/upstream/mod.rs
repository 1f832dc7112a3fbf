//! Upstream collaborator boundary.
//!
//! The relay owns no CDR business logic; both delegated routes call into the
//! upstream telephony data source through [`client::UpstreamClient`]. Any
//! timeout or retry policy belongs here, not in the router.

pub mod client;

pub use client::{UpstreamClient, UpstreamReply};
