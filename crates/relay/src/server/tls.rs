//! Certificate discovery and rustls server configuration.
//!
//! TLS material is discovered on the filesystem: explicit `SSL_KEY`/`SSL_CERT`
//! overrides win, otherwise `privkey.pem` and `fullchain.pem` are looked up in
//! the certificate directory (`SSL_DIR`, default `./ssl`). A missing file is
//! never an error on its own — [`load_material`] reports `None` when the
//! key+cert pair is incomplete and the bootstrap decides what to do about it.

use std::{
    fs,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use rustls::ServerConfig;
use tracing::{error, info, warn};

use crate::config::Config;

/// The key/certificate/CA byte bundle needed to terminate TLS.
///
/// Loaded once at startup and held for the life of the listener.
#[derive(Debug)]
pub struct TlsMaterial {
    /// PEM-encoded private key bytes.
    pub key: Vec<u8>,
    /// PEM-encoded certificate chain bytes.
    pub cert: Vec<u8>,
    /// PEM-encoded CA bundle, only when `SSL_CA` is configured and readable.
    pub ca: Option<Vec<u8>>,
    /// Private key passphrase from `SSL_PASSPHRASE`, if set.
    pub passphrase: Option<String>,
}

/// Resolve a configured path: absolute paths pass through, relative paths are
/// resolved against `base`.
fn resolve_maybe_relative(base: &Path, p: &str) -> PathBuf {
    let path = Path::new(p);
    if path.is_absolute() {
        path.to_owned()
    } else {
        base.join(path)
    }
}

/// Read a file, treating any failure (missing, unreadable) as absence.
fn read_if_exists(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).ok()
}

/// Discover TLS material on disk.
///
/// Returns `Some` iff both the key and the certificate could be read. The CA
/// slot is optional: when `SSL_CA` is configured but unreadable this is logged
/// as an error without blocking the bundle. Never errors, never panics.
pub fn load_material(cfg: &Config, base: &Path) -> Option<TlsMaterial> {
    let cert_dir = match cfg.ssl_dir.as_deref() {
        Some(dir) => resolve_maybe_relative(base, dir),
        None => base.join("ssl"),
    };

    let key_path = match cfg.ssl_key.as_deref() {
        Some(p) => resolve_maybe_relative(base, p),
        None => cert_dir.join("privkey.pem"),
    };
    let cert_path = match cfg.ssl_cert.as_deref() {
        Some(p) => resolve_maybe_relative(base, p),
        None => cert_dir.join("fullchain.pem"),
    };
    let ca_path = cfg.ssl_ca.as_deref().map(|p| resolve_maybe_relative(base, p));

    let key = read_if_exists(&key_path);
    let cert = read_if_exists(&cert_path);
    let ca = ca_path.as_deref().and_then(read_if_exists);

    if let Some(p) = &ca_path {
        if ca.is_some() {
            info!(path = %p.display(), "loaded TLS ca");
        } else {
            error!(path = %p.display(), "missing configured CA bundle");
        }
    }

    match (key, cert) {
        (Some(key), Some(cert)) => {
            info!(path = %key_path.display(), "loaded TLS key");
            info!(path = %cert_path.display(), "loaded TLS cert");
            Some(TlsMaterial {
                key,
                cert,
                ca,
                passphrase: cfg.ssl_passphrase.clone(),
            })
        }
        (key, cert) => {
            if key.is_none() {
                error!(path = %key_path.display(), "missing TLS key");
            }
            if cert.is_none() {
                error!(path = %cert_path.display(), "missing TLS cert");
            }
            None
        }
    }
}

/// Build a [`rustls::ServerConfig`] from discovered [`TlsMaterial`].
///
/// CA certificates, when present, are appended to the served chain. rustls
/// cannot decrypt passphrase-protected keys; a configured passphrase is
/// logged and the key is expected to be unencrypted PEM.
///
/// # Errors
///
/// Returns an error if the certificate or key cannot be parsed, or if rustls
/// rejects the configuration.
pub fn build_server_config(material: &TlsMaterial) -> Result<Arc<ServerConfig>> {
    if material.passphrase.is_some() {
        warn!("SSL_PASSPHRASE is set but encrypted private keys are not supported; expecting an unencrypted PEM key");
    }

    let mut certs = rustls_pemfile::certs(&mut BufReader::new(material.cert.as_slice()))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse TLS certificate chain")?;

    if let Some(ca) = &material.ca {
        let ca_certs = rustls_pemfile::certs(&mut BufReader::new(ca.as_slice()))
            .collect::<Result<Vec<_>, _>>()
            .context("failed to parse CA bundle")?;
        certs.extend(ca_certs);
    }

    let key = rustls_pemfile::private_key(&mut BufReader::new(material.key.as_slice()))
        .context("failed to read TLS private key")?
        .context("no private key found in PEM data")?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("failed to build rustls ServerConfig")?;

    Ok(Arc::new(config))
}
