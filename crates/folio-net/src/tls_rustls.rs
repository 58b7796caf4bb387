//! [`TlsConnector`] backed by rustls + ring.
//!
//! Enabled by the `tls-rustls` feature.

use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, StreamOwned};

use folio_types::error::{FolioError, Result};

use crate::tls::{TlsConnector, Transport};

/// Shared, reusable TLS client configuration (one per process).
pub struct RustlsConnector {
    config: Arc<ClientConfig>,
}

impl RustlsConnector {
    /// Build a connector that trusts Mozilla's root CA bundle.
    pub fn new() -> Self {
        let root_store =
            rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for RustlsConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl TlsConnector for RustlsConnector {
    fn connect_tls(&self, stream: TcpStream, server_name: &str) -> Result<Box<dyn Transport>> {
        let sni = ServerName::try_from(server_name.to_owned())
            .map_err(|e| FolioError::Network(format!("invalid server name: {e}")))?;

        let conn = ClientConnection::new(Arc::clone(&self.config), sni)
            .map_err(|e| FolioError::Network(format!("TLS init: {e}")))?;

        // Finish the handshake up front so certificate failures surface here
        // rather than on the first write.
        let mut tls = StreamOwned::new(conn, stream);
        while tls.conn.is_handshaking() {
            tls.conn
                .complete_io(&mut tls.sock)
                .map_err(|e| FolioError::Network(format!("TLS handshake with {server_name}: {e}")))?;
        }
        log::debug!("TLS session established with {server_name}");

        Ok(Box::new(tls))
    }
}
