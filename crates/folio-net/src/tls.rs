//! TLS connector abstraction.
//!
//! The HTTP client talks to any [`Transport`]; hosts that can post to
//! `https` endpoints hand it a [`TlsConnector`] that wraps the raw TCP
//! stream in a TLS session.

use std::io::{Read, Write};
use std::net::TcpStream;

use folio_types::error::Result;

/// A bidirectional byte stream the HTTP client can drive.
pub trait Transport: Read + Write + Send {}

impl<T: Read + Write + Send> Transport for T {}

/// Provides TLS client connections.
pub trait TlsConnector: Send + Sync {
    /// Wrap `stream` in a TLS client session and complete the handshake.
    ///
    /// `server_name` is used for SNI and certificate verification.
    fn connect_tls(&self, stream: TcpStream, server_name: &str) -> Result<Box<dyn Transport>>;
}
