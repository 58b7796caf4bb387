//! Network plumbing for the folio site: the contact form relay.
//!
//! A small blocking HTTP/1.1 client is enough here: the only outbound
//! request the site makes is one urlencoded POST per form submission.

pub mod form;
pub mod http;
pub mod relay;
pub mod tls;
#[cfg(feature = "tls-rustls")]
pub mod tls_rustls;
pub mod url;

pub use relay::HttpFormRelay;
pub use tls::{TlsConnector, Transport};
#[cfg(feature = "tls-rustls")]
pub use tls_rustls::RustlsConnector;
pub use url::Url;
