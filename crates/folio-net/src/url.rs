//! Endpoint URL parsing (http and https only).

use std::fmt;

use folio_types::error::{FolioError, Result};

/// A parsed endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    /// `"http"` or `"https"`, lowercased.
    pub scheme: String,
    pub host: String,
    /// Explicit port, if the URL carried one.
    pub port: Option<u16>,
    /// Path component starting with `/`.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: Option<String>,
}

impl Url {
    /// Parse `scheme://host[:port][/path][?query][#fragment]`.
    ///
    /// The fragment is dropped since it is never sent on the wire.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| FolioError::Network(format!("not an absolute URL: `{url}`")))?;
        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(FolioError::Network(format!(
                "unsupported scheme for form relay: {scheme}"
            )));
        }

        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);

        let (rest, query) = match rest.split_once('?') {
            Some((before, q)) => (before, Some(q.to_string())),
            None => (rest, None),
        };

        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| FolioError::Network(format!("bad port in `{url}`")))?;
                (host, Some(port))
            },
            None => (authority, None),
        };

        if host.is_empty() {
            return Err(FolioError::Network(format!("missing host in `{url}`")));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            path: path.to_string(),
            query,
        })
    }

    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }

    pub fn default_port(&self) -> u16 {
        if self.is_https() { 443 } else { 80 }
    }

    /// Port to connect to.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.default_port())
    }

    /// Value for the `Host` header; the port is included only when it is
    /// not the scheme default.
    pub fn host_header(&self) -> String {
        match self.port {
            Some(p) if p != self.default_port() => format!("{}:{p}", self.host),
            _ => self.host.clone(),
        }
    }

    /// Origin-form request target (`/path?query`).
    pub fn request_target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}{}",
            self.scheme,
            self.host_header(),
            self.request_target()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_endpoint() {
        let url = Url::parse("https://formspree.io/f/mdkgkwdw").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.host, "formspree.io");
        assert_eq!(url.port, None);
        assert_eq!(url.path, "/f/mdkgkwdw");
        assert_eq!(url.effective_port(), 443);
        assert_eq!(url.host_header(), "formspree.io");
    }

    #[test]
    fn parse_port_query_and_fragment() {
        let url = Url::parse("HTTP://127.0.0.1:8080/submit?x=1#top").unwrap();
        assert_eq!(url.scheme, "http");
        assert_eq!(url.port, Some(8080));
        assert_eq!(url.query.as_deref(), Some("x=1"));
        assert_eq!(url.request_target(), "/submit?x=1");
        assert_eq!(url.host_header(), "127.0.0.1:8080");
        assert_eq!(url.to_string(), "http://127.0.0.1:8080/submit?x=1");
    }

    #[test]
    fn bare_host_gets_root_path() {
        let url = Url::parse("http://example.com").unwrap();
        assert_eq!(url.path, "/");
        assert_eq!(url.effective_port(), 80);
    }

    #[test]
    fn default_port_omitted_from_host_header() {
        let url = Url::parse("https://example.com:443/f").unwrap();
        assert_eq!(url.host_header(), "example.com");
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(Url::parse("formspree.io/f/x").is_err());
        assert!(Url::parse("ftp://example.com/file").is_err());
        assert!(Url::parse("http:///path").is_err());
        assert!(Url::parse("http://example.com:notaport/").is_err());
    }
}
