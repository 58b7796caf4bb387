//! Minimal HTTP/1.1 POST client.
//!
//! Talks plain HTTP over a `TcpStream`, or HTTPS when the caller hands in
//! a [`TlsConnector`]. Every request gets its own connection
//! (`Connection: close`) and redirects are reported, never followed.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use folio_types::error::{FolioError, Result};

use crate::tls::TlsConnector;
use crate::url::Url;

/// Largest reply body accepted (1 MB). Relay replies are small JSON.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Room for the status line and headers on top of the body.
const HEAD_ALLOWANCE: usize = 16 * 1024;

/// TCP connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP read/write timeout.
pub const IO_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// A parsed HTTP response.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code (e.g. 200, 422).
    pub status_code: u16,
    /// Response headers as lowercased-name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A POST request ready to send.
#[derive(Debug, Clone)]
pub struct PostRequest<'a> {
    pub url: &'a Url,
    pub content_type: &'a str,
    pub accept: &'a str,
    pub body: &'a [u8],
}

/// POST `request` and return the parsed response.
///
/// HTTPS URLs require `tls`; without one they fail with a network error.
pub fn post(request: &PostRequest<'_>, tls: Option<&dyn TlsConnector>) -> Result<HttpResponse> {
    let url = request.url;
    log::debug!("POST {url} ({} bytes)", request.body.len());
    let stream = tcp_connect(&url.host, url.effective_port())?;

    if url.is_https() {
        let connector = tls.ok_or_else(|| {
            FolioError::Network(format!("TLS not available for {url}"))
        })?;
        let mut stream = connector.connect_tls(stream, &url.host)?;
        send_request(&mut stream, request)?;
        let raw = read_response(&mut stream)?;
        parse_response(&raw)
    } else {
        let mut stream = stream;
        send_request(&mut stream, request)?;
        let raw = read_response(&mut stream)?;
        parse_response(&raw)
    }
}

/// Open a TCP connection with connect and I/O timeouts.
fn tcp_connect(host: &str, port: u16) -> Result<TcpStream> {
    let addr = (host, port)
        .to_socket_addrs()
        .map_err(|e| FolioError::Network(format!("DNS resolution failed: {e}")))?
        .next()
        .ok_or_else(|| FolioError::Network(format!("no addresses for {host}:{port}")))?;

    let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .map_err(|e| FolioError::Network(format!("TCP connect failed: {e}")))?;

    stream
        .set_read_timeout(Some(IO_TIMEOUT))
        .and_then(|()| stream.set_write_timeout(Some(IO_TIMEOUT)))
        .map_err(|e| FolioError::Network(format!("set socket timeout: {e}")))?;

    Ok(stream)
}

/// Serialize the request head and body.
fn build_request(request: &PostRequest<'_>) -> Vec<u8> {
    let head = format!(
        "POST {target} HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: {USER_AGENT}\r\n\
         Accept: {accept}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {len}\r\n\
         Connection: close\r\n\
         \r\n",
        target = request.url.request_target(),
        host = request.url.host_header(),
        accept = request.accept,
        content_type = request.content_type,
        len = request.body.len(),
    );
    let mut out = head.into_bytes();
    out.extend_from_slice(request.body);
    out
}

fn send_request(stream: &mut impl Write, request: &PostRequest<'_>) -> Result<()> {
    stream
        .write_all(&build_request(request))
        .and_then(|()| stream.flush())
        .map_err(|e| FolioError::Network(format!("send request: {e}")))
}

/// Read until the server closes the connection.
fn read_response(stream: &mut impl Read) -> Result<Vec<u8>> {
    // Head plus a full body, and one byte more to detect overflow.
    let limit = (MAX_BODY_SIZE + HEAD_ALLOWANCE + 1) as u64;
    let mut raw = Vec::new();
    match stream.take(limit).read_to_end(&mut raw) {
        Ok(_) => {},
        // Servers that skip the TLS close_notify end the stream this way.
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !raw.is_empty() => {},
        Err(e) => return Err(FolioError::Network(format!("read response: {e}"))),
    }
    if raw.len() as u64 == limit {
        return Err(FolioError::Network("response too large".into()));
    }
    Ok(raw)
}

/// Split a raw reply at the blank line ending the head.
fn split_head(raw: &[u8]) -> Option<(&[u8], &[u8])> {
    let at = raw.windows(4).position(|w| w == b"\r\n\r\n")?;
    Some((&raw[..at], &raw[at + 4..]))
}

/// Turn a complete raw reply into an [`HttpResponse`].
pub fn parse_response(raw: &[u8]) -> Result<HttpResponse> {
    let (head, rest) = split_head(raw)
        .ok_or_else(|| FolioError::Network("reply has no end of headers".into()))?;
    let head = std::str::from_utf8(head)
        .map_err(|_| FolioError::Network("reply headers are not UTF-8".into()))?;

    let (status_line, header_block) = head.split_once("\r\n").unwrap_or((head, ""));
    let status_code = parse_status_line(status_line)?;
    let headers: Vec<(String, String)> = header_block
        .lines()
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_ascii_lowercase(), value.trim().to_owned()))
        })
        .collect();

    let chunked = find_header(&headers, "transfer-encoding")
        .is_some_and(|te| te.to_ascii_lowercase().contains("chunked"));
    let body = match find_header(&headers, "content-length") {
        _ if chunked => decode_chunked(rest)?,
        Some(declared) => {
            let declared: usize = declared
                .parse()
                .map_err(|_| FolioError::Network(format!("Content-Length `{declared}`")))?;
            if declared > MAX_BODY_SIZE {
                return Err(FolioError::Network(format!(
                    "reply body of {declared} bytes is over the limit"
                )));
            }
            rest.iter().take(declared).copied().collect()
        },
        None => rest.to_vec(),
    };

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

/// Status code from `HTTP/1.x NNN reason`.
fn parse_status_line(line: &str) -> Result<u16> {
    let bad = || FolioError::Network(format!("unexpected status line `{line}`"));
    let mut words = line.split_whitespace();
    if !words.next().is_some_and(|v| v.starts_with("HTTP/")) {
        return Err(bad());
    }
    words.next().and_then(|code| code.parse().ok()).ok_or_else(bad)
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find_map(|(key, value)| key.eq_ignore_ascii_case(name).then_some(value.as_str()))
}

/// Reassemble a `Transfer-Encoding: chunked` body. A chunk cut short by
/// the connection closing keeps whatever arrived.
fn decode_chunked(mut rest: &[u8]) -> Result<Vec<u8>> {
    let bad_size = || FolioError::Network("malformed chunk size".into());
    let mut body = Vec::new();

    while let Some(eol) = rest.windows(2).position(|w| w == b"\r\n") {
        let size_line = std::str::from_utf8(&rest[..eol]).map_err(|_| bad_size())?;
        // Chunk extensions follow a `;`.
        let hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(hex, 16).map_err(|_| bad_size())?;
        if size == 0 {
            break;
        }
        body.len()
            .checked_add(size)
            .filter(|total| *total <= MAX_BODY_SIZE)
            .ok_or_else(|| FolioError::Network("chunked reply is over the limit".into()))?;

        let data = &rest[eol + 2..];
        if data.len() < size {
            body.extend_from_slice(data);
            break;
        }
        body.extend_from_slice(&data[..size]);
        rest = size
            .checked_add(2)
            .and_then(|next| data.get(next..))
            .unwrap_or_default();
    }

    Ok(body)
}
