//! `application/x-www-form-urlencoded` body encoding.

use std::fmt::Write;

/// Percent-encode one name or value.
///
/// Alphanumerics and `*-._` pass through, space becomes `+`, every other
/// byte of the UTF-8 encoding becomes `%XX`.
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(b as char)
            },
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{b:02X}");
            },
        }
    }
    out
}

/// Join `(name, value)` pairs into a form body.
pub fn encode_form(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}
