//! [`FormRelay`] that posts the contact form over HTTP(S).

use folio_platform::{FormRelay, FormSubmission, RelayResponse};
use folio_types::error::Result;

use crate::form::encode_form;
use crate::http::{PostRequest, post};
use crate::tls::TlsConnector;
use crate::url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Posts submissions as an urlencoded body with `Accept: application/json`.
///
/// Exactly one request per submission; nothing is retried.
#[derive(Default)]
pub struct HttpFormRelay {
    tls: Option<Box<dyn TlsConnector>>,
}

impl HttpFormRelay {
    /// Relay limited to plain `http` endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Relay that can reach `https` endpoints through `tls`.
    pub fn with_tls(tls: Box<dyn TlsConnector>) -> Self {
        Self { tls: Some(tls) }
    }

    /// Relay using the bundled rustls connector.
    #[cfg(feature = "tls-rustls")]
    pub fn with_rustls() -> Self {
        Self::with_tls(Box::new(crate::RustlsConnector::new()))
    }

    pub fn supports_https(&self) -> bool {
        self.tls.is_some()
    }
}

impl std::fmt::Debug for HttpFormRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFormRelay")
            .field("https", &self.supports_https())
            .finish()
    }
}

impl FormRelay for HttpFormRelay {
    fn submit(&mut self, endpoint: &str, form: &FormSubmission) -> Result<RelayResponse> {
        let url = Url::parse(endpoint)?;
        let body = encode_form(&form.fields());
        log::info!("Posting contact form to {url} ({} bytes)", body.len());

        let request = PostRequest {
            url: &url,
            content_type: FORM_CONTENT_TYPE,
            accept: "application/json",
            body: body.as_bytes(),
        };
        let response = post(&request, self.tls.as_deref())?;

        if !(200..300).contains(&response.status_code) {
            log::warn!("Form relay replied {}", response.status_code);
        }
        Ok(RelayResponse {
            status_code: response.status_code,
            body: response.body,
        })
    }
}
