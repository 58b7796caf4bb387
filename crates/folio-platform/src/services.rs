//! Host service traits.

use folio_types::error::{FolioError, Result};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Read-only view of live layout.
///
/// Implementations answer from whatever the host considers current; the
/// scanner calls this on every scroll event, so lookups must be cheap.
pub trait GeometryProvider {
    /// Distance of the element's top edge from the viewport top, in
    /// viewport units (negative once the top has scrolled past).
    /// `None` when no element with this id is mounted.
    fn element_top(&self, id: &str) -> Option<f32>;

    /// Current vertical offset of the top-level scroll surface.
    fn scroll_y(&self) -> f32;
}

// ---------------------------------------------------------------------------
// Scrolling
// ---------------------------------------------------------------------------

/// Moves the top-level scroll surface.
pub trait ScrollService {
    /// Start a smooth scroll that aligns the element's top with the
    /// viewport top. Callers check the element exists first.
    fn scroll_into_view(&mut self, id: &str) -> Result<()>;

    /// Jump (no animation) to an absolute offset, as a user drag would.
    fn scroll_to_offset(&mut self, y: f32) -> Result<()>;

    /// Whether a smooth scroll started by
    /// [`scroll_into_view`](Self::scroll_into_view) is still running. A user
    /// scroll cancels it.
    fn is_animating(&self) -> bool;

    /// Advance any in-flight smooth scroll by `dt_ms`. Returns the new
    /// offset if the surface moved. Hosts whose animation runs outside the
    /// core (a real browser) keep the default.
    fn animation_frame(&mut self, _dt_ms: u64) -> Option<f32> {
        None
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// URL fragment access with replace-in-place semantics.
pub trait HistoryService {
    /// Replace the current history entry's fragment. `""` clears it.
    /// Must not push a new entry, reload, or scroll.
    fn replace_hash(&mut self, hash: &str) -> Result<()>;

    /// Fragment of the current entry (`""` when none).
    fn current_hash(&self) -> String;
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// String key/value storage for user preferences.
pub trait PreferenceStore {
    /// Read a value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Form relay
// ---------------------------------------------------------------------------

/// Contact form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormSubmission {
    /// Field name/value pairs in posting order.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ]
    }
}

/// Response from the form relay.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    /// HTTP status code (e.g. 200, 422).
    pub status_code: u16,
    /// Response body as bytes.
    pub body: Vec<u8>,
}

impl RelayResponse {
    /// Any 2xx status counts as accepted.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Third-party endpoint that accepts contact form posts.
pub trait FormRelay {
    /// Post the form to `endpoint`. Transport failures are errors;
    /// rejections come back as a non-2xx [`RelayResponse`].
    fn submit(&mut self, endpoint: &str, form: &FormSubmission) -> Result<RelayResponse>;
}

/// Relay for hosts without network access. Every submission fails.
#[derive(Debug, Default)]
pub struct OfflineRelay;

impl FormRelay for OfflineRelay {
    fn submit(&mut self, _endpoint: &str, _form: &FormSubmission) -> Result<RelayResponse> {
        Err(FolioError::Network(
            "form relay not available on this host".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Unified platform trait
// ---------------------------------------------------------------------------

/// Aggregate trait for the page surface the navigation core drives.
pub trait Platform: GeometryProvider + ScrollService + HistoryService {}
