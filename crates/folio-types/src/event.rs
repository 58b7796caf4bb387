//! Host-agnostic page events.
//!
//! Every host (browser binding, headless driver) maps its native events to
//! these enums. The navigation core never sees raw platform events.

use serde::{Deserialize, Serialize};

/// A page-level event delivered by the host's single-threaded event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The top-level scroll surface moved; `y` is the new vertical offset.
    Scroll { y: f32 },
    /// A navigation link was clicked; carries the target element id.
    NavClick(String),
    /// Wall-clock time advanced by `dt_ms` (drives deferred tasks and
    /// in-flight scroll animation).
    Tick { dt_ms: u64 },
    /// Dark/light theme toggle pressed.
    ToggleTheme,
    /// Language toggle pressed.
    ToggleLanguage,
    /// Mobile menu button pressed.
    ToggleMenu,
    /// A contact form field was edited.
    FormInput { field: FormField, value: String },
    /// The contact form submit button was pressed.
    FormSubmit,
    /// The page is being torn down; listeners must detach.
    Unmount,
}

/// Contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    /// Fields in the order the form shows them.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Field name as posted to the form relay.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}
