//! Folio site core.
//!
//! Wires the scroll-driven navigation subsystem to the rest of the page:
//! theme and locale preferences, bilingual labels, and the contact form.
//! Hosts construct a [`Site`] over their [`Platform`](folio_platform::Platform)
//! and feed it [`PageEvent`](folio_types::event::PageEvent)s.

// Re-exports from folio-types (foundation types).
pub use folio_types::config;
pub use folio_types::error;
pub use folio_types::event;
pub use folio_types::{Language, SectionId};

pub use folio_nav as nav;
pub use folio_platform as platform;

pub mod contact;
pub mod i18n;
pub mod prefs;
pub mod site;

pub use contact::{ContactForm, FieldError, FormStatus};
pub use prefs::{Preferences, Theme};
pub use site::{ContactFormView, FormFieldView, NavBarView, NavLink, Site};
