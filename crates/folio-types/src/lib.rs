//! Foundation types for the folio site core.
//!
//! This crate holds the host-agnostic types shared by every other crate:
//! the closed set of page sections and their scan order, the display
//! language, page events delivered by the host, runtime configuration,
//! and the error type.

pub mod config;
pub mod error;
pub mod event;
pub mod language;
pub mod section;

pub use language::Language;
pub use section::SectionId;
