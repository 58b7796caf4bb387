//! Host capability abstractions for the folio site core.
//!
//! The navigation core never touches a browser directly. It reads layout
//! through [`GeometryProvider`], moves the page through [`ScrollService`],
//! writes the URL fragment through [`HistoryService`], and persists
//! preferences through [`PreferenceStore`]. [`SimulatedPage`] implements the
//! whole set in memory for headless runs and tests.

pub mod animation;
pub mod headless;
pub mod services;
pub mod store;
pub mod timer;

pub use headless::{PageSection, SimulatedPage};
pub use services::*;
pub use store::{JsonFileStore, MemoryStore};
pub use timer::DeferredQueue;
