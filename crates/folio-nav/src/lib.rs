//! Scroll-driven section tracking.
//!
//! Data flow: host scroll event -> [`scanner`] (pure read of layout) ->
//! [`NavigationController`] (owns the active section, writes the URL
//! fragment, notifies observers). Nav-bar clicks enter through
//! [`SmoothScrollNavigator`], which scrolls immediately and lands its
//! fragment update after a fixed delay.

pub mod controller;
pub mod navigator;
pub mod scanner;
pub mod url;

#[cfg(test)]
mod test_utils;

pub use controller::{JumpId, NavEvent, NavigationController, SubscriptionId};
pub use navigator::SmoothScrollNavigator;
pub use scanner::{detect_section_in_view, detect_section_in_view_with};
pub use url::{hash_for, update_url_hash};
