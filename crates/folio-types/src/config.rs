//! Runtime configuration.
//!
//! Every field has a default matching the fixed behaviour of the site, so
//! an empty TOML document (or no file at all) yields the canonical setup.
//!
//! ```toml
//! activation_threshold = 150.0
//! scrolled_threshold = 50.0
//! hash_update_delay_ms = 500
//! form_reset_delay_ms = 5000
//! smooth_scroll_duration_ms = 400
//! form_endpoint = "https://formspree.io/f/mdkgkwdw"
//! suppress_scroll_during_jump = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{FolioError, Result};

/// Distance (viewport px) from the viewport top within which a section
/// counts as "in view".
pub const ACTIVATION_THRESHOLD: f32 = 150.0;

/// Scroll offset beyond which the navigation bar switches to its compact
/// "scrolled" style.
pub const SCROLLED_THRESHOLD: f32 = 50.0;

/// Delay between a programmatic jump and its URL fragment update.
pub const HASH_UPDATE_DELAY_MS: u64 = 500;

/// How long the contact form success/error banner stays up.
pub const FORM_RESET_DELAY_MS: u64 = 5000;

/// Length of the smooth-scroll animation in headless hosts.
pub const SMOOTH_SCROLL_DURATION_MS: u64 = 400;

/// Third-party form relay the contact form posts to.
pub const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/mdkgkwdw";

/// Site core configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub activation_threshold: f32,
    pub scrolled_threshold: f32,
    pub hash_update_delay_ms: u64,
    pub form_reset_delay_ms: u64,
    pub smooth_scroll_duration_ms: u64,
    pub form_endpoint: String,
    /// Hold off scroll-driven section detection while a programmatic jump
    /// is animating. `false` restores the unguarded behaviour where the
    /// detector may briefly highlight sections the jump passes over.
    pub suppress_scroll_during_jump: bool,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            activation_threshold: ACTIVATION_THRESHOLD,
            scrolled_threshold: SCROLLED_THRESHOLD,
            hash_update_delay_ms: HASH_UPDATE_DELAY_MS,
            form_reset_delay_ms: FORM_RESET_DELAY_MS,
            smooth_scroll_duration_ms: SMOOTH_SCROLL_DURATION_MS,
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            suppress_scroll_during_jump: true,
        }
    }
}

impl FolioConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::info!("No config at {} -- using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Reject values the navigation core cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.activation_threshold.is_finite() {
            return Err(FolioError::Config(
                "activation_threshold must be finite".into(),
            ));
        }
        if !self.scrolled_threshold.is_finite() {
            return Err(FolioError::Config("scrolled_threshold must be finite".into()));
        }
        if self.form_endpoint.trim().is_empty() {
            return Err(FolioError::Config("form_endpoint must not be empty".into()));
        }
        Ok(())
    }
}
