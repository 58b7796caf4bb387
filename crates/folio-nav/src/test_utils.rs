//! Shared test utilities for the navigation subsystem.
//!
//! Provides a [`FakePage`] whose element positions are set directly, plus
//! recording of every history write and scroll request for assertions.

use std::collections::HashMap;

use folio_platform::{GeometryProvider, HistoryService, ScrollService};
use folio_types::error::{FolioError, Result};

/// Deterministic geometry + history host.
#[derive(Debug, Default)]
pub struct FakePage {
    tops: HashMap<String, f32>,
    pub scroll_y: f32,
    pub hash: String,
    pub hash_writes: Vec<String>,
    pub scroll_requests: Vec<String>,
    /// Reported by `is_animating`; smooth scrolls finish instantly unless a
    /// test sets this.
    pub animating: bool,
    pub fail_history: bool,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page from `(id, top)` pairs.
    pub fn with_tops(tops: &[(&str, f32)]) -> Self {
        let mut page = Self::new();
        for &(id, top) in tops {
            page.set_top(id, top);
        }
        page
    }

    pub fn set_top(&mut self, id: &str, top: f32) {
        self.tops.insert(id.to_string(), top);
    }

    pub fn remove(&mut self, id: &str) {
        self.tops.remove(id);
    }
}

impl GeometryProvider for FakePage {
    fn element_top(&self, id: &str) -> Option<f32> {
        self.tops.get(id).copied()
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }
}

impl HistoryService for FakePage {
    fn replace_hash(&mut self, hash: &str) -> Result<()> {
        if self.fail_history {
            return Err(FolioError::Platform("history locked".into()));
        }
        self.hash = hash.to_string();
        self.hash_writes.push(hash.to_string());
        Ok(())
    }

    fn current_hash(&self) -> String {
        self.hash.clone()
    }
}

impl ScrollService for FakePage {
    fn scroll_into_view(&mut self, id: &str) -> Result<()> {
        self.scroll_requests.push(id.to_string());
        Ok(())
    }

    fn scroll_to_offset(&mut self, y: f32) -> Result<()> {
        self.scroll_y = y;
        self.animating = false;
        Ok(())
    }

    fn is_animating(&self) -> bool {
        self.animating
    }
}
