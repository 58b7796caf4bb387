//! Headless page implementation.
//!
//! [`SimulatedPage`] lays sections out top to bottom from their heights,
//! keeps a scroll offset clamped to the scrollable range, animates smooth
//! scrolls with a cubic ease, and records every fragment write. It backs the
//! headless driver and the integration-style tests.

use folio_types::error::{FolioError, Result};

use crate::animation::{ScrollTween, easing};
use crate::services::{GeometryProvider, HistoryService, Platform, ScrollService};

/// One section in the simulated layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    /// Element id.
    pub id: String,
    /// Rendered height in viewport units.
    pub height: f32,
}

impl PageSection {
    pub fn new(id: &str, height: f32) -> Self {
        Self {
            id: id.to_string(),
            height,
        }
    }
}

#[derive(Debug, Clone)]
struct LaidOut {
    section: PageSection,
    /// Document offset of the section's top edge.
    offset: f32,
    mounted: bool,
}

/// In-memory page surface.
#[derive(Debug)]
pub struct SimulatedPage {
    sections: Vec<LaidOut>,
    content_height: f32,
    viewport_height: f32,
    scroll_y: f32,
    animation: Option<ScrollTween>,
    scroll_duration_ms: u64,
    hash: String,
    hash_writes: Vec<String>,
}

impl SimulatedPage {
    /// Lay out `sections` in the given (document) order.
    pub fn new(sections: Vec<PageSection>, viewport_height: f32) -> Self {
        let mut offset = 0.0;
        let mut laid_out = Vec::with_capacity(sections.len());
        for section in sections {
            let height = section.height.max(0.0);
            laid_out.push(LaidOut {
                section,
                offset,
                mounted: true,
            });
            offset += height;
        }
        Self {
            sections: laid_out,
            content_height: offset,
            viewport_height: viewport_height.max(0.0),
            scroll_y: 0.0,
            animation: None,
            scroll_duration_ms: folio_types::config::SMOOTH_SCROLL_DURATION_MS,
            hash: String::new(),
            hash_writes: Vec::new(),
        }
    }

    /// Override the smooth-scroll animation length.
    pub fn with_scroll_duration(mut self, duration_ms: u64) -> Self {
        self.scroll_duration_ms = duration_ms;
        self
    }

    /// Start the page at a given fragment, as if opened from a deep link.
    pub fn with_initial_hash(mut self, hash: &str) -> Self {
        self.hash = hash.to_string();
        self
    }

    /// Remove an element from the DOM while keeping its layout slot.
    /// Returns `false` if no such section exists.
    pub fn unmount(&mut self, id: &str) -> bool {
        self.set_mounted(id, false)
    }

    /// Re-attach a previously unmounted element.
    pub fn mount(&mut self, id: &str) -> bool {
        self.set_mounted(id, true)
    }

    fn set_mounted(&mut self, id: &str, mounted: bool) -> bool {
        match self.sections.iter_mut().find(|s| s.section.id == id) {
            Some(s) => {
                s.mounted = mounted;
                true
            },
            None => false,
        }
    }

    /// Document offset of a mounted element's top edge.
    pub fn offset_of(&self, id: &str) -> Option<f32> {
        self.sections
            .iter()
            .find(|s| s.mounted && s.section.id == id)
            .map(|s| s.offset)
    }

    /// Total laid-out height.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Every fragment written through [`HistoryService::replace_hash`], in
    /// order.
    pub fn hash_writes(&self) -> &[String] {
        &self.hash_writes
    }

    fn clamp(&self, y: f32) -> f32 {
        y.clamp(0.0, self.max_scroll())
    }
}

impl GeometryProvider for SimulatedPage {
    fn element_top(&self, id: &str) -> Option<f32> {
        self.offset_of(id).map(|offset| offset - self.scroll_y)
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }
}

impl ScrollService for SimulatedPage {
    fn scroll_into_view(&mut self, id: &str) -> Result<()> {
        let offset = self
            .offset_of(id)
            .ok_or_else(|| FolioError::Platform(format!("no element with id `{id}`")))?;
        let target = self.clamp(offset);
        log::debug!(
            "Smooth scroll to #{id}: {:.0} -> {target:.0} over {}ms",
            self.scroll_y,
            self.scroll_duration_ms
        );
        // A zero-length animation still reports its move on the next frame,
        // the way a browser fires a scroll event after an instant jump.
        self.animation = Some(ScrollTween::new(
            self.scroll_y,
            target,
            self.scroll_duration_ms,
            easing::ease_in_out_cubic,
        ));
        Ok(())
    }

    fn scroll_to_offset(&mut self, y: f32) -> Result<()> {
        if !y.is_finite() {
            return Err(FolioError::Platform(format!("invalid scroll offset {y}")));
        }
        self.animation = None;
        self.scroll_y = self.clamp(y);
        Ok(())
    }

    fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn animation_frame(&mut self, dt_ms: u64) -> Option<f32> {
        let tween = self.animation.as_mut()?;
        let y = tween.advance(dt_ms);
        if tween.is_finished() {
            self.animation = None;
        }
        let moved = (y - self.scroll_y).abs() > f32::EPSILON;
        self.scroll_y = y;
        moved.then_some(y)
    }
}

impl HistoryService for SimulatedPage {
    fn replace_hash(&mut self, hash: &str) -> Result<()> {
        self.hash = hash.to_string();
        self.hash_writes.push(hash.to_string());
        Ok(())
    }

    fn current_hash(&self) -> String {
        self.hash.clone()
    }
}

impl Platform for SimulatedPage {}
