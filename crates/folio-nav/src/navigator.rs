//! Smooth-scroll navigator: programmatic jumps with deferred fragment sync.

use folio_platform::{DeferredQueue, GeometryProvider, HistoryService, ScrollService};
use folio_types::SectionId;
use folio_types::config::{FolioConfig, HASH_UPDATE_DELAY_MS};
use folio_types::error::Result;

use crate::controller::{JumpId, NavigationController};
use crate::url::update_url_hash;

/// Fragment write waiting for its jump's animation to finish.
#[derive(Debug)]
struct PendingHashUpdate {
    target: String,
    jump: JumpId,
}

/// Entry point for nav-bar clicks.
///
/// Starts a smooth scroll right away and writes the URL fragment once the
/// fixed delay has elapsed, which is long enough for a typical smooth
/// scroll to settle. The delay runs on this navigator's own clock, advanced
/// by [`tick`](Self::tick). Scheduled updates cannot be cancelled, but one
/// whose jump went stale (superseded or interrupted) writes nothing.
#[derive(Debug)]
pub struct SmoothScrollNavigator {
    queue: DeferredQueue<PendingHashUpdate>,
    delay_ms: u64,
}

impl SmoothScrollNavigator {
    pub fn new() -> Self {
        Self::with_delay(HASH_UPDATE_DELAY_MS)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            queue: DeferredQueue::new(),
            delay_ms,
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Self::with_delay(config.hash_update_delay_ms)
    }

    /// Fragment updates scheduled but not yet written.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Navigator clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }

    /// Jump to the element with `id`.
    ///
    /// If no such element is mounted this is a no-op and returns `false`:
    /// nothing scrolls and nothing is scheduled. Otherwise the smooth scroll
    /// starts, the controller is told a jump is in flight, and exactly one
    /// fragment update is scheduled for `now + delay`.
    pub fn scroll_to_section<H>(
        &mut self,
        id: &str,
        host: &mut H,
        controller: &mut NavigationController,
    ) -> Result<bool>
    where
        H: GeometryProvider + ScrollService + ?Sized,
    {
        if host.element_top(id).is_none() {
            log::debug!("Jump to #{id} ignored: no such element");
            return Ok(false);
        }

        host.scroll_into_view(id)?;
        let jump = controller.begin_jump();
        let due = self.queue.schedule(
            self.delay_ms,
            PendingHashUpdate {
                target: id.to_string(),
                jump,
            },
        );
        log::debug!("Jump to #{id} started; fragment update due at {due}ms");
        Ok(true)
    }

    /// Advance the clock by `dt_ms` and write every fragment update that is
    /// now due, in scheduling order. Returns how many were written.
    ///
    /// Updates whose jump the controller no longer accepts are dropped. A
    /// failing history write does not stop later updates from landing;
    /// the first error is returned after all due updates are processed.
    pub fn tick<H>(
        &mut self,
        dt_ms: u64,
        host: &mut H,
        controller: &mut NavigationController,
    ) -> Result<usize>
    where
        H: HistoryService + ScrollService + ?Sized,
    {
        let due = self.queue.advance(dt_ms);
        let mut written = 0;
        let mut first_err = None;

        for update in due {
            if !controller.accepts_landing(update.jump) {
                log::debug!("Fragment update for #{} dropped: jump is stale", update.target);
                continue;
            }
            match update_url_hash(host, &update.target) {
                Ok(()) => written += 1,
                Err(e) => {
                    log::warn!("Deferred fragment update for #{} failed: {e}", update.target);
                    first_err.get_or_insert(e);
                },
            }
            controller.complete_jump(
                update.jump,
                SectionId::parse(&update.target),
                !host.is_animating(),
            );
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(written),
        }
    }
}

impl Default for SmoothScrollNavigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakePage;

    fn setup() -> (SmoothScrollNavigator, NavigationController, FakePage) {
        let mut controller = NavigationController::new();
        controller.attach();
        let page = FakePage::with_tops(&[
            ("home", 0.0),
            ("about", 800.0),
            ("projects", 2100.0),
            ("contact", 3500.0),
        ]);
        (SmoothScrollNavigator::new(), controller, page)
    }

    #[test]
    fn hash_update_lands_after_delay_only() {
        let (mut nav, mut ctl, mut page) = setup();
        assert!(nav.scroll_to_section("contact", &mut page, &mut ctl).unwrap());
        assert_eq!(page.scroll_requests, ["contact"]);
        assert_eq!(nav.pending(), 1);

        assert_eq!(nav.tick(499, &mut page, &mut ctl).unwrap(), 0);
        assert!(page.hash_writes.is_empty());

        assert_eq!(nav.tick(1, &mut page, &mut ctl).unwrap(), 1);
        assert_eq!(page.hash_writes, ["#contact"]);
        assert_eq!(nav.pending(), 0);

        // Nothing further is ever written for that jump.
        assert_eq!(nav.tick(10_000, &mut page, &mut ctl).unwrap(), 0);
        assert_eq!(page.hash_writes.len(), 1);
    }

    #[test]
    fn missing_target_is_a_no_op() {
        let (mut nav, mut ctl, mut page) = setup();
        assert!(!nav.scroll_to_section("nonexistent", &mut page, &mut ctl).unwrap());
        assert!(page.scroll_requests.is_empty());
        assert_eq!(nav.pending(), 0);
        assert!(!ctl.jump_in_flight());
        nav.tick(1000, &mut page, &mut ctl).unwrap();
        assert!(page.hash_writes.is_empty());
    }

    #[test]
    fn landing_sets_active_section_and_releases_scan() {
        let (mut nav, mut ctl, mut page) = setup();
        nav.scroll_to_section("projects", &mut page, &mut ctl).unwrap();
        assert!(ctl.jump_in_flight());

        // Mid-animation the page passes `about`; the scan is held off.
        page.set_top("about", 40.0);
        assert_eq!(ctl.handle_scroll(840.0, &mut page).unwrap(), None);
        assert_eq!(ctl.active_section(), SectionId::Home);

        nav.tick(500, &mut page, &mut ctl).unwrap();
        assert!(!ctl.jump_in_flight());
        assert_eq!(ctl.active_section(), SectionId::Projects);
        assert_eq!(page.hash_writes, ["#projects"]);
    }

    #[test]
    fn jump_home_clears_fragment() {
        let (mut nav, mut ctl, mut page) = setup();
        page.hash = "#about".into();
        nav.scroll_to_section("home", &mut page, &mut ctl).unwrap();
        nav.tick(500, &mut page, &mut ctl).unwrap();
        assert_eq!(page.hash, "");
    }

    #[test]
    fn superseded_jump_writes_nothing() {
        let (mut nav, mut ctl, mut page) = setup();
        nav.scroll_to_section("about", &mut page, &mut ctl).unwrap();
        nav.tick(200, &mut page, &mut ctl).unwrap();
        nav.scroll_to_section("contact", &mut page, &mut ctl).unwrap();

        assert_eq!(nav.tick(300, &mut page, &mut ctl).unwrap(), 0);
        assert!(page.hash_writes.is_empty());
        assert_eq!(ctl.active_section(), SectionId::Home);
        assert!(ctl.jump_in_flight());

        assert_eq!(nav.tick(200, &mut page, &mut ctl).unwrap(), 1);
        assert_eq!(page.hash_writes, ["#contact"]);
        assert_eq!(ctl.active_section(), SectionId::Contact);
        assert!(!ctl.jump_in_flight());
    }

    #[test]
    fn overlapping_jumps_all_land_without_suppression() {
        let config = FolioConfig {
            suppress_scroll_during_jump: false,
            ..FolioConfig::default()
        };
        let (mut nav, _, mut page) = setup();
        let mut ctl = NavigationController::from_config(&config);
        ctl.attach();
        nav.scroll_to_section("about", &mut page, &mut ctl).unwrap();
        nav.tick(200, &mut page, &mut ctl).unwrap();
        nav.scroll_to_section("contact", &mut page, &mut ctl).unwrap();
        nav.tick(500, &mut page, &mut ctl).unwrap();
        assert_eq!(page.hash_writes, ["#about", "#contact"]);
        assert_eq!(ctl.active_section(), SectionId::Contact);
    }

    #[test]
    fn interrupted_jump_writes_nothing() {
        let (mut nav, mut ctl, mut page) = setup();
        page.animating = true;
        nav.scroll_to_section("projects", &mut page, &mut ctl).unwrap();
        nav.tick(100, &mut page, &mut ctl).unwrap();

        assert!(ctl.cancel_jump());
        nav.tick(400, &mut page, &mut ctl).unwrap();
        assert!(page.hash_writes.is_empty());
        assert_eq!(ctl.active_section(), SectionId::Home);
        assert_eq!(nav.pending(), 0);
    }

    #[test]
    fn long_animation_keeps_scan_held_after_landing() {
        let (mut nav, mut ctl, mut page) = setup();
        page.animating = true;
        nav.scroll_to_section("projects", &mut page, &mut ctl).unwrap();
        nav.tick(500, &mut page, &mut ctl).unwrap();
        assert_eq!(page.hash_writes, ["#projects"]);
        assert_eq!(ctl.active_section(), SectionId::Projects);
        assert!(ctl.jump_in_flight());

        page.animating = false;
        ctl.jump_animation_finished();
        assert!(!ctl.jump_in_flight());
    }

    #[test]
    fn custom_delay_from_config() {
        let config = FolioConfig {
            hash_update_delay_ms: 800,
            ..FolioConfig::default()
        };
        let (_, mut ctl, mut page) = setup();
        let mut nav = SmoothScrollNavigator::from_config(&config);
        nav.scroll_to_section("about", &mut page, &mut ctl).unwrap();
        nav.tick(500, &mut page, &mut ctl).unwrap();
        assert!(page.hash_writes.is_empty());
        nav.tick(300, &mut page, &mut ctl).unwrap();
        assert_eq!(page.hash_writes, ["#about"]);
    }

    #[test]
    fn failed_write_still_lands_jump() {
        let (mut nav, mut ctl, mut page) = setup();
        nav.scroll_to_section("about", &mut page, &mut ctl).unwrap();
        page.fail_history = true;
        assert!(nav.tick(500, &mut page, &mut ctl).is_err());
        assert!(!ctl.jump_in_flight());
        assert_eq!(ctl.active_section(), SectionId::About);
        assert_eq!(nav.pending(), 0);
    }
}
