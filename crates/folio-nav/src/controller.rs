//! Navigation controller: active section state, scroll handling, observers.

use folio_platform::{GeometryProvider, HistoryService};
use folio_types::SectionId;
use folio_types::config::{ACTIVATION_THRESHOLD, FolioConfig, SCROLLED_THRESHOLD};
use folio_types::error::Result;

use crate::scanner::detect_section_in_view_with;
use crate::url::update_url_hash;

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The highlighted section changed.
    SectionChanged { from: SectionId, to: SectionId },
    /// The compact "scrolled" navbar style switched on or off.
    ScrolledChanged(bool),
}

/// Handle returned by [`NavigationController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identifies one programmatic jump from start to landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JumpId(u64);

type Observer = Box<dyn FnMut(&NavEvent)>;

/// The jump currently holding off scroll detection.
#[derive(Debug, Clone, Copy)]
struct InFlightJump {
    id: JumpId,
    /// Its fragment update has been written; only the animation remains.
    landed: bool,
}

/// Owns `active_section` and is the only writer of it.
///
/// Scroll events re-run the viewport scanner; a differing result becomes the
/// new active section and is mirrored into the URL fragment. Identical
/// results do nothing, so a steady scroll through one section costs no
/// history writes.
///
/// While a programmatic jump is in flight (see
/// [`SmoothScrollNavigator`](crate::SmoothScrollNavigator)) scroll-driven
/// transitions are held off so sections the animation passes over are not
/// highlighted. A jump is in flight from [`begin_jump`](Self::begin_jump)
/// until both its fragment update has landed and its animation has ended,
/// or until the user interrupts it with [`cancel_jump`](Self::cancel_jump).
pub struct NavigationController {
    active: SectionId,
    scrolled: bool,
    attached: bool,
    in_flight: Option<InFlightJump>,
    next_jump: u64,
    suppress_during_jump: bool,
    activation_threshold: f32,
    scrolled_threshold: f32,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl NavigationController {
    /// Controller with the default thresholds, starting at `home`.
    /// Call [`attach`](Self::attach) before feeding scroll events.
    pub fn new() -> Self {
        Self {
            active: SectionId::Home,
            scrolled: false,
            attached: false,
            in_flight: None,
            next_jump: 0,
            suppress_during_jump: true,
            activation_threshold: ACTIVATION_THRESHOLD,
            scrolled_threshold: SCROLLED_THRESHOLD,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            suppress_during_jump: config.suppress_scroll_during_jump,
            activation_threshold: config.activation_threshold,
            scrolled_threshold: config.scrolled_threshold,
            ..Self::new()
        }
    }

    /// Currently highlighted section.
    pub fn active_section(&self) -> SectionId {
        self.active
    }

    /// Whether the page is scrolled past the compact-style threshold.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Whether the scroll listener is attached.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether scroll-driven detection is currently held off.
    pub fn jump_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start listening to scroll events (page mount).
    pub fn attach(&mut self) {
        if !self.attached {
            log::debug!("Navigation controller attached");
        }
        self.attached = true;
    }

    /// Stop listening to scroll events (page unmount). State is kept; later
    /// scroll events are ignored until re-attached.
    pub fn detach(&mut self) {
        if self.attached {
            log::debug!("Navigation controller detached");
        }
        self.attached = false;
    }

    /// Register an observer for state changes.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&NavEvent) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// React to one scroll event.
    ///
    /// Updates the scrolled style flag, then (unless a jump is in flight)
    /// scans for the section in view and transitions to it. Returns the new
    /// section when a transition happened.
    pub fn handle_scroll<H>(&mut self, scroll_y: f32, host: &mut H) -> Result<Option<SectionId>>
    where
        H: GeometryProvider + HistoryService + ?Sized,
    {
        if !self.attached {
            log::trace!("Scroll at {scroll_y:.0} ignored: controller detached");
            return Ok(None);
        }

        let scrolled = scroll_y > self.scrolled_threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            self.notify(NavEvent::ScrolledChanged(scrolled));
        }

        if self.jump_in_flight() {
            log::debug!("Scroll at {scroll_y:.0}: jump in flight, section scan skipped");
            return Ok(None);
        }

        let in_view =
            detect_section_in_view_with(&SectionId::SCAN_ORDER, &*host, self.activation_threshold);
        if self.transition(in_view, host)? {
            Ok(Some(in_view))
        } else {
            Ok(None)
        }
    }

    /// Make `section` active and mirror it into the URL fragment.
    ///
    /// No-op (no history write) when `section` is already active. Returns
    /// whether a transition happened.
    pub fn transition<H>(&mut self, section: SectionId, history: &mut H) -> Result<bool>
    where
        H: HistoryService + ?Sized,
    {
        if !self.set_active(section) {
            return Ok(false);
        }
        update_url_hash(history, section.as_str())?;
        Ok(true)
    }

    /// Adopt the section named by the URL fragment at page load without
    /// writing history. Unknown fragments leave the state untouched.
    pub fn sync_from_hash(&mut self, hash: &str) -> Option<SectionId> {
        let section = SectionId::from_hash(hash)?;
        self.set_active(section);
        Some(section)
    }

    /// Mark the start of a programmatic jump.
    ///
    /// When suppression is enabled the jump becomes the in-flight jump,
    /// replacing any earlier one.
    pub fn begin_jump(&mut self) -> JumpId {
        self.next_jump += 1;
        let jump = JumpId(self.next_jump);
        if self.suppress_during_jump {
            self.in_flight = Some(InFlightJump {
                id: jump,
                landed: false,
            });
        }
        jump
    }

    /// Whether `jump` may still write its fragment and take the highlight.
    ///
    /// With suppression enabled only the in-flight jump qualifies: a jump
    /// that was superseded by a later click or interrupted by the user is
    /// stale. Without suppression every jump lands.
    pub fn accepts_landing(&self, jump: JumpId) -> bool {
        !self.suppress_during_jump || self.in_flight.is_some_and(|j| j.id == jump)
    }

    /// Land a programmatic jump whose fragment update has just been
    /// written. Adopts `landed` as the active section without another
    /// history write.
    ///
    /// Scroll detection is released now if `animation_done`, otherwise when
    /// [`jump_animation_finished`](Self::jump_animation_finished) is called.
    /// Stale jumps are ignored.
    pub fn complete_jump(
        &mut self,
        jump: JumpId,
        landed: Option<SectionId>,
        animation_done: bool,
    ) {
        if !self.accepts_landing(jump) {
            log::debug!("Stale jump {jump:?} ignored");
            return;
        }
        if animation_done {
            self.in_flight = None;
        } else if let Some(in_flight) = &mut self.in_flight {
            in_flight.landed = true;
        }
        if let Some(section) = landed {
            self.set_active(section);
        }
    }

    /// The host's smooth scroll came to rest. Releases scroll detection if
    /// the in-flight jump has already landed; before landing the jump keeps
    /// holding it so nothing is written ahead of the deferred update.
    pub fn jump_animation_finished(&mut self) {
        if self.in_flight.is_some_and(|j| j.landed) {
            log::debug!("Jump animation finished; scroll detection resumed");
            self.in_flight = None;
        }
    }

    /// The user scrolled while a jump was in flight. Drops the jump so the
    /// next scan follows the viewport again; its pending fragment update
    /// becomes stale. Returns whether a jump was dropped.
    pub fn cancel_jump(&mut self) -> bool {
        match self.in_flight.take() {
            Some(jump) => {
                log::debug!("Jump {:?} interrupted by user scroll", jump.id);
                true
            },
            None => false,
        }
    }

    fn set_active(&mut self, section: SectionId) -> bool {
        if section == self.active {
            return false;
        }
        let from = self.active;
        self.active = section;
        log::info!("Active section: {from} -> {section}");
        self.notify(NavEvent::SectionChanged { from, to: section });
        true
    }

    fn notify(&mut self, event: NavEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}
