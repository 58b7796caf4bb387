//! Replays a [`Scenario`] against a headless page.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::error::Result;
use folio_core::event::PageEvent;
use folio_core::nav::NavEvent;
use folio_core::platform::{
    FormRelay, GeometryProvider, HistoryService, PageSection, PreferenceStore, ScrollService,
    SimulatedPage,
};
use folio_core::{FormStatus, Language, SectionId, Site, Theme};

use crate::scenario::{Action, Scenario};

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Every `(from, to)` change of the highlighted section, in order.
    pub transitions: Vec<(SectionId, SectionId)>,
    /// Every fragment written to history, in order.
    pub history: Vec<String>,
    pub final_section: SectionId,
    pub final_hash: String,
    pub scroll_y: f32,
    pub theme: Theme,
    pub language: Language,
    pub form_status: FormStatus,
    /// Contact banner on screen when the replay ended.
    pub form_banner: Option<&'static str>,
    /// Host-service errors that were logged and skipped.
    pub errors: usize,
}

/// Build the page described by `scenario`.
pub fn build_page(scenario: &Scenario) -> SimulatedPage {
    let sections = scenario
        .sections
        .iter()
        .map(|s| PageSection::new(&s.id, s.height))
        .collect();
    let mut page = SimulatedPage::new(sections, scenario.viewport_height)
        .with_scroll_duration(scenario.config.smooth_scroll_duration_ms)
        .with_initial_hash(&scenario.initial_hash);
    for section in scenario.sections.iter().filter(|s| s.unmounted) {
        page.unmount(&section.id);
    }
    page
}

/// Run every step of `scenario`.
///
/// Errors reported by the page (history writes, preference storage) are
/// logged and counted; the replay continues like a browser would.
pub fn run(
    scenario: &Scenario,
    store: Box<dyn PreferenceStore>,
    relay: Box<dyn FormRelay>,
) -> Result<Report> {
    let actions = scenario.actions()?;
    let mut site = Site::new(build_page(scenario), &scenario.config, store, relay)?;

    let transitions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&transitions);
    site.controller_mut().subscribe(move |event| match *event {
        NavEvent::SectionChanged { from, to } => {
            log::info!("Section {from} -> {to}");
            sink.borrow_mut().push((from, to));
        },
        NavEvent::ScrolledChanged(scrolled) => {
            log::debug!("Navbar scrolled style: {scrolled}");
        },
    });

    let mut errors = 0;
    for (i, action) in actions.into_iter().enumerate() {
        log::debug!("Step {}: {action:?}", i + 1);
        for event in events_for(&mut site, action, scenario.frame_ms) {
            if let Err(e) = site.handle_event(event) {
                log::warn!("Step {}: {e}", i + 1);
                errors += 1;
            }
        }
    }

    let page = site.platform();
    Ok(Report {
        transitions: transitions.borrow().clone(),
        history: page.hash_writes().to_vec(),
        final_section: site.active_section(),
        final_hash: page.current_hash(),
        scroll_y: page.scroll_y(),
        theme: site.theme(),
        language: site.language(),
        form_status: site.form_status(),
        form_banner: site.contact_view().banner,
        errors,
    })
}

/// Translate one scripted action into page events.
///
/// A user scroll moves the page first (cancelling any smooth scroll) and
/// then reports the resulting offset. Waits are split into frames so the
/// scroll animation produces intermediate scroll events.
fn events_for(site: &mut Site<SimulatedPage>, action: Action, frame_ms: u64) -> Vec<PageEvent> {
    match action {
        Action::ScrollTo(y) => match site.platform_mut().scroll_to_offset(y) {
            Ok(()) => vec![PageEvent::Scroll {
                y: site.platform().scroll_y(),
            }],
            Err(e) => {
                log::warn!("Cannot scroll to {y}: {e}");
                Vec::new()
            },
        },
        Action::Click(id) => vec![PageEvent::NavClick(id)],
        Action::Wait(ms) => {
            let mut events = Vec::new();
            let mut remaining = ms;
            while remaining > 0 {
                let dt_ms = remaining.min(frame_ms);
                events.push(PageEvent::Tick { dt_ms });
                remaining -= dt_ms;
            }
            events
        },
        Action::ToggleTheme => vec![PageEvent::ToggleTheme],
        Action::ToggleLanguage => vec![PageEvent::ToggleLanguage],
        Action::ToggleMenu => vec![PageEvent::ToggleMenu],
        Action::Input(input) => vec![PageEvent::FormInput {
            field: input.field,
            value: input.value,
        }],
        Action::Submit => vec![PageEvent::FormSubmit],
        Action::Unmount => vec![PageEvent::Unmount],
    }
}
