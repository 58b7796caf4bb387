//! Page facade: routes host events to the navigation core, preferences and
//! contact form, and exposes what the navigation bar should render.

use folio_nav::{NavigationController, SmoothScrollNavigator};
use folio_platform::{
    FormRelay, GeometryProvider, HistoryService, Platform, PreferenceStore, ScrollService,
};
use folio_types::config::FolioConfig;
use folio_types::error::Result;
use folio_types::event::{FormField, PageEvent};
use folio_types::{Language, SectionId};

use crate::contact::{ContactForm, FormStatus};
use crate::i18n::{contact_text, language_toggle_caption, nav_label};
use crate::prefs::{Preferences, Theme};

/// One link in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub section: SectionId,
    pub label: &'static str,
    pub href: String,
    /// Whether this link carries the active highlight.
    pub active: bool,
}

/// Snapshot of everything the navigation bar renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarView {
    pub links: Vec<NavLink>,
    /// Compact style once the page is scrolled past the threshold.
    pub scrolled: bool,
    pub menu_open: bool,
    /// Caption of the language toggle button.
    pub language_toggle: &'static str,
    pub theme: Theme,
}

/// One input of the contact form as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub field: FormField,
    pub label: &'static str,
    pub value: String,
    /// Validation message shown under the input.
    pub error: Option<&'static str>,
}

/// Snapshot of the contact section in the current language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: Vec<FormFieldView>,
    pub submit_caption: &'static str,
    /// The submit button is disabled while a submission is running.
    pub submitting: bool,
    pub banner: Option<&'static str>,
}

/// The single-page site.
///
/// Owns the platform and every piece of page state. All state changes
/// happen inside [`handle_event`](Self::handle_event), one event at a time.
pub struct Site<P: Platform> {
    platform: P,
    controller: NavigationController,
    navigator: SmoothScrollNavigator,
    prefs: Preferences,
    store: Box<dyn PreferenceStore>,
    contact: ContactForm,
    relay: Box<dyn FormRelay>,
    form_endpoint: String,
    menu_open: bool,
}

impl<P: Platform> Site<P> {
    /// Mount the page.
    ///
    /// Loads preferences, attaches the scroll listener and, when the URL
    /// already names a section, jumps straight to it and highlights it
    /// without touching history.
    pub fn new(
        mut platform: P,
        config: &FolioConfig,
        store: Box<dyn PreferenceStore>,
        relay: Box<dyn FormRelay>,
    ) -> Result<Self> {
        let prefs = Preferences::load(store.as_ref());
        let mut controller = NavigationController::from_config(config);
        controller.attach();

        let hash = platform.current_hash();
        if let Some(section) = SectionId::from_hash(&hash)
            && section != SectionId::Home
            && let Some(top) = platform.element_top(section.as_str())
        {
            let target = platform.scroll_y() + top;
            platform.scroll_to_offset(target)?;
            controller.sync_from_hash(&hash);
            log::info!("Deep link {hash} -> {section}");
        }

        Ok(Self {
            platform,
            controller,
            navigator: SmoothScrollNavigator::from_config(config),
            prefs,
            store,
            contact: ContactForm::from_config(config)?,
            relay,
            form_endpoint: config.form_endpoint.clone(),
            menu_open: false,
        })
    }

    /// Dispatch one host event.
    ///
    /// Errors come from host services (history, preference storage). The
    /// page state stays consistent when one is returned, so hosts may log
    /// it and keep going.
    pub fn handle_event(&mut self, event: PageEvent) -> Result<()> {
        match event {
            PageEvent::Scroll { y } => {
                // Scrolling with no animation running is the user's own
                // input, which ends any jump still in flight.
                if self.controller.jump_in_flight() && !self.platform.is_animating() {
                    self.controller.cancel_jump();
                }
                self.controller.handle_scroll(y, &mut self.platform)?;
            },
            PageEvent::NavClick(id) => {
                self.menu_open = false;
                self.navigator
                    .scroll_to_section(&id, &mut self.platform, &mut self.controller)?;
            },
            PageEvent::Tick { dt_ms } => self.tick(dt_ms)?,
            PageEvent::ToggleTheme => {
                self.prefs.toggle_dark_mode(self.store.as_mut())?;
            },
            PageEvent::ToggleLanguage => {
                self.prefs.toggle_language(self.store.as_mut())?;
            },
            PageEvent::ToggleMenu => self.menu_open = !self.menu_open,
            PageEvent::FormInput { field, value } => self.contact.set_field(field, &value),
            PageEvent::FormSubmit => {
                self.contact
                    .submit(self.relay.as_mut(), &self.form_endpoint);
            },
            PageEvent::Unmount => self.controller.detach(),
        }
        Ok(())
    }

    /// Advance time: step the scroll animation (which scrolls the page like
    /// any other scroll), then fire due fragment updates and form resets.
    fn tick(&mut self, dt_ms: u64) -> Result<()> {
        let mut first_err = None;

        let frame = self.platform.animation_frame(dt_ms);
        if !self.platform.is_animating() {
            self.controller.jump_animation_finished();
        }
        if let Some(y) = frame
            && let Err(e) = self.controller.handle_scroll(y, &mut self.platform)
        {
            first_err.get_or_insert(e);
        }
        if let Err(e) = self
            .navigator
            .tick(dt_ms, &mut self.platform, &mut self.controller)
        {
            first_err.get_or_insert(e);
        }
        self.contact.tick(dt_ms);

        first_err.map_or(Ok(()), Err)
    }

    pub fn nav_bar(&self) -> NavBarView {
        let language = self.prefs.language();
        let active = self.controller.active_section();
        let links = SectionId::ALL
            .into_iter()
            .map(|section| NavLink {
                section,
                label: nav_label(section, language),
                href: match section.hash() {
                    h if h.is_empty() => "#".to_string(),
                    h => h,
                },
                active: section == active,
            })
            .collect();

        NavBarView {
            links,
            scrolled: self.controller.is_scrolled(),
            menu_open: self.menu_open,
            language_toggle: language_toggle_caption(language),
            theme: self.prefs.theme(),
        }
    }

    pub fn contact_view(&self) -> ContactFormView {
        let language = self.prefs.language();
        let text = contact_text(language);
        let fields = FormField::ALL
            .into_iter()
            .map(|field| FormFieldView {
                field,
                label: text.field_label(field),
                value: self.contact.value(field).to_string(),
                error: self.contact.error(field).map(|e| e.message(language)),
            })
            .collect();

        ContactFormView {
            title: text.title,
            subtitle: text.subtitle,
            fields,
            submit_caption: self.contact.submit_caption(language),
            submitting: self.contact.status() == FormStatus::Submitting,
            banner: self.contact.banner(language),
        }
    }

    pub fn active_section(&self) -> SectionId {
        self.controller.active_section()
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme()
    }

    pub fn language(&self) -> Language {
        self.prefs.language()
    }

    pub fn form_status(&self) -> FormStatus {
        self.contact.status()
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Controller access for subscribing observers.
    pub fn controller_mut(&mut self) -> &mut NavigationController {
        &mut self.controller
    }

    pub fn navigator(&self) -> &SmoothScrollNavigator {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_platform::{FormSubmission, MemoryStore, PageSection, RelayResponse, SimulatedPage};
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::prefs::LANGUAGE_KEY;

    struct AcceptAll;

    impl FormRelay for AcceptAll {
        fn submit(&mut self, _endpoint: &str, _form: &FormSubmission) -> Result<RelayResponse> {
            Ok(RelayResponse {
                status_code: 200,
                body: b"{\"ok\":true}".to_vec(),
            })
        }
    }

    fn page() -> SimulatedPage {
        SimulatedPage::new(
            vec![
                PageSection::new("home", 800.0),
                PageSection::new("about", 600.0),
                PageSection::new("skills", 700.0),
                PageSection::new("projects", 900.0),
                PageSection::new("achievements", 500.0),
                PageSection::new("contact", 600.0),
            ],
            800.0,
        )
    }

    fn site_with(page: SimulatedPage, config: &FolioConfig) -> Site<SimulatedPage> {
        Site::new(
            page,
            config,
            Box::new(MemoryStore::new()),
            Box::new(AcceptAll),
        )
        .unwrap()
    }

    fn site() -> Site<SimulatedPage> {
        site_with(page(), &FolioConfig::default())
    }

    fn user_scroll(site: &mut Site<SimulatedPage>, y: f32) {
        site.platform_mut().scroll_to_offset(y).unwrap();
        let y = site.platform().scroll_y();
        site.handle_event(PageEvent::Scroll { y }).unwrap();
    }

    fn run_for(site: &mut Site<SimulatedPage>, total_ms: u64, step_ms: u64) {
        let mut elapsed = 0;
        while elapsed < total_ms {
            site.handle_event(PageEvent::Tick { dt_ms: step_ms }).unwrap();
            elapsed += step_ms;
        }
    }

    #[test]
    fn mounts_at_home_with_defaults() {
        let site = site();
        assert_eq!(site.active_section(), SectionId::Home);
        let bar = site.nav_bar();
        assert_eq!(bar.links.len(), 6);
        assert!(bar.links[0].active);
        assert_eq!(bar.links[0].href, "#");
        assert_eq!(bar.links[1].href, "#about");
        assert!(!bar.scrolled);
        assert_eq!(bar.theme, Theme::Dark);
        assert_eq!(bar.language_toggle, "FR");
    }

    #[test]
    fn user_scroll_highlights_and_writes_fragment() {
        let mut site = site();
        user_scroll(&mut site, 900.0);
        assert_eq!(site.active_section(), SectionId::About);
        assert_eq!(site.platform().current_hash(), "#about");
        assert!(site.nav_bar().scrolled);

        user_scroll(&mut site, 1000.0);
        assert_eq!(site.platform().hash_writes(), ["#about"]);

        user_scroll(&mut site, 0.0);
        assert_eq!(site.active_section(), SectionId::Home);
        assert_eq!(site.platform().current_hash(), "");
    }

    #[test]
    fn nav_click_lands_once_after_delay() {
        let mut site = site();
        site.handle_event(PageEvent::NavClick("projects".into()))
            .unwrap();

        run_for(&mut site, 400, 100);
        assert!(site.platform().hash_writes().is_empty());
        assert_eq!(site.active_section(), SectionId::Home);

        run_for(&mut site, 100, 100);
        assert_eq!(site.platform().hash_writes(), ["#projects"]);
        assert_eq!(site.active_section(), SectionId::Projects);
        assert!(site.nav_bar().links[3].active);

        // A scroll event at the landing spot agrees; nothing more is written.
        let y = site.platform().scroll_y();
        site.handle_event(PageEvent::Scroll { y }).unwrap();
        assert_eq!(site.platform().hash_writes().len(), 1);
    }

    #[test]
    fn user_scroll_mid_jump_takes_over() {
        let mut site = site();
        site.handle_event(PageEvent::NavClick("projects".into()))
            .unwrap();
        run_for(&mut site, 100, 100);
        assert!(site.platform().is_animating());

        user_scroll(&mut site, 0.0);
        assert!(!site.platform().is_animating());
        run_for(&mut site, 500, 100);

        assert_eq!(site.platform().scroll_y(), 0.0);
        assert_eq!(site.active_section(), SectionId::Home);
        assert_eq!(site.platform().current_hash(), "");
        assert!(site.platform().hash_writes().is_empty());
        assert!(site.nav_bar().links[0].active);
    }

    #[test]
    fn user_scroll_mid_jump_highlights_where_it_stops() {
        let mut site = site();
        site.handle_event(PageEvent::NavClick("contact".into()))
            .unwrap();
        run_for(&mut site, 100, 100);

        user_scroll(&mut site, 1500.0);
        assert_eq!(site.active_section(), SectionId::Skills);
        run_for(&mut site, 500, 100);

        assert_eq!(site.active_section(), SectionId::Skills);
        assert_eq!(site.platform().hash_writes(), ["#skills"]);
    }

    #[test]
    fn animation_longer_than_delay_stays_on_target() {
        let mut site = site_with(page().with_scroll_duration(900), &FolioConfig::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        site.controller_mut()
            .subscribe(move |e| sink.borrow_mut().push(*e));

        site.handle_event(PageEvent::NavClick("projects".into()))
            .unwrap();
        run_for(&mut site, 500, 100);
        assert_eq!(site.platform().hash_writes(), ["#projects"]);
        assert_eq!(site.active_section(), SectionId::Projects);
        assert!(site.platform().is_animating());

        // The rest of the animation still crosses `skills`.
        run_for(&mut site, 300, 100);
        assert_eq!(site.active_section(), SectionId::Projects);
        assert!(site.controller_mut().jump_in_flight());

        run_for(&mut site, 100, 100);
        assert!(!site.platform().is_animating());
        assert!(!site.controller_mut().jump_in_flight());
        assert_eq!(site.active_section(), SectionId::Projects);
        assert_eq!(site.platform().hash_writes(), ["#projects"]);

        let changes: Vec<_> = seen
            .borrow()
            .iter()
            .filter(|e| matches!(e, folio_nav::NavEvent::SectionChanged { .. }))
            .copied()
            .collect();
        assert_eq!(
            changes,
            [folio_nav::NavEvent::SectionChanged {
                from: SectionId::Home,
                to: SectionId::Projects,
            }]
        );
    }

    #[test]
    fn without_suppression_passed_sections_flash() {
        let config = FolioConfig {
            suppress_scroll_during_jump: false,
            ..FolioConfig::default()
        };
        let mut site = site_with(page(), &config);
        site.handle_event(PageEvent::NavClick("projects".into()))
            .unwrap();
        run_for(&mut site, 500, 100);

        let writes = site.platform().hash_writes();
        assert!(writes.iter().any(|w| w == "#about"));
        assert_eq!(writes.last().map(String::as_str), Some("#projects"));
        assert_eq!(site.active_section(), SectionId::Projects);
    }

    #[test]
    fn click_on_missing_section_does_nothing() {
        let mut p = page();
        p.unmount("skills");
        let mut site = site_with(p, &FolioConfig::default());
        site.handle_event(PageEvent::NavClick("skills".into()))
            .unwrap();
        run_for(&mut site, 1000, 100);
        assert!(site.platform().hash_writes().is_empty());
        assert_eq!(site.platform().scroll_y(), 0.0);
        assert_eq!(site.navigator().pending(), 0);
    }

    #[test]
    fn deep_link_jumps_without_history_write() {
        let mut site = site_with(page().with_initial_hash("#skills"), &FolioConfig::default());
        assert_eq!(site.active_section(), SectionId::Skills);
        assert_eq!(site.platform().scroll_y(), 1400.0);
        assert!(site.platform().hash_writes().is_empty());

        let y = site.platform().scroll_y();
        site.handle_event(PageEvent::Scroll { y }).unwrap();
        assert!(site.platform().hash_writes().is_empty());
    }

    #[test]
    fn unknown_deep_link_is_ignored() {
        let site = site_with(page().with_initial_hash("#blog"), &FolioConfig::default());
        assert_eq!(site.active_section(), SectionId::Home);
        assert_eq!(site.platform().scroll_y(), 0.0);
    }

    #[test]
    fn unmount_detaches_scroll_listener() {
        let mut site = site();
        site.handle_event(PageEvent::Unmount).unwrap();
        user_scroll(&mut site, 900.0);
        assert_eq!(site.active_section(), SectionId::Home);
        assert!(site.platform().hash_writes().is_empty());
    }

    #[test]
    fn toggles_update_view_and_store() {
        let mut site = site();
        site.handle_event(PageEvent::ToggleTheme).unwrap();
        site.handle_event(PageEvent::ToggleLanguage).unwrap();

        assert_eq!(site.theme(), Theme::Light);
        assert_eq!(site.language(), Language::Fr);
        let bar = site.nav_bar();
        assert_eq!(bar.links[0].label, "Accueil");
        assert_eq!(bar.language_toggle, "EN");
        assert_eq!(bar.theme.root_class(), None);
    }

    #[test]
    fn stored_language_is_used_at_mount() {
        let mut store = MemoryStore::new();
        store.set(LANGUAGE_KEY, "fr").unwrap();
        let site = Site::new(
            page(),
            &FolioConfig::default(),
            Box::new(store),
            Box::new(AcceptAll),
        )
        .unwrap();
        assert_eq!(site.nav_bar().links[2].label, "Compétences");
    }

    #[test]
    fn menu_closes_on_link_click() {
        let mut site = site();
        site.handle_event(PageEvent::ToggleMenu).unwrap();
        assert!(site.nav_bar().menu_open);
        site.handle_event(PageEvent::NavClick("about".into()))
            .unwrap();
        assert!(!site.nav_bar().menu_open);
    }

    #[test]
    fn contact_form_through_events() {
        let mut site = site();
        for (field, value) in [
            (FormField::Name, "Ada"),
            (FormField::Email, "ada@example.com"),
            (FormField::Message, "Hello"),
        ] {
            site.handle_event(PageEvent::FormInput {
                field,
                value: value.into(),
            })
            .unwrap();
        }
        site.handle_event(PageEvent::FormSubmit).unwrap();
        assert_eq!(site.form_status(), FormStatus::Success);
        assert_eq!(site.contact().value(FormField::Name), "");

        run_for(&mut site, 5000, 1000);
        assert_eq!(site.form_status(), FormStatus::Idle);
    }

    #[test]
    fn contact_view_shows_errors_and_banner_in_language() {
        let mut site = site();
        let view = site.contact_view();
        assert_eq!(view.title, "Contact Me");
        assert_eq!(
            view.fields.iter().map(|f| f.label).collect::<Vec<_>>(),
            ["Your Name", "Your Email", "Your Message"]
        );
        assert!(view.banner.is_none());

        site.handle_event(PageEvent::FormInput {
            field: FormField::Email,
            value: "ada@".into(),
        })
        .unwrap();
        site.handle_event(PageEvent::FormSubmit).unwrap();
        site.handle_event(PageEvent::ToggleLanguage).unwrap();

        let view = site.contact_view();
        assert_eq!(view.title, "Contactez-Moi");
        assert_eq!(view.fields[1].value, "ada@");
        assert_eq!(view.fields[1].error, Some("Veuillez entrer un email valide"));
        assert_eq!(view.fields[0].error, Some("Veuillez entrer votre nom"));
        assert_eq!(view.submit_caption, "Envoyer le Message");
        assert!(!view.submitting);
        assert!(view.banner.is_none());

        for (field, value) in [
            (FormField::Name, "Ada"),
            (FormField::Email, "ada@example.com"),
            (FormField::Message, "Salut"),
        ] {
            site.handle_event(PageEvent::FormInput {
                field,
                value: value.into(),
            })
            .unwrap();
        }
        site.handle_event(PageEvent::FormSubmit).unwrap();
        let view = site.contact_view();
        assert_eq!(view.banner, Some("Merci ! Je vous répondrai dès que possible."));
        assert!(view.fields.iter().all(|f| f.value.is_empty() && f.error.is_none()));
    }

    #[test]
    fn observers_see_landing() {
        let mut site = site();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        site.controller_mut()
            .subscribe(move |e| sink.borrow_mut().push(*e));

        site.handle_event(PageEvent::NavClick("contact".into()))
            .unwrap();
        run_for(&mut site, 500, 50);

        let events = seen.borrow();
        assert!(events.contains(&folio_nav::NavEvent::ScrolledChanged(true)));
        assert_eq!(
            events.last(),
            Some(&folio_nav::NavEvent::SectionChanged {
                from: SectionId::Home,
                to: SectionId::Contact,
            })
        );
    }
}
