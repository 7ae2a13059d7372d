//! Site runtime
//!
//! [`Site`] owns the host document and every controller mounted on it.
//! Host input goes through [`Site::handle_event`], timers through
//! [`Site::advance`]. After each call the notification bus is drained:
//! sibling controllers are synced first, then external listeners run.

use folio_core::event_types;
use folio_core::{
    Controller, Document, Event, ListenerId, Listeners, Notification, NotificationBus,
    Preferences, ScrollBehavior,
};
use folio_theme::{AccentColor, AccentController, ColorScheme, ThemeController};
use folio_widgets::{
    Carousel, MenuResponse, MobileMenu, Timeline, TimelineNavigation, TimelineTabs,
};

use crate::config::SiteConfig;
use crate::error::Result;

/// A page with all of its interactive behavior attached
pub struct Site<D: Document> {
    doc: D,
    config: SiteConfig,
    prefs: Preferences,
    bus: NotificationBus,
    listeners: Listeners,

    theme: Option<ThemeController>,
    accent: AccentController,
    carousels: Vec<Carousel>,
    timeline: Option<Timeline>,
    tabs: Option<TimelineTabs>,
    menu: Option<MobileMenu>,
}

impl<D: Document> Site<D> {
    /// Mount every controller whose anchors exist in `doc`.
    ///
    /// Missing anchors disable the affected controller only.
    pub fn start(config: SiteConfig, prefs: Preferences, mut doc: D) -> Self {
        let bus = NotificationBus::new();

        let theme =
            ThemeController::mount(config.theme.clone(), prefs.clone(), bus.clone(), &mut doc);
        let accent =
            AccentController::mount(config.accent.clone(), prefs.clone(), bus.clone(), &mut doc);

        let carousels: Vec<Carousel> = config
            .carousels
            .iter()
            .filter_map(|carousel| {
                let mounted = Carousel::mount(carousel.clone(), &mut doc);
                if mounted.is_none() {
                    tracing::debug!("site: carousel `{}` not on this page", carousel.name);
                }
                mounted
            })
            .collect();

        let timeline = Timeline::mount(config.timeline.clone(), bus.clone(), &mut doc);
        let tabs = TimelineTabs::mount(config.tabs.clone(), &config.timeline, &mut doc);
        let entries = timeline
            .as_ref()
            .map(|timeline| timeline.entries().to_vec())
            .unwrap_or_default();
        let menu = MobileMenu::mount(config.menu.clone(), entries, bus.clone(), &mut doc);

        tracing::info!(
            "site: started (theme: {}, carousels: {}, timeline: {}, tabs: {}, menu: {})",
            theme.is_some(),
            carousels.len(),
            timeline.is_some(),
            tabs.is_some(),
            menu.is_some()
        );

        let mut site = Self {
            doc,
            config,
            prefs,
            bus,
            listeners: Listeners::new(),
            theme,
            accent,
            carousels,
            timeline,
            tabs,
            menu,
        };
        site.flush();
        site
    }

    // ========== Input ==========

    /// Route one host event. Returns `true` if a controller consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.run_timers(event.timestamp);

        let consumed = match event.event_type {
            event_types::RESIZE => {
                for carousel in &mut self.carousels {
                    carousel.handle_event(event, &mut self.doc);
                }
                self.sync_breakpoint();
                true
            }
            _ => self.route(event),
        };
        self.flush();
        consumed
    }

    /// Run every timer due at or before `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        self.run_timers(now_ms);
        self.flush();
    }

    fn run_timers(&mut self, now_ms: u64) {
        for carousel in &mut self.carousels {
            carousel.advance(now_ms, &mut self.doc);
        }
    }

    fn route(&mut self, event: &Event) -> bool {
        if event.event_type == event_types::CLICK {
            // Any click outside the accent picker folds it, whoever consumes it
            self.accent.dismiss_picker(&event.target, &mut self.doc);
        }
        if let Some(menu) = self.menu.as_mut() {
            let nav = self
                .timeline
                .as_mut()
                .map(|timeline| timeline as &mut dyn TimelineNavigation);
            match menu.handle(event, nav, &mut self.doc) {
                MenuResponse::Handled => return true,
                MenuResponse::ToggleTheme => return self.toggle_theme().is_some(),
                MenuResponse::Ignored => {}
            }
        }
        if event.event_type == event_types::KEY_DOWN {
            return false;
        }

        let doc = &mut self.doc;
        let chain = self
            .theme
            .iter_mut()
            .map(|c| c as &mut dyn Controller)
            .chain(std::iter::once(&mut self.accent as &mut dyn Controller))
            .chain(self.carousels.iter_mut().map(|c| c as &mut dyn Controller))
            .chain(self.timeline.iter_mut().map(|c| c as &mut dyn Controller))
            .chain(self.tabs.iter_mut().map(|c| c as &mut dyn Controller));

        for controller in chain {
            if controller.handle_event(event, &mut *doc) {
                tracing::trace!(
                    "site: event {} on `{}` -> {}",
                    event.event_type,
                    event.target,
                    controller.name()
                );
                return true;
            }
        }
        false
    }

    /// Build or remove the tab strip when the viewport crosses the breakpoint
    fn sync_breakpoint(&mut self) {
        let narrow = self.config.tabs.applies(self.doc.viewport_width());
        match (self.tabs.take(), narrow) {
            (Some(tabs), false) => tabs.teardown(&mut self.doc),
            (None, true) => {
                self.tabs = TimelineTabs::mount(
                    self.config.tabs.clone(),
                    &self.config.timeline,
                    &mut self.doc,
                );
                let active = self.timeline.as_ref().and_then(|t| t.active_entry_id());
                if let (Some(tabs), Some(entry_id)) = (self.tabs.as_mut(), active) {
                    tabs.sync_active(entry_id, &mut self.doc);
                }
            }
            (tabs, _) => self.tabs = tabs,
        }
    }

    /// Deliver queued notifications until the bus is quiet
    fn flush(&mut self) {
        loop {
            let batch = self.bus.drain();
            if batch.is_empty() {
                break;
            }
            for notification in &batch {
                self.sync_siblings(notification);
                self.listeners.dispatch(notification);
            }
        }
    }

    fn sync_siblings(&mut self, notification: &Notification) {
        match notification {
            Notification::SchemeChanged { scheme } => {
                if let Some(menu) = &self.menu {
                    menu.refresh_theme_label(scheme, &mut self.doc);
                }
            }
            Notification::TimelineActiveChanged { entry_id, period } => {
                if let Some(menu) = &self.menu {
                    menu.sync_active(period.as_deref(), &mut self.doc);
                }
                if let Some(tabs) = &mut self.tabs {
                    tabs.sync_active(entry_id, &mut self.doc);
                }
            }
            _ => {}
        }
    }

    // ========== Observers ==========

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ========== Operations ==========

    /// Flip the color scheme. `None` when the page has no theme toggle.
    pub fn toggle_theme(&mut self) -> Option<ColorScheme> {
        let scheme = self.theme.as_mut()?.toggle(&mut self.doc);
        self.flush();
        Some(scheme)
    }

    pub fn set_scheme(&mut self, scheme: ColorScheme) -> bool {
        let Some(theme) = self.theme.as_mut() else {
            return false;
        };
        theme.set_scheme(scheme, &mut self.doc);
        self.flush();
        true
    }

    /// Select an accent by identifier
    pub fn select_color(&mut self, color: &str) -> Result<AccentColor> {
        let selected = self.accent.select_color(color, &mut self.doc)?;
        self.flush();
        Ok(selected)
    }

    /// Smooth-scroll the timeline to the entry for `period`
    pub fn navigate_to(&mut self, period: &str) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        let found = timeline.navigate_to(period, ScrollBehavior::Smooth, &mut self.doc);
        self.flush();
        found
    }

    pub fn carousel_next(&mut self, name: &str) -> bool {
        self.with_carousel(name, |carousel, doc| carousel.next(doc))
            .unwrap_or(false)
    }

    pub fn carousel_prev(&mut self, name: &str) -> bool {
        self.with_carousel(name, |carousel, doc| carousel.prev(doc))
            .unwrap_or(false)
    }

    /// Jump a carousel to a logical position, returning where it landed
    pub fn carousel_go_to(&mut self, name: &str, index: isize) -> Option<usize> {
        self.with_carousel(name, |carousel, doc| carousel.go_to(index, doc))
    }

    fn with_carousel<R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Carousel, &mut dyn Document) -> R,
    ) -> Option<R> {
        let carousel = self
            .carousels
            .iter_mut()
            .find(|carousel| carousel.config().name == name)?;
        let doc: &mut dyn Document = &mut self.doc;
        let result = f(carousel, doc);
        self.flush();
        Some(result)
    }

    pub fn open_menu(&mut self) -> bool {
        let period = self
            .timeline
            .as_ref()
            .and_then(|timeline| timeline.active_period())
            .map(str::to_owned);
        let Some(menu) = self.menu.as_mut() else {
            return false;
        };
        let opened = menu.open(period.as_deref(), &mut self.doc);
        self.flush();
        opened
    }

    pub fn close_menu(&mut self) -> bool {
        let Some(menu) = self.menu.as_mut() else {
            return false;
        };
        let closed = menu.close(&mut self.doc);
        self.flush();
        closed
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Host-side document access (viewport changes, layout updates)
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    pub fn theme(&self) -> Option<&ThemeController> {
        self.theme.as_ref()
    }

    pub fn accent(&self) -> &AccentController {
        &self.accent
    }

    pub fn carousel(&self, name: &str) -> Option<&Carousel> {
        self.carousels
            .iter()
            .find(|carousel| carousel.config().name == name)
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn tabs(&self) -> Option<&TimelineTabs> {
        self.tabs.as_ref()
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }
}
