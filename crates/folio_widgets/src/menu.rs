//! Mobile hamburger menu
//!
//! A two-state panel driven by a small FSM. Opening marks the panel, overlay
//! and toggle button active, locks page scroll and rebuilds a list mirroring
//! the timeline sidebar (on pages that have one). Items navigate through the
//! injected [`TimelineNavigation`] and fall back to scrolling the entry into
//! view when no navigator is available.

use folio_core::fsm::StateMachine;
use folio_core::{
    event_types, ChildNode, Document, Event, KeyCode, Notification, NotificationBus,
    ScrollBehavior, ACTIVE_CLASS,
};
use serde::{Deserialize, Serialize};

use crate::timeline::{TimelineEntry, TimelineNavigation};

/// Menu visibility states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum MenuInput {
    Open,
    Close,
    Toggle,
}

/// What the caller should do after [`MobileMenu::handle`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuResponse {
    /// Not a menu event
    Ignored,
    /// Consumed by the menu
    Handled,
    /// The mobile theme button was pressed
    ToggleTheme,
}

/// Mobile menu configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub menu_id: String,
    pub overlay_id: String,
    /// Hamburger button
    pub toggle_id: String,
    pub timeline_section_id: String,
    pub timeline_container_id: String,
    /// Mirrored items are `<item_prefix><index>`
    pub item_prefix: String,
    pub theme_button_id: String,
    pub theme_text_id: String,
    /// Root attribute read for the initial theme label
    pub scheme_attribute: String,
    pub label_when_light: String,
    pub label_when_dark: String,
    /// Path fragments of pages that show the timeline list
    pub timeline_pages: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menu_id: "mobile-menu".into(),
            overlay_id: "mobile-menu-overlay".into(),
            toggle_id: "hamburger-toggle".into(),
            timeline_section_id: "mobile-timeline-section".into(),
            timeline_container_id: "mobile-timeline-container".into(),
            item_prefix: "mobile-timeline-item-".into(),
            theme_button_id: "mobile-theme-toggle".into(),
            theme_text_id: "mobile-theme-text".into(),
            scheme_attribute: "data-theme".into(),
            label_when_light: "Dark Mode".into(),
            label_when_dark: "Light Mode".into(),
            timeline_pages: vec!["about".into()],
        }
    }
}

/// Mobile menu controller
pub struct MobileMenu {
    config: MenuConfig,
    fsm: StateMachine<MenuState, MenuInput>,
    /// Timeline entries available for mirroring
    entries: Vec<TimelineEntry>,
    /// Entries currently rendered in the list
    items: Vec<TimelineEntry>,
    bus: NotificationBus,
}

impl MobileMenu {
    /// Returns `None` when the panel, overlay or hamburger button is absent
    pub fn mount(
        config: MenuConfig,
        entries: Vec<TimelineEntry>,
        bus: NotificationBus,
        doc: &mut dyn Document,
    ) -> Option<Self> {
        for id in [&config.menu_id, &config.overlay_id, &config.toggle_id] {
            if !doc.contains(id) {
                tracing::debug!("menu: anchor `{id}` absent, not mounting");
                return None;
            }
        }

        let fsm = StateMachine::builder(MenuState::Closed)
            .on(MenuState::Closed, MenuInput::Open, MenuState::Open)
            .on(MenuState::Closed, MenuInput::Toggle, MenuState::Open)
            .on(MenuState::Open, MenuInput::Close, MenuState::Closed)
            .on(MenuState::Open, MenuInput::Toggle, MenuState::Closed)
            .build();

        let menu = Self {
            config,
            fsm,
            entries,
            items: Vec::new(),
            bus,
        };
        let scheme = doc
            .root_attribute(&menu.config.scheme_attribute)
            .unwrap_or_default();
        menu.refresh_theme_label(&scheme, doc);
        Some(menu)
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn state(&self) -> MenuState {
        self.fsm.current_state()
    }

    pub fn is_open(&self) -> bool {
        self.fsm.is_in(MenuState::Open)
    }

    /// Entries in the mirrored list, in order
    pub fn items(&self) -> &[TimelineEntry] {
        &self.items
    }

    pub fn item_id(&self, index: usize) -> String {
        format!("{}{}", self.config.item_prefix, index)
    }

    pub fn open(&mut self, active_period: Option<&str>, doc: &mut dyn Document) -> bool {
        self.transition(MenuInput::Open, active_period, doc)
    }

    pub fn close(&mut self, doc: &mut dyn Document) -> bool {
        self.transition(MenuInput::Close, None, doc)
    }

    pub fn toggle(&mut self, active_period: Option<&str>, doc: &mut dyn Document) -> bool {
        self.transition(MenuInput::Toggle, active_period, doc)
    }

    fn transition(
        &mut self,
        input: MenuInput,
        active_period: Option<&str>,
        doc: &mut dyn Document,
    ) -> bool {
        let before = self.fsm.current_state();
        let after = self.fsm.send(input);
        if before == after {
            return false;
        }

        let open = after == MenuState::Open;
        for id in [
            &self.config.menu_id,
            &self.config.overlay_id,
            &self.config.toggle_id,
        ] {
            doc.set_class(id, ACTIVE_CLASS, open);
        }
        doc.set_scroll_locked(open);

        if open {
            self.rebuild_timeline(active_period, doc);
            self.bus.publish(Notification::MenuOpened);
        } else {
            self.bus.publish(Notification::MenuClosed);
        }
        tracing::debug!("menu: {:?} -> {:?}", before, after);
        true
    }

    fn on_timeline_page(&self, doc: &dyn Document) -> bool {
        let path = doc.path();
        self.config
            .timeline_pages
            .iter()
            .any(|page| path.contains(page.as_str()))
    }

    fn rebuild_timeline(&mut self, active_period: Option<&str>, doc: &mut dyn Document) {
        if self.entries.is_empty() || !self.on_timeline_page(doc) {
            doc.set_visible(&self.config.timeline_section_id, false);
            self.items.clear();
            return;
        }

        doc.set_visible(&self.config.timeline_section_id, true);
        self.items = self.entries.clone();

        let nodes: Vec<ChildNode> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let active = active_period.is_some() && entry.period.as_deref() == active_period;
                ChildNode::new(self.item_id(i))
                    .label(entry.label().unwrap_or_default())
                    .detail(entry.title.clone())
                    .class("mobile-timeline-item")
                    .class_if(ACTIVE_CLASS, active)
                    .source(i)
            })
            .collect();
        doc.render_children(&self.config.timeline_container_id, &nodes);
    }

    /// Mark the mirrored item of `period`
    pub fn sync_active(&self, period: Option<&str>, doc: &mut dyn Document) {
        for (i, entry) in self.items.iter().enumerate() {
            let active = period.is_some() && entry.period.as_deref() == period;
            doc.set_class(&self.item_id(i), ACTIVE_CLASS, active);
        }
    }

    /// Navigate to a mirrored item, then close
    pub fn activate_item(
        &mut self,
        index: usize,
        nav: Option<&mut dyn TimelineNavigation>,
        doc: &mut dyn Document,
    ) -> bool {
        let Some(entry) = self.items.get(index) else {
            return false;
        };

        let navigated = match (entry.period.as_deref(), nav) {
            (Some(period), Some(nav)) => nav.navigate_to(period, ScrollBehavior::Smooth, doc),
            _ => false,
        };
        if !navigated {
            doc.scroll_into_view(&entry.id, ScrollBehavior::Smooth);
        }

        self.close(doc);
        true
    }

    /// Refresh the mobile theme label for a scheme id
    pub fn refresh_theme_label(&self, scheme: &str, doc: &mut dyn Document) {
        let label = match scheme {
            "dark" => &self.config.label_when_dark,
            _ => &self.config.label_when_light,
        };
        doc.set_text(&self.config.theme_text_id, label);
    }

    fn item_target(&self, event: &Event) -> Option<usize> {
        if event.target == self.config.timeline_container_id {
            return event.index();
        }
        event
            .target
            .strip_prefix(self.config.item_prefix.as_str())
            .and_then(|index| index.parse().ok())
    }

    /// Route a host event through the menu
    pub fn handle(
        &mut self,
        event: &Event,
        nav: Option<&mut dyn TimelineNavigation>,
        doc: &mut dyn Document,
    ) -> MenuResponse {
        match event.event_type {
            event_types::KEY_DOWN if event.key() == Some(KeyCode::ESCAPE) => {
                if self.close(doc) {
                    MenuResponse::Handled
                } else {
                    MenuResponse::Ignored
                }
            }
            event_types::CLICK => {
                if event.target == self.config.toggle_id {
                    let period = nav
                        .as_deref()
                        .and_then(|nav| nav.active_period())
                        .map(str::to_owned);
                    self.toggle(period.as_deref(), doc);
                    MenuResponse::Handled
                } else if event.target == self.config.overlay_id {
                    self.close(doc);
                    MenuResponse::Handled
                } else if event.target == self.config.theme_button_id {
                    MenuResponse::ToggleTheme
                } else if let Some(index) = self.item_target(event) {
                    self.activate_item(index, nav, doc);
                    MenuResponse::Handled
                } else {
                    MenuResponse::Ignored
                }
            }
            _ => MenuResponse::Ignored,
        }
    }
}
