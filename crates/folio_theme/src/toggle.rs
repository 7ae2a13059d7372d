//! Light/dark theme toggle controller
//!
//! Owns the document's `data-theme` attribute. The toggle button's label names
//! the scheme a click switches *to*. Companion surfaces (the mobile menu label)
//! follow the [`Notification::SchemeChanged`] it publishes instead of being
//! driven from here.

use folio_core::{Controller, Document, Event, Notification, NotificationBus, Preferences};
use folio_core::{event_types, THEME_KEY};
use serde::{Deserialize, Serialize};

use crate::scheme::ColorScheme;

/// Theme toggle configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Button that toggles the scheme
    pub toggle_id: String,
    /// Document root attribute carrying the scheme
    pub attribute: String,
    /// Scheme used when nothing usable is persisted
    pub default_scheme: ColorScheme,
    /// Button label while the light scheme is active
    pub label_when_light: String,
    /// Button label while the dark scheme is active
    pub label_when_dark: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_id: "theme-toggle".into(),
            attribute: "data-theme".into(),
            default_scheme: ColorScheme::Light,
            label_when_light: "Dark".into(),
            label_when_dark: "Light".into(),
        }
    }
}

impl ThemeConfig {
    pub fn label_for(&self, scheme: ColorScheme) -> &str {
        match scheme {
            ColorScheme::Light => &self.label_when_light,
            ColorScheme::Dark => &self.label_when_dark,
        }
    }
}

/// Controller for the light/dark toggle
pub struct ThemeController {
    config: ThemeConfig,
    scheme: ColorScheme,
    prefs: Preferences,
    bus: NotificationBus,
}

impl ThemeController {
    /// Restore the persisted scheme and apply it.
    ///
    /// Returns `None` (and touches nothing) when the toggle button is absent.
    pub fn mount(
        config: ThemeConfig,
        prefs: Preferences,
        bus: NotificationBus,
        doc: &mut dyn Document,
    ) -> Option<Self> {
        if !doc.contains(&config.toggle_id) {
            tracing::warn!("theme: toggle `{}` not found", config.toggle_id);
            return None;
        }

        let scheme = match prefs.get(THEME_KEY) {
            Some(saved) => saved.parse().unwrap_or_else(|e| {
                tracing::warn!("theme: {e}, using {}", config.default_scheme);
                config.default_scheme
            }),
            None => config.default_scheme,
        };

        let controller = Self {
            config,
            scheme,
            prefs,
            bus,
        };
        controller.apply(doc);
        tracing::debug!("theme: mounted with {}", scheme);
        Some(controller)
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Label currently shown on the toggle button
    pub fn toggle_label(&self) -> &str {
        self.config.label_for(self.scheme)
    }

    /// Switch to the other scheme, persist it, and return it
    pub fn toggle(&mut self, doc: &mut dyn Document) -> ColorScheme {
        let next = self.scheme.toggle();
        self.set_scheme(next, doc);
        next
    }

    /// Apply and persist an explicit scheme
    pub fn set_scheme(&mut self, scheme: ColorScheme, doc: &mut dyn Document) {
        tracing::debug!("theme: {} -> {}", self.scheme, scheme);
        self.scheme = scheme;
        self.apply(doc);
        self.prefs.set(THEME_KEY, scheme.id());
    }

    fn apply(&self, doc: &mut dyn Document) {
        doc.set_root_attribute(&self.config.attribute, self.scheme.id());
        doc.set_text(&self.config.toggle_id, self.toggle_label());
        self.bus.publish(Notification::SchemeChanged {
            scheme: self.scheme.id().to_string(),
        });
    }
}

impl Controller for ThemeController {
    fn name(&self) -> &str {
        "theme"
    }

    fn handle_event(&mut self, event: &Event, doc: &mut dyn Document) -> bool {
        if event.is(event_types::CLICK, &self.config.toggle_id) {
            self.toggle(doc);
            return true;
        }
        false
    }
}
