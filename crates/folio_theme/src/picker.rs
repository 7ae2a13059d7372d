//! Accent palette picker controller
//!
//! One implementation drives every configured picker surface (desktop strip,
//! mobile menu strip). Option elements are addressed as
//! `<option_prefix><color id>`, e.g. `color-option-neon-blue`.
//!
//! The desktop picker also folds: its toggle expands it, and a click
//! anywhere outside it collapses it again.

use folio_core::{event_types, ACCENT_KEY, ACTIVE_CLASS};
use folio_core::{Controller, Document, Event, Notification, NotificationBus, Preferences, Result};
use serde::{Deserialize, Serialize};

use crate::palette::AccentColor;

/// Class carried by the picker and its toggle while open
pub const EXPANDED_CLASS: &str = "expanded";

/// One set of option elements
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerSurface {
    /// Container holding the options; surfaces without it are skipped
    pub container_id: String,
    /// Prefix of each option's element identifier
    pub option_prefix: String,
}

impl PickerSurface {
    pub fn new(container_id: impl Into<String>, option_prefix: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            option_prefix: option_prefix.into(),
        }
    }

    /// Picker in the desktop header
    pub fn desktop() -> Self {
        Self::new("color-options", "color-option-")
    }

    /// Picker inside the mobile menu
    pub fn mobile() -> Self {
        Self::new("mobile-color-options", "mobile-color-option-")
    }

    pub fn option_id(&self, color: AccentColor) -> String {
        format!("{}{}", self.option_prefix, color.id())
    }

    /// Color id named by an option element identifier
    fn candidate<'a>(&self, target: &'a str) -> Option<&'a str> {
        target.strip_prefix(self.option_prefix.as_str())
    }
}

/// Accent picker configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentConfig {
    /// Document root attribute carrying the accent
    pub attribute: String,
    /// Selected when nothing usable is persisted
    pub default_color: AccentColor,
    /// Surfaces whose active indicator is kept in sync.
    ///
    /// The first one sits inside the foldable picker.
    pub surfaces: Vec<PickerSurface>,
    /// Foldable picker wrapping the desktop surface
    pub picker_id: String,
    pub picker_toggle_id: String,
}

impl Default for AccentConfig {
    fn default() -> Self {
        Self {
            attribute: "data-color-theme".into(),
            default_color: AccentColor::Blue,
            surfaces: vec![PickerSurface::desktop(), PickerSurface::mobile()],
            picker_id: "color-picker".into(),
            picker_toggle_id: "color-picker-toggle".into(),
        }
    }
}

/// Controller for the accent palette
pub struct AccentController {
    config: AccentConfig,
    current: AccentColor,
    prefs: Preferences,
    bus: NotificationBus,
    expanded: bool,
}

impl AccentController {
    /// Restore the persisted accent, falling back to the default.
    ///
    /// Selecting on startup also performs first-time persistence and
    /// indicator sync.
    pub fn mount(
        config: AccentConfig,
        prefs: Preferences,
        bus: NotificationBus,
        doc: &mut dyn Document,
    ) -> Self {
        let default = config.default_color;
        let mut controller = Self {
            config,
            current: default,
            prefs,
            bus,
            expanded: false,
        };

        let restored = match controller.prefs.get(ACCENT_KEY) {
            Some(saved) => saved.parse().unwrap_or_else(|e| {
                tracing::warn!("accent: persisted value rejected ({e}), using {default}");
                default
            }),
            None => default,
        };
        controller.select(restored, doc);
        controller
    }

    pub fn current(&self) -> AccentColor {
        self.current
    }

    pub fn available(&self) -> &'static [AccentColor] {
        AccentColor::all()
    }

    pub fn config(&self) -> &AccentConfig {
        &self.config
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Open or fold the picker. Returns the new state.
    pub fn toggle_picker(&mut self, doc: &mut dyn Document) -> bool {
        if !doc.contains(&self.config.picker_id) {
            return false;
        }
        self.set_expanded(!self.expanded, doc);
        self.expanded
    }

    /// Fold the picker. Returns `true` if it was open.
    pub fn collapse_picker(&mut self, doc: &mut dyn Document) -> bool {
        if !self.expanded {
            return false;
        }
        self.set_expanded(false, doc);
        true
    }

    /// Fold the picker when `target` lies outside it
    pub fn dismiss_picker(&mut self, target: &str, doc: &mut dyn Document) -> bool {
        if self.is_inside_picker(target) {
            return false;
        }
        self.collapse_picker(doc)
    }

    fn set_expanded(&mut self, expanded: bool, doc: &mut dyn Document) {
        self.expanded = expanded;
        doc.set_class(&self.config.picker_id, EXPANDED_CLASS, expanded);
        doc.set_class(&self.config.picker_toggle_id, EXPANDED_CLASS, expanded);
        tracing::trace!("accent: picker expanded = {expanded}");
    }

    fn is_inside_picker(&self, target: &str) -> bool {
        target == self.config.picker_id
            || target == self.config.picker_toggle_id
            || self.config.surfaces.first().is_some_and(|desktop| {
                target == desktop.container_id || desktop.candidate(target).is_some()
            })
    }

    /// Validate and select a color by id.
    ///
    /// Unknown ids are logged and rejected without touching any state.
    pub fn select_color(&mut self, candidate: &str, doc: &mut dyn Document) -> Result<AccentColor> {
        let color = candidate.parse::<AccentColor>().map_err(|e| {
            tracing::warn!("accent: {e}");
            e
        })?;
        self.select(color, doc);
        Ok(color)
    }

    /// Select a known color
    pub fn select(&mut self, color: AccentColor, doc: &mut dyn Document) {
        let previous = std::mem::replace(&mut self.current, color);

        doc.set_root_attribute(&self.config.attribute, color.id());
        self.sync_surfaces(doc);
        self.prefs.set(ACCENT_KEY, color.id());
        self.bus.publish(Notification::AccentChanged {
            theme: color.id().to_string(),
            previous_theme: previous.id().to_string(),
        });
        tracing::debug!("accent: {previous} -> {color}");
    }

    /// Exactly the current color's option is active on every present surface
    fn sync_surfaces(&self, doc: &mut dyn Document) {
        for surface in &self.config.surfaces {
            if !doc.contains(&surface.container_id) {
                continue;
            }
            for color in AccentColor::all() {
                let id = surface.option_id(*color);
                doc.set_class(&id, ACTIVE_CLASS, *color == self.current);
            }
        }
    }
}

impl Controller for AccentController {
    fn name(&self) -> &str {
        "accent"
    }

    fn handle_event(&mut self, event: &Event, doc: &mut dyn Document) -> bool {
        if event.event_type != event_types::CLICK {
            return false;
        }
        if event.target == self.config.picker_toggle_id && doc.contains(&self.config.picker_id) {
            self.toggle_picker(doc);
            return true;
        }
        let candidate = self
            .config
            .surfaces
            .iter()
            .find_map(|surface| surface.candidate(&event.target));

        match candidate {
            Some(candidate) => {
                let candidate = candidate.to_string();
                // Rejection is already logged; the click is still ours
                let _ = self.select_color(&candidate, doc);
                true
            }
            None => {
                self.dismiss_picker(&event.target, doc);
                false
            }
        }
    }
}
