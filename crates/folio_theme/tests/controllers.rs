use folio_core::{
    Controller, Document, Event, HeadlessDocument, MemoryBackend, Notification, NotificationBus,
    Preferences, ACCENT_KEY, THEME_KEY,
};
use folio_theme::{
    AccentColor, AccentConfig, AccentController, ColorScheme, PickerSurface, ThemeConfig,
    ThemeController, EXPANDED_CLASS,
};
use pretty_assertions::assert_eq;

fn page() -> HeadlessDocument {
    let mut doc = HeadlessDocument::new(1280.0)
        .with_elements(["theme-toggle", "color-options", "mobile-color-options"])
        .with_elements(["color-picker", "color-picker-toggle"]);
    for surface in [PickerSurface::desktop(), PickerSurface::mobile()] {
        for color in AccentColor::all() {
            doc = doc.with_element(surface.option_id(*color));
        }
    }
    doc
}

fn active_options(doc: &HeadlessDocument, surface: &PickerSurface) -> Vec<String> {
    AccentColor::all()
        .iter()
        .map(|c| surface.option_id(*c))
        .filter(|id| doc.has_class(id, "active"))
        .collect()
}

// ========== Theme toggle ==========

#[test]
fn toggle_round_trip_persists_each_step() {
    let mut doc = page();
    let prefs = Preferences::in_memory();
    let mut theme = ThemeController::mount(
        ThemeConfig::default(),
        prefs.clone(),
        NotificationBus::new(),
        &mut doc,
    )
    .unwrap();

    assert_eq!(theme.scheme(), ColorScheme::Light);
    assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("light"));
    assert_eq!(doc.text("theme-toggle"), Some("Dark"));

    theme.toggle(&mut doc);
    assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(prefs.get(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(doc.text("theme-toggle"), Some("Light"));

    theme.toggle(&mut doc);
    assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("light"));
    assert_eq!(prefs.get(THEME_KEY).as_deref(), Some("light"));
    assert_eq!(doc.text("theme-toggle"), Some("Dark"));
}

#[test]
fn mount_restores_persisted_scheme_without_rewriting_it() {
    let mut doc = page();
    let prefs = Preferences::new(MemoryBackend::new().with(THEME_KEY, "dark"));
    let theme = ThemeController::mount(
        ThemeConfig::default(),
        prefs,
        NotificationBus::new(),
        &mut doc,
    )
    .unwrap();

    assert_eq!(theme.scheme(), ColorScheme::Dark);
    assert_eq!(theme.toggle_label(), "Light");
    assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn unrecognized_persisted_scheme_falls_back_to_default() {
    let mut doc = page();
    let prefs = Preferences::new(MemoryBackend::new().with(THEME_KEY, "sepia"));
    let theme = ThemeController::mount(
        ThemeConfig::default(),
        prefs,
        NotificationBus::new(),
        &mut doc,
    )
    .unwrap();

    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[test]
fn missing_toggle_disables_the_controller() {
    let mut doc = HeadlessDocument::new(1280.0);
    let theme = ThemeController::mount(
        ThemeConfig::default(),
        Preferences::in_memory(),
        NotificationBus::new(),
        &mut doc,
    );

    assert!(theme.is_none());
    assert_eq!(doc.root_attribute("data-theme"), None);
}

#[test]
fn toggle_click_is_consumed_and_announced() {
    let mut doc = page();
    let bus = NotificationBus::new();
    let mut theme = ThemeController::mount(
        ThemeConfig::default(),
        Preferences::in_memory(),
        bus.clone(),
        &mut doc,
    )
    .unwrap();
    bus.drain();

    assert!(!theme.handle_event(&Event::click("elsewhere", 0), &mut doc));
    assert!(theme.handle_event(&Event::click("theme-toggle", 0), &mut doc));
    assert_eq!(
        bus.drain(),
        vec![Notification::SchemeChanged {
            scheme: "dark".into()
        }]
    );
}

#[test]
fn toggle_works_with_storage_disabled() {
    let mut doc = page();
    let mut theme = ThemeController::mount(
        ThemeConfig::default(),
        Preferences::disabled(),
        NotificationBus::new(),
        &mut doc,
    )
    .unwrap();

    assert_eq!(theme.toggle(&mut doc), ColorScheme::Dark);
    assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("dark"));
}

// ========== Accent picker ==========

#[test]
fn mount_selects_default_and_persists_it() {
    let mut doc = page();
    let prefs = Preferences::in_memory();
    let accent = AccentController::mount(
        AccentConfig::default(),
        prefs.clone(),
        NotificationBus::new(),
        &mut doc,
    );

    assert_eq!(accent.current(), AccentColor::Blue);
    assert_eq!(prefs.get(ACCENT_KEY).as_deref(), Some("blue"));
    assert_eq!(doc.root_attribute("data-color-theme").as_deref(), Some("blue"));
    assert_eq!(
        active_options(&doc, &PickerSurface::desktop()),
        vec!["color-option-blue".to_string()]
    );
    assert_eq!(
        active_options(&doc, &PickerSurface::mobile()),
        vec!["mobile-color-option-blue".to_string()]
    );
}

#[test]
fn mount_restores_persisted_accent() {
    let mut doc = page();
    let prefs = Preferences::new(MemoryBackend::new().with(ACCENT_KEY, "neon-green"));
    let accent = AccentController::mount(
        AccentConfig::default(),
        prefs,
        NotificationBus::new(),
        &mut doc,
    );

    assert_eq!(accent.current(), AccentColor::NeonGreen);
    assert_eq!(
        doc.root_attribute("data-color-theme").as_deref(),
        Some("neon-green")
    );
}

#[test]
fn invalid_persisted_accent_falls_back_to_default() {
    let mut doc = page();
    let prefs = Preferences::new(MemoryBackend::new().with(ACCENT_KEY, "teal"));
    let accent = AccentController::mount(
        AccentConfig::default(),
        prefs.clone(),
        NotificationBus::new(),
        &mut doc,
    );

    assert_eq!(accent.current(), AccentColor::Blue);
    assert_eq!(prefs.get(ACCENT_KEY).as_deref(), Some("blue"));
}

#[test]
fn selecting_twice_matches_selecting_once() {
    let mut doc = page();
    let prefs = Preferences::in_memory();
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        prefs.clone(),
        NotificationBus::new(),
        &mut doc,
    );

    accent.select_color("purple", &mut doc).unwrap();
    let once = (
        doc.root_attribute("data-color-theme"),
        active_options(&doc, &PickerSurface::desktop()),
        prefs.get(ACCENT_KEY),
    );
    accent.select_color("purple", &mut doc).unwrap();
    let twice = (
        doc.root_attribute("data-color-theme"),
        active_options(&doc, &PickerSurface::desktop()),
        prefs.get(ACCENT_KEY),
    );

    assert_eq!(once, twice);
}

#[test]
fn invalid_color_leaves_everything_untouched() {
    let mut doc = page();
    let prefs = Preferences::in_memory();
    let bus = NotificationBus::new();
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        prefs.clone(),
        bus.clone(),
        &mut doc,
    );
    accent.select_color("orange", &mut doc).unwrap();
    bus.drain();

    assert!(accent.select_color("not-a-color", &mut doc).is_err());

    assert_eq!(accent.current(), AccentColor::Orange);
    assert_eq!(doc.root_attribute("data-color-theme").as_deref(), Some("orange"));
    assert_eq!(prefs.get(ACCENT_KEY).as_deref(), Some("orange"));
    assert!(bus.drain().is_empty());
}

#[test]
fn change_notification_carries_previous_accent() {
    let mut doc = page();
    let bus = NotificationBus::new();
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        Preferences::in_memory(),
        bus.clone(),
        &mut doc,
    );
    bus.drain();

    accent.select_color("pink", &mut doc).unwrap();
    assert_eq!(
        bus.drain(),
        vec![Notification::AccentChanged {
            theme: "pink".into(),
            previous_theme: "blue".into(),
        }]
    );
}

#[test]
fn option_clicks_from_either_surface_select_the_color() {
    let mut doc = page();
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        Preferences::in_memory(),
        NotificationBus::new(),
        &mut doc,
    );

    assert!(accent.handle_event(&Event::click("mobile-color-option-green", 0), &mut doc));
    assert_eq!(accent.current(), AccentColor::Green);
    assert_eq!(
        active_options(&doc, &PickerSurface::desktop()),
        vec!["color-option-green".to_string()]
    );

    assert!(accent.handle_event(&Event::click("color-option-neon-blue", 0), &mut doc));
    assert_eq!(accent.current(), AccentColor::NeonBlue);
    assert!(!accent.handle_event(&Event::click("theme-toggle", 0), &mut doc));
}

#[test]
fn picker_toggle_folds_and_unfolds_the_picker() {
    let mut doc = page();
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        Preferences::in_memory(),
        NotificationBus::new(),
        &mut doc,
    );
    assert!(!accent.is_expanded());

    assert!(accent.handle_event(&Event::click("color-picker-toggle", 0), &mut doc));
    assert!(accent.is_expanded());
    assert!(doc.has_class("color-picker", EXPANDED_CLASS));
    assert!(doc.has_class("color-picker-toggle", EXPANDED_CLASS));

    assert!(accent.handle_event(&Event::click("color-picker-toggle", 10), &mut doc));
    assert!(!accent.is_expanded());
    assert!(!doc.has_class("color-picker", EXPANDED_CLASS));
    assert!(!doc.has_class("color-picker-toggle", EXPANDED_CLASS));
}

#[test]
fn option_click_keeps_the_picker_open_and_outside_click_folds_it() {
    let mut doc = page();
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        Preferences::in_memory(),
        NotificationBus::new(),
        &mut doc,
    );
    accent.toggle_picker(&mut doc);

    assert!(accent.handle_event(&Event::click("color-option-purple", 0), &mut doc));
    assert_eq!(accent.current(), AccentColor::Purple);
    assert!(accent.is_expanded());

    // Outside clicks fold the picker but stay available to other controllers
    assert!(!accent.handle_event(&Event::click("page-body", 10), &mut doc));
    assert!(!accent.is_expanded());
    assert!(!doc.has_class("color-picker", EXPANDED_CLASS));
    assert_eq!(accent.current(), AccentColor::Purple);
}

#[test]
fn page_without_a_picker_ignores_its_toggle() {
    let mut doc = HeadlessDocument::new(1280.0).with_element("color-picker-toggle");
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        Preferences::in_memory(),
        NotificationBus::new(),
        &mut doc,
    );

    assert!(!accent.handle_event(&Event::click("color-picker-toggle", 0), &mut doc));
    assert!(!accent.toggle_picker(&mut doc));
    assert!(!doc.has_class("color-picker-toggle", EXPANDED_CLASS));
}

#[test]
fn absent_surface_is_skipped() {
    let mut doc = HeadlessDocument::new(1280.0).with_element("color-options");
    for color in AccentColor::all() {
        doc = doc.with_element(PickerSurface::desktop().option_id(*color));
    }
    let mut accent = AccentController::mount(
        AccentConfig::default(),
        Preferences::in_memory(),
        NotificationBus::new(),
        &mut doc,
    );

    accent.select(AccentColor::Orange, &mut doc);
    assert_eq!(
        active_options(&doc, &PickerSurface::desktop()),
        vec!["color-option-orange".to_string()]
    );
    assert!(!doc.contains("mobile-color-option-orange"));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: AccentConfig = serde_json::from_str(r#"{ "default_color": "neon-blue" }"#).unwrap();
    assert_eq!(config.default_color, AccentColor::NeonBlue);
    assert_eq!(config.attribute, "data-color-theme");
    assert_eq!(config.surfaces.len(), 2);
}
