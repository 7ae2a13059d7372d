use std::sync::{Arc, Mutex};

use folio_app::{AppError, Site, SiteConfig};
use folio_core::{
    Document, Event, HeadlessDocument, Intersection, JsonFileBackend, KeyCode, Notification,
    Preferences, Rect, ScrollMetrics,
};
use folio_theme::{AccentColor, ColorScheme};
use folio_widgets::{TimelineEntry, TimelineNavigation};
use pretty_assertions::assert_eq;

fn config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.timeline.entries = vec![
        TimelineEntry::new("jan")
            .period("2025-01")
            .period_label("January 2025")
            .title("Shipped the carousel"),
        TimelineEntry::new("dec")
            .period("2024-12")
            .period_label("December 2024")
            .title("Rewrote the timeline"),
        TimelineEntry::new("nov")
            .period("2024-11")
            .period_label("November 2024")
            .title("Started the site"),
    ];
    config
}

fn page(viewport_width: f32) -> HeadlessDocument {
    let options = AccentColor::all()
        .iter()
        .map(|color| format!("color-option-{}", color.id()));

    HeadlessDocument::new(viewport_width)
        .with_path("/about")
        .with_elements(["theme-toggle", "color-picker", "color-picker-toggle", "color-options"])
        .with_elements(options)
        // Projects carousel
        .with_children("projects-track", 7)
        .with_rect("projects-carousel", Rect::new(0.0, 0.0, 940.0, 400.0))
        .with_elements(["projects-prev", "projects-next", "projects-dots"])
        // Timeline
        .with_element("timeline-container")
        .with_rect("timeline-content", Rect::new(300.0, 100.0, 700.0, 600.0))
        .with_scroll_metrics(
            "timeline-content",
            ScrollMetrics {
                scroll_height: 2000.0,
                client_height: 600.0,
            },
        )
        .with_rect("timeline-sidebar", Rect::new(0.0, 80.0, 280.0, 400.0))
        .with_offset("jan", Rect::new(0.0, 0.0, 700.0, 480.0))
        .with_offset("dec", Rect::new(0.0, 500.0, 700.0, 480.0))
        .with_offset("nov", Rect::new(0.0, 1000.0, 700.0, 480.0))
        .with_elements(["timeline-nav-jan", "timeline-nav-dec", "timeline-nav-nov"])
        // Mobile menu
        .with_elements([
            "mobile-menu",
            "mobile-menu-overlay",
            "hamburger-toggle",
            "mobile-timeline-section",
            "mobile-timeline-container",
            "mobile-theme-toggle",
            "mobile-theme-text",
        ])
}

fn site(viewport_width: f32) -> (Site<HeadlessDocument>, Preferences) {
    let prefs = Preferences::in_memory();
    let site = Site::start(config(), prefs.clone(), page(viewport_width));
    (site, prefs)
}

fn recorder(site: &mut Site<HeadlessDocument>) -> Arc<Mutex<Vec<Notification>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    site.subscribe(move |n| sink.lock().unwrap().push(n.clone()));
    seen
}

// ========== Startup ==========

#[test]
fn start_mounts_what_the_page_provides() {
    let (site, prefs) = site(1280.0);

    assert!(site.theme().is_some());
    assert!(site.carousel("projects").is_some());
    assert!(site.carousel("skills").is_none());
    assert!(site.timeline().is_some());
    assert!(site.tabs().is_none());
    assert!(site.menu().is_some());

    let doc = site.document();
    assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("light"));
    assert_eq!(doc.root_attribute("data-color-theme").as_deref(), Some("blue"));
    assert_eq!(doc.text("mobile-theme-text"), Some("Dark Mode"));
    assert!(doc.has_class("color-option-blue", "active"));

    // Scheme is only written on change, accent is written on first load
    assert_eq!(prefs.get("theme"), None);
    assert_eq!(prefs.get("colorTheme").as_deref(), Some("blue"));
}

#[test]
fn bare_page_still_gets_an_accent() {
    let prefs = Preferences::in_memory();
    let site = Site::start(SiteConfig::default(), prefs, HeadlessDocument::new(1280.0));

    assert!(site.theme().is_none());
    assert!(site.carousels().is_empty());
    assert!(site.timeline().is_none());
    assert!(site.menu().is_none());
    assert_eq!(site.accent().current(), AccentColor::Blue);
}

// ========== Theme ==========

#[test]
fn desktop_toggle_also_relabels_the_menu() {
    let (mut site, prefs) = site(1280.0);

    assert!(site.handle_event(&Event::click("theme-toggle", 10)));

    let doc = site.document();
    assert_eq!(doc.root_attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(doc.text("theme-toggle"), Some("Light"));
    assert_eq!(doc.text("mobile-theme-text"), Some("Light Mode"));
    assert_eq!(prefs.get("theme").as_deref(), Some("dark"));
}

#[test]
fn menu_theme_button_flips_the_scheme() {
    let (mut site, _) = site(400.0);

    assert!(site.handle_event(&Event::click("mobile-theme-toggle", 10)));
    assert_eq!(site.theme().map(|t| t.scheme()), Some(ColorScheme::Dark));

    assert!(site.set_scheme(ColorScheme::Light));
    assert_eq!(site.document().text("mobile-theme-text"), Some("Dark Mode"));
}

// ========== Accent ==========

#[test]
fn option_click_is_announced_to_listeners() {
    let (mut site, prefs) = site(1280.0);
    let seen = recorder(&mut site);

    assert!(site.handle_event(&Event::click("color-option-green", 10)));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Notification::AccentChanged {
            theme: "green".into(),
            previous_theme: "blue".into(),
        }]
    );
    assert_eq!(prefs.get("colorTheme").as_deref(), Some("green"));
    assert!(!site.document().has_class("color-option-blue", "active"));
}

#[test]
fn consumed_clicks_elsewhere_still_fold_the_picker() {
    let (mut site, _) = site(1280.0);

    assert!(site.handle_event(&Event::click("color-picker-toggle", 10)));
    assert!(site.accent().is_expanded());
    assert!(site.handle_event(&Event::click("color-option-orange", 20)));
    assert!(site.accent().is_expanded());

    // The theme toggle consumes this click; the picker folds anyway
    assert!(site.handle_event(&Event::click("theme-toggle", 30)));
    assert!(!site.accent().is_expanded());
    assert!(!site.document().has_class("color-picker", "expanded"));
    assert_eq!(site.accent().current(), AccentColor::Orange);
}

#[test]
fn unknown_color_is_an_error_and_changes_nothing() {
    let (mut site, _) = site(1280.0);
    let seen = recorder(&mut site);

    let err = site.select_color("teal").unwrap_err();
    assert!(matches!(err, AppError::Core(_)));
    assert_eq!(site.accent().current(), AccentColor::Blue);
    assert!(seen.lock().unwrap().is_empty());

    assert_eq!(site.select_color("neon-blue").unwrap(), AccentColor::NeonBlue);
}

#[test]
fn unsubscribed_listener_hears_nothing_more() {
    let (mut site, _) = site(1280.0);
    let seen = Arc::new(Mutex::new(0usize));
    let sink = seen.clone();
    let id = site.subscribe(move |_| *sink.lock().unwrap() += 1);

    site.select_color("pink").unwrap();
    assert!(site.unsubscribe(id));
    site.select_color("orange").unwrap();

    assert_eq!(*seen.lock().unwrap(), 1);
}

// ========== Carousel ==========

#[test]
fn advance_drives_autoplay() {
    let (mut site, _) = site(1280.0);

    site.advance(19_999);
    assert_eq!(site.carousel("projects").map(|c| c.logical_index()), Some(0));

    site.advance(20_000);
    assert_eq!(site.carousel("projects").map(|c| c.logical_index()), Some(1));
}

#[test]
fn carousel_operations_address_instances_by_name() {
    let (mut site, _) = site(1280.0);

    assert!(site.carousel_next("projects"));
    assert_eq!(site.carousel("projects").map(|c| c.logical_index()), Some(1));
    assert!(!site.carousel_next("skills"));

    site.advance(600);
    assert_eq!(site.carousel_go_to("projects", 99), Some(4));
    assert_eq!(site.carousel_go_to("skills", 0), None);
}

#[test]
fn late_clicks_are_not_lost_to_a_pending_boundary_check() {
    let (mut site, _) = site(1280.0);
    assert_eq!(site.carousel_go_to("projects", 4), Some(4));

    for at in [100, 200, 300, 5_000, 5_001, 5_002] {
        assert!(site.handle_event(&Event::click("projects-next", at)));
    }
    site.advance(6_000);

    let carousel = site.carousel("projects").unwrap();
    assert_eq!(carousel.logical_index(), 3);
    assert_eq!(carousel.display_index(), 6);
}

#[test]
fn carousel_buttons_are_routed() {
    let (mut site, _) = site(1280.0);

    assert!(site.handle_event(&Event::click("projects-prev", 10)));
    assert_eq!(site.carousel("projects").map(|c| c.logical_index()), Some(6));
    assert!(!site.handle_event(&Event::click("nothing-here", 20)));
}

// ========== Timeline and menu ==========

#[test]
fn visibility_report_syncs_the_open_menu() {
    let (mut site, _) = site(400.0);
    assert!(site.open_menu());
    assert_eq!(
        site.document()
            .children_with_class("mobile-timeline-container", "active"),
        vec!["mobile-timeline-item-0".to_string()]
    );

    let report = Event::intersections(
        "timeline-content",
        vec![
            Intersection::new("dec", 40.0, true),
            Intersection::new("nov", 300.0, true),
        ],
        50,
    );
    assert!(site.handle_event(&report));

    assert_eq!(site.timeline().and_then(|t| t.active_period()), Some("2024-12"));
    assert_eq!(
        site.document()
            .children_with_class("mobile-timeline-container", "active"),
        vec!["mobile-timeline-item-1".to_string()]
    );
}

#[test]
fn menu_item_navigates_the_timeline() {
    let (mut site, _) = site(400.0);

    assert!(site.handle_event(&Event::click("hamburger-toggle", 10)));
    assert!(site.menu().map_or(false, |m| m.is_open()));
    assert!(site.document().scroll_locked());

    assert!(site.handle_event(&Event::click("mobile-timeline-item-2", 20)));

    assert_eq!(site.timeline().and_then(|t| t.active_period()), Some("2024-11"));
    // 100 + 1000 - 80
    assert_eq!(site.document().scroll_top("timeline-content"), Some(1020.0));
    assert!(!site.menu().map_or(true, |m| m.is_open()));
    assert!(!site.document().scroll_locked());
}

#[test]
fn escape_reaches_the_menu_only() {
    let (mut site, _) = site(400.0);
    let escape = Event::key_down(KeyCode::ESCAPE, 10);

    assert!(!site.handle_event(&escape));

    site.open_menu();
    assert!(site.handle_event(&escape));
    assert!(!site.document().has_class("mobile-menu", "active"));
}

#[test]
fn navigate_to_publishes_and_rejects_unknown_periods() {
    let (mut site, _) = site(1280.0);
    let seen = recorder(&mut site);

    assert!(site.navigate_to("2024-12"));
    assert!(!site.navigate_to("1999-01"));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Notification::TimelineActiveChanged {
            entry_id: "dec".into(),
            period: Some("2024-12".into()),
        }]
    );
    assert_eq!(site.document().fragment().as_deref(), Some("dec"));
}

// ========== Tabs ==========

#[test]
fn tabs_follow_the_timeline() {
    let (mut site, _) = site(400.0);
    assert_eq!(site.tabs().map(|t| t.active_entry_id()), Some("jan"));

    site.navigate_to("2024-11");
    assert_eq!(site.tabs().map(|t| t.active_entry_id()), Some("nov"));
    assert!(site.document().has_class("nov", "active"));
    assert!(!site.document().has_class("jan", "active"));
}

#[test]
fn crossing_the_breakpoint_builds_and_removes_tabs() {
    let (mut site, _) = site(1280.0);
    assert!(site.tabs().is_none());

    site.document_mut().set_viewport_width(400.0);
    assert!(site.handle_event(&Event::resize(400.0, 800.0, 10)));
    assert_eq!(site.tabs().map(|t| t.len()), Some(3));
    assert_eq!(site.document().children("timeline-container").len(), 1);

    site.document_mut().set_viewport_width(1024.0);
    site.handle_event(&Event::resize(1024.0, 800.0, 20));
    assert!(site.tabs().is_none());
    assert!(site.document().children("timeline-container").is_empty());
}

// ========== Persistence and configuration ==========

#[test]
fn choices_survive_a_restart_through_the_preference_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let prefs = Preferences::new(JsonFileBackend::open(&path).unwrap());
        let mut site = Site::start(config(), prefs, page(1280.0));
        site.toggle_theme();
        site.select_color("purple").unwrap();
    }

    let prefs = Preferences::new(JsonFileBackend::open(&path).unwrap());
    let site = Site::start(config(), prefs, page(1280.0));

    assert_eq!(site.theme().map(|t| t.scheme()), Some(ColorScheme::Dark));
    assert_eq!(site.accent().current(), AccentColor::Purple);
    assert_eq!(
        site.document().root_attribute("data-theme").as_deref(),
        Some("dark")
    );
    assert_eq!(site.document().text("mobile-theme-text"), Some("Light Mode"));
}

#[test]
fn config_file_drives_the_site() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    std::fs::write(
        &path,
        r#"
        [theme]
        default_scheme = "dark"

        [accent]
        default_color = "orange"

        [[carousels]]
        name = "projects"
        card_class = "project-card"
        autoplay = false
        "#,
    )
    .unwrap();

    let config = SiteConfig::load(&path).unwrap();
    let mut site = Site::start(config, Preferences::in_memory(), page(1280.0));

    assert_eq!(site.theme().map(|t| t.scheme()), Some(ColorScheme::Dark));
    assert_eq!(site.accent().current(), AccentColor::Orange);
    assert!(site.timeline().is_none());

    site.advance(40_000);
    assert_eq!(site.carousel("projects").map(|c| c.logical_index()), Some(0));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SiteConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}
