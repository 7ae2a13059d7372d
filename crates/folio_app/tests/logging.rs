use folio_app::{init_logging, Site, SiteConfig};
use folio_core::{HeadlessDocument, Preferences};

#[test]
fn subscriber_is_installed_once() {
    let _ = init_logging("folio=debug");
    assert!(!init_logging("warn"));

    // Controllers log through the installed subscriber without side effects
    let site = Site::start(
        SiteConfig::default(),
        Preferences::disabled(),
        HeadlessDocument::new(1280.0),
    );
    assert!(site.theme().is_none());
}
