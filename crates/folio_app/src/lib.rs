//! Folio Site Runtime
//!
//! Loads a [`SiteConfig`], mounts every controller the page has anchors
//! for, and routes host input and timers to them.
//!
//! # Example
//!
//! ```rust
//! use folio_app::{Site, SiteConfig};
//! use folio_core::{Event, HeadlessDocument, Preferences};
//!
//! let doc = HeadlessDocument::new(1280.0).with_element("theme-toggle");
//! let prefs = Preferences::in_memory();
//! let mut site = Site::start(SiteConfig::default(), prefs.clone(), doc);
//!
//! site.handle_event(&Event::click("theme-toggle", 0));
//! assert_eq!(prefs.get("theme").as_deref(), Some("dark"));
//! assert_eq!(prefs.get("colorTheme").as_deref(), Some("blue"));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod site;

pub use config::SiteConfig;
pub use error::{AppError, Result};
pub use logging::init_logging;
pub use site::Site;
