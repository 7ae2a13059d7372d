//! Folio Theming
//!
//! Two independent theming controls that share the document root:
//!
//! - **Color scheme**: light/dark, written to `data-theme`, toggled by a
//!   single button whose label names the scheme it switches to
//! - **Accent palette**: one of seven accents, written to
//!   `data-color-theme`, picked from any number of option surfaces
//!
//! Both restore their selection from [`Preferences`](folio_core::Preferences)
//! on mount and persist every change. Storage failures never block a change;
//! the page just forgets it on reload.
//!
//! # Quick Start
//!
//! ```rust
//! use folio_core::{HeadlessDocument, NotificationBus, Preferences};
//! use folio_theme::{ColorScheme, ThemeConfig, ThemeController};
//!
//! let mut doc = HeadlessDocument::new(1280.0).with_element("theme-toggle");
//! let prefs = Preferences::in_memory();
//! let bus = NotificationBus::new();
//!
//! let mut theme = ThemeController::mount(ThemeConfig::default(), prefs.clone(), bus, &mut doc)
//!     .expect("toggle present");
//! assert_eq!(theme.toggle(&mut doc), ColorScheme::Dark);
//! assert_eq!(prefs.get("theme").as_deref(), Some("dark"));
//! ```

pub mod palette;
pub mod picker;
pub mod scheme;
pub mod toggle;

pub use palette::AccentColor;
pub use picker::{AccentConfig, AccentController, PickerSurface, EXPANDED_CLASS};
pub use scheme::ColorScheme;
pub use toggle::{ThemeConfig, ThemeController};
