//! Folio Core Runtime
//!
//! Foundational pieces shared by every folio controller:
//!
//! - **Document**: the rendering host behind a trait, plus an in-memory host
//! - **Events**: host input addressed to element identifiers, and
//!   document-wide notifications
//! - **State Machines**: typed flat FSMs for interaction states
//! - **Scheduler**: cancellable deferred tasks on a virtual clock
//! - **Preferences**: fault-tolerant key/value persistence
//!
//! # Example
//!
//! ```rust
//! use folio_core::{NotificationBus, Notification, Preferences};
//!
//! let prefs = Preferences::in_memory();
//! prefs.set("theme", "dark");
//!
//! let bus = NotificationBus::new();
//! bus.publish(Notification::SchemeChanged { scheme: "dark".into() });
//! assert_eq!(bus.drain().len(), 1);
//! ```

pub mod bus;
pub mod controller;
pub mod document;
pub mod error;
pub mod events;
pub mod fsm;
pub mod headless;
pub mod scheduler;
pub mod store;

pub use bus::{ListenerId, Listeners, NotificationBus};
pub use controller::Controller;
pub use document::{
    ChildNode, Document, Rect, ScrollBehavior, ScrollMetrics, ScrollTarget, ACTIVE_CLASS,
};
pub use error::{FolioError, Result};
pub use events::{event_types, Event, EventData, EventType, Intersection, KeyCode, Notification};
pub use fsm::StateMachine;
pub use headless::HeadlessDocument;
pub use scheduler::{TaskId, TaskScheduler};
pub use store::{
    DisabledBackend, JsonFileBackend, MemoryBackend, PreferenceBackend, Preferences, ACCENT_KEY,
    THEME_KEY,
};
