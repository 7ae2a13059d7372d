//! Event model
//!
//! Host input (clicks, pointer gestures, keys, viewport changes, visibility
//! reports) arrives as [`Event`]s addressed to a markup anchor. Controllers
//! publish [`Notification`]s in the other direction for observers.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const CLICK: EventType = 1;
    pub const POINTER_DOWN: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_UP: EventType = 4;
    /// Pointer left the target (ends an active drag)
    pub const POINTER_LEAVE: EventType = 5;
    pub const KEY_DOWN: EventType = 20;
    pub const RESIZE: EventType = 40;
    /// Visibility report for a set of observed elements
    pub const INTERSECT: EventType = 45;
}

/// A host event addressed to an element
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Element identifier the event was dispatched on
    pub target: String,
    pub data: EventData,
    /// Host clock in milliseconds
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Key {
        key: KeyCode,
    },
    /// Click on the `n`th generated child of the target (dot, tab, menu item)
    Index(usize),
    Intersections(Vec<Intersection>),
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

/// One observed element in a visibility report
#[derive(Clone, Debug, PartialEq)]
pub struct Intersection {
    pub target: String,
    /// Top edge relative to the viewport
    pub top: f32,
    pub is_intersecting: bool,
}

impl Intersection {
    pub fn new(target: impl Into<String>, top: f32, is_intersecting: bool) -> Self {
        Self {
            target: target.into(),
            top,
            is_intersecting,
        }
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const RIGHT: KeyCode = KeyCode(0x27);

    // Unknown/unmapped key
    pub const UNKNOWN: KeyCode = KeyCode(0);
}

impl Event {
    pub fn new(
        event_type: EventType,
        target: impl Into<String>,
        data: EventData,
        timestamp: u64,
    ) -> Self {
        Self {
            event_type,
            target: target.into(),
            data,
            timestamp,
        }
    }

    pub fn click(target: impl Into<String>, timestamp: u64) -> Self {
        Self::new(event_types::CLICK, target, EventData::None, timestamp)
    }

    /// Click on the `index`th generated child of `target`
    pub fn click_index(target: impl Into<String>, index: usize, timestamp: u64) -> Self {
        Self::new(event_types::CLICK, target, EventData::Index(index), timestamp)
    }

    pub fn pointer(
        event_type: EventType,
        target: impl Into<String>,
        x: f32,
        timestamp: u64,
    ) -> Self {
        Self::new(event_type, target, EventData::Pointer { x, y: 0.0 }, timestamp)
    }

    /// Key press dispatched on the document
    pub fn key_down(key: KeyCode, timestamp: u64) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            "document",
            EventData::Key { key },
            timestamp,
        )
    }

    /// Viewport resize dispatched on the window
    pub fn resize(width: f32, height: f32, timestamp: u64) -> Self {
        Self::new(
            event_types::RESIZE,
            "window",
            EventData::Resize { width, height },
            timestamp,
        )
    }

    pub fn intersections(
        target: impl Into<String>,
        entries: Vec<Intersection>,
        timestamp: u64,
    ) -> Self {
        Self::new(
            event_types::INTERSECT,
            target,
            EventData::Intersections(entries),
            timestamp,
        )
    }

    /// Horizontal pointer coordinate, if this is a pointer event
    pub fn pointer_x(&self) -> Option<f32> {
        match self.data {
            EventData::Pointer { x, .. } => Some(x),
            _ => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self.data {
            EventData::Index(i) => Some(i),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<KeyCode> {
        match self.data {
            EventData::Key { key } => Some(key),
            _ => None,
        }
    }

    pub fn is(&self, event_type: EventType, target: &str) -> bool {
        self.event_type == event_type && self.target == target
    }
}

/// Document-wide notifications published by controllers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Light/dark scheme applied (`"light"` or `"dark"`)
    SchemeChanged { scheme: String },
    /// Accent palette selection changed
    AccentChanged {
        theme: String,
        previous_theme: String,
    },
    /// The timeline's active entry changed
    TimelineActiveChanged {
        entry_id: String,
        period: Option<String>,
    },
    MenuOpened,
    MenuClosed,
}
