//! Host document abstraction
//!
//! Controllers never touch a rendering engine directly. They read
//! measurements from and push visual state into a [`Document`], addressed by
//! stable element identifiers. A browser host implements this over the DOM;
//! [`HeadlessDocument`](crate::headless::HeadlessDocument) implements it in
//! memory.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Class used across the site to mark the selected element of a group
pub const ACTIVE_CLASS: &str = "active";

/// Axis-aligned box in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Scrollable extent of a container
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f32,
    pub client_height: f32,
}

impl ScrollMetrics {
    /// Largest reachable vertical scroll offset
    pub fn max_scroll_top(&self) -> f32 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

/// How a scroll should be performed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll
    #[default]
    Smooth,
    /// Jump without animation
    Instant,
}

/// Scroll destination along one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollTarget {
    Top(f32),
    Left(f32),
}

/// Generated child element (carousel card slot, dot, tab, menu item)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChildNode {
    /// Element identifier the child is addressable by afterwards
    pub id: String,
    /// Primary text
    pub label: String,
    /// Secondary text
    pub detail: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    /// Index of the authored element this child copies, if any
    pub source: Option<usize>,
}

impl ChildNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn class_if(self, class: impl Into<String>, on: bool) -> Self {
        if on {
            self.class(class)
        } else {
            self
        }
    }

    pub fn source(mut self, index: usize) -> Self {
        self.source = Some(index);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The rendering host as seen by controllers.
///
/// Mutations on unknown identifiers are ignored by implementations; callers
/// check [`Document::contains`] for anchors they require.
pub trait Document {
    // ========== Page ==========

    /// Whether an element with this identifier exists
    fn contains(&self, id: &str) -> bool;

    /// Viewport width in CSS pixels
    fn viewport_width(&self) -> f32;

    /// Path component of the page address
    fn path(&self) -> String;

    /// Address fragment without the leading `#`
    fn fragment(&self) -> Option<String>;

    /// Replace the address fragment without adding a history entry
    fn replace_fragment(&mut self, fragment: &str);

    fn root_attribute(&self, name: &str) -> Option<String>;

    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Lock or unlock scrolling of the page body
    fn set_scroll_locked(&mut self, locked: bool);

    // ========== Elements ==========

    fn set_class(&mut self, id: &str, class: &str, on: bool);

    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Set (`Some`) or remove (`None`) an element attribute
    fn set_attribute(&mut self, id: &str, name: &str, value: Option<&str>);

    fn set_text(&mut self, id: &str, text: &str);

    fn set_visible(&mut self, id: &str, visible: bool);

    fn set_disabled(&mut self, id: &str, disabled: bool);

    /// Number of authored children under an element
    fn child_count(&self, id: &str) -> usize;

    /// Replace an element's children with generated ones
    fn render_children(&mut self, id: &str, children: &[ChildNode]);

    /// Add one generated child after the existing children
    fn append_child(&mut self, parent: &str, child: &ChildNode);

    /// Detach an element and everything generated inside it
    fn remove_element(&mut self, id: &str);

    // ========== Geometry ==========

    /// Box relative to the viewport
    fn bounding_rect(&self, id: &str) -> Option<Rect>;

    /// Box relative to the offset parent
    fn offset_rect(&self, id: &str) -> Option<Rect>;

    fn scroll_metrics(&self, id: &str) -> Option<ScrollMetrics>;

    /// Constrain (`Some`) or release (`None`) an element's width
    fn set_width(&mut self, id: &str, width: Option<f32>);

    /// Horizontal transform, animated over `transition_ms` when given
    fn set_translate_x(&mut self, id: &str, x: f32, transition_ms: Option<u64>);

    /// Scroll a container
    fn scroll_to(&mut self, id: &str, target: ScrollTarget, behavior: ScrollBehavior);

    /// Scroll the page so the element's top is in view
    fn scroll_into_view(&mut self, id: &str, behavior: ScrollBehavior);
}
