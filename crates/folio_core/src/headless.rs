//! In-memory [`Document`] for tests and non-browser hosts
//!
//! Elements are declared up front with their geometry; every mutation made
//! by controllers is kept so it can be inspected afterwards.
//!
//! ```rust
//! use folio_core::document::{Document, Rect};
//! use folio_core::headless::HeadlessDocument;
//!
//! let mut doc = HeadlessDocument::new(1280.0)
//!     .with_rect("viewport", Rect::new(0.0, 0.0, 960.0, 400.0));
//!
//! doc.set_width("viewport", Some(900.0));
//! assert_eq!(doc.bounding_rect("viewport").map(|r| r.width), Some(900.0));
//! doc.set_width("viewport", None);
//! assert_eq!(doc.bounding_rect("viewport").map(|r| r.width), Some(960.0));
//! ```

use rustc_hash::{FxHashMap, FxHashSet};

use crate::document::{ChildNode, Document, Rect, ScrollBehavior, ScrollMetrics, ScrollTarget};

/// Recorded state of one element
#[derive(Clone, Debug)]
pub struct ElementState {
    pub classes: FxHashSet<String>,
    pub attributes: FxHashMap<String, String>,
    pub text: Option<String>,
    pub visible: bool,
    pub disabled: bool,
    /// Authored children present in the markup
    pub authored_children: usize,
    /// Identifiers of generated children, in order
    pub generated: Vec<String>,
    /// The node this element was generated from
    pub node: Option<ChildNode>,
    pub rect: Rect,
    pub offset: Rect,
    pub width: Option<f32>,
    pub translate_x: f32,
    pub transition_ms: Option<u64>,
    pub scroll: Option<ScrollMetrics>,
    pub scroll_top: f32,
    pub scroll_left: f32,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            classes: FxHashSet::default(),
            attributes: FxHashMap::default(),
            text: None,
            visible: true,
            disabled: false,
            authored_children: 0,
            generated: Vec::new(),
            node: None,
            rect: Rect::default(),
            offset: Rect::default(),
            width: None,
            translate_x: 0.0,
            transition_ms: None,
            scroll: None,
            scroll_top: 0.0,
            scroll_left: 0.0,
        }
    }
}

fn generated_state(node: &ChildNode) -> ElementState {
    ElementState {
        classes: node.classes.iter().cloned().collect(),
        text: Some(node.label.clone()),
        node: Some(node.clone()),
        ..Default::default()
    }
}

/// A recorded scroll request
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollRecord {
    pub id: String,
    /// `None` for scroll-into-view requests
    pub target: Option<ScrollTarget>,
    pub behavior: ScrollBehavior,
}

/// Document that lives entirely in memory
#[derive(Clone, Debug)]
pub struct HeadlessDocument {
    elements: FxHashMap<String, ElementState>,
    root_attributes: FxHashMap<String, String>,
    viewport_width: f32,
    path: String,
    fragment: Option<String>,
    fragment_replacements: usize,
    scroll_locked: bool,
    scrolls: Vec<ScrollRecord>,
}

impl HeadlessDocument {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            elements: FxHashMap::default(),
            root_attributes: FxHashMap::default(),
            viewport_width,
            path: "/".to_string(),
            fragment: None,
            fragment_replacements: 0,
            scroll_locked: false,
            scrolls: Vec::new(),
        }
    }

    // ========== Builder ==========

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.elements.entry(id.into()).or_default();
        self
    }

    pub fn with_elements<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.elements.entry(id.into()).or_default();
        }
        self
    }

    /// Declare `count` authored children under an element
    pub fn with_children(mut self, id: impl Into<String>, count: usize) -> Self {
        self.elements.entry(id.into()).or_default().authored_children = count;
        self
    }

    /// Viewport-relative box
    pub fn with_rect(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.elements.entry(id.into()).or_default().rect = rect;
        self
    }

    /// Box relative to the offset parent
    pub fn with_offset(mut self, id: impl Into<String>, offset: Rect) -> Self {
        self.elements.entry(id.into()).or_default().offset = offset;
        self
    }

    pub fn with_scroll_metrics(mut self, id: impl Into<String>, metrics: ScrollMetrics) -> Self {
        self.elements.entry(id.into()).or_default().scroll = Some(metrics);
        self
    }

    pub fn with_class(mut self, id: impl Into<String>, class: impl Into<String>) -> Self {
        self.elements
            .entry(id.into())
            .or_default()
            .classes
            .insert(class.into());
        self
    }

    // ========== Host-side mutation ==========

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Change an element's natural box (layout reflow)
    pub fn set_rect(&mut self, id: &str, rect: Rect) {
        if let Some(el) = self.elements.get_mut(id) {
            el.rect = rect;
        }
    }

    pub fn set_offset(&mut self, id: &str, offset: Rect) {
        if let Some(el) = self.elements.get_mut(id) {
            el.offset = offset;
        }
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    // ========== Inspection ==========

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|el| el.text.as_deref())
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).map_or(false, |el| el.visible)
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.elements.get(id).map_or(false, |el| el.disabled)
    }

    pub fn width(&self, id: &str) -> Option<f32> {
        self.elements.get(id).and_then(|el| el.width)
    }

    pub fn translate_x(&self, id: &str) -> Option<f32> {
        self.elements.get(id).map(|el| el.translate_x)
    }

    pub fn transition_ms(&self, id: &str) -> Option<u64> {
        self.elements.get(id).and_then(|el| el.transition_ms)
    }

    pub fn scroll_top(&self, id: &str) -> Option<f32> {
        self.elements.get(id).map(|el| el.scroll_top)
    }

    pub fn scroll_left(&self, id: &str) -> Option<f32> {
        self.elements.get(id).map(|el| el.scroll_left)
    }

    /// Generated children of an element, in order
    pub fn children(&self, id: &str) -> Vec<&ChildNode> {
        self.elements
            .get(id)
            .map(|el| {
                el.generated
                    .iter()
                    .filter_map(|child| self.elements.get(child))
                    .filter_map(|child| child.node.as_ref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Identifiers of generated children carrying `class`
    pub fn children_with_class(&self, id: &str, class: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|el| {
                el.generated
                    .iter()
                    .filter(|child| self.has_class(child, class))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn scrolls(&self) -> &[ScrollRecord] {
        &self.scrolls
    }

    pub fn last_scroll(&self) -> Option<&ScrollRecord> {
        self.scrolls.last()
    }

    /// How many times the fragment was replaced
    pub fn fragment_replacements(&self) -> usize {
        self.fragment_replacements
    }
}

impl Document for HeadlessDocument {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.trim_start_matches('#').to_string());
        self.fragment_replacements += 1;
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.get(name).cloned()
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            if on {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .map_or(false, |el| el.classes.contains(class))
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: Option<&str>) {
        if let Some(el) = self.elements.get_mut(id) {
            match value {
                Some(value) => {
                    el.attributes.insert(name.to_string(), value.to_string());
                }
                None => {
                    el.attributes.remove(name);
                }
            }
        }
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.text = Some(text.to_string());
        }
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            el.visible = visible;
        }
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            el.disabled = disabled;
        }
    }

    fn child_count(&self, id: &str) -> usize {
        self.elements.get(id).map_or(0, |el| el.authored_children)
    }

    fn render_children(&mut self, id: &str, children: &[ChildNode]) {
        let Some(parent) = self.elements.get_mut(id) else {
            return;
        };
        let stale = std::mem::take(&mut parent.generated);
        parent.generated = children.iter().map(|c| c.id.clone()).collect();

        for old in stale {
            self.elements.remove(&old);
        }
        for child in children {
            self.elements.insert(child.id.clone(), generated_state(child));
        }
    }

    fn append_child(&mut self, parent: &str, child: &ChildNode) {
        if !self.elements.contains_key(parent) {
            return;
        }
        self.remove_element(&child.id);
        if let Some(el) = self.elements.get_mut(parent) {
            el.generated.push(child.id.clone());
        }
        self.elements.insert(child.id.clone(), generated_state(child));
    }

    fn remove_element(&mut self, id: &str) {
        let Some(el) = self.elements.remove(id) else {
            return;
        };
        for child in &el.generated {
            self.remove_element(child);
        }
        for parent in self.elements.values_mut() {
            parent.generated.retain(|child| child != id);
        }
    }

    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).map(|el| Rect {
            width: el.width.unwrap_or(el.rect.width),
            ..el.rect
        })
    }

    fn offset_rect(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).map(|el| el.offset)
    }

    fn scroll_metrics(&self, id: &str) -> Option<ScrollMetrics> {
        self.elements.get(id).and_then(|el| el.scroll)
    }

    fn set_width(&mut self, id: &str, width: Option<f32>) {
        if let Some(el) = self.elements.get_mut(id) {
            el.width = width;
        }
    }

    fn set_translate_x(&mut self, id: &str, x: f32, transition_ms: Option<u64>) {
        if let Some(el) = self.elements.get_mut(id) {
            el.translate_x = x;
            el.transition_ms = transition_ms;
        }
    }

    fn scroll_to(&mut self, id: &str, target: ScrollTarget, behavior: ScrollBehavior) {
        let Some(el) = self.elements.get_mut(id) else {
            return;
        };
        match target {
            ScrollTarget::Top(top) => el.scroll_top = top,
            ScrollTarget::Left(left) => el.scroll_left = left,
        }
        self.scrolls.push(ScrollRecord {
            id: id.to_string(),
            target: Some(target),
            behavior,
        });
    }

    fn scroll_into_view(&mut self, id: &str, behavior: ScrollBehavior) {
        if !self.elements.contains_key(id) {
            return;
        }
        self.scrolls.push(ScrollRecord {
            id: id.to_string(),
            target: None,
            behavior,
        });
    }
}
