//! Timeline navigator
//!
//! Keeps one sidebar link active for the entry currently in view. The active
//! entry changes on visibility reports (topmost intersecting entry wins) and
//! on explicit navigation by period. Each change replaces the address
//! fragment and publishes [`Notification::TimelineActiveChanged`] so mirrors
//! (mobile menu list, mobile tabs) can follow.

use folio_core::{
    event_types, Controller, Document, Event, EventData, Intersection, Notification,
    NotificationBus, ScrollBehavior, ScrollTarget, ACTIVE_CLASS,
};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Entries sitting this close to the top of the content always scroll to 0
pub const FIRST_ENTRY_THRESHOLD: f32 = 10.0;

/// One authored timeline entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Element identifier of the entry, also its fragment
    pub id: String,
    /// Logical period key, e.g. `2024-06`
    #[serde(default)]
    pub period: Option<String>,
    /// Human label of the period, e.g. `June 2024`
    #[serde(default)]
    pub period_label: Option<String>,
    #[serde(default)]
    pub title: String,
}

impl TimelineEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            period: None,
            period_label: None,
            title: String::new(),
        }
    }

    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn period_label(mut self, label: impl Into<String>) -> Self {
        self.period_label = Some(label.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Label shown for the period, falling back to the raw key
    pub fn label(&self) -> Option<&str> {
        self.period_label.as_deref().or(self.period.as_deref())
    }
}

/// Timeline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Scrollable container holding the entries
    pub content_id: String,
    /// Sticky sidebar the entries align with
    pub sidebar_id: String,
    /// Wrapper of sidebar and content
    pub container_id: String,
    /// Sidebar links are `<link_prefix><entry id>`
    pub link_prefix: String,
    /// Entries in document order
    pub entries: Vec<TimelineEntry>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            content_id: "timeline-content".into(),
            sidebar_id: "timeline-sidebar".into(),
            container_id: "timeline-container".into(),
            link_prefix: "timeline-nav-".into(),
            entries: Vec::new(),
        }
    }
}

impl TimelineConfig {
    pub fn link_id(&self, entry_id: &str) -> String {
        format!("{}{}", self.link_prefix, entry_id)
    }
}

/// Programmatic navigation offered to other controllers
pub trait TimelineNavigation {
    /// Scroll to the entry of `period`. Returns `false` for unknown periods.
    fn navigate_to(&mut self, period: &str, behavior: ScrollBehavior, doc: &mut dyn Document)
        -> bool;

    /// Period of the active entry, if it has one
    fn active_period(&self) -> Option<&str>;
}

/// Scroll offset that puts an entry's top level with the sidebar's top.
///
/// The first entry always reaches 0; nothing scrolls past `max_scroll_top`.
pub fn aligned_scroll_top(
    content_top: f32,
    entry_offset: f32,
    sidebar_top: f32,
    max_scroll_top: f32,
) -> f32 {
    if entry_offset <= FIRST_ENTRY_THRESHOLD {
        return 0.0;
    }
    let desired = content_top + entry_offset - sidebar_top;
    if desired > max_scroll_top {
        max_scroll_top
    } else {
        desired.max(0.0)
    }
}

/// Sidebar timeline controller
pub struct Timeline {
    config: TimelineConfig,
    /// Entries present in the document, in document order
    entries: Vec<TimelineEntry>,
    index_by_id: FxHashMap<String, usize>,
    index_by_period: IndexMap<String, usize>,
    active: Option<usize>,
    bus: NotificationBus,
}

impl Timeline {
    /// Build the lookups and activate the initial entry without animation.
    ///
    /// The initial entry comes from the address fragment (an entry id, else a
    /// period key), otherwise the first entry. Returns `None` when no
    /// configured entry exists in the document.
    pub fn mount(
        config: TimelineConfig,
        bus: NotificationBus,
        doc: &mut dyn Document,
    ) -> Option<Self> {
        let entries: Vec<TimelineEntry> = config
            .entries
            .iter()
            .filter(|entry| doc.contains(&entry.id))
            .cloned()
            .collect();
        if entries.is_empty() {
            tracing::debug!("timeline: no entries in document, not mounting");
            return None;
        }

        let index_by_id = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.id.clone(), i))
            .collect();
        let mut index_by_period = IndexMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if let Some(period) = &entry.period {
                index_by_period.entry(period.clone()).or_insert(i);
            }
        }

        let mut timeline = Self {
            config,
            entries,
            index_by_id,
            index_by_period,
            active: None,
            bus,
        };

        let initial = doc
            .fragment()
            .and_then(|fragment| timeline.resolve(&fragment))
            .unwrap_or(0);
        tracing::debug!("timeline: initial entry `{}`", timeline.entries[initial].id);
        timeline.scroll_to_entry(initial, ScrollBehavior::Instant, doc);
        Some(timeline)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn active_entry_id(&self) -> Option<&str> {
        self.active.map(|i| self.entries[i].id.as_str())
    }

    /// Entry id for a fragment naming an entry or a period
    pub fn resolve(&self, fragment: &str) -> Option<usize> {
        let fragment = fragment.trim_start_matches('#');
        self.index_by_id
            .get(fragment)
            .or_else(|| self.index_by_period.get(fragment))
            .copied()
    }

    pub fn entry_for_period(&self, period: &str) -> Option<&TimelineEntry> {
        self.index_by_period.get(period).map(|&i| &self.entries[i])
    }

    /// Known periods in document order
    pub fn periods(&self) -> impl Iterator<Item = &str> {
        self.index_by_period.keys().map(String::as_str)
    }

    /// Scroll an entry into alignment and make it active
    pub fn scroll_to_entry(
        &mut self,
        index: usize,
        behavior: ScrollBehavior,
        doc: &mut dyn Document,
    ) {
        let Some(entry) = self.entries.get(index) else {
            return;
        };
        let content = &self.config.content_id;

        let geometry = (
            doc.bounding_rect(content),
            doc.bounding_rect(&self.config.sidebar_id),
            doc.scroll_metrics(content),
            doc.offset_rect(&entry.id),
        );
        match geometry {
            (Some(content_rect), Some(sidebar), Some(metrics), Some(offset)) => {
                let top = aligned_scroll_top(
                    content_rect.top,
                    offset.top,
                    sidebar.top,
                    metrics.max_scroll_top(),
                );
                tracing::trace!("timeline: `{}` -> scroll top {top}", entry.id);
                doc.scroll_to(content, ScrollTarget::Top(top), behavior);
            }
            _ => doc.scroll_into_view(&entry.id, behavior),
        }

        self.update_nav_state(index, doc);
    }

    /// Pick the topmost intersecting entry from a visibility report
    pub fn on_intersections(&mut self, report: &[Intersection], doc: &mut dyn Document) -> bool {
        let topmost = report
            .iter()
            .filter(|seen| seen.is_intersecting)
            .filter_map(|seen| self.index_by_id.get(&seen.target).map(|&i| (seen.top, i)))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        match topmost {
            Some((_, index)) if self.active != Some(index) => {
                self.update_nav_state(index, doc);
                true
            }
            _ => false,
        }
    }

    fn update_nav_state(&mut self, index: usize, doc: &mut dyn Document) {
        for (i, entry) in self.entries.iter().enumerate() {
            let link = self.config.link_id(&entry.id);
            let active = i == index;
            doc.set_class(&link, ACTIVE_CLASS, active);
            doc.set_attribute(&link, "aria-current", active.then_some("true"));
        }

        let entry = &self.entries[index];
        if doc.fragment().as_deref() != Some(entry.id.as_str()) {
            doc.replace_fragment(&entry.id);
        }

        if self.active != Some(index) {
            tracing::debug!("timeline: active entry `{}`", entry.id);
        }
        self.active = Some(index);
        self.bus.publish(Notification::TimelineActiveChanged {
            entry_id: entry.id.clone(),
            period: entry.period.clone(),
        });
    }

    fn link_target(&self, target: &str) -> Option<usize> {
        target
            .strip_prefix(self.config.link_prefix.as_str())
            .and_then(|id| self.index_by_id.get(id))
            .copied()
    }
}

impl TimelineNavigation for Timeline {
    fn navigate_to(
        &mut self,
        period: &str,
        behavior: ScrollBehavior,
        doc: &mut dyn Document,
    ) -> bool {
        match self.index_by_period.get(period).copied() {
            Some(index) => {
                self.scroll_to_entry(index, behavior, doc);
                true
            }
            None => {
                tracing::debug!("timeline: unknown period `{period}`");
                false
            }
        }
    }

    fn active_period(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.entries[i].period.as_deref())
    }
}

impl Controller for Timeline {
    fn name(&self) -> &str {
        "timeline"
    }

    fn handle_event(&mut self, event: &Event, doc: &mut dyn Document) -> bool {
        match (&event.data, event.event_type) {
            (EventData::Intersections(report), event_types::INTERSECT) => {
                self.on_intersections(report, doc)
            }
            (_, event_types::CLICK) => match self.link_target(&event.target) {
                Some(index) => {
                    self.scroll_to_entry(index, ScrollBehavior::Smooth, doc);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entry_always_reaches_zero() {
        assert_eq!(aligned_scroll_top(120.0, 0.0, 80.0, 900.0), 0.0);
        assert_eq!(aligned_scroll_top(120.0, 10.0, 80.0, 900.0), 0.0);
    }

    #[test]
    fn test_alignment_offsets_by_sidebar_top() {
        assert_eq!(aligned_scroll_top(120.0, 400.0, 80.0, 900.0), 440.0);
    }

    #[test]
    fn test_alignment_is_clamped_to_scroll_extent() {
        assert_eq!(aligned_scroll_top(120.0, 1200.0, 80.0, 900.0), 900.0);
        assert_eq!(aligned_scroll_top(-200.0, 50.0, 80.0, 900.0), 0.0);
    }

    #[test]
    fn test_entry_label_falls_back_to_period() {
        let entry = TimelineEntry::new("jan").period("2025-01");
        assert_eq!(entry.label(), Some("2025-01"));
        assert_eq!(entry.period_label("January 2025").label(), Some("January 2025"));
    }
}
