//! Timeline tab strip for narrow viewports
//!
//! Replaces the sidebar on small screens: one tab per entry, oldest on the
//! left, showing a single entry at a time.

use folio_core::{
    event_types, ChildNode, Controller, Document, Event, ScrollBehavior, ScrollTarget,
    ACTIVE_CLASS,
};
use serde::{Deserialize, Serialize};

use crate::timeline::{TimelineConfig, TimelineEntry};

/// Tab strip configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Generated strip element
    pub strip_id: String,
    /// Tabs are `<tab_prefix><entry id>`
    pub tab_prefix: String,
    /// The strip exists only at or below this viewport width
    pub breakpoint: f32,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            strip_id: "timeline-mobile-tabs".into(),
            tab_prefix: "timeline-tab-".into(),
            breakpoint: 480.0,
        }
    }
}

impl TabsConfig {
    pub fn applies(&self, viewport_width: f32) -> bool {
        viewport_width <= self.breakpoint
    }
}

#[derive(Clone, Debug)]
struct Tab {
    entry_id: String,
    /// Position of the entry in document order
    entry_index: usize,
}

/// Horizontal scroll that centers a tab in its strip
pub fn centered_scroll_left(tab_left: f32, tab_width: f32, strip_width: f32) -> f32 {
    tab_left - strip_width / 2.0 + tab_width / 2.0
}

/// Mobile timeline tabs
pub struct TimelineTabs {
    config: TabsConfig,
    container_id: String,
    content_id: String,
    /// Entry ids in document order
    entries: Vec<String>,
    /// Tabs in display order (oldest first)
    tabs: Vec<Tab>,
    active_tab: usize,
}

impl TimelineTabs {
    /// Build the strip when the viewport is narrow and the timeline exists.
    ///
    /// The newest tab starts active and the first entry is shown.
    pub fn mount(
        config: TabsConfig,
        timeline: &TimelineConfig,
        doc: &mut dyn Document,
    ) -> Option<Self> {
        if !config.applies(doc.viewport_width()) {
            return None;
        }
        if !doc.contains(&timeline.container_id) || !doc.contains(&timeline.content_id) {
            tracing::debug!("tabs: timeline container absent, not mounting");
            return None;
        }

        let entries: Vec<&TimelineEntry> = timeline
            .entries
            .iter()
            .filter(|entry| doc.contains(&entry.id))
            .collect();
        if entries.is_empty() {
            return None;
        }

        let tabs: Vec<(Tab, String)> = entries
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(index, entry)| {
                entry.label().map(|label| {
                    (
                        Tab {
                            entry_id: entry.id.clone(),
                            entry_index: index,
                        },
                        label.trim().to_string(),
                    )
                })
            })
            .collect();
        if tabs.is_empty() {
            return None;
        }

        let mut strip = Self {
            config,
            container_id: timeline.container_id.clone(),
            content_id: timeline.content_id.clone(),
            entries: entries.iter().map(|entry| entry.id.clone()).collect(),
            active_tab: tabs.len() - 1,
            tabs: Vec::with_capacity(tabs.len()),
        };

        doc.append_child(
            &strip.container_id,
            &ChildNode::new(strip.config.strip_id.clone()).class("timeline-mobile-tabs"),
        );
        let nodes: Vec<ChildNode> = tabs
            .iter()
            .enumerate()
            .map(|(position, (tab, label))| {
                ChildNode::new(strip.tab_id(&tab.entry_id))
                    .label(label.clone())
                    .class("timeline-mobile-tab")
                    .class_if(ACTIVE_CLASS, position == strip.active_tab)
                    .source(tab.entry_index)
            })
            .collect();
        doc.render_children(&strip.config.strip_id, &nodes);
        strip.tabs = tabs.into_iter().map(|(tab, _)| tab).collect();

        strip.show_entry(0, doc);
        strip.center(strip.active_tab, doc);
        tracing::debug!("tabs: mounted {} tabs", strip.tabs.len());
        Some(strip)
    }

    /// Remove the strip and the per-entry visibility markers
    pub fn teardown(self, doc: &mut dyn Document) {
        for entry in &self.entries {
            doc.set_class(entry, ACTIVE_CLASS, false);
        }
        doc.remove_element(&self.config.strip_id);
        tracing::debug!("tabs: torn down");
    }

    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Display position of the active tab
    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    /// Entry id behind the active tab
    pub fn active_entry_id(&self) -> &str {
        &self.tabs[self.active_tab].entry_id
    }

    pub fn tab_id(&self, entry_id: &str) -> String {
        format!("{}{}", self.config.tab_prefix, entry_id)
    }

    /// Activate the tab at display `position`, show its entry, center it
    pub fn select(&mut self, position: usize, doc: &mut dyn Document) -> bool {
        let Some(tab) = self.tabs.get(position) else {
            return false;
        };
        let entry_index = tab.entry_index;
        self.mark(position, doc);
        self.show_entry(entry_index, doc);
        self.center(position, doc);
        true
    }

    /// Follow an active-entry change made elsewhere
    pub fn sync_active(&mut self, entry_id: &str, doc: &mut dyn Document) {
        let Some(position) = self.tabs.iter().position(|tab| tab.entry_id == entry_id) else {
            return;
        };
        if position != self.active_tab {
            let entry_index = self.tabs[position].entry_index;
            self.mark(position, doc);
            self.show_entry(entry_index, doc);
        }
    }

    fn mark(&mut self, position: usize, doc: &mut dyn Document) {
        for (i, tab) in self.tabs.iter().enumerate() {
            let id = self.tab_id(&tab.entry_id);
            doc.set_class(&id, ACTIVE_CLASS, i == position);
        }
        self.active_tab = position;
    }

    fn show_entry(&self, entry_index: usize, doc: &mut dyn Document) {
        for (i, entry) in self.entries.iter().enumerate() {
            doc.set_class(entry, ACTIVE_CLASS, i == entry_index);
        }
        doc.scroll_to(&self.content_id, ScrollTarget::Top(0.0), ScrollBehavior::Instant);
    }

    fn center(&self, position: usize, doc: &mut dyn Document) {
        let Some(tab) = self.tabs.get(position) else {
            return;
        };
        let id = self.tab_id(&tab.entry_id);
        let (Some(tab_rect), Some(strip)) =
            (doc.offset_rect(&id), doc.bounding_rect(&self.config.strip_id))
        else {
            return;
        };
        let left = centered_scroll_left(tab_rect.left, tab_rect.width, strip.width);
        doc.scroll_to(&self.config.strip_id, ScrollTarget::Left(left), ScrollBehavior::Smooth);
    }

    fn tab_target(&self, event: &Event) -> Option<usize> {
        if event.target == self.config.strip_id {
            return event.index();
        }
        let entry_id = event.target.strip_prefix(self.config.tab_prefix.as_str())?;
        self.tabs.iter().position(|tab| tab.entry_id == entry_id)
    }
}

impl Controller for TimelineTabs {
    fn name(&self) -> &str {
        "timeline-tabs"
    }

    fn handle_event(&mut self, event: &Event, doc: &mut dyn Document) -> bool {
        if event.event_type != event_types::CLICK {
            return false;
        }
        match self.tab_target(event) {
            Some(position) => self.select(position, doc),
            None => false,
        }
    }
}
