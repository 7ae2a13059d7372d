//! Infinite-loop card carousel
//!
//! The authored cards are rendered once into a padded sequence
//! `[tail clones, originals, head clones]` so the track can keep sliding in
//! one direction. After an animated step lands in a clone zone the track is
//! re-anchored, without animation, onto the equivalent original card.
//!
//! Two indices are tracked:
//! - **display index**: slot in the padded sequence
//! - **logical index**: position among the authored cards
//!
//! All waiting (boundary check, guard release, autoplay, resize debounce)
//! goes through a [`TaskScheduler`]; call [`Controller::advance`] with the
//! host clock to run whatever is due.

use folio_core::scheduler::{TaskId, TaskScheduler};
use folio_core::{event_types, ChildNode, Controller, Document, Event, ACTIVE_CLASS};
use serde::{Deserialize, Serialize};

/// Class carried by rendered clone slots
pub const CLONE_CLASS: &str = "carousel-clone";

/// Class on every dot indicator
pub const DOT_CLASS: &str = "carousel-dot";

/// Class on the track while a drag session is active
pub const DRAGGING_CLASS: &str = "dragging";

/// How many cards fit a desktop row
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// Exactly `n` cards; card width is derived to fill the row
    FixedCount(usize),
    /// Cards keep this width; as many as fit are shown
    FixedWidth(f32),
}

/// Carousel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Instance name, also the prefix of every derived anchor id
    pub name: String,
    /// Anchor overrides; `None` derives `<name>-track` and friends
    pub track_id: Option<String>,
    pub viewport_id: Option<String>,
    pub prev_id: Option<String>,
    pub next_id: Option<String>,
    pub dots_id: Option<String>,
    /// Class shared by every rendered card slot
    pub card_class: String,
    /// Desktop layout policy
    pub layout: LayoutPolicy,
    /// Viewports at or below this width show a single card
    pub mobile_breakpoint: f32,
    pub gap: f32,
    pub mobile_gap: f32,
    /// Upper bound on clones at each end
    pub max_clones: usize,
    /// Duration of an animated step
    pub transition_ms: u64,
    /// How long re-anchoring blocks further steps
    pub wrap_guard_ms: u64,
    pub autoplay: bool,
    pub autoplay_ms: u64,
    pub resize_debounce_ms: u64,
    /// A release past this many pixels commits a step
    pub swipe_distance: f32,
    /// A release faster than this (px/ms) commits a step
    pub swipe_velocity: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::new("carousel")
    }
}

impl CarouselConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            track_id: None,
            viewport_id: None,
            prev_id: None,
            next_id: None,
            dots_id: None,
            card_class: "carousel-card".into(),
            layout: LayoutPolicy::FixedCount(3),
            mobile_breakpoint: 480.0,
            gap: 20.0,
            mobile_gap: 10.0,
            max_clones: 3,
            transition_ms: 500,
            wrap_guard_ms: 50,
            autoplay: true,
            autoplay_ms: 20_000,
            resize_debounce_ms: 250,
            swipe_distance: 50.0,
            swipe_velocity: 0.5,
        }
    }

    /// Project cards: three per row
    pub fn projects() -> Self {
        Self::new("projects")
            .card_class("project-card")
            .layout(LayoutPolicy::FixedCount(3))
    }

    /// Skill cards: fixed 300px cards, as many as fit
    pub fn skills() -> Self {
        Self::new("skills")
            .card_class("skill-card")
            .layout(LayoutPolicy::FixedWidth(300.0))
    }

    pub fn card_class(mut self, class: impl Into<String>) -> Self {
        self.card_class = class.into();
        self
    }

    pub fn layout(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    pub fn autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = enabled;
        self
    }

    fn anchor(&self, explicit: &Option<String>, suffix: &str) -> String {
        explicit
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.name, suffix))
    }

    fn anchors(&self) -> Anchors {
        Anchors {
            track: self.anchor(&self.track_id, "track"),
            viewport: self.anchor(&self.viewport_id, "carousel"),
            prev: self.anchor(&self.prev_id, "prev"),
            next: self.anchor(&self.next_id, "next"),
            dots: self.anchor(&self.dots_id, "dots"),
        }
    }
}

#[derive(Clone, Debug)]
struct Anchors {
    track: String,
    viewport: String,
    prev: String,
    next: String,
    dots: String,
}

impl Anchors {
    fn all(&self) -> [&str; 5] {
        [
            &self.track,
            &self.viewport,
            &self.prev,
            &self.next,
            &self.dots,
        ]
    }
}

/// Result of one layout pass
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarouselLayout {
    pub visible: usize,
    pub card_width: f32,
    pub gap: f32,
    /// Width the viewport is constrained to so only whole cards show
    pub viewport_width: f32,
    pub max_logical_index: usize,
}

/// Fit cards into `available` pixels.
///
/// Mobile shows one full-width card. Desktop follows the configured policy.
pub fn compute_layout(
    config: &CarouselConfig,
    available: f32,
    mobile: bool,
    items: usize,
) -> CarouselLayout {
    let available = available.max(0.0);

    let (visible, card_width, gap) = if mobile {
        (1, available, config.mobile_gap)
    } else {
        let gap = config.gap;
        match config.layout {
            LayoutPolicy::FixedCount(count) => {
                let visible = count.max(1);
                let width = (available - (visible - 1) as f32 * gap) / visible as f32;
                (visible, width.max(0.0), gap)
            }
            LayoutPolicy::FixedWidth(width) => {
                let fit = ((available + gap) / (width + gap)).floor();
                let visible = if fit.is_finite() && fit >= 1.0 {
                    fit as usize
                } else {
                    1
                };
                (visible, width, gap)
            }
        }
    };

    CarouselLayout {
        visible,
        card_width,
        gap,
        viewport_width: visible as f32 * card_width + (visible - 1) as f32 * gap,
        max_logical_index: items.saturating_sub(visible),
    }
}

/// Deferred carousel work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CarouselTask {
    Autoplay,
    /// Re-anchor out of a clone zone once a step has finished animating
    WrapCheck,
    ReleaseWrap,
    Relayout,
}

#[derive(Clone, Copy, Debug)]
struct DragSession {
    origin_x: f32,
    origin_ms: u64,
    live_offset: f32,
}

/// Infinite-loop carousel controller
pub struct Carousel {
    config: CarouselConfig,
    anchors: Anchors,
    /// Number of authored cards, captured at mount
    items: usize,
    head_clones: usize,
    tail_clones: usize,
    display_index: usize,
    logical_index: usize,
    is_wrapping: bool,
    layout: CarouselLayout,
    drag: Option<DragSession>,
    timers: TaskScheduler<CarouselTask>,
    autoplay_task: Option<TaskId>,
    wrap_check: Option<TaskId>,
    wrap_release: Option<TaskId>,
    relayout_task: Option<TaskId>,
}

impl Carousel {
    /// Capture the authored cards, render the padded track and lay it out.
    ///
    /// Returns `None` when an anchor is missing or the track has no cards.
    pub fn mount(config: CarouselConfig, doc: &mut dyn Document) -> Option<Self> {
        let anchors = config.anchors();
        if let Some(missing) = anchors.all().into_iter().find(|id| !doc.contains(id)) {
            tracing::debug!("carousel {}: anchor `{missing}` absent, not mounting", config.name);
            return None;
        }

        let items = doc.child_count(&anchors.track);
        if items == 0 {
            tracing::debug!("carousel {}: no cards, not mounting", config.name);
            return None;
        }

        let clones = config.max_clones.min(items);
        let mut carousel = Self {
            config,
            anchors,
            items,
            head_clones: clones,
            tail_clones: clones,
            display_index: clones,
            logical_index: 0,
            is_wrapping: false,
            layout: CarouselLayout::default(),
            drag: None,
            timers: TaskScheduler::new(),
            autoplay_task: None,
            wrap_check: None,
            wrap_release: None,
            relayout_task: None,
        };

        carousel.render_track(doc);
        carousel.relayout(doc);
        carousel.restart_autoplay();

        tracing::debug!(
            "carousel {}: mounted {} cards ({} visible)",
            carousel.config.name,
            items,
            carousel.layout.visible
        );
        Some(carousel)
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Clones before and after the originals
    pub fn clone_counts(&self) -> (usize, usize) {
        (self.head_clones, self.tail_clones)
    }

    /// Length of the padded sequence
    pub fn total_slots(&self) -> usize {
        self.head_clones + self.items + self.tail_clones
    }

    pub fn display_index(&self) -> usize {
        self.display_index
    }

    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    pub fn max_logical_index(&self) -> usize {
        self.layout.max_logical_index
    }

    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    pub fn is_wrapping(&self) -> bool {
        self.is_wrapping
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn autoplay_active(&self) -> bool {
        self.autoplay_task.is_some()
    }

    /// Authored card shown in each slot of the padded sequence
    pub fn slot_sources(&self) -> Vec<usize> {
        let n = self.items;
        (n - self.head_clones..n)
            .chain(0..n)
            .chain(0..self.tail_clones)
            .collect()
    }

    /// Identifier of the rendered slot at `display`
    pub fn slot_id(&self, display: usize) -> String {
        format!("{}-card-{}", self.anchors.track, display)
    }

    /// Identifier of dot indicator `index`
    pub fn dot_id(&self, index: usize) -> String {
        format!("{}-{}", self.anchors.dots, index)
    }

    /// Track offset for a display index
    pub fn offset_for(&self, display: usize) -> f32 {
        let step = self.layout.card_width + self.layout.gap;
        -((display as f32 - self.head_clones as f32) * step)
    }

    // ========== Navigation ==========

    /// Step forward one card. No-op while re-anchoring.
    pub fn next(&mut self, doc: &mut dyn Document) -> bool {
        self.explicit_step(1, doc)
    }

    /// Step back one card. No-op while re-anchoring.
    pub fn prev(&mut self, doc: &mut dyn Document) -> bool {
        self.explicit_step(-1, doc)
    }

    /// Jump to a logical index, clamped to `[0, max_logical_index]`.
    ///
    /// Returns the logical index afterwards.
    pub fn go_to(&mut self, target: isize, doc: &mut dyn Document) -> usize {
        if self.is_wrapping {
            return self.logical_index;
        }
        let max = self.layout.max_logical_index as isize;
        let logical = target.clamp(0, max) as usize;
        self.translate_to(self.head_clones + logical, true, doc);
        self.restart_autoplay();
        self.logical_index
    }

    /// Move the track to a slot of the padded sequence
    pub fn translate_to(&mut self, display: usize, animate: bool, doc: &mut dyn Document) {
        self.display_index = display.min(self.total_slots() - 1);
        self.logical_index = self.logical_for(self.display_index);

        let offset = self.offset_for(self.display_index);
        let transition = animate.then_some(self.config.transition_ms);
        doc.set_translate_x(&self.anchors.track, offset, transition);
        doc.set_disabled(&self.anchors.prev, false);
        doc.set_disabled(&self.anchors.next, false);
        self.mark_dots(doc);

        tracing::trace!(
            "carousel {}: display {} logical {} offset {offset}",
            self.config.name,
            self.display_index,
            self.logical_index
        );

        if animate && !self.is_wrapping {
            self.timers
                .replace(&mut self.wrap_check, self.config.transition_ms, CarouselTask::WrapCheck);
        }
    }

    fn explicit_step(&mut self, delta: isize, doc: &mut dyn Document) -> bool {
        if self.is_wrapping {
            tracing::trace!("carousel {}: step ignored while wrapping", self.config.name);
            return false;
        }
        let moved = self.shift(delta, doc);
        self.restart_autoplay();
        moved
    }

    /// Animate `delta` slots; refused at the ends of the padded sequence
    fn shift(&mut self, delta: isize, doc: &mut dyn Document) -> bool {
        let target = self.display_index as isize + delta;
        if target < 0 || target >= self.total_slots() as isize {
            return false;
        }
        self.translate_to(target as usize, true, doc);
        true
    }

    fn logical_for(&self, display: usize) -> usize {
        (display as isize - self.head_clones as isize).rem_euclid(self.items as isize) as usize
    }

    fn wrap_if_in_clone_zone(&mut self, doc: &mut dyn Document) {
        let anchor = if self.display_index >= self.head_clones + self.items {
            self.display_index - self.items
        } else if self.display_index < self.head_clones {
            self.display_index + self.items
        } else {
            return;
        };

        tracing::debug!(
            "carousel {}: re-anchoring {} -> {}",
            self.config.name,
            self.display_index,
            anchor
        );
        self.is_wrapping = true;
        self.translate_to(anchor, false, doc);
        self.timers.replace(
            &mut self.wrap_release,
            self.config.wrap_guard_ms,
            CarouselTask::ReleaseWrap,
        );
    }

    // ========== Autoplay ==========

    fn restart_autoplay(&mut self) {
        if !self.config.autoplay || self.drag.is_some() {
            return;
        }
        self.timers.replace_repeating(
            &mut self.autoplay_task,
            self.config.autoplay_ms,
            CarouselTask::Autoplay,
        );
    }

    fn stop_autoplay(&mut self) {
        self.timers.clear(&mut self.autoplay_task);
    }

    // ========== Drag ==========

    /// Begin a drag session at pointer coordinate `x`
    pub fn drag_start(&mut self, x: f32, timestamp: u64, doc: &mut dyn Document) -> bool {
        if self.is_wrapping {
            return false;
        }
        self.drag = Some(DragSession {
            origin_x: x,
            origin_ms: timestamp,
            live_offset: 0.0,
        });
        self.stop_autoplay();
        doc.set_class(&self.anchors.track, DRAGGING_CLASS, true);
        true
    }

    /// Render the uncommitted offset of the active drag
    pub fn drag_move(&mut self, x: f32, doc: &mut dyn Document) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        drag.live_offset = x - drag.origin_x;
        let live = drag.live_offset;
        let base = self.offset_for(self.display_index);
        doc.set_translate_x(&self.anchors.track, base + live, None);
        true
    }

    /// Finish the drag, committing at most one step.
    ///
    /// Returns the committed direction: `1` (next), `-1` (prev) or `0`.
    pub fn drag_end(&mut self, timestamp: u64, doc: &mut dyn Document) -> isize {
        let Some(drag) = self.drag.take() else {
            return 0;
        };
        doc.set_class(&self.anchors.track, DRAGGING_CLASS, false);

        let distance = drag.live_offset;
        let elapsed = timestamp.saturating_sub(drag.origin_ms).max(1);
        let velocity = distance.abs() / elapsed as f32;
        let commit = distance.abs() > self.config.swipe_distance
            || velocity > self.config.swipe_velocity;

        // Dragging toward larger x reveals the previous card
        let direction = match (commit, distance > 0.0) {
            (false, _) => 0,
            (true, true) => -1,
            (true, false) => 1,
        };
        tracing::debug!(
            "carousel {}: drag {distance}px in {elapsed}ms ({velocity:.2}px/ms) -> {direction}",
            self.config.name
        );

        if direction == 0 || !self.shift(direction, doc) {
            // Clear the overlay
            self.translate_to(self.display_index, true, doc);
        }
        self.restart_autoplay();
        direction
    }

    // ========== Layout ==========

    fn render_track(&self, doc: &mut dyn Document) {
        let slots: Vec<ChildNode> = self
            .slot_sources()
            .into_iter()
            .enumerate()
            .map(|(display, source)| {
                let clone = display < self.head_clones || display >= self.head_clones + self.items;
                ChildNode::new(self.slot_id(display))
                    .class(self.config.card_class.clone())
                    .class_if(CLONE_CLASS, clone)
                    .source(source)
            })
            .collect();
        doc.render_children(&self.anchors.track, &slots);
    }

    fn measure(&mut self, doc: &mut dyn Document) {
        doc.set_width(&self.anchors.viewport, None);
        let available = doc
            .bounding_rect(&self.anchors.viewport)
            .map_or(0.0, |rect| rect.width);
        let mobile = doc.viewport_width() <= self.config.mobile_breakpoint;

        self.layout = compute_layout(&self.config, available, mobile, self.items);
        tracing::trace!("carousel {}: layout {:?}", self.config.name, self.layout);

        doc.set_width(&self.anchors.viewport, Some(self.layout.viewport_width));
        for display in 0..self.total_slots() {
            doc.set_width(&self.slot_id(display), Some(self.layout.card_width));
        }
    }

    fn render_dots(&self, doc: &mut dyn Document) {
        let dots: Vec<ChildNode> = (0..=self.layout.max_logical_index)
            .map(|i| {
                ChildNode::new(self.dot_id(i))
                    .class(DOT_CLASS)
                    .class_if(ACTIVE_CLASS, i == self.logical_index)
            })
            .collect();
        doc.render_children(&self.anchors.dots, &dots);
    }

    fn mark_dots(&self, doc: &mut dyn Document) {
        for i in 0..=self.layout.max_logical_index {
            doc.set_class(&self.dot_id(i), ACTIVE_CLASS, i == self.logical_index);
        }
    }

    /// Measure, rebuild the dots and snap back into range without animation
    pub fn relayout(&mut self, doc: &mut dyn Document) {
        self.measure(doc);
        if self.logical_index > self.layout.max_logical_index {
            self.logical_index = self.layout.max_logical_index;
            self.display_index = self.head_clones + self.logical_index;
        }
        self.render_dots(doc);
        self.translate_to(self.display_index, false, doc);
    }

    fn run(&mut self, task: CarouselTask, doc: &mut dyn Document) {
        match task {
            CarouselTask::Autoplay => {
                if !self.is_wrapping {
                    self.shift(1, doc);
                }
            }
            CarouselTask::WrapCheck => {
                self.wrap_check = None;
                self.wrap_if_in_clone_zone(doc);
            }
            CarouselTask::ReleaseWrap => {
                self.wrap_release = None;
                self.is_wrapping = false;
            }
            CarouselTask::Relayout => {
                self.relayout_task = None;
                self.relayout(doc);
            }
        }
    }

    fn dot_target(&self, event: &Event) -> Option<usize> {
        if event.target == self.anchors.dots {
            return event.index();
        }
        event
            .target
            .strip_prefix(self.anchors.dots.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|index| index.parse().ok())
    }

    fn on_track(&self, target: &str) -> bool {
        target == self.anchors.track
            || target
                .strip_prefix(self.anchors.track.as_str())
                .map_or(false, |rest| rest.starts_with("-card-"))
    }
}

impl Controller for Carousel {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn handle_event(&mut self, event: &Event, doc: &mut dyn Document) -> bool {
        // Timers due before the event land first
        self.advance(event.timestamp, doc);

        match event.event_type {
            event_types::CLICK => {
                if event.target == self.anchors.prev {
                    self.prev(doc);
                    true
                } else if event.target == self.anchors.next {
                    self.next(doc);
                    true
                } else if let Some(index) = self.dot_target(event) {
                    self.go_to(index as isize, doc);
                    true
                } else {
                    false
                }
            }
            event_types::POINTER_DOWN if self.on_track(&event.target) => match event.pointer_x() {
                Some(x) => self.drag_start(x, event.timestamp, doc),
                None => false,
            },
            event_types::POINTER_MOVE if self.on_track(&event.target) => match event.pointer_x() {
                Some(x) => self.drag_move(x, doc),
                None => false,
            },
            event_types::POINTER_UP | event_types::POINTER_LEAVE
                if self.on_track(&event.target) && self.drag.is_some() =>
            {
                self.drag_end(event.timestamp, doc);
                true
            }
            event_types::RESIZE => {
                self.timers.replace(
                    &mut self.relayout_task,
                    self.config.resize_debounce_ms,
                    CarouselTask::Relayout,
                );
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self, now_ms: u64, doc: &mut dyn Document) {
        while let Some((_, task)) = self.timers.pop_due(now_ms) {
            self.run(task, doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_count_fills_the_row() {
        let config = CarouselConfig::projects();
        let layout = compute_layout(&config, 940.0, false, 7);

        assert_eq!(layout.visible, 3);
        assert_eq!(layout.card_width, 300.0);
        assert_eq!(layout.gap, 20.0);
        assert_eq!(layout.viewport_width, 940.0);
        assert_eq!(layout.max_logical_index, 4);
    }

    #[test]
    fn test_fixed_width_floors_the_fit() {
        let config = CarouselConfig::skills();
        // (1000 + 20) / (300 + 20) = 3.19
        let layout = compute_layout(&config, 1000.0, false, 5);

        assert_eq!(layout.visible, 3);
        assert_eq!(layout.card_width, 300.0);
        assert_eq!(layout.viewport_width, 940.0);
        assert_eq!(layout.max_logical_index, 2);
    }

    #[test]
    fn test_fixed_width_shows_at_least_one_card() {
        let layout = compute_layout(&CarouselConfig::skills(), 120.0, false, 5);
        assert_eq!(layout.visible, 1);
        assert_eq!(layout.max_logical_index, 4);
    }

    #[test]
    fn test_mobile_shows_one_full_width_card() {
        let layout = compute_layout(&CarouselConfig::projects(), 360.0, true, 7);

        assert_eq!(layout.visible, 1);
        assert_eq!(layout.card_width, 360.0);
        assert_eq!(layout.gap, 10.0);
        assert_eq!(layout.viewport_width, 360.0);
        assert_eq!(layout.max_logical_index, 6);
    }

    #[test]
    fn test_fewer_items_than_visible_cards_pins_max_index_to_zero() {
        let layout = compute_layout(&CarouselConfig::projects(), 940.0, false, 2);
        assert_eq!(layout.max_logical_index, 0);
    }

    #[test]
    fn test_anchors_derive_from_name_unless_overridden() {
        let mut config = CarouselConfig::skills();
        config.dots_id = Some("skill-dots".into());
        let anchors = config.anchors();

        assert_eq!(anchors.track, "skills-track");
        assert_eq!(anchors.viewport, "skills-carousel");
        assert_eq!(anchors.prev, "skills-prev");
        assert_eq!(anchors.dots, "skill-dots");
    }
}
