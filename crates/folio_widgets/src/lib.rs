//! Folio Widget Library
//!
//! Page controllers with timer- and FSM-driven interactions:
//!
//! - [`Carousel`]: infinite-loop card carousel with clone padding, autoplay,
//!   drag gestures, dot indicators and debounced relayout
//! - [`Timeline`]: sidebar navigator kept in sync with the entry in view,
//!   plus the [`TimelineTabs`] strip used on narrow viewports
//! - [`MobileMenu`]: hamburger panel mirroring the timeline links

pub mod carousel;
pub mod menu;
pub mod tabs;
pub mod timeline;

pub use carousel::{compute_layout, Carousel, CarouselConfig, CarouselLayout, LayoutPolicy};
pub use menu::{MenuConfig, MenuResponse, MenuState, MobileMenu};
pub use tabs::{TabsConfig, TimelineTabs};
pub use timeline::{
    aligned_scroll_top, Timeline, TimelineConfig, TimelineEntry, TimelineNavigation,
};
